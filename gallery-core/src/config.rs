//! # Configuration
//!
//! A minimal string key/value store in the spirit of Feathers'
//! `app.set()` / `app.get()`. Keys are dotted (`cache.batch_ttl_secs`),
//! values are strings; typed access happens on a snapshot so callers
//! parse once at startup and fail fast on bad input.
//!
//! ## Environment overrides
//!
//! ```rust
//! use gallery_core::GalleryConfig;
//!
//! let mut config = GalleryConfig::new();
//! config.load_vars(
//!     [("GALLERY__PAGINATE__DEFAULT".to_string(), "25".to_string())],
//!     "GALLERY__",
//! );
//! assert_eq!(config.get("paginate.default"), Some("25"));
//! ```
//!
//! In production `load_env("GALLERY__")` reads the process environment
//! with the same normalization (`GALLERY__HTTP__PORT` → `http.port`).

use std::collections::HashMap;
use std::str::FromStr;

use anyhow::{anyhow, Result};

#[derive(Debug, Default)]
pub struct GalleryConfig {
    values: HashMap<String, String>,
}

impl GalleryConfig {
    /// Create an empty config store.
    pub fn new() -> Self {
        Self {
            values: HashMap::new(),
        }
    }

    /// Set a configuration key to a string value.
    pub fn set<K, V>(&mut self, key: K, value: V)
    where
        K: Into<String>,
        V: Into<String>,
    {
        self.values.insert(key.into(), value.into());
    }

    /// Set a key only if nothing configured it yet.
    pub fn set_default<K, V>(&mut self, key: K, value: V)
    where
        K: Into<String>,
        V: Into<String>,
    {
        self.values.entry(key.into()).or_insert_with(|| value.into());
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.values.get(key).map(|s| s.as_str())
    }

    pub fn has(&self, key: &str) -> bool {
        self.values.contains_key(key)
    }

    /// Import `PREFIX__A__B=value` pairs as `a.b = value`.
    pub fn load_vars<I>(&mut self, vars: I, prefix: &str) -> usize
    where
        I: IntoIterator<Item = (String, String)>,
    {
        let mut loaded = 0;
        for (key, value) in vars {
            if let Some(stripped) = key.strip_prefix(prefix) {
                let normalized = stripped.to_lowercase().replace("__", ".");
                if normalized.is_empty() {
                    continue;
                }
                tracing::debug!(key = %normalized, "config value loaded from environment");
                self.values.insert(normalized, value);
                loaded += 1;
            }
        }
        loaded
    }

    /// Import matching variables from the process environment.
    pub fn load_env(&mut self, prefix: &str) -> usize {
        self.load_vars(std::env::vars(), prefix)
    }

    pub fn snapshot(&self) -> GalleryConfigSnapshot {
        GalleryConfigSnapshot::new(self.values.clone())
    }
}

#[derive(Debug, Clone, Default)]
pub struct GalleryConfigSnapshot {
    map: HashMap<String, String>,
}

impl GalleryConfigSnapshot {
    pub(crate) fn new(map: HashMap<String, String>) -> Self {
        Self { map }
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.map.get(key).map(|s| s.as_str())
    }

    pub fn get_string(&self, key: &str) -> Option<String> {
        self.map.get(key).cloned()
    }

    /// Comma separated list, trimmed, empty items dropped. Order is kept.
    pub fn get_list(&self, key: &str) -> Vec<String> {
        self.get(key)
            .map(|raw| {
                raw.split(',')
                    .map(str::trim)
                    .filter(|s| !s.is_empty())
                    .map(str::to_string)
                    .collect()
            })
            .unwrap_or_default()
    }

    /// Parse a value, reporting the offending key when it doesn't parse.
    pub fn parse<T>(&self, key: &str) -> Result<Option<T>>
    where
        T: FromStr,
        T::Err: std::fmt::Display,
    {
        match self.get(key) {
            None => Ok(None),
            Some(raw) => raw
                .trim()
                .parse::<T>()
                .map(Some)
                .map_err(|e| anyhow!("invalid value {raw:?} for config key `{key}`: {e}")),
        }
    }

    pub fn parse_or<T>(&self, key: &str, default: T) -> Result<T>
    where
        T: FromStr,
        T::Err: std::fmt::Display,
    {
        Ok(self.parse(key)?.unwrap_or(default))
    }

    /// All `(suffix, value)` pairs under `prefix.`, e.g. `media.quota`.
    pub fn section(&self, prefix: &str) -> Vec<(String, String)> {
        let prefix = format!("{prefix}.");
        let mut entries: Vec<(String, String)> = self
            .map
            .iter()
            .filter_map(|(k, v)| k.strip_prefix(&prefix).map(|s| (s.to_string(), v.clone())))
            .collect();
        entries.sort();
        entries
    }
}
