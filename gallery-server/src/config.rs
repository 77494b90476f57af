//! Server configuration: defaults, `GALLERY__*` environment overrides and
//! the typed settings the services run with.

use std::collections::HashMap;
use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

use anyhow::{bail, Context, Result};
use gallery_blob::S3Config;
use gallery_core::{GalleryConfig, GalleryConfigSnapshot};
use gallery_media::{PartitionMode, DEFAULT_EXTENSIONS};

pub const ENV_PREFIX: &str = "GALLERY__";

/// Defaults for every key the server reads. Existing values win.
pub fn apply_defaults(config: &mut GalleryConfig) {
    config.set_default("http.host", "127.0.0.1");
    config.set_default("http.port", "3030");
    config.set_default("http.cors_origins", "*");
    config.set_default("paginate.default", "20");
    config.set_default("paginate.max", "100");
    config.set_default("media.extensions", DEFAULT_EXTENSIONS.join(","));
    config.set_default("listing.partition", "static");
    config.set_default("cache.listing_ttl_secs", "600");
    config.set_default("cache.batch_ttl_secs", "21600");
    config.set_default("cache.backend", "memory");
    config.set_default("cache.dir", "storage/cache");
    config.set_default("cache.sweep_secs", "60");
}

/// Environment first, then defaults for whatever is still unset.
pub fn load() -> GalleryConfig {
    let mut config = GalleryConfig::new();
    let loaded = config.load_env(ENV_PREFIX);
    tracing::debug!(loaded, "configuration loaded from environment");
    apply_defaults(&mut config);
    config
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CacheBackend {
    Memory,
    File,
}

impl CacheBackend {
    pub fn name(&self) -> &'static str {
        match self {
            CacheBackend::Memory => "memory",
            CacheBackend::File => "file",
        }
    }
}

impl FromStr for CacheBackend {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "memory" => Ok(CacheBackend::Memory),
            "file" => Ok(CacheBackend::File),
            other => Err(format!("unknown cache backend `{other}` (expected `memory` or `file`)")),
        }
    }
}

#[derive(Debug, Clone)]
pub struct ServerSettings {
    pub cors_origins: Vec<String>,
    pub default_per_page: usize,
    pub max_per_page: usize,
    /// Ordered; the batch concatenates categories in this order.
    pub categories: Vec<String>,
    pub quotas: HashMap<String, usize>,
    pub extensions: Vec<String>,
    pub partition: PartitionMode,
    pub listing_ttl: Duration,
    pub batch_ttl: Duration,
    pub cache_backend: CacheBackend,
    pub batch_cache_backend: CacheBackend,
    pub cache_dir: PathBuf,
    pub sweep_interval: Duration,
}

impl ServerSettings {
    pub fn from_snapshot(snap: &GalleryConfigSnapshot) -> Result<Self> {
        let max_per_page: usize = snap.parse_or("paginate.max", 100)?;
        let default_per_page: usize = snap.parse_or("paginate.default", 20)?;
        if max_per_page == 0 || default_per_page == 0 {
            bail!("paginate.default and paginate.max must be at least 1");
        }

        let categories = snap.get_list("media.categories");
        let quotas = quotas_for(&categories, snap.section("media.quota"))?;

        let cache_backend: CacheBackend = snap.parse_or("cache.backend", CacheBackend::Memory)?;
        let batch_cache_backend = snap.parse_or("cache.batch_backend", cache_backend)?;
        let partition: PartitionMode = snap.parse_or("listing.partition", PartitionMode::Static)?;

        let extensions = match snap.get_list("media.extensions") {
            list if list.is_empty() => DEFAULT_EXTENSIONS.iter().map(|s| s.to_string()).collect(),
            list => list,
        };

        Ok(Self {
            cors_origins: snap.get_list("http.cors_origins"),
            default_per_page: default_per_page.min(max_per_page),
            max_per_page,
            categories,
            quotas,
            extensions,
            partition,
            listing_ttl: Duration::from_secs(snap.parse_or("cache.listing_ttl_secs", 600)?),
            batch_ttl: Duration::from_secs(snap.parse_or("cache.batch_ttl_secs", 21600)?),
            cache_backend,
            batch_cache_backend,
            cache_dir: PathBuf::from(
                snap.get_string("cache.dir")
                    .unwrap_or_else(|| "storage/cache".to_string()),
            ),
            sweep_interval: Duration::from_secs(snap.parse_or::<u64>("cache.sweep_secs", 60)?.max(1)),
        })
    }

    /// `per_page` query value capped at `paginate.max`.
    pub fn per_page(&self, requested: Option<usize>) -> usize {
        requested.unwrap_or(self.default_per_page).min(self.max_per_page)
    }
}

/// Quotas keyed by the configured category name.
///
/// Environment keys arrive lower-cased, so a quota key matches its
/// category case-insensitively; an exact match wins over a folded one.
fn quotas_for(categories: &[String], entries: Vec<(String, String)>) -> Result<HashMap<String, usize>> {
    let mut quotas = HashMap::new();
    for (key, raw) in entries {
        let quota = raw
            .trim()
            .parse::<usize>()
            .with_context(|| format!("invalid value {raw:?} for config key `media.quota.{key}`"))?;

        let mut matched = false;
        for category in categories.iter().filter(|c| c.eq_ignore_ascii_case(&key)) {
            matched = true;
            if *category == key {
                quotas.insert(category.clone(), quota);
            } else {
                quotas.entry(category.clone()).or_insert(quota);
            }
        }
        if !matched {
            tracing::warn!(category = %key, "quota configured for a category that is not listed");
            quotas.insert(key, quota);
        }
    }
    Ok(quotas)
}

pub fn s3_config(snap: &GalleryConfigSnapshot) -> Result<S3Config> {
    let bucket = snap
        .get_string("s3.bucket")
        .context("config key `s3.bucket` is required (GALLERY__S3__BUCKET)")?;

    let mut s3 = S3Config::new(bucket)
        .with_path_style(snap.parse_or("s3.path_style", false)?)
        .with_timeout(snap.parse_or("s3.timeout_secs", 30)?)
        .with_max_attempts(snap.parse_or("s3.max_attempts", 3)?);

    if let Some(region) = snap.get_string("s3.region") {
        s3 = s3.with_region(region);
    }
    if let Some(endpoint) = snap.get_string("s3.endpoint") {
        s3 = s3.with_endpoint(endpoint);
    }
    if let Some(public_url) = snap.get_string("s3.public_url") {
        s3 = s3.with_public_url(public_url);
    }
    if let (Some(access), Some(secret)) = (snap.get_string("s3.access_key"), snap.get_string("s3.secret_key")) {
        s3 = s3.with_credentials(access, secret);
    }

    s3.validate()?;
    Ok(s3)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn snapshot(pairs: &[(&str, &str)]) -> GalleryConfigSnapshot {
        let mut config = GalleryConfig::new();
        for (k, v) in pairs {
            config.set(*k, *v);
        }
        apply_defaults(&mut config);
        config.snapshot()
    }

    #[test]
    fn defaults() {
        let settings = ServerSettings::from_snapshot(&snapshot(&[])).unwrap();
        assert_eq!(settings.default_per_page, 20);
        assert_eq!(settings.max_per_page, 100);
        assert_eq!(settings.partition, PartitionMode::Static);
        assert_eq!(settings.listing_ttl, Duration::from_secs(600));
        assert_eq!(settings.batch_ttl, Duration::from_secs(6 * 60 * 60));
        assert_eq!(settings.cache_backend, CacheBackend::Memory);
        assert_eq!(settings.batch_cache_backend, CacheBackend::Memory);
        assert_eq!(settings.cors_origins, vec!["*"]);
        assert!(settings.extensions.contains(&"webm".to_string()));
        assert!(settings.categories.is_empty());
    }

    #[test]
    fn categories_quotas_and_backends() {
        let settings = ServerSettings::from_snapshot(&snapshot(&[
            ("media.categories", "bom-dia,boa-tarde,boa-noite"),
            ("media.quota.bom-dia", "5"),
            ("media.quota.boa-tarde", "2"),
            ("cache.backend", "memory"),
            ("cache.batch_backend", "FILE"),
            ("listing.partition", "session"),
        ]))
        .unwrap();

        assert_eq!(settings.categories, vec!["bom-dia", "boa-tarde", "boa-noite"]);
        assert_eq!(settings.quotas.get("bom-dia"), Some(&5));
        assert_eq!(settings.quotas.get("boa-noite"), None);
        assert_eq!(settings.batch_cache_backend, CacheBackend::File);
        assert_eq!(settings.partition, PartitionMode::Session);
    }

    #[test]
    fn env_quotas_reach_mixed_case_categories() {
        let mut config = GalleryConfig::new();
        config.load_vars(
            [
                ("GALLERY__MEDIA__CATEGORIES".to_string(), "Photos,Bom-Dia".to_string()),
                ("GALLERY__MEDIA__QUOTA__Photos".to_string(), "2".to_string()),
                ("GALLERY__MEDIA__QUOTA__BOM-DIA".to_string(), "4".to_string()),
            ],
            ENV_PREFIX,
        );
        apply_defaults(&mut config);

        let settings = ServerSettings::from_snapshot(&config.snapshot()).unwrap();
        assert_eq!(settings.categories, vec!["Photos", "Bom-Dia"]);
        assert_eq!(settings.quotas.get("Photos"), Some(&2));
        assert_eq!(settings.quotas.get("Bom-Dia"), Some(&4));
    }

    #[test]
    fn exact_quota_key_wins_over_folded_one() {
        let settings = ServerSettings::from_snapshot(&snapshot(&[
            ("media.categories", "Photos"),
            ("media.quota.photos", "9"),
            ("media.quota.Photos", "3"),
        ]))
        .unwrap();
        assert_eq!(settings.quotas.get("Photos"), Some(&3));
    }

    #[test]
    fn bad_values_name_their_key() {
        let err = ServerSettings::from_snapshot(&snapshot(&[("media.quota.bom-dia", "lots")])).unwrap_err();
        assert!(err.to_string().contains("media.quota.bom-dia"));

        let err = ServerSettings::from_snapshot(&snapshot(&[("cache.backend", "redis")])).unwrap_err();
        assert!(err.to_string().contains("cache.backend"));

        assert!(ServerSettings::from_snapshot(&snapshot(&[("paginate.default", "0")])).is_err());
    }

    #[test]
    fn per_page_is_capped() {
        let settings = ServerSettings::from_snapshot(&snapshot(&[
            ("paginate.default", "500"),
            ("paginate.max", "50"),
        ]))
        .unwrap();
        assert_eq!(settings.per_page(None), 50);
        assert_eq!(settings.per_page(Some(10)), 10);
        assert_eq!(settings.per_page(Some(80)), 50);
    }

    #[test]
    fn s3_settings() {
        assert!(s3_config(&snapshot(&[])).is_err());

        let s3 = s3_config(&snapshot(&[
            ("s3.bucket", "gallery"),
            ("s3.endpoint", "http://localhost:9000"),
            ("s3.path_style", "true"),
            ("s3.access_key", "ak"),
            ("s3.secret_key", "sk"),
        ]))
        .unwrap();
        assert_eq!(s3.bucket, "gallery");
        assert_eq!(s3.region, "us-east-1");
        assert!(s3.path_style);
        assert_eq!(s3.access_key.as_deref(), Some("ak"));
    }
}
