use std::collections::BTreeMap;
use std::sync::Arc;

use crate::{CacheError, CacheResult, KeyedCache};

/// Named cache backends with one default.
///
/// Operations that need a specific backend (the batch cache is usually
/// pinned to the shared file store) look it up by name; everything else
/// takes the default.
#[derive(Clone)]
pub struct CacheStores {
    default: String,
    stores: BTreeMap<String, Arc<dyn KeyedCache>>,
}

impl CacheStores {
    pub fn new(store: Arc<dyn KeyedCache>) -> Self {
        let default = store.name().to_string();
        let mut stores = BTreeMap::new();
        stores.insert(default.clone(), store);
        Self { default, stores }
    }

    /// Register another backend under its own name.
    pub fn with_store(mut self, store: Arc<dyn KeyedCache>) -> Self {
        self.stores.insert(store.name().to_string(), store);
        self
    }

    pub fn default_store(&self) -> Arc<dyn KeyedCache> {
        // Inserted in `new` and never removed
        Arc::clone(&self.stores[&self.default])
    }

    pub fn store(&self, name: &str) -> CacheResult<Arc<dyn KeyedCache>> {
        self.stores
            .get(name)
            .cloned()
            .ok_or_else(|| CacheError::UnknownStore(name.to_string()))
    }

    /// Named store, or the default when `name` is `None`.
    pub fn resolve(&self, name: Option<&str>) -> CacheResult<Arc<dyn KeyedCache>> {
        match name {
            Some(name) => self.store(name),
            None => Ok(self.default_store()),
        }
    }

    pub fn names(&self) -> Vec<&str> {
        self.stores.keys().map(String::as_str).collect()
    }

    pub(crate) fn all(&self) -> impl Iterator<Item = &Arc<dyn KeyedCache>> {
        self.stores.values()
    }
}

impl std::fmt::Debug for CacheStores {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CacheStores")
            .field("default", &self.default)
            .field("stores", &self.names())
            .finish()
    }
}
