use std::collections::BTreeSet;
use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use parking_lot::RwLock;

use crate::{BlobError, BlobResult, ObjectLister, PublicUrl};

/// In-memory lister for tests and local development.
///
/// Counts `list_keys` calls so callers can assert that a cache actually
/// shields the store, and can be switched into a failing mode to exercise
/// the "store unreachable" path.
pub struct MemoryLister {
    keys: RwLock<BTreeSet<String>>,
    urls: PublicUrl,
    list_calls: AtomicUsize,
    failure: RwLock<Option<String>>,
}

impl MemoryLister {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            keys: RwLock::new(BTreeSet::new()),
            urls: PublicUrl::new(base_url),
            list_calls: AtomicUsize::new(0),
            failure: RwLock::new(None),
        }
    }

    pub fn with_keys<I, S>(self, keys: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.keys.write().extend(keys.into_iter().map(Into::into));
        self
    }

    pub fn insert(&self, key: impl Into<String>) {
        self.keys.write().insert(key.into());
    }

    pub fn remove(&self, key: &str) -> bool {
        self.keys.write().remove(key)
    }

    pub fn len(&self) -> usize {
        self.keys.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.keys.read().is_empty()
    }

    /// Number of `list_keys` calls served so far, failed ones included.
    pub fn list_calls(&self) -> usize {
        self.list_calls.load(Ordering::SeqCst)
    }

    /// Make every following `list_keys` fail with `Unavailable`.
    pub fn fail_with(&self, message: impl Into<String>) {
        *self.failure.write() = Some(message.into());
    }

    pub fn recover(&self) {
        *self.failure.write() = None;
    }
}

#[async_trait]
impl ObjectLister for MemoryLister {
    async fn list_keys(&self, prefix: &str) -> BlobResult<Vec<String>> {
        self.list_calls.fetch_add(1, Ordering::SeqCst);
        if let Some(message) = self.failure.read().clone() {
            return Err(BlobError::unavailable(message));
        }

        Ok(self
            .keys
            .read()
            .iter()
            .filter(|key| key.starts_with(prefix))
            .cloned()
            .collect())
    }

    fn url_for(&self, key: &str) -> String {
        self.urls.url_for(key)
    }
}
