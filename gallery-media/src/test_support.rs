use std::io;
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use gallery_blob::{BlobResult, MemoryLister, ObjectLister};
use gallery_cache::{CacheError, CacheResult, KeyedCache};

/// A cache whose every operation fails, like an unreachable backend.
pub(crate) struct FailingCache;

fn unreachable_backend() -> CacheError {
    io::Error::new(io::ErrorKind::ConnectionRefused, "cache backend unreachable").into()
}

#[async_trait]
impl KeyedCache for FailingCache {
    fn name(&self) -> &str {
        "failing"
    }

    async fn get(&self, _key: &str) -> CacheResult<Option<Vec<u8>>> {
        Err(unreachable_backend())
    }

    async fn put(&self, _key: &str, _payload: Vec<u8>, _ttl: Duration) -> CacheResult<()> {
        Err(unreachable_backend())
    }

    async fn forget(&self, _key: &str) -> CacheResult<bool> {
        Err(unreachable_backend())
    }
}

/// Wraps a lister and holds every listing open for `delay`, so concurrent
/// cache misses actually overlap.
pub(crate) struct SlowLister {
    pub(crate) inner: Arc<MemoryLister>,
    pub(crate) delay: Duration,
}

#[async_trait]
impl ObjectLister for SlowLister {
    async fn list_keys(&self, prefix: &str) -> BlobResult<Vec<String>> {
        tokio::time::sleep(self.delay).await;
        self.inner.list_keys(prefix).await
    }

    fn url_for(&self, key: &str) -> String {
        self.inner.url_for(key)
    }
}
