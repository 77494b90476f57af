use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use gallery_cache::{get_json, put_json, KeyedCache, SingleFlight};
use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::{debug, warn};

use crate::MediaResult;

/// Read-through access to a [`KeyedCache`] with single-flight rebuilds.
///
/// The cache is an optimization: read failures and corrupt entries count
/// as misses, write failures are logged and dropped. Only the rebuild
/// itself can fail the caller.
#[derive(Clone)]
pub struct ReadThroughCache {
    cache: Arc<dyn KeyedCache>,
    flights: SingleFlight,
}

impl ReadThroughCache {
    pub fn new(cache: Arc<dyn KeyedCache>) -> Self {
        Self {
            cache,
            flights: SingleFlight::new(),
        }
    }

    /// Share rebuild locks with other caches over the same store.
    pub fn with_flights(mut self, flights: SingleFlight) -> Self {
        self.flights = flights;
        self
    }

    pub async fn get_or_build<T, F, Fut>(&self, key: &str, ttl: Duration, build: F) -> MediaResult<T>
    where
        T: Serialize + DeserializeOwned,
        F: FnOnce() -> Fut,
        Fut: Future<Output = MediaResult<T>>,
    {
        if let Some(hit) = self.lookup(key).await {
            debug!(cache_key = %key, store = self.cache.name(), "cache hit");
            return Ok(hit);
        }

        let _flight = self.flights.acquire(key).await;
        // Someone may have rebuilt while we waited for the lock
        if let Some(hit) = self.lookup(key).await {
            debug!(cache_key = %key, "cache filled by concurrent rebuild");
            return Ok(hit);
        }

        debug!(cache_key = %key, store = self.cache.name(), "cache miss, rebuilding");
        let value = build().await?;
        self.store(key, &value, ttl).await;
        Ok(value)
    }

    async fn lookup<T: DeserializeOwned>(&self, key: &str) -> Option<T> {
        match get_json(self.cache.as_ref(), key).await {
            Ok(value) => value,
            Err(e) => {
                warn!(cache_key = %key, store = self.cache.name(), error = %e, "cache read failed, treating as miss");
                None
            }
        }
    }

    async fn store<T: Serialize>(&self, key: &str, value: &T, ttl: Duration) {
        if let Err(e) = put_json(self.cache.as_ref(), key, value, ttl).await {
            warn!(cache_key = %key, store = self.cache.name(), error = %e, "cache write failed");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::FailingCache;
    use crate::MediaError;
    use gallery_blob::BlobError;
    use gallery_cache::MemoryCache;
    use std::sync::atomic::{AtomicUsize, Ordering};

    const TTL: Duration = Duration::from_secs(60);

    #[tokio::test]
    async fn builds_once_then_serves_hits() {
        let cache = ReadThroughCache::new(Arc::new(MemoryCache::new()));
        let counter = AtomicUsize::new(0);
        let builds = &counter;

        for _ in 0..3 {
            let value: Vec<u32> = cache
                .get_or_build("k", TTL, move || async move {
                    builds.fetch_add(1, Ordering::SeqCst);
                    Ok(vec![1, 2, 3])
                })
                .await
                .unwrap();
            assert_eq!(value, vec![1, 2, 3]);
        }
        assert_eq!(builds.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn failed_builds_are_not_cached() {
        let cache = ReadThroughCache::new(Arc::new(MemoryCache::new()));

        let err = cache
            .get_or_build::<Vec<u32>, _, _>("k", TTL, || async {
                Err(MediaError::from(BlobError::unavailable("down")))
            })
            .await
            .unwrap_err();
        assert!(matches!(err, MediaError::Storage { .. }));

        let value: Vec<u32> = cache.get_or_build("k", TTL, || async { Ok(vec![9]) }).await.unwrap();
        assert_eq!(value, vec![9]);
    }

    #[tokio::test]
    async fn broken_cache_degrades_to_rebuilds() {
        let cache = ReadThroughCache::new(Arc::new(FailingCache));
        let counter = AtomicUsize::new(0);
        let builds = &counter;

        for _ in 0..2 {
            let value: String = cache
                .get_or_build("k", TTL, move || async move {
                    builds.fetch_add(1, Ordering::SeqCst);
                    Ok("fresh".to_string())
                })
                .await
                .unwrap();
            assert_eq!(value, "fresh");
        }
        assert_eq!(builds.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn corrupt_entries_are_rebuilt() {
        let memory = Arc::new(MemoryCache::new());
        memory.put("k", b"{oops".to_vec(), TTL).await.unwrap();
        let cache = ReadThroughCache::new(memory.clone());

        let value: u64 = cache.get_or_build("k", TTL, || async { Ok(5) }).await.unwrap();
        assert_eq!(value, 5);
        assert_eq!(memory.get("k").await.unwrap(), Some(b"5".to_vec()));
    }
}
