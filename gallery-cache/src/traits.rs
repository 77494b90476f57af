use std::time::Duration;

use async_trait::async_trait;

use crate::CacheResult;

/// Key/value cache with explicit per-entry TTL.
///
/// Implementations must be safe for concurrent use. Writes replace the
/// whole entry; concurrent writers race and the last one wins. An expired
/// entry is never returned by `get`.
#[async_trait]
pub trait KeyedCache: Send + Sync {
    /// Backend name used in logs and store lookups.
    fn name(&self) -> &str;

    async fn get(&self, key: &str) -> CacheResult<Option<Vec<u8>>>;

    /// Store `payload` under `key` for `ttl`. A zero TTL removes the key.
    async fn put(&self, key: &str, payload: Vec<u8>, ttl: Duration) -> CacheResult<()>;

    /// Remove `key`, reporting whether anything was stored.
    async fn forget(&self, key: &str) -> CacheResult<bool>;

    /// Drop every expired entry, returning how many were removed.
    async fn purge_expired(&self) -> CacheResult<usize> {
        Ok(0)
    }
}
