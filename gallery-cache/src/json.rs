use std::time::Duration;

use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::{CacheError, CacheResult, KeyedCache};

/// Read and decode a JSON payload. Undecodable payloads are `Corrupt`.
pub async fn get_json<T>(cache: &dyn KeyedCache, key: &str) -> CacheResult<Option<T>>
where
    T: DeserializeOwned,
{
    match cache.get(key).await? {
        None => Ok(None),
        Some(bytes) => serde_json::from_slice(&bytes)
            .map(Some)
            .map_err(|e| CacheError::corrupt(key, e.to_string())),
    }
}

pub async fn put_json<T>(cache: &dyn KeyedCache, key: &str, value: &T, ttl: Duration) -> CacheResult<()>
where
    T: Serialize + ?Sized,
{
    let payload = serde_json::to_vec(value)?;
    cache.put(key, payload, ttl).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::MemoryCache;
    use serde::Deserialize;

    #[derive(Debug, PartialEq, Serialize, Deserialize)]
    struct Listing {
        category: String,
        items: Vec<String>,
    }

    #[tokio::test]
    async fn typed_values_survive_the_byte_boundary() {
        let cache = MemoryCache::new();
        let listing = Listing {
            category: "bom-dia".into(),
            items: vec!["https://cdn/a.png".into()],
        };

        put_json(&cache, "k", &listing, Duration::from_secs(60)).await.unwrap();
        let back: Option<Listing> = get_json(&cache, "k").await.unwrap();
        assert_eq!(back, Some(listing));
    }

    #[tokio::test]
    async fn garbage_payload_is_corrupt() {
        let cache = MemoryCache::new();
        cache.put("k", b"not json".to_vec(), Duration::from_secs(60)).await.unwrap();

        let err = get_json::<Listing>(&cache, "k").await.unwrap_err();
        assert!(matches!(err, CacheError::Corrupt { .. }));
    }
}
