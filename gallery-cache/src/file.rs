use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::time::Duration;

use async_trait::async_trait;
use base64::engine::general_purpose::{STANDARD, URL_SAFE_NO_PAD};
use base64::Engine;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tokio::fs;
use tracing::{debug, warn};
use uuid::Uuid;

use crate::{CacheError, CacheResult, KeyedCache};

const ENTRY_EXT: &str = "json";
const MAX_FILE_NAME: usize = 240;

#[derive(Debug, Serialize, Deserialize)]
struct FileEntry {
    key: String,
    expires_at: Option<DateTime<Utc>>,
    payload: String,
}

impl FileEntry {
    fn is_expired(&self, now: DateTime<Utc>) -> bool {
        matches!(self.expires_at, Some(at) if at <= now)
    }
}

/// One JSON file per key under a shared directory.
///
/// Writes go to a temp file first and are renamed into place, so readers
/// in other processes see either the old entry or the new one.
#[derive(Debug, Clone)]
pub struct FileCache {
    dir: PathBuf,
}

impl FileCache {
    /// Open (and create if needed) a cache directory.
    pub async fn open(dir: impl Into<PathBuf>) -> CacheResult<Self> {
        let dir = dir.into();
        fs::create_dir_all(&dir).await?;
        Ok(Self { dir })
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn path_for(&self, key: &str) -> CacheResult<PathBuf> {
        let name = format!("{}.{ENTRY_EXT}", URL_SAFE_NO_PAD.encode(key));
        if name.len() > MAX_FILE_NAME {
            return Err(CacheError::KeyTooLong(key.to_string()));
        }
        Ok(self.dir.join(name))
    }

    async fn read_entry(path: &Path) -> CacheResult<Option<FileEntry>> {
        let raw = match fs::read(path).await {
            Ok(raw) => raw,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(e.into()),
        };
        let entry = serde_json::from_slice(&raw)
            .map_err(|e| CacheError::corrupt(path.display().to_string(), e.to_string()))?;
        Ok(Some(entry))
    }

    async fn remove(path: &Path) -> CacheResult<bool> {
        match fs::remove_file(path).await {
            Ok(()) => Ok(true),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(false),
            Err(e) => Err(e.into()),
        }
    }
}

#[async_trait]
impl KeyedCache for FileCache {
    fn name(&self) -> &str {
        "file"
    }

    async fn get(&self, key: &str) -> CacheResult<Option<Vec<u8>>> {
        let path = self.path_for(key)?;
        let Some(entry) = Self::read_entry(&path).await? else {
            return Ok(None);
        };

        if entry.key != key {
            return Err(CacheError::corrupt(key, format!("file holds key {:?}", entry.key)));
        }
        if entry.is_expired(Utc::now()) {
            Self::remove(&path).await?;
            return Ok(None);
        }

        STANDARD
            .decode(entry.payload.as_bytes())
            .map(Some)
            .map_err(|e| CacheError::corrupt(key, e.to_string()))
    }

    async fn put(&self, key: &str, payload: Vec<u8>, ttl: Duration) -> CacheResult<()> {
        let path = self.path_for(key)?;
        if ttl.is_zero() {
            Self::remove(&path).await?;
            return Ok(());
        }

        let expires_at = chrono::Duration::from_std(ttl)
            .ok()
            .and_then(|ttl| Utc::now().checked_add_signed(ttl));
        let entry = FileEntry {
            key: key.to_string(),
            expires_at,
            payload: STANDARD.encode(payload),
        };
        let body = serde_json::to_vec(&entry)?;

        let tmp = self.dir.join(format!(".{}.tmp", Uuid::new_v4()));
        fs::write(&tmp, body).await?;
        if let Err(e) = fs::rename(&tmp, &path).await {
            let _ = fs::remove_file(&tmp).await;
            return Err(e.into());
        }
        debug!(key = %key, path = %path.display(), "cache entry written");
        Ok(())
    }

    async fn forget(&self, key: &str) -> CacheResult<bool> {
        let path = self.path_for(key)?;
        Self::remove(&path).await
    }

    async fn purge_expired(&self) -> CacheResult<usize> {
        let now = Utc::now();
        let mut removed = 0;
        let mut dir = fs::read_dir(&self.dir).await?;

        while let Some(item) = dir.next_entry().await? {
            let path = item.path();
            if path.extension().and_then(|e| e.to_str()) != Some(ENTRY_EXT) {
                continue;
            }

            let stale = match Self::read_entry(&path).await {
                Ok(Some(entry)) => entry.is_expired(now),
                Ok(None) => false,
                Err(e) => {
                    warn!(path = %path.display(), error = %e, "dropping unreadable cache file");
                    true
                }
            };
            if stale && Self::remove(&path).await? {
                removed += 1;
            }
        }
        Ok(removed)
    }
}
