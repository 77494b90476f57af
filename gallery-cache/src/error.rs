use thiserror::Error;

/// Result type for cache operations
pub type CacheResult<T> = Result<T, CacheError>;

/// Infrastructure errors for cache backends
#[derive(Error, Debug)]
pub enum CacheError {
    #[error("Cache store not configured: {0}")]
    UnknownStore(String),

    #[error("Cache key too long for this backend: {0}")]
    KeyTooLong(String),

    #[error("Corrupt cache entry for {key}: {reason}")]
    Corrupt { key: String, reason: String },

    #[error("Cache I/O error: {source}")]
    Io {
        #[from]
        source: std::io::Error,
    },

    #[error("Cache serialization error: {source}")]
    Serialization {
        #[from]
        source: serde_json::Error,
    },
}

impl CacheError {
    pub fn corrupt(key: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::Corrupt {
            key: key.into(),
            reason: reason.into(),
        }
    }
}
