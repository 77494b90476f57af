use thiserror::Error;

/// Result type for object store operations
pub type BlobResult<T> = Result<T, BlobError>;

/// Errors that can occur while talking to the object store
#[derive(Error, Debug)]
pub enum BlobError {
    #[error("Invalid storage configuration: {message}")]
    Config { message: String },

    #[error("Object store timed out during {operation}")]
    Timeout { operation: &'static str },

    #[error("Object store unavailable: {message}")]
    Unavailable { message: String },

    #[error("Storage backend error: {source}")]
    Backend {
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },
}

impl BlobError {
    /// Create a backend error from any error type
    pub fn backend<E>(error: E) -> Self
    where
        E: std::error::Error + Send + Sync + 'static,
    {
        Self::Backend {
            source: Box::new(error),
        }
    }

    pub fn config<S: Into<String>>(message: S) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    pub fn unavailable<S: Into<String>>(message: S) -> Self {
        Self::Unavailable {
            message: message.into(),
        }
    }
}
