use gallery_blob::BlobError;
use gallery_core::GalleryError;
use thiserror::Error;

pub type MediaResult<T> = Result<T, MediaError>;

#[derive(Error, Debug)]
pub enum MediaError {
    #[error("Object store unavailable: {source}")]
    Storage {
        #[from]
        source: BlobError,
    },

    #[error("page must be a positive integer, got {0}")]
    InvalidPage(usize),

    #[error("per_page must be a positive integer, got {0}")]
    InvalidPerPage(usize),

    #[error("unknown partition mode {0:?} (expected `static` or `session`)")]
    InvalidPartitionMode(String),
}

impl From<MediaError> for GalleryError {
    fn from(err: MediaError) -> Self {
        let message = err.to_string();
        match err {
            MediaError::Storage { .. } => {
                GalleryError::unavailable(message).with_source(anyhow::Error::new(err))
            }
            MediaError::InvalidPage(_) | MediaError::InvalidPerPage(_) => {
                GalleryError::bad_request(message)
            }
            MediaError::InvalidPartitionMode(_) => GalleryError::general_error(message),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use gallery_core::ErrorKind;

    #[test]
    fn storage_failures_are_unavailable() {
        let err: GalleryError = MediaError::from(BlobError::unavailable("connection refused")).into();
        assert_eq!(err.kind, ErrorKind::Unavailable);
        assert!(err.message.contains("connection refused"));
        assert!(err.source.is_some());
    }

    #[test]
    fn caller_mistakes_are_bad_requests() {
        let err: GalleryError = MediaError::InvalidPerPage(0).into();
        assert_eq!(err.code(), 400);
    }
}
