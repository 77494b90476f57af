use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use gallery_core::GalleryError;

#[derive(Debug)]
pub struct GalleryAxumError(pub anyhow::Error);

impl From<anyhow::Error> for GalleryAxumError {
    fn from(e: anyhow::Error) -> Self {
        Self(e)
    }
}

impl From<GalleryError> for GalleryAxumError {
    fn from(e: GalleryError) -> Self {
        Self(e.into_anyhow())
    }
}

impl IntoResponse for GalleryAxumError {
    fn into_response(self) -> Response {
        // Looks through anyhow contexts for the structured error
        let gallery = GalleryError::normalize(self.0);
        if gallery.code() >= 500 {
            tracing::error!(error = ?gallery, code = gallery.code(), "request failed");
        }

        let safe = gallery.sanitize_for_client();

        let status = StatusCode::from_u16(safe.code()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
        (status, Json(safe.to_json())).into_response()
    }
}
