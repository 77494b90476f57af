//! # Errors (Feathers-style)
//!
//! Services report failures as a structured `GalleryError` carried inside
//! `anyhow::Error`, so lower layers can attach context freely while the
//! transport still recovers the status code and client-facing shape.
//!
//! The JSON form is `{name, message, code, className[, data][, errors]}`.

use std::fmt;

use anyhow::Error as AnyError;
use serde_json::Value;

/// A convenience result type for gallery service APIs.
pub type GalleryResult<T> = std::result::Result<T, AnyError>;

/// Error class names + status codes used by the gallery surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    BadRequest,       // 400
    NotFound,         // 404
    GeneralError,     // 500
    NotImplemented,   // 501
    Unavailable,      // 503
}

impl ErrorKind {
    pub fn status_code(&self) -> u16 {
        match self {
            ErrorKind::BadRequest => 400,
            ErrorKind::NotFound => 404,
            ErrorKind::GeneralError => 500,
            ErrorKind::NotImplemented => 501,
            ErrorKind::Unavailable => 503,
        }
    }

    /// Error `name` (e.g. "NotFound")
    pub fn name(&self) -> &'static str {
        match self {
            ErrorKind::BadRequest => "BadRequest",
            ErrorKind::NotFound => "NotFound",
            ErrorKind::GeneralError => "GeneralError",
            ErrorKind::NotImplemented => "NotImplemented",
            ErrorKind::Unavailable => "Unavailable",
        }
    }

    /// Error `className` (kebab-cased)
    pub fn class_name(&self) -> &'static str {
        match self {
            ErrorKind::BadRequest => "bad-request",
            ErrorKind::NotFound => "not-found",
            ErrorKind::GeneralError => "general-error",
            ErrorKind::NotImplemented => "not-implemented",
            ErrorKind::Unavailable => "unavailable",
        }
    }
}

/// A structured gallery error that can live inside `anyhow::Error`.
#[derive(Debug)]
pub struct GalleryError {
    pub kind: ErrorKind,
    pub message: String,
    pub data: Option<Value>,
    pub errors: Option<Value>,
    pub source: Option<AnyError>,
}

impl GalleryError {
    pub fn new(kind: ErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
            data: None,
            errors: None,
            source: None,
        }
    }

    pub fn with_data(mut self, data: Value) -> Self {
        self.data = Some(data);
        self
    }

    pub fn with_errors(mut self, errors: Value) -> Self {
        self.errors = Some(errors);
        self
    }

    pub fn with_source(mut self, source: AnyError) -> Self {
        self.source = Some(source);
        self
    }

    pub fn code(&self) -> u16 {
        self.kind.status_code()
    }

    pub fn name(&self) -> &'static str {
        self.kind.name()
    }

    pub fn class_name(&self) -> &'static str {
        self.kind.class_name()
    }

    /// Convert into `anyhow::Error` so it flows through service calls.
    pub fn into_anyhow(self) -> AnyError {
        AnyError::new(self)
    }

    /// Find a `GalleryError` anywhere in an `anyhow::Error` chain.
    pub fn from_anyhow(err: &AnyError) -> Option<&GalleryError> {
        err.chain().find_map(|e| e.downcast_ref::<GalleryError>())
    }

    /// Turn any error into a GalleryError:
    /// - if it's already a GalleryError, keep it (lossless)
    /// - if one is carried further down the chain (as another error's
    ///   `source`), copy its shape and keep the whole chain as the source
    /// - otherwise wrap as GeneralError
    pub fn normalize(err: AnyError) -> GalleryError {
        let err = match err.downcast::<GalleryError>() {
            Ok(gallery) => return gallery,
            Err(other) => other,
        };
        let shape = Self::from_anyhow(&err).map(|inner| {
            (
                inner.kind,
                inner.message.clone(),
                inner.data.clone(),
                inner.errors.clone(),
            )
        });
        match shape {
            Some((kind, message, data, errors)) => GalleryError {
                kind,
                message,
                data,
                errors,
                source: Some(err),
            },
            None => GalleryError::new(ErrorKind::GeneralError, err.to_string()).with_source(err),
        }
    }

    /// Client-safe copy: drops the inner `source` chain.
    pub fn sanitize_for_client(&self) -> GalleryError {
        GalleryError {
            kind: self.kind,
            message: self.message.clone(),
            data: self.data.clone(),
            errors: self.errors.clone(),
            source: None,
        }
    }

    pub fn to_json(&self) -> Value {
        use serde_json::json;

        let mut base = json!({
            "name": self.name(),
            "message": self.message,
            "code": self.code(),
            "className": self.class_name(),
        });

        if let Some(d) = &self.data {
            base["data"] = d.clone();
        }
        if let Some(e) = &self.errors {
            base["errors"] = e.clone();
        }
        base
    }

    pub fn bad_request(msg: impl Into<String>) -> Self {
        Self::new(ErrorKind::BadRequest, msg)
    }
    pub fn not_found(msg: impl Into<String>) -> Self {
        Self::new(ErrorKind::NotFound, msg)
    }
    pub fn general_error(msg: impl Into<String>) -> Self {
        Self::new(ErrorKind::GeneralError, msg)
    }
    pub fn not_implemented(msg: impl Into<String>) -> Self {
        Self::new(ErrorKind::NotImplemented, msg)
    }
    pub fn unavailable(msg: impl Into<String>) -> Self {
        Self::new(ErrorKind::Unavailable, msg)
    }
}

impl fmt::Display for GalleryError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({}): {}", self.name(), self.code(), self.message)
    }
}

impl std::error::Error for GalleryError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        self.source
            .as_ref()
            .map(|e| e.as_ref() as &(dyn std::error::Error + 'static))
    }
}

/// Convenience helper for "bail with GalleryError".
#[macro_export]
macro_rules! bail_gallery {
    ($ctor:ident, $msg:expr) => {
        return Err($crate::errors::GalleryError::$ctor($msg).into_anyhow())
    };
    ($ctor:ident, $fmt:expr, $($arg:tt)*) => {
        return Err($crate::errors::GalleryError::$ctor(format!($fmt, $($arg)*)).into_anyhow())
    };
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn normalize_keeps_structured_errors() {
        let err = GalleryError::unavailable("bucket unreachable").into_anyhow();
        let normalized = GalleryError::normalize(err);
        assert_eq!(normalized.kind, ErrorKind::Unavailable);
        assert_eq!(normalized.code(), 503);
    }

    #[test]
    fn normalize_wraps_foreign_errors_as_general() {
        let normalized = GalleryError::normalize(anyhow::anyhow!("boom"));
        assert_eq!(normalized.kind, ErrorKind::GeneralError);
        assert!(normalized.message.contains("boom"));
        assert!(normalized.source.is_some());
    }

    #[test]
    fn normalize_sees_through_context() {
        let err = GalleryError::unavailable("bucket unreachable")
            .with_data(json!({"store": "s3"}))
            .into_anyhow()
            .context("resolving latest batch");
        let normalized = GalleryError::normalize(err);
        assert_eq!(normalized.kind, ErrorKind::Unavailable);
        assert_eq!(normalized.message, "bucket unreachable");
        assert_eq!(normalized.data, Some(json!({"store": "s3"})));
    }

    #[derive(Debug)]
    struct Listing(GalleryError);

    impl fmt::Display for Listing {
        fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            f.write_str("listing failed")
        }
    }

    impl std::error::Error for Listing {
        fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
            Some(&self.0)
        }
    }

    #[test]
    fn normalize_finds_errors_carried_as_a_source() {
        let err = AnyError::new(Listing(GalleryError::bad_request("page must be >= 1")));
        let normalized = GalleryError::normalize(err);
        assert_eq!(normalized.kind, ErrorKind::BadRequest);
        assert_eq!(normalized.message, "page must be >= 1");
        assert!(normalized.source.is_some());
    }

    #[test]
    fn from_anyhow_sees_through_context() {
        let err = GalleryError::bad_request("page must be >= 1")
            .into_anyhow()
            .context("listing images");
        let found = GalleryError::from_anyhow(&err).expect("gallery error in chain");
        assert_eq!(found.kind, ErrorKind::BadRequest);
    }

    #[test]
    fn json_shape_includes_optional_fields() {
        let err = GalleryError::bad_request("invalid query")
            .with_errors(json!({"page": ["must be a positive integer"]}));
        let body = err.sanitize_for_client().to_json();
        assert_eq!(body["name"], "BadRequest");
        assert_eq!(body["code"], 400);
        assert_eq!(body["className"], "bad-request");
        assert_eq!(body["errors"]["page"][0], "must be a positive integer");
        assert!(body.get("data").is_none());
    }
}
