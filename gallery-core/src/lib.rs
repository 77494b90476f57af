//! gallery-core: framework-agnostic core for the gallery service.
//!
//! Holds the pieces every other crate agrees on: structured errors,
//! the string key/value configuration, the session context that rides
//! along with each request, and the read-only service contract that
//! transports (HTTP today) mount.

pub mod app;
pub mod config;
pub mod errors;
pub mod service;
pub mod session;

pub use app::GalleryApp;
pub use config::{GalleryConfig, GalleryConfigSnapshot};
pub use errors::{ErrorKind, GalleryError, GalleryResult};
pub use service::{GalleryService, ServiceCapabilities, ServiceMethodKind};
pub use session::{SessionContext, SessionId};
