//! gallery-axum: Axum adapter for gallery services.
//!
//! Mounts [`GalleryService`](gallery_core::GalleryService) implementations
//! as read-only REST routes, renders `GalleryError`s as Feathers-style JSON
//! and wraps everything in request-id, tracing and CORS layers.

pub mod app;
mod error;
pub mod params;
pub mod rest;
pub mod state;

pub use app::{axum, AxumApp};
pub use error::GalleryAxumError;
pub use params::{FromRestParams, RestParams};
pub use state::ServiceState;
