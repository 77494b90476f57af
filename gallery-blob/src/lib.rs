//! # gallery-blob: object store listing
//!
//! The gallery never reads object bodies. All it needs from storage is:
//!
//! - the complete key set under a prefix (`list_keys`)
//! - the public URL of a key (`url_for`)
//!
//! ```text
//! ┌──────────────────────┐
//! │  gallery-media core  │  ← parsing, sampling, pagination
//! ├──────────────────────┤
//! │     ObjectLister     │  ← list + URL primitives
//! ├──────────────────────┤
//! │  S3 / memory backend │
//! └──────────────────────┘
//! ```
//!
//! Listing is linear in bucket size; callers are expected to cache.

mod config;
mod error;
mod memory_store;
mod s3_store;
pub mod store;
mod url;

pub use config::S3Config;
pub use error::{BlobError, BlobResult};
pub use memory_store::MemoryLister;
pub use s3_store::S3CompatibleLister;
pub use store::{category_prefix, ObjectLister};
pub use url::PublicUrl;
