//! # gallery-cache: TTL key/value cache
//!
//! A deliberately small cache contract: `get`, `put` with an explicit TTL,
//! `forget`. Payloads are opaque bytes; `get_json` / `put_json` layer
//! serde on top. Entries are replaced wholesale, never patched.
//!
//! Backends:
//!
//! - [`MemoryCache`]: process-local, fastest
//! - [`FileCache`]: one file per key, visible to every process sharing the directory
//!
//! [`CacheStores`] names the configured backends so callers can pin an
//! operation to a specific one, [`SingleFlight`] collapses concurrent
//! rebuilds of the same key, and [`CacheReaper`] sweeps expired entries.

mod error;
mod file;
mod json;
mod memory;
mod reaper;
mod single_flight;
mod stores;
pub mod traits;

pub use error::{CacheError, CacheResult};
pub use file::FileCache;
pub use json::{get_json, put_json};
pub use memory::MemoryCache;
pub use reaper::CacheReaper;
pub use single_flight::{FlightGuard, SingleFlight};
pub use stores::CacheStores;
pub use traits::KeyedCache;
