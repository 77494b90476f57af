//! # gallery-media
//!
//! The two read paths of the gallery:
//!
//! - [`UpdateBatchResolver`]: finds the highest `update_<N>` tag across all
//!   categories and assembles a quota-limited, shuffled batch of that version.
//! - [`RandomizedPaginationCache`]: shuffles a category once per TTL window
//!   (per partition) and serves stable page slices from the cached order.
//!
//! Both sit behind a read-through cache so the object store is listed at
//! most once per key per TTL window, even under concurrent misses.

pub mod batch;
pub mod cached;
mod error;
pub mod filter;
pub mod key;
pub mod listing;
pub mod paginate;
pub mod partition;
pub mod random;

#[cfg(test)]
mod test_support;

pub use batch::{UpdateBatch, UpdateBatchResolver, LATEST_BATCH_KEY};
pub use cached::ReadThroughCache;
pub use error::{MediaError, MediaResult};
pub use filter::{MediaFilter, DEFAULT_EXTENSIONS};
pub use key::{KeyParser, MediaKey};
pub use listing::{CategoryListing, RandomizedPaginationCache};
pub use paginate::{Page, Paginator};
pub use partition::{PartitionKey, PartitionMode};
pub use random::RandomSource;
