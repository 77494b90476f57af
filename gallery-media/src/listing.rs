//! Shuffled, cache-stable category listings.
//!
//! A category is listed and shuffled once per partition per TTL window.
//! Every page request in that window slices the same cached order, so
//! paging never repeats or skips items.

use std::sync::Arc;
use std::time::Duration;

use gallery_blob::{category_prefix, ObjectLister};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::{
    MediaError, MediaFilter, MediaKey, MediaResult, Page, Paginator, PartitionKey, RandomSource,
    ReadThroughCache,
};

/// The full shuffled membership of a category at build time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryListing {
    pub category: String,
    pub items: Vec<String>,
}

pub struct RandomizedPaginationCache {
    lister: Arc<dyn ObjectLister>,
    cache: ReadThroughCache,
    rng: Arc<RandomSource>,
    filter: MediaFilter,
}

impl RandomizedPaginationCache {
    pub fn new(lister: Arc<dyn ObjectLister>, cache: ReadThroughCache, rng: Arc<RandomSource>) -> Self {
        Self {
            lister,
            cache,
            rng,
            filter: MediaFilter::default(),
        }
    }

    pub fn with_filter(mut self, filter: MediaFilter) -> Self {
        self.filter = filter;
        self
    }

    /// One page of `category` (empty category = whole bucket).
    ///
    /// `page` and `per_page` must be at least 1; pages past the end are
    /// empty with the real `total`.
    pub async fn list_category(
        &self,
        category: &str,
        partition: &PartitionKey,
        page: usize,
        per_page: usize,
        ttl: Duration,
    ) -> MediaResult<Page<String>> {
        let paginator = Paginator::new(per_page)?;
        if page == 0 {
            return Err(MediaError::InvalidPage(page));
        }

        let listing = self.listing(category, partition, ttl).await?;
        paginator.page(&listing.items, page)
    }

    /// The whole cached order for a partition, building it on a miss.
    pub async fn listing(
        &self,
        category: &str,
        partition: &PartitionKey,
        ttl: Duration,
    ) -> MediaResult<CategoryListing> {
        let key = partition.cache_key(category);
        self.cache
            .get_or_build(&key, ttl, || self.build(category))
            .await
    }

    async fn build(&self, category: &str) -> MediaResult<CategoryListing> {
        let keys = self.lister.list_keys(&category_prefix(category)).await?;
        let listed = keys.len();

        let mut items: Vec<String> = keys
            .into_iter()
            .map(MediaKey::parse)
            .filter(|key| self.filter.accepts(key))
            .map(|key| self.lister.url_for(key.key()))
            .collect();
        self.rng.shuffle(&mut items);

        info!(category = %category, listed, media = items.len(), "category listing rebuilt");
        Ok(CategoryListing {
            category: category.to_string(),
            items,
        })
    }
}
