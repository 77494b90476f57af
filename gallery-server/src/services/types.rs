use std::sync::Arc;

use anyhow::Result;
use gallery_blob::ObjectLister;
use gallery_cache::{CacheStores, SingleFlight};
use gallery_media::{
    MediaFilter, RandomSource, RandomizedPaginationCache, ReadThroughCache, UpdateBatchResolver,
};

use crate::config::ServerSettings;

pub type GalleryParams = gallery_axum::RestParams;

/// Everything the services share.
pub struct MediaState {
    pub settings: ServerSettings,
    pub resolver: UpdateBatchResolver,
    pub listings: RandomizedPaginationCache,
}

impl MediaState {
    /// Listings use the default cache store; the batch may be pinned to
    /// another one (usually `file`, so every process sees the same batch).
    pub fn new(
        settings: ServerSettings,
        lister: Arc<dyn ObjectLister>,
        stores: &CacheStores,
        rng: Arc<RandomSource>,
    ) -> Result<Self> {
        let flights = SingleFlight::new();
        let listing_cache = ReadThroughCache::new(stores.default_store()).with_flights(flights.clone());
        let batch_cache = ReadThroughCache::new(stores.store(settings.batch_cache_backend.name())?)
            .with_flights(flights);

        let listings = RandomizedPaginationCache::new(Arc::clone(&lister), listing_cache, Arc::clone(&rng))
            .with_filter(MediaFilter::new(&settings.extensions));
        let resolver = UpdateBatchResolver::new(lister, batch_cache, rng);

        Ok(Self {
            settings,
            resolver,
            listings,
        })
    }
}
