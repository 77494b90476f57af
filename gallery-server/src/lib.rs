mod app;
pub mod config;
pub mod services;

use std::collections::HashMap;
use std::path::Path;
use std::sync::Arc;

use anyhow::{Context, Result};
use axum::extract::{OriginalUri, Query};
use axum::http::HeaderMap;
use gallery_axum::AxumApp;
use gallery_blob::{ObjectLister, S3CompatibleLister};
use gallery_cache::{CacheReaper, CacheStores, FileCache, KeyedCache, MemoryCache};
use gallery_core::GalleryConfig;
use gallery_media::RandomSource;

use crate::config::{CacheBackend, ServerSettings};
use crate::services::{notifications, MediaState};

pub use services::GalleryParams;

/// Production wiring: env configuration, S3 lister, configured cache
/// stores and a background cache reaper.
pub async fn build() -> Result<AxumApp> {
    let config = config::load();
    let snapshot = config.snapshot();
    let settings = ServerSettings::from_snapshot(&snapshot)?;

    let s3 = config::s3_config(&snapshot)?;
    let lister: Arc<dyn ObjectLister> = Arc::new(
        S3CompatibleLister::new(s3)
            .await
            .context("failed to set up the object store client")?,
    );

    let stores = cache_stores(&settings).await?;
    CacheReaper::with_interval(stores.clone(), settings.sweep_interval).spawn();

    build_with(config, settings, lister, stores, Arc::new(RandomSource::from_entropy()))
}

/// Wire the router from explicit collaborators.
pub fn build_with(
    config: GalleryConfig,
    settings: ServerSettings,
    lister: Arc<dyn ObjectLister>,
    stores: CacheStores,
    rng: Arc<RandomSource>,
) -> Result<AxumApp> {
    let ax = app::gallery_app(config);
    let cors_origins = settings.cors_origins.clone();
    let state = Arc::new(MediaState::new(settings, lister, &stores, rng)?);

    let svcs = services::configure(state);
    let feed = svcs.notifications;

    let ax = ax
        .use_service("/images", svcs.images)
        .service(
            "/notifications/latest-batch",
            move |headers: HeaderMap,
                  Query(query): Query<HashMap<String, String>>,
                  OriginalUri(uri): OriginalUri| {
                let feed = Arc::clone(&feed);
                async move { notifications::latest_batch(&feed, headers, query, uri).await }
            },
        )
        .service("/health", || async { "ok" })
        .with_cors_origins(&cors_origins);

    Ok(ax)
}

/// The configured default store plus the batch store when it differs.
pub async fn cache_stores(settings: &ServerSettings) -> Result<CacheStores> {
    let default = open_store(settings.cache_backend, &settings.cache_dir).await?;
    let mut stores = CacheStores::new(default);
    if settings.batch_cache_backend != settings.cache_backend {
        stores = stores.with_store(open_store(settings.batch_cache_backend, &settings.cache_dir).await?);
    }
    Ok(stores)
}

async fn open_store(backend: CacheBackend, dir: &Path) -> Result<Arc<dyn KeyedCache>> {
    let store: Arc<dyn KeyedCache> = match backend {
        CacheBackend::Memory => Arc::new(MemoryCache::new()),
        CacheBackend::File => Arc::new(
            FileCache::open(dir)
                .await
                .with_context(|| format!("failed to open cache directory {}", dir.display()))?,
        ),
    };
    Ok(store)
}
