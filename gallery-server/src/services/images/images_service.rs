use std::sync::Arc;

use anyhow::Result;
use async_trait::async_trait;
use gallery_core::{GalleryError, GalleryService, ServiceCapabilities, SessionContext};
use gallery_media::Page;
use tracing::debug;

use crate::services::{GalleryParams, MediaState};

use super::images_shared;

pub struct ImagesService {
    state: Arc<MediaState>,
}

impl ImagesService {
    pub fn new(state: Arc<MediaState>) -> Self {
        Self { state }
    }

    async fn list(&self, ctx: &SessionContext, category: &str, params: GalleryParams) -> Result<Page<String>> {
        let settings = &self.state.settings;
        let page = params.positive_usize("page")?.unwrap_or(1);
        let per_page = settings.per_page(params.positive_usize("per_page")?);
        let partition = settings.partition.partition_for(ctx.session_id.as_ref());

        debug!(category = %category, page, per_page, partition = %partition, "listing images");

        self.state
            .listings
            .list_category(category, &partition, page, per_page, settings.listing_ttl)
            .await
            .map_err(|e| GalleryError::from(e).into_anyhow())
    }
}

#[async_trait]
impl GalleryService<Page<String>, GalleryParams> for ImagesService {
    fn capabilities(&self) -> ServiceCapabilities {
        images_shared::read_capabilities()
    }

    async fn find(&self, ctx: &SessionContext, params: GalleryParams) -> Result<Page<String>> {
        self.list(ctx, images_shared::ALL_CATEGORIES, params).await
    }

    async fn get(&self, ctx: &SessionContext, category: &str, params: GalleryParams) -> Result<Page<String>> {
        self.list(ctx, category, params).await
    }
}
