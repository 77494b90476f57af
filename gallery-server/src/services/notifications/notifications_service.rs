use std::collections::HashMap;
use std::sync::Arc;

use anyhow::Result;
use async_trait::async_trait;
use axum::http::{HeaderMap, StatusCode, Uri};
use axum::response::{IntoResponse, Response};
use axum::Json;
use chrono::{DateTime, Utc};
use gallery_axum::{GalleryAxumError, RestParams};
use gallery_core::{
    bail_gallery, GalleryError, GalleryService, ServiceCapabilities, ServiceMethodKind,
    SessionContext,
};
use gallery_media::UpdateBatch;
use serde::Serialize;
use serde_json::json;

use crate::services::{GalleryParams, MediaState};

pub const LATEST_BATCH_ID: &str = "latest-batch";

/// Wire shape of the latest update batch.
#[derive(Debug, Clone, Serialize)]
pub struct LatestBatch {
    pub update_number: u64,
    pub timestamp: DateTime<Utc>,
    pub data: Vec<String>,
    pub count: usize,
}

impl From<UpdateBatch> for LatestBatch {
    fn from(batch: UpdateBatch) -> Self {
        Self {
            update_number: batch.version_number,
            timestamp: batch.generated_at,
            count: batch.items.len(),
            data: batch.items,
        }
    }
}

pub struct NotificationsService {
    state: Arc<MediaState>,
}

impl NotificationsService {
    pub fn new(state: Arc<MediaState>) -> Self {
        Self { state }
    }
}

#[async_trait]
impl GalleryService<LatestBatch, GalleryParams> for NotificationsService {
    fn capabilities(&self) -> ServiceCapabilities {
        ServiceCapabilities::from_methods(vec![ServiceMethodKind::Get])
    }

    async fn get(&self, _ctx: &SessionContext, id: &str, _params: GalleryParams) -> Result<LatestBatch> {
        if id != LATEST_BATCH_ID {
            bail_gallery!(not_found, "Unknown notification feed: {}", id);
        }

        let settings = &self.state.settings;
        let batch = self
            .state
            .resolver
            .resolve_latest_batch(&settings.categories, &settings.quotas, settings.batch_ttl)
            .await
            .map_err(|e| GalleryError::from(e).into_anyhow())?;
        Ok(batch.into())
    }
}

/// `GET /notifications/latest-batch`: 200 with the batch, or 404
/// `{update_number: 0, data: []}` while nothing is published.
pub async fn latest_batch(
    service: &NotificationsService,
    headers: HeaderMap,
    query: HashMap<String, String>,
    uri: Uri,
) -> Result<Response, GalleryAxumError> {
    let params = RestParams::from_parts("rest", &headers, query, "GET", &uri);
    let ctx = params.session_context();

    let batch = service.get(&ctx, LATEST_BATCH_ID, params).await?;
    if batch.update_number == 0 {
        let body = json!({ "update_number": 0, "data": [] });
        return Ok((StatusCode::NOT_FOUND, Json(body)).into_response());
    }
    Ok(Json(batch).into_response())
}
