//! Latest update batch across all categories.
//!
//! Files join a batch by carrying `update_<N>` in their name. The batch is
//! the set of files whose tag equals the highest tag anywhere in the
//! configured categories, sampled per category and shuffled.

use std::collections::{HashMap, HashSet};
use std::sync::Arc;
use std::time::Duration;

use chrono::{DateTime, Utc};
use gallery_blob::{category_prefix, ObjectLister};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::{MediaKey, MediaResult, RandomSource, ReadThroughCache};

/// Cache key of the one latest batch.
pub const LATEST_BATCH_KEY: &str = "media:latest-batch";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UpdateBatch {
    /// `0` means nothing has been published yet; `items` is then empty.
    pub version_number: u64,
    pub items: Vec<String>,
    pub generated_at: DateTime<Utc>,
}

impl UpdateBatch {
    pub fn empty() -> Self {
        Self {
            version_number: 0,
            items: Vec::new(),
            generated_at: Utc::now(),
        }
    }

    pub fn is_published(&self) -> bool {
        self.version_number > 0
    }

    pub fn count(&self) -> usize {
        self.items.len()
    }
}

pub struct UpdateBatchResolver {
    lister: Arc<dyn ObjectLister>,
    cache: ReadThroughCache,
    rng: Arc<RandomSource>,
}

impl UpdateBatchResolver {
    pub fn new(lister: Arc<dyn ObjectLister>, cache: ReadThroughCache, rng: Arc<RandomSource>) -> Self {
        Self { lister, cache, rng }
    }

    /// Cached latest batch, rebuilt from a full scan once `ttl` runs out.
    ///
    /// Categories without a quota contribute every matching file.
    pub async fn resolve_latest_batch(
        &self,
        categories: &[String],
        quotas: &HashMap<String, usize>,
        ttl: Duration,
    ) -> MediaResult<UpdateBatch> {
        self.cache
            .get_or_build(LATEST_BATCH_KEY, ttl, || self.rebuild(categories, quotas))
            .await
    }

    async fn rebuild(
        &self,
        categories: &[String],
        quotas: &HashMap<String, usize>,
    ) -> MediaResult<UpdateBatch> {
        let mut scanned = Vec::with_capacity(categories.len());
        for category in categories {
            let keys = self.lister.list_keys(&category_prefix(category)).await?;
            let parsed: Vec<MediaKey> = keys.into_iter().map(MediaKey::parse).collect();
            scanned.push((category.as_str(), parsed));
        }

        // Pass 1: the global version is the highest tag seen anywhere
        let version = scanned
            .iter()
            .flat_map(|(_, keys)| keys.iter().filter_map(MediaKey::version_tag))
            .max()
            .unwrap_or(0);

        if version == 0 {
            info!(categories = categories.len(), "no versioned media found");
            return Ok(UpdateBatch::empty());
        }

        // Pass 2: sample each category's files of that version
        let mut items = Vec::new();
        for (category, keys) in &scanned {
            let mut urls: Vec<String> = keys
                .iter()
                .filter(|key| key.version_tag() == Some(version))
                .map(|key| self.lister.url_for(key.key()))
                .collect();
            let matching = urls.len();

            self.rng.shuffle(&mut urls);
            if let Some(&quota) = quotas.get(*category) {
                urls.truncate(quota);
            }
            debug!(category = %category, version, matching, selected = urls.len(), "sampled category");
            items.extend(urls);
        }

        // Nested categories (`a` and `a/sub`) list the same objects twice
        let mut seen = HashSet::new();
        items.retain(|url| seen.insert(url.clone()));
        self.rng.shuffle(&mut items);

        info!(version, count = items.len(), "update batch rebuilt");
        Ok(UpdateBatch {
            version_number: version,
            items,
            generated_at: Utc::now(),
        })
    }
}
