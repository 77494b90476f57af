use std::time::Duration;

use tokio::task::JoinHandle;
use tokio::time::interval;
use tracing::{debug, info, warn};

use crate::CacheStores;

/// Periodic sweep of expired entries across every configured store.
pub struct CacheReaper {
    stores: CacheStores,
    interval: Duration,
}

impl CacheReaper {
    pub fn new(stores: CacheStores) -> Self {
        Self {
            stores,
            interval: Duration::from_secs(60),
        }
    }

    pub fn with_interval(stores: CacheStores, interval: Duration) -> Self {
        Self { stores, interval }
    }

    /// Run forever on the current task.
    pub async fn start(self) {
        let mut ticker = interval(self.interval);
        info!(interval = ?self.interval, "starting cache reaper");

        loop {
            ticker.tick().await;
            let removed = self.reap_once().await;
            if removed > 0 {
                info!(removed, "purged expired cache entries");
            } else {
                debug!("no expired cache entries");
            }
        }
    }

    pub fn spawn(self) -> JoinHandle<()> {
        tokio::spawn(self.start())
    }

    /// One sweep over all stores. Failures are logged per store.
    pub async fn reap_once(&self) -> usize {
        let mut removed = 0;
        for store in self.stores.all() {
            match store.purge_expired().await {
                Ok(n) => removed += n,
                Err(e) => warn!(store = store.name(), error = %e, "cache purge failed"),
            }
        }
        removed
    }
}
