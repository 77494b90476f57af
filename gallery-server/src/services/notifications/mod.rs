pub mod notifications_service;

pub use notifications_service::{latest_batch, LatestBatch, NotificationsService, LATEST_BATCH_ID};
