use std::sync::Arc;

use gallery_core::GalleryService;
use gallery_media::Page;

pub mod types;
pub use types::{GalleryParams, MediaState};

pub mod images;
pub mod notifications;

pub struct GalleryServices {
    pub images: Arc<dyn GalleryService<Page<String>, GalleryParams>>,
    pub notifications: Arc<notifications::NotificationsService>,
}

pub fn configure(state: Arc<MediaState>) -> GalleryServices {
    let images: Arc<dyn GalleryService<Page<String>, GalleryParams>> =
        Arc::new(images::ImagesService::new(Arc::clone(&state)));
    let notifications = Arc::new(notifications::NotificationsService::new(state));

    GalleryServices {
        images,
        notifications,
    }
}
