use std::sync::Arc;

use gallery_core::GalleryService;

/// Router state for one mounted service.
pub struct ServiceState<R, P>
where
    R: Send + 'static,
    P: Send + 'static,
{
    pub service: Arc<dyn GalleryService<R, P>>,
}

impl<R, P> Clone for ServiceState<R, P>
where
    R: Send + 'static,
    P: Send + 'static,
{
    fn clone(&self) -> Self {
        Self {
            service: Arc::clone(&self.service),
        }
    }
}

impl<R, P> ServiceState<R, P>
where
    R: Send + 'static,
    P: Send + 'static,
{
    pub fn new(service: Arc<dyn GalleryService<R, P>>) -> Self {
        Self { service }
    }
}
