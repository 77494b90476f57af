use anyhow::Result;
use async_trait::async_trait;

use crate::errors::GalleryError;
use crate::session::SessionContext;

/// Read methods a gallery service can expose.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ServiceMethodKind {
    Find,
    Get,
}

/// Capabilities describe which methods a service wants to expose
/// to the outside world.
///
/// Adapters (like gallery-axum) use this to mount only allowed routes.
#[derive(Debug, Clone)]
pub struct ServiceCapabilities {
    pub allowed_methods: Vec<ServiceMethodKind>,
}

impl ServiceCapabilities {
    /// `find` + `get`.
    pub fn read_only() -> Self {
        Self {
            allowed_methods: vec![ServiceMethodKind::Find, ServiceMethodKind::Get],
        }
    }

    pub fn from_methods(methods: Vec<ServiceMethodKind>) -> Self {
        Self {
            allowed_methods: methods,
        }
    }

    pub fn allows(&self, method: ServiceMethodKind) -> bool {
        self.allowed_methods.contains(&method)
    }
}

/// Service contract, Feathers-flavoured but read-only:
///
/// - `find` → the collection view (a page, a batch, ...)
/// - `get`  → one addressed view by id
///
/// Both default to `NotImplemented`, so a service overrides only what it
/// supports and declares it through `capabilities`.
#[async_trait]
pub trait GalleryService<R, P = ()>: Send + Sync
where
    R: Send + 'static,
    P: Send + 'static,
{
    fn capabilities(&self) -> ServiceCapabilities {
        ServiceCapabilities::read_only()
    }

    async fn find(&self, _ctx: &SessionContext, _params: P) -> Result<R> {
        Err(GalleryError::not_implemented("Method not implemented: find").into_anyhow())
    }

    async fn get(&self, _ctx: &SessionContext, _id: &str, _params: P) -> Result<R> {
        Err(GalleryError::not_implemented("Method not implemented: get").into_anyhow())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::ErrorKind;

    struct FindOnly;

    #[async_trait]
    impl GalleryService<u32> for FindOnly {
        fn capabilities(&self) -> ServiceCapabilities {
            ServiceCapabilities::from_methods(vec![ServiceMethodKind::Find])
        }

        async fn find(&self, _ctx: &SessionContext, _params: ()) -> Result<u32> {
            Ok(7)
        }
    }

    #[tokio::test]
    async fn unimplemented_methods_report_not_implemented() {
        let svc = FindOnly;
        let ctx = SessionContext::anonymous();

        assert_eq!(svc.find(&ctx, ()).await.unwrap(), 7);

        let err = svc.get(&ctx, "x", ()).await.unwrap_err();
        let gallery = GalleryError::from_anyhow(&err).unwrap();
        assert_eq!(gallery.kind, ErrorKind::NotImplemented);
        assert!(!svc.capabilities().allows(ServiceMethodKind::Get));
    }
}
