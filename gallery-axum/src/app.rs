use std::sync::Arc;

use axum::body::Body;
use axum::handler::Handler;
use axum::http::{HeaderName, HeaderValue, Method, Request, Uri};
use axum::routing::get;
use axum::Router;
use gallery_core::{GalleryApp, GalleryError, GalleryService};
use serde::Serialize;
use serde_json::json;
use tokio::net::{TcpListener, ToSocketAddrs};
use tower::ServiceBuilder;
use tower_http::cors::{AllowOrigin, Any, CorsLayer};
use tower_http::request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer};
use tower_http::trace::TraceLayer;
use tracing::{info, warn};

use crate::params::{FromRestParams, REQUEST_ID_HEADER};
use crate::{rest, GalleryAxumError};

pub struct AxumApp {
    pub app: Arc<GalleryApp>,
    pub router: Router<()>,
    cors: Option<CorsLayer>,
}

impl Clone for AxumApp {
    fn clone(&self) -> Self {
        Self {
            app: Arc::clone(&self.app),
            router: self.router.clone(),
            cors: self.cors.clone(),
        }
    }
}

impl AxumApp {
    pub fn new(app: GalleryApp) -> Self {
        Self {
            app: Arc::new(app),
            router: Router::new(),
            cors: None,
        }
    }

    /// Plain `GET` handler at `path`.
    pub fn service<H, T>(mut self, path: &str, handler: H) -> Self
    where
        H: Handler<T, ()> + Clone + Send + Sync + 'static,
        T: 'static,
    {
        self.router = self.router.route(path, get(handler));
        self
    }

    /// Mount a gallery service's REST routes under `path`.
    pub fn use_service<R, P>(mut self, path: &str, service: Arc<dyn GalleryService<R, P>>) -> Self
    where
        R: Serialize + Send + Sync + 'static,
        P: FromRestParams + Send + Sync + 'static,
    {
        self.router = self.router.nest(path, rest::service_router(service));
        self
    }

    /// Allowed CORS origins; empty or `*` allows any origin.
    pub fn with_cors_origins(mut self, origins: &[String]) -> Self {
        self.cors = Some(cors_layer(origins));
        self
    }

    /// Final router: JSON 404 fallback, CORS, request ids and tracing.
    pub fn into_router(self) -> Router {
        let mut router = self.router.fallback(not_found);
        if let Some(cors) = self.cors {
            router = router.layer(cors);
        }

        router.layer(
            ServiceBuilder::new()
                .layer(SetRequestIdLayer::x_request_id(MakeRequestUuid))
                .layer(TraceLayer::new_for_http().make_span_with(|req: &Request<Body>| {
                    let request_id = req
                        .headers()
                        .get(REQUEST_ID_HEADER)
                        .and_then(|v| v.to_str().ok())
                        .unwrap_or("-");
                    tracing::info_span!(
                        "http",
                        method = %req.method(),
                        uri = %req.uri(),
                        request_id = %request_id,
                    )
                }))
                .layer(PropagateRequestIdLayer::x_request_id()),
        )
    }

    pub async fn listen<A>(self, addr: A) -> anyhow::Result<()>
    where
        A: ToSocketAddrs,
    {
        let listener = TcpListener::bind(addr).await?;
        info!(addr = %listener.local_addr()?, "listening");
        axum::serve(listener, self.into_router()).await?;
        Ok(())
    }
}

pub fn axum(app: GalleryApp) -> AxumApp {
    AxumApp::new(app)
}

async fn not_found(uri: Uri) -> GalleryAxumError {
    GalleryError::not_found("Page not found")
        .with_data(json!({ "path": uri.path() }))
        .into()
}

fn cors_layer(origins: &[String]) -> CorsLayer {
    let base = CorsLayer::new()
        .allow_methods([Method::GET, Method::OPTIONS])
        .allow_headers(Any)
        .expose_headers([HeaderName::from_static(REQUEST_ID_HEADER)]);

    if origins.is_empty() || origins.iter().any(|o| o.trim() == "*") {
        return base.allow_origin(Any);
    }

    let allowed: Vec<HeaderValue> = origins
        .iter()
        .filter_map(|origin| match HeaderValue::from_str(origin.trim()) {
            Ok(value) => Some(value),
            Err(_) => {
                warn!(origin = %origin, "ignoring invalid CORS origin");
                None
            }
        })
        .collect();
    base.allow_origin(AllowOrigin::list(allowed))
}
