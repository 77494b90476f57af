use std::collections::HashMap;
use std::sync::Arc;

use axum::{
    extract::{OriginalUri, Path, Query, State},
    http::HeaderMap,
    routing, Json, Router,
};
use gallery_core::{GalleryService, ServiceMethodKind};
use serde::Serialize;

use crate::{
    params::{FromRestParams, RestParams},
    GalleryAxumError, ServiceState,
};

/// `GET /` → `find`, `GET /{id}` → `get`, mounted only when the service's
/// capabilities allow them.
pub fn service_router<R, P>(service: Arc<dyn GalleryService<R, P>>) -> Router<()>
where
    R: Serialize + Send + Sync + 'static,
    P: FromRestParams + Send + Sync + 'static,
{
    let capabilities = service.capabilities();
    let state = ServiceState::new(service);
    let mut router = Router::new();

    if capabilities.allows(ServiceMethodKind::Find) {
        router = router.route(
            "/",
            routing::get(
                move |State(state): State<ServiceState<R, P>>,
                      headers: HeaderMap,
                      Query(query): Query<HashMap<String, String>>,
                      OriginalUri(uri): OriginalUri| async move {
                    let params = RestParams::from_parts("rest", &headers, query, "GET", &uri);
                    let ctx = params.session_context();
                    let params = P::from_rest_params(params);

                    let res = state.service.find(&ctx, params).await?;
                    Ok::<_, GalleryAxumError>(Json(res))
                },
            ),
        );
    }

    if capabilities.allows(ServiceMethodKind::Get) {
        router = router.route(
            "/{id}",
            routing::get(
                move |State(state): State<ServiceState<R, P>>,
                      headers: HeaderMap,
                      Query(query): Query<HashMap<String, String>>,
                      OriginalUri(uri): OriginalUri,
                      Path(id): Path<String>| async move {
                    let params = RestParams::from_parts("rest", &headers, query, "GET", &uri);
                    let ctx = params.session_context();
                    let params = P::from_rest_params(params);

                    let res = state.service.get(&ctx, &id, params).await?;
                    Ok::<_, GalleryAxumError>(Json(res))
                },
            ),
        );
    }

    router.with_state(state)
}
