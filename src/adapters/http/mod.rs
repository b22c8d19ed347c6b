//! HTTP adapters - REST API implementations.
//!
//! Each area has its own route module; [`api_router`] mounts them all behind
//! the bearer token middleware and [`with_http_layers`] adds the transport
//! concerns (request ids, tracing, timeout, CORS, compression).

pub mod admin;
pub mod clients;
pub mod error;
pub mod extract;
pub mod membership;
pub mod middleware;
pub mod multipart;
pub mod state;
pub mod store;
pub mod webhook;

pub use error::ApiError;
pub use state::AppState;

use axum::http::Request;
use axum::middleware::from_fn_with_state;
use axum::routing::get;
use axum::{Json, Router};
use http::{HeaderName, HeaderValue};
use serde_json::{json, Value};
use tower::ServiceBuilder;
use tower_http::compression::CompressionLayer;
use tower_http::cors::{AllowOrigin, Any, CorsLayer};
use tower_http::request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer};
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;

use crate::config::ServerConfig;

use self::admin::admin_routes;
use self::clients::client_routes;
use self::membership::membership_routes;
use self::middleware::auth_middleware;
use self::store::store_routes;

const REQUEST_ID_HEADER: &str = "x-request-id";

/// Every API route, with the session middleware applied.
pub fn api_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health))
        .nest("/clients", client_routes())
        .nest("/admin", admin_routes())
        .nest("/membership", membership_routes())
        .nest("/store", store_routes())
        .layer(from_fn_with_state(
            state.session_validator.clone(),
            auth_middleware,
        ))
        .with_state(state)
}

/// Wraps the router in the transport layers. Outermost first.
pub fn with_http_layers(router: Router, config: &ServerConfig) -> Router {
    let request_id = HeaderName::from_static(REQUEST_ID_HEADER);

    router.layer(
        ServiceBuilder::new()
            .layer(SetRequestIdLayer::new(request_id.clone(), MakeRequestUuid))
            .layer(
                TraceLayer::new_for_http().make_span_with(|request: &Request<_>| {
                    let request_id = request
                        .headers()
                        .get(REQUEST_ID_HEADER)
                        .and_then(|v| v.to_str().ok())
                        .unwrap_or_default();
                    tracing::info_span!(
                        "http_request",
                        method = %request.method(),
                        uri = %request.uri(),
                        request_id = %request_id,
                    )
                }),
            )
            .layer(PropagateRequestIdLayer::new(request_id))
            .layer(TimeoutLayer::new(config.request_timeout()))
            .layer(cors_layer(config))
            .layer(CompressionLayer::new()),
    )
}

/// Configured origins only; any origin when none are configured.
fn cors_layer(config: &ServerConfig) -> CorsLayer {
    let origins: Vec<HeaderValue> = config
        .cors_origins_list()
        .iter()
        .filter_map(|origin| match origin.parse() {
            Ok(value) => Some(value),
            Err(_) => {
                tracing::warn!(origin = %origin, "Ignoring unparseable CORS origin");
                None
            }
        })
        .collect();

    if origins.is_empty() {
        return CorsLayer::permissive();
    }

    CorsLayer::new()
        .allow_origin(AllowOrigin::list(origins))
        .allow_methods(Any)
        .allow_headers(Any)
}

async fn health() -> Json<Value> {
    Json(json!({ "status": "ok" }))
}
