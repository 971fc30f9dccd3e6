//! HTTP route handlers.
//!
//! Probe, toggle and timestamp endpoints are never cacheable; the dashboard
//! has no cache policy of its own.
//!
//! Request tracing is enabled via middleware that generates a unique request ID
//! for each incoming request, allowing correlation of all logs within a request.

pub mod home;
pub mod probes;
pub mod timestamps;
pub mod toggles;

use axum::{middleware, routing::get, Router};
use http::header::{HeaderValue, CACHE_CONTROL};
use tower_http::set_header::SetResponseHeaderLayer;

use crate::config::CACHE_CONTROL_PROBES;
use crate::middleware::request_id_layer;
use crate::state::AppState;

/// Creates the Axum router with all routes.
pub fn create_router(state: AppState) -> Router {
    // Probe surface - always fresh
    let probe_routes = Router::new()
        .route("/liveness-health", get(probes::liveness))
        .route("/readiness-health", get(probes::readiness))
        .route(
            "/toggle-liveness-failure",
            get(toggles::toggle_liveness_failure),
        )
        .route(
            "/toggle-readiness-failure",
            get(toggles::toggle_readiness_failure),
        )
        .route("/timestamps", get(timestamps::timestamps))
        .layer(SetResponseHeaderLayer::overriding(
            CACHE_CONTROL,
            HeaderValue::from_static(CACHE_CONTROL_PROBES),
        ));

    let home_routes = Router::new().route("/", get(home::index));

    Router::new()
        .merge(probe_routes)
        .merge(home_routes)
        .with_state(state)
        // Request ID middleware - creates root span with request_id for correlation
        .layer(middleware::from_fn(request_id_layer))
}
