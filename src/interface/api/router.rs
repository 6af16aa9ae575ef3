//! API Router configuration

use super::demo_call_handler::demo_call;
use super::invitation_handler::{health_check, invite, respond, AppState};
use super::metrics_handler::metrics_handler;
use axum::{
    routing::{get, post},
    Router,
};
use metrics_exporter_prometheus::PrometheusHandle;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

/// Build the API router
pub fn build_router(state: AppState, prometheus_handle: PrometheusHandle) -> Router {
    // Health check route (no auth required)
    let health_routes = Router::new().route("/health", get(health_check));

    // Invitation routes; /invite and /demo-call check the api_key themselves
    let invitation_routes = Router::new()
        .route("/invite", post(invite))
        .route("/response", post(respond))
        .route("/demo-call", post(demo_call))
        .with_state(state);

    // Metrics route (separate state)
    let metrics_routes = Router::new()
        .route("/metrics", get(metrics_handler))
        .with_state(prometheus_handle);

    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .merge(health_routes)
        .merge(invitation_routes)
        .merge(metrics_routes)
        .layer(cors)
        .layer(TraceLayer::new_for_http())
}
