//! Route definitions for the gateway API.

use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};
use tower_http::{compression::CompressionLayer, limit::RequestBodyLimitLayer, trace::TraceLayer};

use crate::{handlers, middleware, state::AppState};

/// Create the main API router
pub fn create_router(state: AppState) -> Router {
    let server = &state.config.server;
    let cors = middleware::cors_layer(&server.allowed_origins);
    let body_limit = server.body_limit_bytes;

    Router::new()
        // Health endpoint
        .route("/health", get(handlers::health_check))
        // Metrics endpoint
        .route("/metrics", get(handlers::metrics_endpoint))
        // Summary API
        .nest("/api", api_routes())
        // Apply middleware
        .layer(DefaultBodyLimit::disable())
        .layer(RequestBodyLimitLayer::new(body_limit))
        .layer(CompressionLayer::new())
        .layer(TraceLayer::new_for_http())
        .layer(axum::middleware::from_fn(middleware::request_id_middleware))
        .layer(cors)
        // Add state
        .with_state(state)
}

fn api_routes() -> Router<AppState> {
    Router::new()
        .route("/summary", post(handlers::summarize))
        .route("/providers", get(handlers::list_providers))
}
