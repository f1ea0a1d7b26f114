//! Route definitions for the LogBuddy HTTP API.

use std::time::Duration;

use axum::{
    Router,
    middleware as axum_middleware,
    routing::{get, post},
};
use tower_http::compression::CompressionLayer;
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;

use crate::handlers;
use crate::middleware;
use crate::state::AppState;

/// Build the complete Axum router with all routes and middleware.
pub fn build_router(state: AppState) -> Router {
    let timeout = Duration::from_secs(state.config.server.request_timeout_seconds);
    let cors = middleware::cors::build_cors_layer(&state.config.server.cors);

    Router::new()
        .merge(health_routes())
        .merge(log_routes())
        .merge(analytics_routes())
        .merge(export_routes())
        .merge(external_routes())
        .layer(CompressionLayer::new())
        .layer(TimeoutLayer::new(timeout))
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .layer(axum_middleware::from_fn(middleware::logging::request_logging))
        .with_state(state)
}

fn health_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(handlers::health::root))
        .route("/health", get(handlers::health::health))
}

fn log_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/logs",
            post(handlers::logs::create_log).get(handlers::logs::list_logs),
        )
        .route("/logs/{id}", get(handlers::logs::get_log))
}

fn analytics_routes() -> Router<AppState> {
    Router::new().route("/analytics", get(handlers::analytics::get_analytics))
}

fn export_routes() -> Router<AppState> {
    Router::new().route(
        "/export/csv",
        get(handlers::export::download_csv).post(handlers::export::write_csv),
    )
}

fn external_routes() -> Router<AppState> {
    Router::new()
        .route("/external-api/weather", get(handlers::external::weather))
        .route("/external-api/webhook", post(handlers::external::webhook))
}
