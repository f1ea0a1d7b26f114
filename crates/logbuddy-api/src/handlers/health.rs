//! Root and health check handlers.

use axum::Json;
use axum::extract::State;
use chrono::Utc;

use logbuddy_entity::log_entry::format_timestamp;

use crate::dto::response::{HealthResponse, MessageResponse};
use crate::state::AppState;

/// GET /
pub async fn root() -> Json<MessageResponse> {
    tracing::info!("Root endpoint accessed");
    Json(MessageResponse {
        message: "Welcome to LogBuddy - Your logging companion!".to_string(),
    })
}

/// GET /health
pub async fn health(State(state): State<AppState>) -> Json<HealthResponse> {
    let reachable = match state.db.health_check().await {
        Ok(ok) => ok,
        Err(e) => {
            tracing::warn!(error = %e, "Database health check failed");
            false
        }
    };

    Json(HealthResponse {
        status: if reachable { "healthy" } else { "degraded" }.to_string(),
        timestamp: format_timestamp(&Utc::now()),
        version: env!("CARGO_PKG_VERSION").to_string(),
        database: if reachable { "connected" } else { "unavailable" }.to_string(),
    })
}
