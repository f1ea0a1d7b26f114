//! Log entry handlers.

use axum::Json;
use axum::extract::{Path, State};

use crate::dto::request::{CreateLogRequest, LogQueryParams};
use crate::dto::response::LogEntryResponse;
use crate::error::ApiResult;
use crate::extractors::{QueryParams, ValidatedJson};
use crate::state::AppState;

/// POST /logs
pub async fn create_log(
    State(state): State<AppState>,
    ValidatedJson(req): ValidatedJson<CreateLogRequest>,
) -> ApiResult<Json<LogEntryResponse>> {
    tracing::info!(level = %req.level, source = %req.source, "Creating log entry");
    let entry = state.entries.append(req.into()).await?;
    Ok(Json(entry.into()))
}

/// GET /logs
pub async fn list_logs(
    State(state): State<AppState>,
    QueryParams(params): QueryParams<LogQueryParams>,
) -> ApiResult<Json<Vec<LogEntryResponse>>> {
    let query = params.into_query()?;
    let entries = state.entries.query(&query).await?;
    tracing::info!(count = entries.len(), "Retrieved log entries");
    Ok(Json(entries.into_iter().map(LogEntryResponse::from).collect()))
}

/// GET /logs/{id}
pub async fn get_log(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> ApiResult<Json<LogEntryResponse>> {
    let entry = state.entries.get(id).await?;
    Ok(Json(entry.into()))
}
