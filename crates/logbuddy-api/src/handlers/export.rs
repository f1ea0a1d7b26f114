//! CSV export handlers.

use std::path::Path;

use axum::Json;
use axum::extract::State;
use axum::http::header;
use axum::response::IntoResponse;
use chrono::Utc;

use logbuddy_service::export::{export_file_name, to_tabular, write_export};

use crate::dto::request::FilterParams;
use crate::dto::response::ExportResponse;
use crate::error::ApiResult;
use crate::extractors::QueryParams;
use crate::state::AppState;

/// GET /export/csv
///
/// Streams the matching entries back as a CSV attachment.
pub async fn download_csv(
    State(state): State<AppState>,
    QueryParams(params): QueryParams<FilterParams>,
) -> ApiResult<impl IntoResponse> {
    let filter = params.into_filter()?;
    let entries = state.entries.snapshot(&filter).await?;
    let body = to_tabular(&entries)?;
    let filename = export_file_name(Utc::now());

    tracing::info!(records = entries.len(), filename = %filename, "CSV export downloaded");

    Ok((
        [
            (header::CONTENT_TYPE, "text/csv; charset=utf-8".to_string()),
            (
                header::CONTENT_DISPOSITION,
                format!("attachment; filename=\"{filename}\""),
            ),
        ],
        body,
    ))
}

/// POST /export/csv
///
/// Writes the matching entries to a file in the export directory.
pub async fn write_csv(
    State(state): State<AppState>,
    QueryParams(params): QueryParams<FilterParams>,
) -> ApiResult<Json<ExportResponse>> {
    let filter = params.into_filter()?;
    let entries = state.entries.snapshot(&filter).await?;
    let dir = Path::new(&state.config.export.directory);

    let summary = write_export(dir, &entries, Utc::now()).await?;

    Ok(Json(ExportResponse {
        message: "Export completed".to_string(),
        filename: summary.filename,
        records_exported: summary.records_exported,
    }))
}
