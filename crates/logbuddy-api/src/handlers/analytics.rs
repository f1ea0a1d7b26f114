//! Analytics handler.

use axum::Json;
use axum::extract::State;
use chrono::{Duration, Utc};

use logbuddy_service::analytics::{recent_activity, summarize};

use crate::dto::request::FilterParams;
use crate::dto::response::AnalyticsResponse;
use crate::error::ApiResult;
use crate::extractors::QueryParams;
use crate::state::AppState;

const RECENT_WINDOW_HOURS: i64 = 24;
const RECENT_LIMIT: usize = 10;

/// GET /analytics
pub async fn get_analytics(
    State(state): State<AppState>,
    QueryParams(params): QueryParams<FilterParams>,
) -> ApiResult<Json<AnalyticsResponse>> {
    tracing::info!("Generating analytics report");
    let filter = params.into_filter()?;
    let entries = state.entries.snapshot(&filter).await?;

    let report = summarize(&entries);
    let recent = recent_activity(
        &entries,
        Utc::now(),
        Duration::hours(RECENT_WINDOW_HOURS),
        RECENT_LIMIT,
    );

    tracing::info!(total = report.total, "Analytics report generated");
    Ok(Json(AnalyticsResponse::new(report, recent)))
}
