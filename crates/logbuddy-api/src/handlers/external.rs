//! External integration handlers: weather lookup and webhook intake.

use axum::Json;
use axum::extract::State;
use serde_json::{Map, Value};

use logbuddy_worker::WebhookTaskHandler;

use crate::dto::request::WeatherParams;
use crate::dto::response::{WeatherResponse, WebhookResponse};
use crate::error::ApiResult;
use crate::extractors::{JsonBody, QueryParams};
use crate::state::AppState;

/// GET /external-api/weather
///
/// Upstream failures are reported in the body with `success: false`.
pub async fn weather(
    State(state): State<AppState>,
    QueryParams(params): QueryParams<WeatherParams>,
) -> Json<WeatherResponse> {
    let city = params
        .city
        .filter(|c| !c.trim().is_empty())
        .unwrap_or_else(|| state.config.weather.default_city.clone());

    match state.weather.current(&city).await {
        Ok(report) => Json(WeatherResponse {
            success: true,
            data: Some(report.data),
            error: None,
        }),
        Err(e) => Json(WeatherResponse {
            success: false,
            data: None,
            error: Some(e.message),
        }),
    }
}

/// POST /external-api/webhook
///
/// Hands the payload to the worker and returns immediately. Processing is
/// best effort: a full queue drops the task, and the caller is not told.
pub async fn webhook(
    State(state): State<AppState>,
    JsonBody(payload): JsonBody<Map<String, Value>>,
) -> ApiResult<Json<WebhookResponse>> {
    tracing::info!("Received webhook data");
    state
        .dispatcher
        .dispatch(WebhookTaskHandler::task(Value::Object(payload)));

    Ok(Json(WebhookResponse {
        status: "accepted".to_string(),
        message: "Webhook data will be processed".to_string(),
    }))
}
