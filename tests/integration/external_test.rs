//! Integration tests for the weather lookup and webhook intake.

mod helpers;

use http::StatusCode;
use serde_json::json;

use logbuddy_entity::log_entry::LogFilter;
use logbuddy_worker::WEBHOOK_SOURCE;

#[tokio::test]
async fn test_weather_defaults_to_london() {
    let app = helpers::TestApp::new().await;

    let response = app.request("GET", "/external-api/weather", None).await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["success"], true);
    assert_eq!(response.body["data"]["city"], "London");
    assert_eq!(response.body["data"]["temperature"], 20.5);
    assert!(response.body.get("error").is_none());
}

#[tokio::test]
async fn test_weather_for_city() {
    let app = helpers::TestApp::new().await;

    let response = app
        .request("GET", "/external-api/weather?city=Tokyo", None)
        .await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["data"]["city"], "Tokyo");
    assert_eq!(response.body["data"]["description"], "Partly cloudy");
}

#[tokio::test]
async fn test_webhook_is_accepted_and_recorded() {
    let app = helpers::TestApp::new().await;

    let response = app
        .request(
            "POST",
            "/external-api/webhook",
            Some(json!({"type": "deployment", "service": "billing"})),
        )
        .await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["status"], "accepted");
    assert_eq!(response.body["message"], "Webhook data will be processed");

    assert_eq!(app.wait_for_count(1).await, 1);

    let filter = LogFilter {
        source: Some(WEBHOOK_SOURCE.to_string()),
        ..Default::default()
    };
    let entries = app.state.entries.snapshot(&filter).await.unwrap();
    assert_eq!(entries.len(), 1);
    assert_eq!(entries[0].message, "Webhook processed: deployment");
    assert_eq!(entries[0].level.as_str(), "INFO");

    let metadata = serde_json::to_value(entries[0].metadata.as_ref().unwrap()).unwrap();
    assert_eq!(metadata["service"], "billing");
}

#[tokio::test]
async fn test_webhook_without_type() {
    let app = helpers::TestApp::new().await;

    let response = app
        .request("POST", "/external-api/webhook", Some(json!({"id": 7})))
        .await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(app.wait_for_count(1).await, 1);

    let listed = app.request("GET", "/logs?source=webhook", None).await;
    assert_eq!(listed.body[0]["message"], "Webhook processed: unknown");
}

#[tokio::test]
async fn test_webhook_rejects_non_object() {
    let app = helpers::TestApp::new().await;

    for body in [json!([1, 2, 3]), json!("text"), json!(42)] {
        let response = app
            .request("POST", "/external-api/webhook", Some(body))
            .await;
        assert_eq!(response.status, StatusCode::BAD_REQUEST);
        assert_eq!(response.body["error"], "VALIDATION_ERROR");
    }

    let malformed = app
        .raw_request("POST", "/external-api/webhook", "{".to_string())
        .await;
    assert_eq!(malformed.status, StatusCode::BAD_REQUEST);
}
