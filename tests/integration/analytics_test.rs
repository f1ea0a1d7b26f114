//! Integration tests for the analytics endpoint.

mod helpers;

use http::StatusCode;

#[tokio::test]
async fn test_empty_store() {
    let app = helpers::TestApp::new().await;

    let response = app.request("GET", "/analytics", None).await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["total_logs"], 0);
    assert!(response.body["logs_by_level"].as_object().unwrap().is_empty());
    assert!(response.body["logs_by_source"].as_object().unwrap().is_empty());
    assert!(response.body["hourly"].as_array().unwrap().is_empty());
    assert!(response.body["recent_activity"].as_array().unwrap().is_empty());
    assert!(response.body["earliest"].is_null());
}

#[tokio::test]
async fn test_counts_by_level_and_source() {
    let app = helpers::TestApp::new().await;
    app.seed("INFO", "a", "api").await;
    app.seed("INFO", "b", "api").await;
    app.seed("ERROR", "c", "database").await;
    app.seed("warning", "d", "system").await;

    let response = app.request("GET", "/analytics", None).await;
    assert_eq!(response.status, StatusCode::OK);

    let body = &response.body;
    assert_eq!(body["total_logs"], 4);
    assert_eq!(body["logs_by_level"]["INFO"], 2);
    assert_eq!(body["logs_by_level"]["ERROR"], 1);
    assert_eq!(body["logs_by_level"]["WARNING"], 1);
    assert!(body["logs_by_level"].get("DEBUG").is_none());
    assert_eq!(body["logs_by_source"]["api"], 2);
    assert_eq!(body["logs_by_source"]["database"], 1);

    let hourly_total: u64 = body["hourly"]
        .as_array()
        .unwrap()
        .iter()
        .map(|b| b["count"].as_u64().unwrap())
        .sum();
    assert_eq!(hourly_total, 4);
    assert!(body["earliest"].as_str().unwrap() <= body["latest"].as_str().unwrap());
}

#[tokio::test]
async fn test_recent_activity_is_capped_and_newest_first() {
    let app = helpers::TestApp::new().await;
    for i in 0..12 {
        app.seed("DEBUG", &format!("event {i}"), "loop").await;
    }

    let response = app.request("GET", "/analytics", None).await;
    let recent = response.body["recent_activity"].as_array().unwrap();
    assert_eq!(recent.len(), 10);
    assert_eq!(recent[0]["message"], "event 11");
    assert_eq!(recent[9]["message"], "event 2");
    assert_eq!(response.body["total_logs"], 12);
}

#[tokio::test]
async fn test_filters_apply() {
    let app = helpers::TestApp::new().await;
    app.seed("ERROR", "boom", "api").await;
    app.seed("ERROR", "crash", "worker").await;
    app.seed("INFO", "fine", "api").await;

    let by_level = app.request("GET", "/analytics?level=error", None).await;
    assert_eq!(by_level.body["total_logs"], 2);
    assert_eq!(by_level.body["logs_by_source"]["worker"], 1);

    let by_source = app.request("GET", "/analytics?source=api", None).await;
    assert_eq!(by_source.body["total_logs"], 2);
    assert_eq!(by_source.body["logs_by_level"]["INFO"], 1);

    let future = app
        .request("GET", "/analytics?start_time=2999-01-01T00:00:00Z", None)
        .await;
    assert_eq!(future.status, StatusCode::OK);
    assert_eq!(future.body["total_logs"], 0);
}

#[tokio::test]
async fn test_invalid_filter_is_rejected() {
    let app = helpers::TestApp::new().await;

    let response = app.request("GET", "/analytics?level=chatty", None).await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(response.body["error"], "VALIDATION_ERROR");
}
