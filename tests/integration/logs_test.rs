//! Integration tests for log intake and querying.

mod helpers;

use http::StatusCode;
use serde_json::json;

#[tokio::test]
async fn test_root_and_health() {
    let app = helpers::TestApp::new().await;

    let root = app.request("GET", "/", None).await;
    assert_eq!(root.status, StatusCode::OK);
    assert_eq!(
        root.body["message"],
        "Welcome to LogBuddy - Your logging companion!"
    );

    let health = app.request("GET", "/health", None).await;
    assert_eq!(health.status, StatusCode::OK);
    assert_eq!(health.body["status"], "healthy");
    assert_eq!(health.body["database"], "connected");
    assert_eq!(health.body["version"], env!("CARGO_PKG_VERSION"));
}

#[tokio::test]
async fn test_create_log_normalizes_level() {
    let app = helpers::TestApp::new().await;

    let response = app
        .request(
            "POST",
            "/logs",
            Some(json!({
                "level": "info",
                "message": "User logged in successfully",
                "source": "auth_service",
                "user_id": "user123",
                "extra_data": {"ip": "192.168.1.1", "browser": "Chrome"}
            })),
        )
        .await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["level"], "INFO");
    assert_eq!(response.body["source"], "auth_service");
    assert_eq!(response.body["user_id"], "user123");
    assert_eq!(response.body["metadata"]["browser"], "Chrome");
    assert!(response.body["id"].as_i64().unwrap() > 0);
    assert!(response.body["timestamp"].as_str().unwrap().ends_with('Z'));
}

#[tokio::test]
async fn test_create_log_rejects_invalid_input() {
    let app = helpers::TestApp::new().await;

    let bodies = [
        json!({"level": "VERBOSE", "message": "m", "source": "s"}),
        json!({"level": "INFO", "message": "", "source": "s"}),
        json!({"level": "INFO", "message": "m", "source": "x".repeat(101)}),
        json!({"level": "INFO", "message": "m", "source": "s", "user_id": "u".repeat(51)}),
        json!({"level": "INFO", "source": "s"}),
    ];

    for body in bodies {
        let response = app.request("POST", "/logs", Some(body.clone())).await;
        assert_eq!(response.status, StatusCode::BAD_REQUEST, "body: {body}");
        assert_eq!(response.body["error"], "VALIDATION_ERROR");
    }

    let malformed = app.raw_request("POST", "/logs", "{not json".to_string()).await;
    assert_eq!(malformed.status, StatusCode::BAD_REQUEST);

    assert_eq!(app.state.entries.count().await.unwrap(), 0);
}

#[tokio::test]
async fn test_whitespace_message_is_accepted() {
    let app = helpers::TestApp::new().await;

    let response = app
        .request(
            "POST",
            "/logs",
            Some(json!({"level": "DEBUG", "message": "   ", "source": "tty"})),
        )
        .await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["message"], "   ");
}

#[tokio::test]
async fn test_level_filter_with_limit_one() {
    let app = helpers::TestApp::new().await;
    for i in 0..5 {
        app.seed("ERROR", &format!("error {i}"), "app").await;
        app.seed("INFO", &format!("info {i}"), "app").await;
    }

    let response = app.request("GET", "/logs?level=ERROR&limit=1", None).await;
    assert_eq!(response.status, StatusCode::OK);
    let entries = response.body.as_array().unwrap();
    assert_eq!(entries.len(), 1);
    assert_eq!(entries[0]["message"], "error 4");
}

#[tokio::test]
async fn test_list_is_newest_first_with_paging() {
    let app = helpers::TestApp::new().await;
    for i in 0..5 {
        app.seed("INFO", &format!("message {i}"), "api").await;
    }

    let response = app.request("GET", "/logs?limit=2", None).await;
    assert_eq!(response.status, StatusCode::OK);
    let messages: Vec<&str> = response
        .body
        .as_array()
        .unwrap()
        .iter()
        .map(|e| e["message"].as_str().unwrap())
        .collect();
    assert_eq!(messages, vec!["message 4", "message 3"]);

    let skipped = app.request("GET", "/logs?limit=2&skip=3", None).await;
    let messages: Vec<&str> = skipped
        .body
        .as_array()
        .unwrap()
        .iter()
        .map(|e| e["message"].as_str().unwrap())
        .collect();
    assert_eq!(messages, vec!["message 1", "message 0"]);
}

#[tokio::test]
async fn test_list_filters() {
    let app = helpers::TestApp::new().await;
    app.seed("ERROR", "Database connection failed", "database").await;
    app.seed("INFO", "Request served", "api").await;
    app.seed("error", "Timeout", "api").await;

    let errors = app.request("GET", "/logs?level=error", None).await;
    assert_eq!(errors.status, StatusCode::OK);
    assert_eq!(errors.body.as_array().unwrap().len(), 2);

    let api_errors = app.request("GET", "/logs?level=ERROR&source=api", None).await;
    let entries = api_errors.body.as_array().unwrap();
    assert_eq!(entries.len(), 1);
    assert_eq!(entries[0]["message"], "Timeout");

    let nothing = app.request("GET", "/logs?source=missing", None).await;
    assert_eq!(nothing.status, StatusCode::OK);
    assert!(nothing.body.as_array().unwrap().is_empty());
}

#[tokio::test]
async fn test_time_range_is_inclusive() {
    let app = helpers::TestApp::new().await;
    let first = app.seed("INFO", "first", "api").await;
    let second = app.seed("INFO", "second", "api").await;

    let ts = logbuddy_entity::format_timestamp(&first.timestamp);
    let response = app
        .request(
            "GET",
            &format!("/logs?start_time={ts}&end_time={ts}"),
            None,
        )
        .await;
    assert_eq!(response.status, StatusCode::OK);
    let ids: Vec<i64> = response
        .body
        .as_array()
        .unwrap()
        .iter()
        .map(|e| e["id"].as_i64().unwrap())
        .collect();
    assert!(ids.contains(&first.id));
    if second.timestamp != first.timestamp {
        assert!(!ids.contains(&second.id));
    }
}

#[tokio::test]
async fn test_query_validation_errors() {
    let app = helpers::TestApp::new().await;

    for path in [
        "/logs?limit=0",
        "/logs?limit=-5",
        "/logs?skip=-1",
        "/logs?limit=abc",
        "/logs?level=loud",
        "/logs?start_time=2024-01-02T00:00:00Z&end_time=2024-01-01T00:00:00Z",
    ] {
        let response = app.request("GET", path, None).await;
        assert_eq!(response.status, StatusCode::BAD_REQUEST, "path: {path}");
        assert_eq!(response.body["error"], "VALIDATION_ERROR");
    }
}

#[tokio::test]
async fn test_get_by_id() {
    let app = helpers::TestApp::new().await;
    let entry = app.seed("CRITICAL", "Out of memory", "system").await;

    let found = app.request("GET", &format!("/logs/{}", entry.id), None).await;
    assert_eq!(found.status, StatusCode::OK);
    assert_eq!(found.body["level"], "CRITICAL");
    assert_eq!(found.body["message"], "Out of memory");

    let missing = app.request("GET", "/logs/9999", None).await;
    assert_eq!(missing.status, StatusCode::NOT_FOUND);
    assert_eq!(missing.body["error"], "NOT_FOUND");
}

#[tokio::test]
async fn test_metadata_survives_roundtrip() {
    let app = helpers::TestApp::new().await;
    let metadata = json!({
        "retry_count": 3,
        "checksum": 18446744073709551615u64,
        "ratio": 0.25,
        "tags": ["a", "b"],
        "nested": {"ok": true, "none": null}
    });

    let created = app
        .request(
            "POST",
            "/logs",
            Some(json!({
                "level": "WARNING",
                "message": "Retrying",
                "source": "worker",
                "metadata": metadata.clone()
            })),
        )
        .await;
    assert_eq!(created.status, StatusCode::OK);

    let id = created.body["id"].as_i64().unwrap();
    let fetched = app.request("GET", &format!("/logs/{id}"), None).await;
    assert_eq!(fetched.body["metadata"], metadata);
}
