//! Integration tests for CSV export.

mod helpers;

use http::StatusCode;
use http::header;
use serde_json::json;

#[tokio::test]
async fn test_download_returns_csv_attachment() {
    let app = helpers::TestApp::new().await;
    app.seed("INFO", "first", "api").await;
    app.request(
        "POST",
        "/logs",
        Some(json!({
            "level": "ERROR",
            "message": "Failed, then \"retried\"",
            "source": "worker",
            "user_id": "u1",
            "metadata": {"attempt": 2}
        })),
    )
    .await;

    let response = app.request("GET", "/export/csv", None).await;
    assert_eq!(response.status, StatusCode::OK);

    let content_type = response.headers[header::CONTENT_TYPE].to_str().unwrap();
    assert!(content_type.starts_with("text/csv"));
    let disposition = response.headers[header::CONTENT_DISPOSITION]
        .to_str()
        .unwrap();
    assert!(disposition.starts_with("attachment; filename=\"logs_export_"));

    let mut reader = csv::Reader::from_reader(response.text.as_bytes());
    let headers = reader.headers().unwrap().clone();
    assert_eq!(
        headers.iter().collect::<Vec<_>>(),
        vec!["id", "timestamp", "level", "message", "source", "user_id", "metadata"]
    );

    let rows: Vec<csv::StringRecord> = reader.records().map(|r| r.unwrap()).collect();
    assert_eq!(rows.len(), 2);
    assert_eq!(&rows[0][2], "ERROR");
    assert_eq!(&rows[0][3], "Failed, then \"retried\"");
    assert_eq!(&rows[0][5], "u1");
    assert_eq!(&rows[0][6], r#"{"attempt":2}"#);
    assert_eq!(&rows[1][3], "first");
    assert_eq!(&rows[1][5], "");
}

#[tokio::test]
async fn test_empty_export_is_header_only() {
    let app = helpers::TestApp::new().await;

    let response = app.request("GET", "/export/csv", None).await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(
        response.text,
        "id,timestamp,level,message,source,user_id,metadata\n"
    );
}

#[tokio::test]
async fn test_download_respects_filter() {
    let app = helpers::TestApp::new().await;
    app.seed("INFO", "keep", "api").await;
    app.seed("INFO", "drop", "cron").await;

    let response = app.request("GET", "/export/csv?source=api", None).await;
    let mut reader = csv::Reader::from_reader(response.text.as_bytes());
    let messages: Vec<String> = reader
        .records()
        .map(|r| r.unwrap()[3].to_string())
        .collect();
    assert_eq!(messages, vec!["keep"]);
}

#[tokio::test]
async fn test_post_writes_file() {
    let app = helpers::TestApp::new().await;
    for i in 0..3 {
        app.seed("DEBUG", &format!("row {i}"), "batch").await;
    }

    let response = app.request("POST", "/export/csv", None).await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["message"], "Export completed");
    assert_eq!(response.body["records_exported"], 3);

    let filename = response.body["filename"].as_str().unwrap();
    assert!(filename.starts_with("logs_export_") && filename.ends_with(".csv"));

    let written = std::fs::read_to_string(app.export_dir.path().join(filename)).unwrap();
    assert_eq!(written.lines().count(), 4);
    assert!(written.starts_with("id,timestamp,level"));
}
