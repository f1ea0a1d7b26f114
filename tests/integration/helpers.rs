//! Shared test helpers for integration tests.

#![allow(dead_code)]

use std::time::Duration;

use axum::Router;
use axum::body::Body;
use http::header::HeaderMap;
use http::{Request, StatusCode};
use serde_json::Value;
use tempfile::TempDir;
use tokio::sync::watch;
use tower::ServiceExt;

use logbuddy_api::AppState;
use logbuddy_core::config::{AppConfig, WeatherProviderKind};
use logbuddy_entity::log_entry::{LogEntry, NewLogEntry};

/// Test application context
pub struct TestApp {
    /// The Axum router for making test requests
    pub router: Router,
    /// Handler state, for reaching the store directly
    pub state: AppState,
    /// Directory receiving file exports
    pub export_dir: TempDir,
    /// Keeps the worker alive until the test ends
    _shutdown: watch::Sender<bool>,
}

impl TestApp {
    /// Create a new test application over a fresh in-memory store
    pub async fn new() -> Self {
        let export_dir = tempfile::tempdir().expect("Failed to create export dir");

        let mut config = AppConfig::default();
        config.database.url = "sqlite::memory:".to_string();
        config.logging.file_logging = false;
        config.weather.provider = WeatherProviderKind::Stub;
        config.export.directory = export_dir.path().display().to_string();
        config.worker.shutdown_timeout_seconds = 1;

        let mut app = logbuddy_api::bootstrap(config)
            .await
            .expect("Failed to bootstrap application");

        let (shutdown, cancel) = watch::channel(false);
        app.spawn_worker(cancel);

        Self {
            router: app.router(),
            state: app.state,
            export_dir,
            _shutdown: shutdown,
        }
    }

    /// Append an entry directly through the store
    pub async fn seed(&self, level: &str, message: &str, source: &str) -> LogEntry {
        self.state
            .entries
            .append(NewLogEntry::new(level, message, source))
            .await
            .expect("Failed to seed log entry")
    }

    /// Poll until the store holds `expected` entries or the deadline passes
    pub async fn wait_for_count(&self, expected: u64) -> u64 {
        let mut count = 0;
        for _ in 0..100 {
            count = self.state.entries.count().await.expect("Failed to count");
            if count >= expected {
                break;
            }
            tokio::time::sleep(Duration::from_millis(20)).await;
        }
        count
    }

    /// Make an HTTP request to the test app
    pub async fn request(&self, method: &str, path: &str, body: Option<Value>) -> TestResponse {
        let body_str = body
            .map(|b| serde_json::to_string(&b).expect("Failed to serialize body"))
            .unwrap_or_default();
        self.raw_request(method, path, body_str).await
    }

    /// Make an HTTP request with a literal body
    pub async fn raw_request(&self, method: &str, path: &str, body: String) -> TestResponse {
        let req = Request::builder()
            .method(method)
            .uri(path)
            .header("Content-Type", "application/json")
            .body(Body::from(body))
            .expect("Failed to build request");

        let response = self
            .router
            .clone()
            .oneshot(req)
            .await
            .expect("Failed to send request");

        let status = response.status();
        let headers = response.headers().clone();
        let body_bytes = axum::body::to_bytes(response.into_body(), 16 * 1024 * 1024)
            .await
            .expect("Failed to read body");

        let text = String::from_utf8_lossy(&body_bytes).into_owned();
        let body: Value = serde_json::from_slice(&body_bytes).unwrap_or(Value::Null);

        TestResponse {
            status,
            headers,
            body,
            text,
        }
    }
}

/// Response from a test request
#[derive(Debug)]
pub struct TestResponse {
    /// HTTP status code
    pub status: StatusCode,
    /// Response headers
    pub headers: HeaderMap,
    /// Parsed JSON body (`Null` if not JSON)
    pub body: Value,
    /// Raw body text
    pub text: String,
}
