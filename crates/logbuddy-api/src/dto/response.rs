//! Response DTOs.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use logbuddy_entity::log_entry::{LogEntry, Metadata, format_timestamp};
use logbuddy_service::{AnalyticsReport, HourlyBucket};

/// Simple message response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MessageResponse {
    /// Message.
    pub message: String,
}

/// Health check response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    /// `healthy`, or `degraded` when the store is unreachable.
    pub status: String,
    /// Current server time.
    pub timestamp: String,
    /// Service version.
    pub version: String,
    /// `connected` or `unavailable`.
    pub database: String,
}

/// A stored log entry.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LogEntryResponse {
    /// Identifier.
    pub id: i64,
    /// Creation time (RFC 3339, microseconds, UTC).
    pub timestamp: String,
    /// Upper-case level.
    pub level: String,
    /// Message.
    pub message: String,
    /// Source label.
    pub source: String,
    /// User identifier.
    pub user_id: Option<String>,
    /// Metadata.
    pub metadata: Option<Metadata>,
}

impl From<LogEntry> for LogEntryResponse {
    fn from(entry: LogEntry) -> Self {
        Self {
            id: entry.id,
            timestamp: format_timestamp(&entry.timestamp),
            level: entry.level.as_str().to_string(),
            message: entry.message,
            source: entry.source,
            user_id: entry.user_id,
            metadata: entry.metadata,
        }
    }
}

/// One hour of activity.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HourlyCount {
    /// Start of the hour.
    pub hour: String,
    /// Entries in the hour.
    pub count: u64,
}

impl From<HourlyBucket> for HourlyCount {
    fn from(bucket: HourlyBucket) -> Self {
        Self {
            hour: format_timestamp(&bucket.hour),
            count: bucket.count,
        }
    }
}

/// Body of `GET /analytics`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalyticsResponse {
    /// Entries matched.
    pub total_logs: u64,
    /// Count per level present.
    pub logs_by_level: BTreeMap<String, u64>,
    /// Count per source.
    pub logs_by_source: BTreeMap<String, u64>,
    /// Oldest timestamp.
    pub earliest: Option<String>,
    /// Newest timestamp.
    pub latest: Option<String>,
    /// Hourly counts, oldest first.
    pub hourly: Vec<HourlyCount>,
    /// Up to ten entries from the last 24 hours, newest first.
    pub recent_activity: Vec<LogEntryResponse>,
}

impl AnalyticsResponse {
    /// Combine a report with its recent-activity slice.
    pub fn new(report: AnalyticsReport, recent: Vec<LogEntry>) -> Self {
        Self {
            total_logs: report.total,
            logs_by_level: report
                .by_level
                .into_iter()
                .map(|(level, count)| (level.as_str().to_string(), count))
                .collect(),
            logs_by_source: report.by_source,
            earliest: report.earliest.as_ref().map(format_timestamp),
            latest: report.latest.as_ref().map(format_timestamp),
            hourly: report.hourly.into_iter().map(HourlyCount::from).collect(),
            recent_activity: recent.into_iter().map(LogEntryResponse::from).collect(),
        }
    }
}

/// Body of `POST /export/csv`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExportResponse {
    /// Outcome message.
    pub message: String,
    /// Written file name.
    pub filename: String,
    /// Rows written.
    pub records_exported: usize,
}

/// Body of `GET /external-api/weather`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WeatherResponse {
    /// Whether data was obtained (real or mock).
    pub success: bool,
    /// Weather payload.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<serde_json::Value>,
    /// Failure description.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// Body of `POST /external-api/webhook`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WebhookResponse {
    /// Always `accepted`.
    pub status: String,
    /// Human-readable note.
    pub message: String,
}
