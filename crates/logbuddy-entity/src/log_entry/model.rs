//! Log entry entity model.

use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};

use super::level::LogLevel;
use super::metadata::Metadata;

/// A persisted log entry. Entries are created once and never modified.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LogEntry {
    /// Store-assigned identifier, increasing with insertion order.
    pub id: i64,
    /// Creation time in UTC, microsecond precision.
    #[serde(with = "timestamp_format")]
    pub timestamp: DateTime<Utc>,
    /// Severity.
    pub level: LogLevel,
    /// Free-text message.
    pub message: String,
    /// Label for the emitting component.
    pub source: String,
    /// Optional user the entry relates to.
    pub user_id: Option<String>,
    /// Optional structured metadata.
    pub metadata: Option<Metadata>,
}

/// Raw input for appending a log entry, before validation.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct NewLogEntry {
    /// Level as supplied by the caller; parsed case-insensitively.
    pub level: String,
    /// Message text.
    pub message: String,
    /// Source label.
    pub source: String,
    /// Optional user identifier.
    pub user_id: Option<String>,
    /// Optional metadata.
    pub metadata: Option<Metadata>,
}

impl NewLogEntry {
    /// Build an entry with the three required fields.
    pub fn new(
        level: impl Into<String>,
        message: impl Into<String>,
        source: impl Into<String>,
    ) -> Self {
        Self {
            level: level.into(),
            message: message.into(),
            source: source.into(),
            user_id: None,
            metadata: None,
        }
    }

    /// Attach metadata.
    pub fn with_metadata(mut self, metadata: Metadata) -> Self {
        self.metadata = Some(metadata);
        self
    }
}

/// Validated data handed to the repository for insertion.
#[derive(Debug, Clone)]
pub struct CreateLogEntry {
    /// Parsed level.
    pub level: LogLevel,
    /// Non-empty message.
    pub message: String,
    /// Non-empty source label.
    pub source: String,
    /// Optional user identifier.
    pub user_id: Option<String>,
    /// Bounded metadata.
    pub metadata: Option<Metadata>,
}

/// Canonical text form of a timestamp: RFC 3339, microseconds, `Z` suffix.
pub fn format_timestamp(ts: &DateTime<Utc>) -> String {
    ts.to_rfc3339_opts(SecondsFormat::Micros, true)
}

/// Serde adapter writing timestamps in the canonical text form.
pub mod timestamp_format {
    use chrono::{DateTime, Utc};
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(ts: &DateTime<Utc>, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&super::format_timestamp(ts))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<DateTime<Utc>, D::Error> {
        let s = String::deserialize(deserializer)?;
        DateTime::parse_from_rfc3339(&s)
            .map(|dt| dt.with_timezone(&Utc))
            .map_err(serde::de::Error::custom)
    }
}
