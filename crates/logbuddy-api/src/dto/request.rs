//! Request DTOs with validation.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

use logbuddy_core::result::AppResult;
use logbuddy_entity::log_entry::{LogFilter, LogLevel, LogQuery, Metadata, NewLogEntry};

/// Body of `POST /logs`.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct CreateLogRequest {
    /// Level name, case-insensitive.
    pub level: String,
    /// Message text.
    #[validate(length(min = 1, message = "message is required"))]
    pub message: String,
    /// Emitting component.
    #[validate(length(min = 1, max = 100, message = "source must be 1-100 characters"))]
    pub source: String,
    /// Optional user identifier.
    #[validate(length(max = 50, message = "user_id must be at most 50 characters"))]
    pub user_id: Option<String>,
    /// Structured metadata. `extra_data` is accepted as an alias.
    #[serde(default, alias = "extra_data")]
    pub metadata: Option<Metadata>,
}

impl From<CreateLogRequest> for NewLogEntry {
    fn from(req: CreateLogRequest) -> Self {
        Self {
            level: req.level,
            message: req.message,
            source: req.source,
            user_id: req.user_id,
            metadata: req.metadata,
        }
    }
}

/// Filter parameters shared by `/analytics` and `/export/csv`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FilterParams {
    /// Level name, case-insensitive. Empty means no filter.
    pub level: Option<String>,
    /// Exact source label. Empty means no filter.
    pub source: Option<String>,
    /// Inclusive lower bound (RFC 3339).
    pub start_time: Option<DateTime<Utc>>,
    /// Inclusive upper bound (RFC 3339).
    pub end_time: Option<DateTime<Utc>>,
}

impl FilterParams {
    /// Convert into a typed filter, rejecting unknown levels.
    pub fn into_filter(self) -> AppResult<LogFilter> {
        let level = non_empty(self.level)
            .map(|l| l.parse::<LogLevel>())
            .transpose()?;
        Ok(LogFilter {
            level,
            source: non_empty(self.source),
            start_time: self.start_time,
            end_time: self.end_time,
        })
    }
}

/// Query parameters of `GET /logs`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LogQueryParams {
    /// Level name, case-insensitive.
    pub level: Option<String>,
    /// Exact source label.
    pub source: Option<String>,
    /// Inclusive lower bound (RFC 3339).
    pub start_time: Option<DateTime<Utc>>,
    /// Inclusive upper bound (RFC 3339).
    pub end_time: Option<DateTime<Utc>>,
    /// Page size (default 100).
    pub limit: Option<i64>,
    /// Number of newest matches to skip (default 0).
    pub skip: Option<i64>,
}

impl LogQueryParams {
    /// Convert into a typed query.
    pub fn into_query(self) -> AppResult<LogQuery> {
        let filter = FilterParams {
            level: self.level,
            source: self.source,
            start_time: self.start_time,
            end_time: self.end_time,
        }
        .into_filter()?;

        Ok(LogQuery {
            filter,
            limit: self.limit,
            offset: self.skip,
        })
    }
}

/// Query parameters of `GET /external-api/weather`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct WeatherParams {
    /// City name; the configured default when absent.
    pub city: Option<String>,
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|s| !s.trim().is_empty())
}
