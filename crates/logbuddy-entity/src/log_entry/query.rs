//! Filters and paging for log entry queries.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::level::LogLevel;
use super::model::LogEntry;

/// Conjunctive filter over log entries. Absent fields match everything.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LogFilter {
    /// Exact level.
    pub level: Option<LogLevel>,
    /// Exact source label.
    pub source: Option<String>,
    /// Inclusive lower bound on the timestamp.
    pub start_time: Option<DateTime<Utc>>,
    /// Inclusive upper bound on the timestamp.
    pub end_time: Option<DateTime<Utc>>,
}

impl LogFilter {
    /// Whether an entry satisfies every present condition.
    pub fn matches(&self, entry: &LogEntry) -> bool {
        self.level.is_none_or(|l| entry.level == l)
            && self.source.as_deref().is_none_or(|s| entry.source == s)
            && self.start_time.is_none_or(|t| entry.timestamp >= t)
            && self.end_time.is_none_or(|t| entry.timestamp <= t)
    }
}

/// A filtered, paged query.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LogQuery {
    /// Which entries to return.
    #[serde(flatten)]
    pub filter: LogFilter,
    /// Maximum number of entries; defaults to [`LogQuery::DEFAULT_LIMIT`].
    pub limit: Option<i64>,
    /// Number of newest matches to skip; defaults to 0.
    pub offset: Option<i64>,
}

impl LogQuery {
    /// Default page size.
    pub const DEFAULT_LIMIT: i64 = 100;

    /// Query with the given filter and default paging.
    pub fn new(filter: LogFilter) -> Self {
        Self {
            filter,
            limit: None,
            offset: None,
        }
    }

    /// Set the limit.
    pub fn limit(mut self, limit: i64) -> Self {
        self.limit = Some(limit);
        self
    }

    /// Set the offset.
    pub fn offset(mut self, offset: i64) -> Self {
        self.offset = Some(offset);
        self
    }

    /// The limit to apply.
    pub fn effective_limit(&self) -> i64 {
        self.limit.unwrap_or(Self::DEFAULT_LIMIT)
    }

    /// The offset to apply.
    pub fn effective_offset(&self) -> i64 {
        self.offset.unwrap_or(0)
    }
}
