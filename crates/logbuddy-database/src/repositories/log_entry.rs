//! Log entry repository implementation.

use std::sync::Arc;

use chrono::{DateTime, Duration, SubsecRound, Utc};
use sqlx::{FromRow, SqlitePool};
use tokio::sync::Mutex;

use logbuddy_core::error::{AppError, ErrorKind};
use logbuddy_core::result::AppResult;
use logbuddy_entity::log_entry::{
    CreateLogEntry, LogEntry, LogFilter, LogLevel, Metadata, format_timestamp,
};

const COLUMNS: &str = "id, timestamp, level, message, source, user_id, metadata";

/// Row shape of the `log_entries` table.
#[derive(Debug, FromRow)]
struct LogEntryRow {
    id: i64,
    timestamp: String,
    level: LogLevel,
    message: String,
    source: String,
    user_id: Option<String>,
    metadata: Option<String>,
}

impl TryFrom<LogEntryRow> for LogEntry {
    type Error = AppError;

    fn try_from(row: LogEntryRow) -> Result<Self, Self::Error> {
        let timestamp = DateTime::parse_from_rfc3339(&row.timestamp)
            .map(|dt| dt.with_timezone(&Utc))
            .map_err(|e| {
                AppError::with_source(
                    ErrorKind::Storage,
                    format!("Corrupt timestamp on log entry {}", row.id),
                    e,
                )
            })?;
        let metadata = row
            .metadata
            .as_deref()
            .map(Metadata::from_json_str)
            .transpose()
            .map_err(|e| {
                AppError::storage(format!(
                    "Corrupt metadata on log entry {}: {}",
                    row.id, e.message
                ))
            })?;

        Ok(LogEntry {
            id: row.id,
            timestamp,
            level: row.level,
            message: row.message,
            source: row.source,
            user_id: row.user_id,
            metadata,
        })
    }
}

/// Repository for log entries.
///
/// Inserts are serialized through a writer lock that also tracks the last
/// assigned timestamp, so identifier order and timestamp order agree even if
/// the wall clock steps backwards.
#[derive(Debug, Clone)]
pub struct LogEntryRepository {
    pool: SqlitePool,
    last_timestamp: Arc<Mutex<Option<DateTime<Utc>>>>,
}

impl LogEntryRepository {
    /// Create a new log entry repository.
    pub fn new(pool: SqlitePool) -> Self {
        Self {
            pool,
            last_timestamp: Arc::new(Mutex::new(None)),
        }
    }

    /// Insert an entry, assigning its identifier and timestamp.
    pub async fn insert(&self, data: &CreateLogEntry) -> AppResult<LogEntry> {
        let metadata = data
            .metadata
            .as_ref()
            .map(Metadata::to_json_string)
            .transpose()?;

        let mut last = self.last_timestamp.lock().await;
        if last.is_none() {
            *last = self.latest_timestamp().await?;
        }

        let now = Utc::now().trunc_subsecs(6);
        let timestamp = match *last {
            Some(prev) if prev > now => prev,
            _ => now,
        };

        let id: i64 = sqlx::query_scalar(
            "INSERT INTO log_entries (timestamp, level, message, source, user_id, metadata) \
             VALUES (?, ?, ?, ?, ?, ?) RETURNING id",
        )
        .bind(format_timestamp(&timestamp))
        .bind(data.level)
        .bind(&data.message)
        .bind(&data.source)
        .bind(&data.user_id)
        .bind(&metadata)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Storage, "Failed to insert log entry", e))?;

        *last = Some(timestamp);

        Ok(LogEntry {
            id,
            timestamp,
            level: data.level,
            message: data.message.clone(),
            source: data.source.clone(),
            user_id: data.user_id.clone(),
            metadata: data.metadata.clone(),
        })
    }

    /// Find an entry by ID.
    pub async fn find_by_id(&self, id: i64) -> AppResult<Option<LogEntry>> {
        let row = sqlx::query_as::<_, LogEntryRow>(&format!(
            "SELECT {COLUMNS} FROM log_entries WHERE id = ?"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Storage, "Failed to find log entry", e))?;

        row.map(LogEntry::try_from).transpose()
    }

    /// Search entries matching a filter, newest first, with paging.
    pub async fn search(
        &self,
        filter: &LogFilter,
        limit: i64,
        offset: i64,
    ) -> AppResult<Vec<LogEntry>> {
        self.fetch(filter, Some((limit, offset))).await
    }

    /// All entries matching a filter, newest first.
    pub async fn list_all(&self, filter: &LogFilter) -> AppResult<Vec<LogEntry>> {
        self.fetch(filter, None).await
    }

    /// Count entries matching a filter.
    pub async fn count_matching(&self, filter: &LogFilter) -> AppResult<i64> {
        let (where_clause, params) = build_where(filter);
        let sql = format!("SELECT COUNT(*) FROM log_entries {where_clause}");

        let mut query = sqlx::query_scalar::<_, i64>(&sql);
        for param in params {
            query = query.bind(param);
        }

        query
            .fetch_one(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Storage, "Failed to count log entries", e))
    }

    /// Count every stored entry.
    pub async fn count(&self) -> AppResult<i64> {
        self.count_matching(&LogFilter::default()).await
    }

    async fn fetch(
        &self,
        filter: &LogFilter,
        page: Option<(i64, i64)>,
    ) -> AppResult<Vec<LogEntry>> {
        let (where_clause, params) = build_where(filter);
        let mut sql = format!(
            "SELECT {COLUMNS} FROM log_entries {where_clause} ORDER BY timestamp DESC, id DESC"
        );
        if page.is_some() {
            sql.push_str(" LIMIT ? OFFSET ?");
        }

        let mut query = sqlx::query_as::<_, LogEntryRow>(&sql);
        for param in params {
            query = query.bind(param);
        }
        if let Some((limit, offset)) = page {
            query = query.bind(limit).bind(offset);
        }

        let rows = query
            .fetch_all(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Storage, "Failed to query log entries", e))?;

        rows.into_iter().map(LogEntry::try_from).collect()
    }

    async fn latest_timestamp(&self) -> AppResult<Option<DateTime<Utc>>> {
        let latest: Option<String> = sqlx::query_scalar("SELECT MAX(timestamp) FROM log_entries")
            .fetch_one(&self.pool)
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Storage, "Failed to read latest timestamp", e)
            })?;

        latest
            .map(|s| {
                DateTime::parse_from_rfc3339(&s)
                    .map(|dt| dt.with_timezone(&Utc))
                    .map_err(|e| {
                        AppError::with_source(ErrorKind::Storage, "Corrupt latest timestamp", e)
                    })
            })
            .transpose()
    }
}

/// Build a `WHERE` clause and its positional parameters.
///
/// Every parameter is text: timestamps are compared in their fixed-width
/// canonical form, which sorts the same as the instants themselves.
fn build_where(filter: &LogFilter) -> (String, Vec<String>) {
    let mut conditions = Vec::new();
    let mut params = Vec::new();

    if let Some(level) = filter.level {
        conditions.push("level = ?");
        params.push(level.as_str().to_string());
    }
    if let Some(source) = &filter.source {
        conditions.push("source = ?");
        params.push(source.clone());
    }
    if let Some(start) = &filter.start_time {
        conditions.push("timestamp >= ?");
        params.push(format_timestamp(&ceil_micros(*start)));
    }
    if let Some(end) = &filter.end_time {
        conditions.push("timestamp <= ?");
        params.push(format_timestamp(&end.trunc_subsecs(6)));
    }

    let where_clause = if conditions.is_empty() {
        String::new()
    } else {
        format!("WHERE {}", conditions.join(" AND "))
    };
    (where_clause, params)
}

/// Round up to the next whole microsecond, the precision timestamps are stored at.
fn ceil_micros(ts: DateTime<Utc>) -> DateTime<Utc> {
    let truncated = ts.trunc_subsecs(6);
    if truncated < ts {
        truncated + Duration::microseconds(1)
    } else {
        truncated
    }
}
