//! Entry store: validated append and query over persisted log entries.

use std::sync::Arc;

use tracing::{debug, info};

use logbuddy_core::error::AppError;
use logbuddy_core::result::AppResult;
use logbuddy_database::repositories::log_entry::LogEntryRepository;
use logbuddy_entity::log_entry::{
    CreateLogEntry, LogEntry, LogFilter, LogLevel, LogQuery, NewLogEntry,
};

/// Maximum length of a source label, in characters.
pub const MAX_SOURCE_LEN: usize = 100;
/// Maximum length of a user identifier, in characters.
pub const MAX_USER_ID_LEN: usize = 50;

/// Owns the durable log entry collection.
#[derive(Debug, Clone)]
pub struct EntryService {
    /// Log entry repository.
    repo: Arc<LogEntryRepository>,
}

impl EntryService {
    /// Creates a new entry service.
    pub fn new(repo: Arc<LogEntryRepository>) -> Self {
        Self { repo }
    }

    /// Validate and persist a new entry, returning it with its assigned
    /// identifier and timestamp.
    pub async fn append(&self, input: NewLogEntry) -> AppResult<LogEntry> {
        let data = validate_new(input)?;
        let entry = self.repo.insert(&data).await?;

        info!(
            id = entry.id,
            level = %entry.level,
            source = %entry.source,
            "Log entry created"
        );
        Ok(entry)
    }

    /// Entries matching the query's filter, newest first, paged.
    pub async fn query(&self, query: &LogQuery) -> AppResult<Vec<LogEntry>> {
        let limit = query.effective_limit();
        let offset = query.effective_offset();
        if limit <= 0 {
            return Err(AppError::validation(format!(
                "limit must be a positive integer, got {limit}"
            )));
        }
        if offset < 0 {
            return Err(AppError::validation(format!(
                "skip must not be negative, got {offset}"
            )));
        }
        validate_filter(&query.filter)?;

        let entries = self.repo.search(&query.filter, limit, offset).await?;
        debug!(count = entries.len(), limit, offset, "Queried log entries");
        Ok(entries)
    }

    /// Every entry matching the filter, newest first. Feeds analytics and export.
    pub async fn snapshot(&self, filter: &LogFilter) -> AppResult<Vec<LogEntry>> {
        validate_filter(filter)?;
        self.repo.list_all(filter).await
    }

    /// A single entry by identifier.
    pub async fn get(&self, id: i64) -> AppResult<LogEntry> {
        self.repo
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::not_found(format!("Log entry {id} not found")))
    }

    /// Total number of stored entries.
    pub async fn count(&self) -> AppResult<u64> {
        let count = self.repo.count().await?;
        Ok(count.max(0) as u64)
    }
}

fn validate_new(input: NewLogEntry) -> AppResult<CreateLogEntry> {
    let level: LogLevel = input.level.parse()?;

    if input.message.is_empty() {
        return Err(AppError::validation("message must not be empty"));
    }
    if input.source.is_empty() {
        return Err(AppError::validation("source must not be empty"));
    }
    if input.source.chars().count() > MAX_SOURCE_LEN {
        return Err(AppError::validation(format!(
            "source must be at most {MAX_SOURCE_LEN} characters"
        )));
    }
    if let Some(user_id) = &input.user_id {
        if user_id.chars().count() > MAX_USER_ID_LEN {
            return Err(AppError::validation(format!(
                "user_id must be at most {MAX_USER_ID_LEN} characters"
            )));
        }
    }
    if let Some(metadata) = &input.metadata {
        metadata.validate()?;
    }

    Ok(CreateLogEntry {
        level,
        message: input.message,
        source: input.source,
        user_id: input.user_id,
        metadata: input.metadata,
    })
}

fn validate_filter(filter: &LogFilter) -> AppResult<()> {
    if let (Some(start), Some(end)) = (filter.start_time, filter.end_time) {
        if start > end {
            return Err(AppError::validation(
                "start_time must not be after end_time",
            ));
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, Utc};
    use logbuddy_core::config::DatabaseConfig;
    use logbuddy_core::error::ErrorKind;
    use logbuddy_database::DatabasePool;
    use logbuddy_database::migration::run_migrations;
    use logbuddy_entity::log_entry::{Metadata, MetadataValue};

    async fn service() -> EntryService {
        let db = DatabasePool::connect(&DatabaseConfig {
            url: "sqlite::memory:".to_string(),
            ..Default::default()
        })
        .await
        .unwrap();
        run_migrations(db.pool()).await.unwrap();
        EntryService::new(Arc::new(LogEntryRepository::new(db.pool().clone())))
    }

    #[tokio::test]
    async fn test_append_normalizes_level() {
        let svc = service().await;
        let entry = svc
            .append(NewLogEntry::new("warning", "Disk usage at 80%", "system"))
            .await
            .unwrap();
        assert_eq!(entry.level, LogLevel::Warning);
        assert!(entry.id > 0);
    }

    #[tokio::test]
    async fn test_append_rejects_invalid_input() {
        let svc = service().await;
        let cases = vec![
            NewLogEntry::new("verbose", "m", "s"),
            NewLogEntry::new("INFO", "", "s"),
            NewLogEntry::new("INFO", "m", ""),
            NewLogEntry::new("INFO", "m", "x".repeat(MAX_SOURCE_LEN + 1)),
            NewLogEntry {
                user_id: Some("u".repeat(MAX_USER_ID_LEN + 1)),
                ..NewLogEntry::new("INFO", "m", "s")
            },
        ];
        for case in cases {
            let err = svc.append(case).await.unwrap_err();
            assert!(err.is(ErrorKind::Validation), "{err}");
        }
        assert_eq!(svc.count().await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_whitespace_text_is_stored_verbatim() {
        let svc = service().await;
        let entry = svc.append(NewLogEntry::new("INFO", "   ", " ")).await.unwrap();
        assert_eq!(entry.message, "   ");
        assert_eq!(svc.get(entry.id).await.unwrap().source, " ");
    }

    #[tokio::test]
    async fn test_append_rejects_deep_metadata() {
        let svc = service().await;
        let mut value = MetadataValue::Null;
        for _ in 0..Metadata::MAX_DEPTH {
            value = MetadataValue::Map([("n".to_string(), value)].into_iter().collect());
        }
        let meta = Metadata::new().with("root", value);
        let err = svc
            .append(NewLogEntry::new("INFO", "m", "s").with_metadata(meta))
            .await
            .unwrap_err();
        assert!(err.is(ErrorKind::Validation));
    }

    #[tokio::test]
    async fn test_query_validation() {
        let svc = service().await;
        for limit in [0, -1] {
            let err = svc.query(&LogQuery::default().limit(limit)).await.unwrap_err();
            assert!(err.is(ErrorKind::Validation));
        }
        let err = svc.query(&LogQuery::default().offset(-1)).await.unwrap_err();
        assert!(err.is(ErrorKind::Validation));

        let now = Utc::now();
        let inverted = LogFilter {
            start_time: Some(now),
            end_time: Some(now - Duration::hours(1)),
            ..Default::default()
        };
        let err = svc.query(&LogQuery::new(inverted)).await.unwrap_err();
        assert!(err.is(ErrorKind::Validation));
    }

    #[tokio::test]
    async fn test_query_default_limit_is_100() {
        let svc = service().await;
        for i in 0..105 {
            svc.append(NewLogEntry::new("INFO", format!("m{i}"), "bulk"))
                .await
                .unwrap();
        }
        let entries = svc.query(&LogQuery::default()).await.unwrap();
        assert_eq!(entries.len(), 100);
        assert_eq!(entries[0].message, "m104");
        assert_eq!(svc.snapshot(&LogFilter::default()).await.unwrap().len(), 105);
    }

    #[tokio::test]
    async fn test_level_filter_with_limit_one_returns_latest_match() {
        let svc = service().await;
        for i in 0..5 {
            svc.append(NewLogEntry::new("ERROR", format!("error {i}"), "app"))
                .await
                .unwrap();
            svc.append(NewLogEntry::new("INFO", format!("info {i}"), "app"))
                .await
                .unwrap();
        }

        let query = LogQuery::new(LogFilter {
            level: Some(LogLevel::Error),
            ..Default::default()
        })
        .limit(1);
        let entries = svc.query(&query).await.unwrap();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].message, "error 4");
        assert_eq!(entries[0].level, LogLevel::Error);
    }

    #[tokio::test]
    async fn test_get_missing_is_not_found() {
        let svc = service().await;
        let err = svc.get(42).await.unwrap_err();
        assert!(err.is(ErrorKind::NotFound));
    }
}
