//! CSV rendering of log entries.

use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::info;

use logbuddy_core::error::{AppError, ErrorKind};
use logbuddy_core::result::AppResult;
use logbuddy_entity::log_entry::{LogEntry, format_timestamp};

/// Column order of every export.
pub const HEADER: [&str; 7] = [
    "id",
    "timestamp",
    "level",
    "message",
    "source",
    "user_id",
    "metadata",
];

/// Result of writing an export file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ExportSummary {
    /// File name within the export directory.
    pub filename: String,
    /// Full path of the written file.
    pub path: PathBuf,
    /// Number of data rows written.
    pub records_exported: usize,
}

/// Render entries as CSV with a header row, preserving input order.
///
/// Fields containing a delimiter, quote or line break are quoted and inner
/// quotes are doubled. Absent optional fields become empty cells.
pub fn to_tabular(entries: &[LogEntry]) -> AppResult<String> {
    let mut writer = csv::Writer::from_writer(Vec::new());
    writer.write_record(HEADER)?;

    for entry in entries {
        let metadata = match &entry.metadata {
            Some(m) => m.to_json_string()?,
            None => String::new(),
        };
        writer.write_record([
            entry.id.to_string().as_str(),
            format_timestamp(&entry.timestamp).as_str(),
            entry.level.as_str(),
            entry.message.as_str(),
            entry.source.as_str(),
            entry.user_id.as_deref().unwrap_or(""),
            metadata.as_str(),
        ])?;
    }

    let bytes = writer.into_inner().map_err(|e| {
        AppError::new(
            ErrorKind::Serialization,
            format!("Failed to flush CSV output: {}", e.error()),
        )
    })?;
    String::from_utf8(bytes).map_err(|e| {
        AppError::with_source(ErrorKind::Serialization, "CSV output is not UTF-8", e)
    })
}

/// Name of an export file produced at `now`.
pub fn export_file_name(now: DateTime<Utc>) -> String {
    format!("logs_export_{}.csv", now.format("%Y%m%d_%H%M%S"))
}

/// Write entries as CSV into `dir`, creating the directory if needed.
pub async fn write_export(
    dir: &Path,
    entries: &[LogEntry],
    now: DateTime<Utc>,
) -> AppResult<ExportSummary> {
    let body = to_tabular(entries)?;
    let filename = export_file_name(now);
    let path = dir.join(&filename);

    tokio::fs::create_dir_all(dir).await?;
    tokio::fs::write(&path, body).await?;

    info!(
        path = %path.display(),
        records = entries.len(),
        "Logs exported"
    );

    Ok(ExportSummary {
        filename,
        path,
        records_exported: entries.len(),
    })
}
