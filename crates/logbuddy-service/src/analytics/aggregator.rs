//! Pure aggregation of log entry snapshots.

use std::collections::BTreeMap;

use chrono::{DateTime, Duration, Timelike, Utc};
use serde::{Deserialize, Serialize};

use logbuddy_entity::log_entry::{LogEntry, LogLevel};

/// Upper bound on dense hourly buckets (one year of hours). Wider spans
/// report only the non-empty hours.
pub const MAX_DENSE_BUCKETS: i64 = 8_760;

/// Number of entries whose timestamp falls within one UTC hour.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HourlyBucket {
    /// Start of the hour.
    #[serde(with = "logbuddy_entity::log_entry::model::timestamp_format")]
    pub hour: DateTime<Utc>,
    /// Entries in the hour.
    pub count: u64,
}

/// Summary statistics for a snapshot.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnalyticsReport {
    /// Number of entries.
    pub total: u64,
    /// Count per level; only levels that occur are present.
    pub by_level: BTreeMap<LogLevel, u64>,
    /// Count per source label.
    pub by_source: BTreeMap<String, u64>,
    /// Oldest timestamp, if any.
    pub earliest: Option<DateTime<Utc>>,
    /// Newest timestamp, if any.
    pub latest: Option<DateTime<Utc>>,
    /// Hourly counts in ascending order.
    pub hourly: Vec<HourlyBucket>,
}

/// Summarize a snapshot. The result depends only on the input.
pub fn summarize(entries: &[LogEntry]) -> AnalyticsReport {
    let mut report = AnalyticsReport {
        total: entries.len() as u64,
        ..Default::default()
    };
    let mut per_hour: BTreeMap<DateTime<Utc>, u64> = BTreeMap::new();

    for entry in entries {
        *report.by_level.entry(entry.level).or_default() += 1;
        *report.by_source.entry(entry.source.clone()).or_default() += 1;
        *per_hour.entry(hour_start(entry.timestamp)).or_default() += 1;

        report.earliest = Some(match report.earliest {
            Some(t) => t.min(entry.timestamp),
            None => entry.timestamp,
        });
        report.latest = Some(match report.latest {
            Some(t) => t.max(entry.timestamp),
            None => entry.timestamp,
        });
    }

    report.hourly = match (report.earliest, report.latest) {
        (Some(earliest), Some(latest)) => {
            let first = hour_start(earliest);
            let last = hour_start(latest);
            let span = (last - first).num_hours() + 1;
            if span > MAX_DENSE_BUCKETS {
                per_hour
                    .into_iter()
                    .map(|(hour, count)| HourlyBucket { hour, count })
                    .collect()
            } else {
                (0..span)
                    .map(|i| {
                        let hour = first + Duration::hours(i);
                        HourlyBucket {
                            hour,
                            count: per_hour.get(&hour).copied().unwrap_or(0),
                        }
                    })
                    .collect()
            }
        }
        _ => Vec::new(),
    };

    report
}

/// The newest `limit` entries with `as_of - window < timestamp <= as_of`,
/// newest first.
pub fn recent_activity(
    entries: &[LogEntry],
    as_of: DateTime<Utc>,
    window: Duration,
    limit: usize,
) -> Vec<LogEntry> {
    let since = as_of - window;
    let mut recent: Vec<LogEntry> = entries
        .iter()
        .filter(|e| e.timestamp > since && e.timestamp <= as_of)
        .cloned()
        .collect();
    recent.sort_by(|a, b| b.timestamp.cmp(&a.timestamp).then(b.id.cmp(&a.id)));
    recent.truncate(limit);
    recent
}

fn hour_start(ts: DateTime<Utc>) -> DateTime<Utc> {
    ts.with_minute(0)
        .and_then(|t| t.with_second(0))
        .and_then(|t| t.with_nanosecond(0))
        .unwrap_or(ts)
}
