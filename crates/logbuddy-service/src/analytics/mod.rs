//! Summary statistics over snapshots of log entries.

pub mod aggregator;

pub use aggregator::{
    AnalyticsReport, HourlyBucket, MAX_DENSE_BUCKETS, recent_activity, summarize,
};
