//! # logbuddy-entity
//!
//! Domain entity models for LogBuddy. The log entry is the only persisted
//! record; everything else in this crate is a value object describing it
//! (its level, its metadata, the filters used to query it).

pub mod log_entry;

pub use log_entry::{
    CreateLogEntry, LogEntry, LogFilter, LogLevel, LogQuery, Metadata, MetadataValue,
    NewLogEntry, format_timestamp,
};
