//! Log entry entity and its value objects.

pub mod level;
pub mod metadata;
pub mod model;
pub mod query;

pub use level::LogLevel;
pub use metadata::{Metadata, MetadataValue};
pub use model::{CreateLogEntry, LogEntry, NewLogEntry, format_timestamp};
pub use query::{LogFilter, LogQuery};
