//! CSV export of log entries.

pub mod tabular;

pub use tabular::{ExportSummary, HEADER, export_file_name, to_tabular, write_export};
