//! Logging configuration.

use serde::{Deserialize, Serialize};
use validator::Validate;

/// Logging and tracing configuration.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct LoggingConfig {
    /// Log level: `"trace"`, `"debug"`, `"info"`, `"warn"`, `"error"`.
    #[serde(default = "default_level")]
    pub level: String,
    /// Console format: `"json"` or `"pretty"`.
    #[serde(default = "default_format")]
    pub format: String,
    /// Whether to also write `app.log` and `error.log` files.
    #[serde(default = "default_file_logging")]
    pub file_logging: bool,
    /// Directory holding the rolling log files.
    #[serde(default = "default_directory")]
    pub directory: String,
    /// Maximum number of rotated files to retain per log.
    #[serde(default = "default_max_files")]
    #[validate(range(min = 1, max = 365))]
    pub max_files: usize,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_level(),
            format: default_format(),
            file_logging: default_file_logging(),
            directory: default_directory(),
            max_files: default_max_files(),
        }
    }
}

fn default_level() -> String {
    "info".to_string()
}

fn default_format() -> String {
    "pretty".to_string()
}

fn default_file_logging() -> bool {
    true
}

fn default_directory() -> String {
    "logs".to_string()
}

fn default_max_files() -> usize {
    10
}
