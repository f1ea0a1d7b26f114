//! Database configuration.

use serde::{Deserialize, Serialize};
use validator::Validate;

/// SQLite connection pool configuration.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct DatabaseConfig {
    /// SQLite connection URL (`sqlite://logbuddy.db`, `sqlite::memory:`).
    #[serde(default = "default_url")]
    #[validate(length(min = 1))]
    pub url: String,
    /// Maximum number of connections in the pool. Forced to 1 for in-memory databases.
    #[serde(default = "default_max_connections")]
    #[validate(range(min = 1, max = 64))]
    pub max_connections: u32,
    /// Connection acquire timeout in seconds.
    #[serde(default = "default_connect_timeout")]
    pub connect_timeout_seconds: u64,
    /// How long a writer waits on SQLite's lock before failing, in seconds.
    #[serde(default = "default_busy_timeout")]
    pub busy_timeout_seconds: u64,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            url: default_url(),
            max_connections: default_max_connections(),
            connect_timeout_seconds: default_connect_timeout(),
            busy_timeout_seconds: default_busy_timeout(),
        }
    }
}

fn default_url() -> String {
    "sqlite://logbuddy.db".to_string()
}

fn default_max_connections() -> u32 {
    5
}

fn default_connect_timeout() -> u64 {
    10
}

fn default_busy_timeout() -> u64 {
    5
}
