//! Background worker configuration.

use serde::{Deserialize, Serialize};
use validator::Validate;

/// Detached task worker configuration.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct WorkerConfig {
    /// Whether the worker is enabled. When disabled, dispatched tasks are dropped.
    #[serde(default = "default_true")]
    pub enabled: bool,
    /// Number of tasks processed concurrently.
    #[serde(default = "default_concurrency")]
    #[validate(range(min = 1, max = 256))]
    pub concurrency: usize,
    /// Maximum number of queued tasks before new ones are dropped.
    #[serde(default = "default_queue_capacity")]
    #[validate(range(min = 1))]
    pub queue_capacity: usize,
    /// How long shutdown waits for in-flight tasks, in seconds.
    #[serde(default = "default_shutdown_timeout")]
    pub shutdown_timeout_seconds: u64,
}

impl Default for WorkerConfig {
    fn default() -> Self {
        Self {
            enabled: default_true(),
            concurrency: default_concurrency(),
            queue_capacity: default_queue_capacity(),
            shutdown_timeout_seconds: default_shutdown_timeout(),
        }
    }
}

fn default_true() -> bool {
    true
}

fn default_concurrency() -> usize {
    4
}

fn default_queue_capacity() -> usize {
    256
}

fn default_shutdown_timeout() -> u64 {
    30
}
