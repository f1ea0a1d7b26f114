//! Unit of detached work.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A queued task. Tasks live only in memory and are lost on restart.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Task {
    /// Identifier used to correlate log lines.
    pub id: Uuid,
    /// Handler key (e.g. `"webhook"`).
    pub kind: String,
    /// Task input.
    pub payload: serde_json::Value,
    /// When the task was dispatched.
    pub enqueued_at: DateTime<Utc>,
}

impl Task {
    /// Create a task of the given kind.
    pub fn new(kind: impl Into<String>, payload: serde_json::Value) -> Self {
        Self {
            id: Uuid::new_v4(),
            kind: kind.into(),
            payload,
            enqueued_at: Utc::now(),
        }
    }
}
