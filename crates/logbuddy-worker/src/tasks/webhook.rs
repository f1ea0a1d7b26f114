//! Webhook task: records a received payload as a log entry.

use std::sync::Arc;

use async_trait::async_trait;
use serde_json::Value;
use tracing::{info, warn};

use logbuddy_entity::log_entry::{LogLevel, Metadata, NewLogEntry};
use logbuddy_service::EntryService;

use crate::executor::{TaskExecutionError, TaskHandler};
use crate::task::Task;

/// Task kind routed to [`WebhookTaskHandler`].
pub const WEBHOOK_TASK: &str = "webhook";

/// Source label of entries written by the webhook task.
pub const WEBHOOK_SOURCE: &str = "webhook";

/// Metadata key noting why a webhook payload was not stored.
pub const METADATA_REJECTED: &str = "metadata_rejected";

/// Appends an INFO entry describing each received webhook.
#[derive(Debug, Clone)]
pub struct WebhookTaskHandler {
    entries: Arc<EntryService>,
}

impl WebhookTaskHandler {
    /// Create a webhook handler writing through `entries`.
    pub fn new(entries: Arc<EntryService>) -> Self {
        Self { entries }
    }

    /// Build a webhook task for `payload`.
    pub fn task(payload: Value) -> Task {
        Task::new(WEBHOOK_TASK, payload)
    }
}

/// The payload's `type` field rendered as text, or `"unknown"`.
fn event_type(payload: &Value) -> String {
    match payload.get("type") {
        Some(Value::String(s)) => s.clone(),
        Some(Value::Null) | None => "unknown".to_string(),
        Some(other) => other.to_string(),
    }
}

#[async_trait]
impl TaskHandler for WebhookTaskHandler {
    fn kind(&self) -> &str {
        WEBHOOK_TASK
    }

    async fn execute(&self, task: &Task) -> Result<(), TaskExecutionError> {
        let metadata = Metadata::try_from(task.payload.clone())
            .map_err(|e| TaskExecutionError::Invalid(e.message))?;
        let event = event_type(&task.payload);

        // The entry is still recorded when the payload exceeds metadata bounds.
        let metadata = match metadata.validate() {
            Ok(()) => metadata,
            Err(e) => {
                warn!(
                    task_id = %task.id,
                    event_type = %event,
                    error = %e.message,
                    "Webhook payload rejected as metadata, storing entry without it"
                );
                Metadata::new().with(METADATA_REJECTED, e.message)
            }
        };

        let entry = NewLogEntry::new(
            LogLevel::Info.as_str(),
            format!("Webhook processed: {event}"),
            WEBHOOK_SOURCE,
        )
        .with_metadata(metadata);

        let stored = self.entries.append(entry).await?;
        info!(task_id = %task.id, entry_id = stored.id, "Webhook data processed");
        Ok(())
    }
}
