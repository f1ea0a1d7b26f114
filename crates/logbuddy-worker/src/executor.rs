//! Task executor: routes tasks to registered handlers.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use tracing::info;

use logbuddy_core::error::AppError;

use crate::task::Task;

/// Trait for task handler implementations.
#[async_trait]
pub trait TaskHandler: Send + Sync + std::fmt::Debug {
    /// The task kind this handler processes.
    fn kind(&self) -> &str;

    /// Run the task.
    async fn execute(&self, task: &Task) -> Result<(), TaskExecutionError>;
}

/// Error from task execution. Tasks are never retried, so the variants
/// only distinguish bad input from failures further down.
#[derive(Debug, thiserror::Error)]
pub enum TaskExecutionError {
    /// The task cannot be processed as given.
    #[error("Invalid task: {0}")]
    Invalid(String),

    /// A downstream call failed.
    #[error("Task failed: {0}")]
    Internal(#[from] AppError),
}

/// Dispatches tasks to the handler registered for their kind.
#[derive(Debug, Default)]
pub struct TaskExecutor {
    handlers: HashMap<String, Arc<dyn TaskHandler>>,
}

impl TaskExecutor {
    /// Create an executor with no handlers.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a handler, replacing any previous one for the same kind.
    pub fn register(&mut self, handler: Arc<dyn TaskHandler>) {
        let kind = handler.kind().to_string();
        info!(kind = %kind, "Registered task handler");
        self.handlers.insert(kind, handler);
    }

    /// Execute a task with its handler.
    pub async fn execute(&self, task: &Task) -> Result<(), TaskExecutionError> {
        let handler = self.handlers.get(&task.kind).ok_or_else(|| {
            TaskExecutionError::Invalid(format!(
                "No handler registered for task kind '{}'",
                task.kind
            ))
        })?;

        info!(task_id = %task.id, kind = %task.kind, "Executing task");
        handler.execute(task).await
    }
}
