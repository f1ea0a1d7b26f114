//! Non-blocking hand-off of detached tasks.

use tokio::sync::mpsc;
use tokio::sync::mpsc::error::TrySendError;
use tracing::{debug, warn};

use crate::task::Task;

/// Sending half of the task queue, cloned into request handlers.
#[derive(Debug, Clone)]
pub struct TaskDispatcher {
    sender: mpsc::Sender<Task>,
}

impl TaskDispatcher {
    /// Create a dispatcher and the receiver a [`WorkerRunner`](crate::WorkerRunner) drains.
    pub fn channel(capacity: usize) -> (Self, mpsc::Receiver<Task>) {
        let (sender, receiver) = mpsc::channel(capacity.max(1));
        (Self { sender }, receiver)
    }

    /// A dispatcher whose tasks are always dropped. Used when the worker is disabled.
    pub fn disabled() -> Self {
        let (sender, _) = mpsc::channel(1);
        Self { sender }
    }

    /// Enqueue a task without waiting. Returns `false` if it was dropped.
    pub fn dispatch(&self, task: Task) -> bool {
        let task_id = task.id;
        let kind = task.kind.clone();
        match self.sender.try_send(task) {
            Ok(()) => {
                debug!(task_id = %task_id, kind = %kind, "Task dispatched");
                true
            }
            Err(TrySendError::Full(_)) => {
                warn!(task_id = %task_id, kind = %kind, "Task queue full, dropping task");
                false
            }
            Err(TrySendError::Closed(_)) => {
                warn!(task_id = %task_id, kind = %kind, "Task queue closed, dropping task");
                false
            }
        }
    }
}
