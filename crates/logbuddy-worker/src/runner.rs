//! Worker runner: drains the task queue until shutdown.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::{Semaphore, mpsc, watch};
use tracing::{error, info, warn};

use logbuddy_core::config::WorkerConfig;

use crate::executor::TaskExecutor;
use crate::task::Task;

/// Consumes dispatched tasks and runs each on its own tokio task, with at
/// most `concurrency` running at once.
#[derive(Debug)]
pub struct WorkerRunner {
    executor: Arc<TaskExecutor>,
    config: WorkerConfig,
}

impl WorkerRunner {
    /// Create a new worker runner.
    pub fn new(executor: Arc<TaskExecutor>, config: WorkerConfig) -> Self {
        Self { executor, config }
    }

    /// Run until the cancel signal flips to `true`, its sender is dropped, or
    /// every dispatcher is gone. Queued tasks that have not started by then are
    /// dropped; in-flight ones get `shutdown_timeout_seconds` to finish.
    pub async fn run(self, mut receiver: mpsc::Receiver<Task>, mut cancel: watch::Receiver<bool>) {
        info!(
            concurrency = self.config.concurrency,
            queue_capacity = self.config.queue_capacity,
            "Worker started"
        );

        let concurrency = self.config.concurrency.max(1);
        let semaphore = Arc::new(Semaphore::new(concurrency));

        loop {
            let task = tokio::select! {
                changed = cancel.changed() => {
                    if changed.is_err() || *cancel.borrow() {
                        info!("Worker received shutdown signal");
                        break;
                    }
                    continue;
                }
                task = receiver.recv() => match task {
                    Some(task) => task,
                    None => {
                        info!("Task queue closed");
                        break;
                    }
                },
            };

            let permit = tokio::select! {
                permit = semaphore.clone().acquire_owned() => match permit {
                    Ok(permit) => permit,
                    Err(_) => break,
                },
                _ = cancel.changed() => {
                    warn!(task_id = %task.id, kind = %task.kind, "Shutdown while waiting for a slot, dropping task");
                    break;
                }
            };

            let executor = Arc::clone(&self.executor);
            tokio::spawn(async move {
                let _permit = permit;
                match executor.execute(&task).await {
                    Ok(()) => info!(task_id = %task.id, kind = %task.kind, "Task completed"),
                    Err(e) => error!(task_id = %task.id, kind = %task.kind, error = %e, "Task failed"),
                }
            });
        }

        receiver.close();
        let mut dropped = 0usize;
        while receiver.try_recv().is_ok() {
            dropped += 1;
        }
        if dropped > 0 {
            warn!(dropped, "Dropped queued tasks on shutdown");
        }

        info!("Worker waiting for in-flight tasks");
        let permits = u32::try_from(concurrency).unwrap_or(u32::MAX);
        let grace = Duration::from_secs(self.config.shutdown_timeout_seconds);
        if tokio::time::timeout(grace, semaphore.acquire_many(permits))
            .await
            .is_err()
        {
            warn!("In-flight tasks did not finish before the shutdown timeout");
        }

        info!("Worker shut down");
    }
}
