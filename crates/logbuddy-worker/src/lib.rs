//! Detached background task processing for LogBuddy.
//!
//! This crate provides:
//! - A bounded, non-blocking dispatcher that request handlers hand work to
//! - A task executor that routes each task to the handler for its kind
//! - A worker runner that drains the queue with bounded concurrency
//! - The webhook task, which records received payloads as log entries
//!
//! Delivery is best effort: tasks are never retried, and a full queue drops
//! new work with a warning.

pub mod dispatcher;
pub mod executor;
pub mod runner;
pub mod task;
pub mod tasks;

pub use dispatcher::TaskDispatcher;
pub use executor::{TaskExecutionError, TaskExecutor, TaskHandler};
pub use runner::WorkerRunner;
pub use task::Task;
pub use tasks::WebhookTaskHandler;
pub use tasks::webhook::{METADATA_REJECTED, WEBHOOK_SOURCE, WEBHOOK_TASK};
