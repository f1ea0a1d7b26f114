//! Built-in task handlers.

pub mod webhook;

pub use webhook::WebhookTaskHandler;
