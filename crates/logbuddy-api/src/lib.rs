//! # logbuddy-api
//!
//! HTTP API layer for LogBuddy built on Axum.
//!
//! Provides the REST endpoints, middleware (CORS, request logging,
//! compression, timeouts), extractors, DTOs and error mapping, plus the
//! wiring that turns an [`AppConfig`](logbuddy_core::config::AppConfig) into a
//! running server.

pub mod app;
pub mod dto;
pub mod error;
pub mod extractors;
pub mod handlers;
pub mod middleware;
pub mod router;
pub mod state;

pub use app::{Application, bootstrap, run_server};
pub use error::ApiError;
pub use router::build_router;
pub use state::AppState;
