//! # logbuddy-core
//!
//! Core crate for LogBuddy. Contains configuration schemas, the unified
//! error system and the traits implemented by collaborator crates.
//!
//! This crate has **no** internal dependencies on other LogBuddy crates.

pub mod config;
pub mod error;
pub mod result;
pub mod traits;

pub use error::{AppError, ErrorKind};
pub use result::AppResult;
