//! Convenience result type alias for LogBuddy.

use crate::error::AppError;

/// A specialized `Result` type for LogBuddy operations.
pub type AppResult<T> = Result<T, AppError>;
