//! Route handlers organized by domain.

pub mod analytics;
pub mod export;
pub mod external;
pub mod health;
pub mod logs;
