//! Custom Axum extractors.

pub mod validated;

pub use validated::{JsonBody, QueryParams, ValidatedJson};
