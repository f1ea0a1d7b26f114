//! # logbuddy-service
//!
//! Business logic service layer for LogBuddy.
//!
//! - [`EntryService`] validates input and owns the entry store contract.
//! - [`analytics`] and [`export`] are pure transformations over snapshots.
//! - [`weather`] holds the pluggable external weather providers.
//!
//! Services follow constructor injection: dependencies are provided at
//! construction time via `Arc` references.

pub mod analytics;
pub mod entry;
pub mod export;
pub mod weather;

pub use analytics::{AnalyticsReport, HourlyBucket};
pub use entry::EntryService;
pub use export::ExportSummary;
pub use weather::{OpenWeatherProvider, StubWeatherProvider};
