//! Weather provider trait for the external-API integration.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::result::AppResult;

/// Current conditions for a city as returned to API callers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeatherReport {
    /// City the report was requested for.
    pub city: String,
    /// Whether the data is canned rather than fetched from the upstream API.
    pub mock: bool,
    /// Upstream payload, or the mock body.
    pub data: serde_json::Value,
}

/// Trait for weather backends.
///
/// Implementations must never panic on network failure; transport problems
/// are reported as `ExternalService` errors and callers decide how to
/// surface them.
#[async_trait]
pub trait WeatherProvider: Send + Sync + std::fmt::Debug + 'static {
    /// Short provider name used in logs (e.g. `"openweather"`, `"stub"`).
    fn name(&self) -> &str;

    /// Fetch current conditions for `city`.
    async fn current(&self, city: &str) -> AppResult<WeatherReport>;
}
