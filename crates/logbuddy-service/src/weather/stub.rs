//! Offline weather provider.

use async_trait::async_trait;

use logbuddy_core::result::AppResult;
use logbuddy_core::traits::{WeatherProvider, WeatherReport};

use super::mock_weather;

/// Provider that never touches the network.
#[derive(Debug, Clone, Default)]
pub struct StubWeatherProvider;

impl StubWeatherProvider {
    /// Create a stub provider.
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl WeatherProvider for StubWeatherProvider {
    fn name(&self) -> &str {
        "stub"
    }

    async fn current(&self, city: &str) -> AppResult<WeatherReport> {
        Ok(WeatherReport {
            city: city.to_string(),
            mock: true,
            data: mock_weather(city),
        })
    }
}
