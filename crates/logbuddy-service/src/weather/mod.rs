//! Weather providers for the external-API integration.

pub mod openweather;
pub mod stub;

use std::sync::Arc;

use serde_json::json;
use tracing::info;

use logbuddy_core::config::{WeatherConfig, WeatherProviderKind};
use logbuddy_core::result::AppResult;
use logbuddy_core::traits::WeatherProvider;

pub use openweather::OpenWeatherProvider;
pub use stub::StubWeatherProvider;

/// Canned conditions returned when real data is unavailable.
pub fn mock_weather(city: &str) -> serde_json::Value {
    json!({
        "city": city,
        "temperature": 20.5,
        "description": "Partly cloudy",
        "humidity": 65,
        "note": "This is mock data - replace with actual API key for real data",
    })
}

/// Build the configured provider. An empty API key selects the stub.
pub fn build_provider(config: &WeatherConfig) -> AppResult<Arc<dyn WeatherProvider>> {
    let provider: Arc<dyn WeatherProvider> = match config.provider {
        WeatherProviderKind::OpenWeather if !config.api_key.trim().is_empty() => {
            Arc::new(OpenWeatherProvider::new(config)?)
        }
        _ => Arc::new(StubWeatherProvider::new()),
    };
    info!(provider = provider.name(), "Weather provider initialized");
    Ok(provider)
}
