//! External weather API configuration.

use serde::{Deserialize, Serialize};
use validator::Validate;

/// Which weather provider implementation to use.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WeatherProviderKind {
    /// Call the OpenWeatherMap-compatible HTTP API, falling back to mock data.
    #[default]
    OpenWeather,
    /// Never touch the network; always return mock data.
    Stub,
}

/// Weather integration settings.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct WeatherConfig {
    /// Provider implementation.
    #[serde(default)]
    pub provider: WeatherProviderKind,
    /// Base URL of the weather API (without the `/weather` path).
    #[serde(default = "default_base_url")]
    #[validate(length(min = 1))]
    pub base_url: String,
    /// API key sent as `appid`.
    #[serde(default = "default_api_key")]
    pub api_key: String,
    /// Request timeout in seconds.
    #[serde(default = "default_timeout")]
    #[validate(range(min = 1, max = 120))]
    pub timeout_seconds: u64,
    /// City used when the caller does not name one.
    #[serde(default = "default_city")]
    pub default_city: String,
}

impl Default for WeatherConfig {
    fn default() -> Self {
        Self {
            provider: WeatherProviderKind::default(),
            base_url: default_base_url(),
            api_key: default_api_key(),
            timeout_seconds: default_timeout(),
            default_city: default_city(),
        }
    }
}

fn default_base_url() -> String {
    "https://api.openweathermap.org/data/2.5".to_string()
}

fn default_api_key() -> String {
    "demo_key".to_string()
}

fn default_timeout() -> u64 {
    10
}

fn default_city() -> String {
    "London".to_string()
}
