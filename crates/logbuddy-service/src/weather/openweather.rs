//! OpenWeatherMap-compatible HTTP provider.

use std::time::Duration;

use async_trait::async_trait;
use tracing::{error, info, warn};

use logbuddy_core::config::WeatherConfig;
use logbuddy_core::error::{AppError, ErrorKind};
use logbuddy_core::result::AppResult;
use logbuddy_core::traits::{WeatherProvider, WeatherReport};

use super::mock_weather;

/// Calls `{base_url}/weather` and falls back to mock data when the upstream
/// answers with anything other than a JSON 200.
#[derive(Debug, Clone)]
pub struct OpenWeatherProvider {
    http: reqwest::Client,
    base_url: String,
    api_key: String,
}

impl OpenWeatherProvider {
    /// Create a provider from configuration.
    pub fn new(config: &WeatherConfig) -> AppResult<Self> {
        let http = reqwest::Client::builder()
            .user_agent(concat!("logbuddy/", env!("CARGO_PKG_VERSION")))
            .timeout(Duration::from_secs(config.timeout_seconds))
            .build()
            .map_err(|e| {
                AppError::with_source(ErrorKind::Configuration, "Failed to build HTTP client", e)
            })?;

        Ok(Self {
            http,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            api_key: config.api_key.clone(),
        })
    }

    fn endpoint(&self, city: &str) -> AppResult<reqwest::Url> {
        reqwest::Url::parse_with_params(
            &format!("{}/weather", self.base_url),
            &[
                ("q", city),
                ("appid", self.api_key.as_str()),
                ("units", "metric"),
            ],
        )
        .map_err(|e| {
            AppError::with_source(
                ErrorKind::Configuration,
                format!("Invalid weather base URL '{}'", self.base_url),
                e,
            )
        })
    }

    fn mock(city: &str) -> WeatherReport {
        WeatherReport {
            city: city.to_string(),
            mock: true,
            data: mock_weather(city),
        }
    }
}

fn transport_error(city: &str, err: reqwest::Error) -> AppError {
    if err.is_timeout() {
        error!(city, "Timeout fetching weather data");
        AppError::with_source(ErrorKind::ExternalService, "Request timeout", err)
    } else {
        error!(city, error = %err, "Weather request failed");
        AppError::with_source(ErrorKind::ExternalService, "Request failed", err)
    }
}

#[async_trait]
impl WeatherProvider for OpenWeatherProvider {
    fn name(&self) -> &str {
        "openweather"
    }

    async fn current(&self, city: &str) -> AppResult<WeatherReport> {
        info!(city, "Fetching weather data");
        let url = self.endpoint(city)?;

        let resp = self
            .http
            .get(url)
            .send()
            .await
            .map_err(|e| transport_error(city, e))?;

        let status = resp.status();
        if status != reqwest::StatusCode::OK {
            warn!(city, status = status.as_u16(), "Using mock weather data");
            return Ok(Self::mock(city));
        }

        match resp.json::<serde_json::Value>().await {
            Ok(data) => {
                info!(city, "Weather data retrieved");
                Ok(WeatherReport {
                    city: city.to_string(),
                    mock: false,
                    data,
                })
            }
            Err(e) if e.is_timeout() => Err(transport_error(city, e)),
            Err(e) => {
                warn!(city, error = %e, "Weather response was not JSON, using mock data");
                Ok(Self::mock(city))
            }
        }
    }
}
