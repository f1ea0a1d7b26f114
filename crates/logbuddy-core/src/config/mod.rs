//! Application configuration schemas.
//!
//! All configuration structs are deserialized via the `config` crate from
//! `config/default.toml`, an optional environment overlay and
//! `LOGBUDDY__*` environment variables. Every field has a default, so an
//! empty configuration still yields a runnable service.

pub mod app;
pub mod database;
pub mod export;
pub mod logging;
pub mod weather;
pub mod worker;

use std::path::Path;

use serde::{Deserialize, Serialize};
use validator::Validate;

pub use self::app::{CorsConfig, ServerConfig};
pub use self::database::DatabaseConfig;
pub use self::export::ExportConfig;
pub use self::logging::LoggingConfig;
pub use self::weather::{WeatherConfig, WeatherProviderKind};
pub use self::worker::WorkerConfig;

use crate::error::AppError;

/// Prefix for environment variable overrides (`LOGBUDDY__SERVER__PORT=9000`).
pub const ENV_PREFIX: &str = "LOGBUDDY";

/// Root application configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
pub struct AppConfig {
    /// HTTP server settings.
    #[serde(default)]
    #[validate(nested)]
    pub server: ServerConfig,
    /// Database connection settings.
    #[serde(default)]
    #[validate(nested)]
    pub database: DatabaseConfig,
    /// Logging settings.
    #[serde(default)]
    #[validate(nested)]
    pub logging: LoggingConfig,
    /// Background task worker settings.
    #[serde(default)]
    #[validate(nested)]
    pub worker: WorkerConfig,
    /// External weather API settings.
    #[serde(default)]
    #[validate(nested)]
    pub weather: WeatherConfig,
    /// CSV export settings.
    #[serde(default)]
    pub export: ExportConfig,
}

impl AppConfig {
    /// Load configuration from the `config/` directory for the given environment.
    pub fn load(env: &str) -> Result<Self, AppError> {
        Self::load_from(Path::new("config"), env)
    }

    /// Load configuration from `dir/default.toml`, `dir/{env}.toml` and the
    /// environment, in increasing order of precedence.
    pub fn load_from(dir: &Path, env: &str) -> Result<Self, AppError> {
        let config = config::Config::builder()
            .add_source(config::File::from(dir.join("default")).required(false))
            .add_source(config::File::from(dir.join(env)).required(false))
            .add_source(
                config::Environment::with_prefix(ENV_PREFIX)
                    .prefix_separator("__")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()
            .map_err(|e| AppError::configuration(format!("Failed to build config: {e}")))?;

        let config: Self = config
            .try_deserialize()
            .map_err(|e| AppError::configuration(format!("Failed to deserialize config: {e}")))?;

        config
            .validate()
            .map_err(|e| AppError::configuration(format!("Invalid configuration: {e}")))?;

        Ok(config)
    }
}
