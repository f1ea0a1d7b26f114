//! Application state shared across all handlers.

use std::sync::Arc;

use logbuddy_core::config::AppConfig;
use logbuddy_core::traits::WeatherProvider;
use logbuddy_database::DatabasePool;
use logbuddy_service::EntryService;
use logbuddy_worker::TaskDispatcher;

/// Application state containing all shared dependencies.
///
/// Passed to every Axum handler via `State<AppState>`. All fields are cheap
/// to clone.
#[derive(Debug, Clone)]
pub struct AppState {
    /// Application configuration.
    pub config: Arc<AppConfig>,
    /// SQLite connection pool, used for health checks.
    pub db: DatabasePool,
    /// Entry store.
    pub entries: Arc<EntryService>,
    /// External weather provider.
    pub weather: Arc<dyn WeatherProvider>,
    /// Hand-off for detached tasks.
    pub dispatcher: TaskDispatcher,
}
