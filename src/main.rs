//! LogBuddy server: log intake, query, analytics and export over HTTP.
//!
//! Main entry point that loads configuration, sets up logging and runs the
//! server until Ctrl+C or SIGTERM.

use std::path::Path;

use tracing_appender::non_blocking::WorkerGuard;
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::filter::LevelFilter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, Layer, Registry, fmt};

use logbuddy_core::config::{AppConfig, LoggingConfig};

type BoxedLayer = Box<dyn Layer<Registry> + Send + Sync>;

#[tokio::main]
async fn main() {
    let env = std::env::var("LOGBUDDY_ENV").unwrap_or_else(|_| "development".to_string());

    let config = match AppConfig::load(&env) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Failed to load configuration: {e}");
            std::process::exit(1);
        }
    };

    let _guards = init_logging(&config.logging);
    tracing::info!(env = %env, version = env!("CARGO_PKG_VERSION"), "Starting LogBuddy");

    if let Err(e) = logbuddy_api::run_server(config).await {
        tracing::error!(error = %e, "Server error");
        std::process::exit(1);
    }
}

/// Install the global subscriber. `RUST_LOG` overrides the configured level.
///
/// The returned guards flush the file writers when dropped and must live
/// until the process exits.
fn init_logging(config: &LoggingConfig) -> Vec<WorkerGuard> {
    let level = config.level.clone();
    let filter = move || {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&level))
    };

    let mut layers: Vec<BoxedLayer> = Vec::new();
    let mut guards = Vec::new();

    let console = match config.format.as_str() {
        "json" => fmt::layer()
            .json()
            .with_target(true)
            .with_thread_ids(true)
            .with_filter(filter())
            .boxed(),
        _ => fmt::layer()
            .pretty()
            .with_target(true)
            .with_filter(filter())
            .boxed(),
    };
    layers.push(console);

    if config.file_logging {
        let dir = Path::new(&config.directory);
        match (
            rolling_file(dir, "app", config.max_files),
            rolling_file(dir, "error", config.max_files),
        ) {
            (Ok(app), Ok(error)) => {
                let (app_writer, app_guard) = tracing_appender::non_blocking(app);
                let (error_writer, error_guard) = tracing_appender::non_blocking(error);
                guards.push(app_guard);
                guards.push(error_guard);

                layers.push(
                    fmt::layer()
                        .with_ansi(false)
                        .with_writer(app_writer)
                        .with_filter(filter())
                        .boxed(),
                );
                layers.push(
                    fmt::layer()
                        .with_ansi(false)
                        .with_writer(error_writer)
                        .with_filter(LevelFilter::ERROR)
                        .boxed(),
                );
            }
            (Err(e), _) | (_, Err(e)) => {
                eprintln!(
                    "File logging disabled: cannot open log files in '{}': {e}",
                    config.directory
                );
            }
        }
    }

    if let Err(e) = tracing_subscriber::registry().with(layers).try_init() {
        eprintln!("Failed to install tracing subscriber: {e}");
    }

    guards
}

/// Daily-rotated `<prefix>.log` files in `dir`, keeping at most `max_files`.
fn rolling_file(
    dir: &Path,
    prefix: &str,
    max_files: usize,
) -> Result<RollingFileAppender, tracing_appender::rolling::InitError> {
    RollingFileAppender::builder()
        .rotation(Rotation::DAILY)
        .filename_prefix(prefix)
        .filename_suffix("log")
        .max_log_files(max_files)
        .build(dir)
}
