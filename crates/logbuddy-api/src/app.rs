//! Application builder: wires configuration, storage, services and the
//! background worker into a runnable server.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::{mpsc, watch};
use tokio::task::JoinHandle;

use logbuddy_core::config::AppConfig;
use logbuddy_core::error::{AppError, ErrorKind};
use logbuddy_core::result::AppResult;
use logbuddy_database::migration::run_migrations;
use logbuddy_database::{DatabasePool, LogEntryRepository};
use logbuddy_service::EntryService;
use logbuddy_service::weather::build_provider;
use logbuddy_worker::{Task, TaskDispatcher, TaskExecutor, WebhookTaskHandler, WorkerRunner};

use crate::router::build_router;
use crate::state::AppState;

/// A fully wired application whose worker has not been started yet.
#[derive(Debug)]
pub struct Application {
    /// Shared handler state.
    pub state: AppState,
    worker: Option<(WorkerRunner, mpsc::Receiver<Task>)>,
}

impl Application {
    /// The Axum router for this application.
    pub fn router(&self) -> axum::Router {
        build_router(self.state.clone())
    }

    /// Start the background worker, if enabled. The worker stops when
    /// `cancel` flips to `true`.
    pub fn spawn_worker(&mut self, cancel: watch::Receiver<bool>) -> Option<JoinHandle<()>> {
        self.worker
            .take()
            .map(|(runner, receiver)| tokio::spawn(runner.run(receiver, cancel)))
    }
}

/// Connect storage, run migrations and build every service.
pub async fn bootstrap(config: AppConfig) -> AppResult<Application> {
    let db = DatabasePool::connect(&config.database).await?;
    run_migrations(db.pool()).await?;

    let repo = Arc::new(LogEntryRepository::new(db.pool().clone()));
    let entries = Arc::new(EntryService::new(repo));
    let weather = build_provider(&config.weather)?;

    let (dispatcher, worker) = if config.worker.enabled {
        let mut executor = TaskExecutor::new();
        executor.register(Arc::new(WebhookTaskHandler::new(Arc::clone(&entries))));

        let (dispatcher, receiver) = TaskDispatcher::channel(config.worker.queue_capacity);
        let runner = WorkerRunner::new(Arc::new(executor), config.worker.clone());
        (dispatcher, Some((runner, receiver)))
    } else {
        tracing::warn!("Worker disabled; webhook payloads will be dropped");
        (TaskDispatcher::disabled(), None)
    };

    let state = AppState {
        config: Arc::new(config),
        db,
        entries,
        weather,
        dispatcher,
    };

    Ok(Application { state, worker })
}

/// Run the server until a shutdown signal arrives.
pub async fn run_server(config: AppConfig) -> AppResult<()> {
    tracing::info!("LogBuddy application starting up");

    let addr = config.server.bind_address();
    let http_grace = Duration::from_secs(config.server.shutdown_grace_seconds);
    let worker_grace = Duration::from_secs(config.worker.shutdown_timeout_seconds);

    let mut app = bootstrap(config).await?;
    let (shutdown_tx, shutdown_rx) = watch::channel(false);
    let mut stopping = shutdown_rx.clone();
    let worker = app.spawn_worker(shutdown_rx);

    let router = app.router();
    let listener = tokio::net::TcpListener::bind(&addr).await.map_err(|e| {
        AppError::with_source(ErrorKind::Internal, format!("Failed to bind {addr}"), e)
    })?;

    tracing::info!(address = %addr, "LogBuddy server listening");

    let server = axum::serve(listener, router)
        .with_graceful_shutdown(async move {
            shutdown_signal().await;
            let _ = shutdown_tx.send(true);
        })
        .into_future();
    tokio::pin!(server);

    // Open connections get `shutdown_grace_seconds` to drain once the signal arrives.
    let served = tokio::select! {
        res = &mut server => Some(res),
        _ = stopping.wait_for(|stop| *stop) => {
            tokio::time::timeout(http_grace, &mut server).await.ok()
        }
    };
    match served {
        Some(res) => {
            res.map_err(|e| AppError::with_source(ErrorKind::Internal, "Server error", e))?
        }
        None => tracing::warn!("Open connections did not close before the shutdown grace period"),
    }

    if let Some(handle) = worker {
        if tokio::time::timeout(worker_grace + Duration::from_secs(1), handle)
            .await
            .is_err()
        {
            tracing::warn!("Worker did not stop in time");
        }
    }

    app.state.db.close().await;
    tracing::info!("LogBuddy application shut down");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %e, "Failed to install Ctrl+C handler");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut sig) => {
                sig.recv().await;
            }
            Err(e) => {
                tracing::error!(error = %e, "Failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => tracing::info!("Received Ctrl+C"),
        _ = terminate => tracing::info!("Received SIGTERM"),
    }
}
