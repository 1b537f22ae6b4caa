//! Skylog API Server
//!
//! This crate provides the HTTP server for the Skylog weather service. It
//! answers measurement list and metrics queries over stored observations.
//!
//! # Architecture
//!
//! The API server is built on Axum and Tokio, providing:
//! - `GET /api/measurements` and `GET /api/measurements/metrics`
//! - `GET /api/fields` with the field catalogue
//! - `GET /health` for load balancers
//! - Optional static file serving for everything outside `/api`
//!
//! # Example
//!
//! ```no_run
//! use api::run_server;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     run_server().await
//! }
//! ```

#![deny(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

mod config;
pub mod db;
mod routes;
mod state;

pub use config::{Config, StorageBackend};
pub use routes::{ApiError, ErrorBody};
pub use state::AppState;

use anyhow::{Context, Result};
use axum::{routing::any, Router};
use db::{Database, DatabaseConfig};
use shared::storage::ClickHouseObservationStore;
use std::path::Path;
use tokio::net::TcpListener;
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;

/// Runs the Skylog API server.
///
/// This function initializes the server with configuration from environment variables
/// and starts listening for incoming connections. It handles graceful shutdown on
/// SIGTERM/SIGINT signals.
///
/// # Errors
///
/// Returns an error if:
/// - Configuration cannot be loaded from environment
/// - The configured storage backend cannot be reached
/// - The server fails to bind to the configured address
pub async fn run_server() -> Result<()> {
    let config = Config::from_env()?;
    run_server_with_config(config).await
}

/// Runs the Skylog API server with the provided configuration.
///
/// # Errors
///
/// Returns an error if:
/// - The configured storage backend cannot be reached
/// - The server fails to bind to the configured address
/// - A fatal error occurs during operation
pub async fn run_server_with_config(config: Config) -> Result<()> {
    let addr = config.socket_addr()?;

    tracing::info!(
        host = %config.host,
        port = %config.port,
        storage = ?config.storage,
        "Skylog API server starting"
    );

    let state = build_state(config.storage).await?;
    let app = build_router(state, config.static_dir.as_deref());
    let listener = TcpListener::bind(addr)
        .await
        .with_context(|| format!("failed to bind {addr}"))?;

    tracing::info!(%addr, "Listening for connections");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Server shutdown complete");
    Ok(())
}

async fn build_state(storage: StorageBackend) -> Result<AppState> {
    match storage {
        StorageBackend::Memory => Ok(AppState::with_in_memory_store()),
        StorageBackend::ClickHouse => {
            let db_config = DatabaseConfig::from_env();
            let db = Database::new(&db_config);
            db.ping().await?;

            let store = ClickHouseObservationStore::new_shared(db.client());
            store
                .ensure_schema()
                .context("failed to create observations table")?;

            tracing::info!(
                url = %db_config.url,
                database = %db_config.database,
                "Connected to ClickHouse"
            );
            Ok(AppState::new(store))
        }
    }
}

/// Creates the application router with all API routes and middleware.
///
/// This function is public to allow testing the router without starting a full server.
pub fn create_router(state: AppState) -> Router {
    build_router(state, None)
}

/// Creates the application router, serving `static_dir` for non-API paths.
pub fn build_router(state: AppState, static_dir: Option<&Path>) -> Router {
    let router = Router::new()
        .merge(routes::health_routes(state.clone()))
        .merge(routes::measurement_routes(state))
        .merge(routes::field_routes())
        .route("/api", any(routes::api_not_found))
        .route("/api/{*path}", any(routes::api_not_found))
        .method_not_allowed_fallback(routes::method_not_allowed);

    let router = match static_dir {
        Some(dir) => router.fallback_service(ServeDir::new(dir)),
        None => router,
    };

    router.layer(TraceLayer::new_for_http())
}

/// Waits for a shutdown signal (SIGTERM or SIGINT).
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %e, "Failed to listen for Ctrl+C");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
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
        () = ctrl_c => {
            tracing::info!("Received Ctrl+C, starting graceful shutdown");
        }
        () = terminate => {
            tracing::info!("Received SIGTERM, starting graceful shutdown");
        }
    }
}
