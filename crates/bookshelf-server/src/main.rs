//! Server binary for the Bookshelf book service.
//!
//! Wires configuration, logging, the `SQLite` pool, and the Axum router
//! together and serves until `Ctrl-C`.
//!
//! # Startup Sequence
//!
//! 1. Load configuration (`bookshelf-config.yaml` + environment)
//! 2. Initialize structured logging (tracing)
//! 3. Open the database and create the `book` table if missing
//! 4. Serve the HTTP API
//! 5. Close the pool on shutdown

mod config;
mod error;

use std::path::PathBuf;
use std::sync::Arc;

use bookshelf_api::AppState;
use bookshelf_db::Database;
use tracing::info;
use tracing_subscriber::EnvFilter;

use crate::config::{LoggingSection, ServiceConfig};
use crate::error::ServiceError;

/// Application entry point.
///
/// Any failure before the server is listening is fatal; once serving,
/// request errors are answered and never stop the process.
#[tokio::main]
async fn main() -> Result<(), ServiceError> {
    let (config, from_file) = load_config()?;

    init_logging(&config.logging);
    info!("bookshelf-server starting");
    if !from_file {
        info!("Config file not found, using defaults");
    }
    info!(
        host = config.server.host,
        port = config.server.port,
        database_url = config.database.url,
        max_connections = config.database.max_connections,
        "Configuration loaded"
    );

    let db = Database::connect(&config.sqlite_config()).await?;
    db.ensure_schema().await?;

    let state = Arc::new(AppState::new(db.clone()));
    bookshelf_api::start_server(&config.server_config(), state).await?;

    db.close().await;
    info!("bookshelf-server stopped");

    Ok(())
}

/// Load configuration from `BOOKSHELF_CONFIG` or `bookshelf-config.yaml`.
///
/// A file named by `BOOKSHELF_CONFIG` must exist. The default file is
/// optional: when it is absent, defaults plus environment overrides are
/// used. Returns whether a file was read.
fn load_config() -> Result<(ServiceConfig, bool), ServiceError> {
    let explicit = std::env::var_os("BOOKSHELF_CONFIG").map(PathBuf::from);
    Ok(ServiceConfig::load(explicit.as_deref())?)
}

/// Install the global tracing subscriber.
///
/// `RUST_LOG` takes precedence over `logging.level`.
fn init_logging(logging: &LoggingSection) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&logging.level));

    if logging.json {
        tracing_subscriber::fmt()
            .json()
            .with_env_filter(filter)
            .with_target(true)
            .init();
    } else {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_target(true)
            .init();
    }
}
