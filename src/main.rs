use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::{error, info};

use duo_mapping_api::api::{router, AppState};
use duo_mapping_api::config::AppConfig;
use duo_mapping_api::db::Database;
use duo_mapping_api::logging::init_logging;

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Address to bind the HTTP listener to (overrides configuration)
    #[arg(short, long)]
    bind: Option<String>,

    /// Path to the SQLite database file (overrides configuration)
    #[arg(short, long)]
    database: Option<String>,

    /// Log level (overrides configuration)
    #[arg(short, long)]
    log_level: Option<String>,
}

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration
    let config = AppConfig::load()?;

    // Parse command line arguments
    let cli = Cli::parse();

    // Initialize logging; keep the file-appender guard alive until exit
    let log_level = cli
        .log_level
        .clone()
        .unwrap_or_else(|| config.get_log_level());
    let log_file = config.logging.file_path.as_ref().map(PathBuf::from);
    let _guard = init_logging(Some(&log_level), log_file.as_deref())?;

    info!("Starting Duo Mapping API");

    // Open the store; the handle lives for the whole process and is
    // passed down explicitly
    let database_path = cli
        .database
        .clone()
        .unwrap_or_else(|| config.get_database_path());
    let db = Arc::new(
        Database::new(&database_path, config.database.max_connections)
            .context("Failed to open database")?,
    );
    info!(
        path = %database_path,
        pool_size = db.pool_size(),
        "Database ready"
    );

    let state = AppState::new(db);
    let app = router(state);

    let bind_addr = cli.bind.unwrap_or_else(|| config.server.bind_addr.clone());
    let listener = tokio::net::TcpListener::bind(&bind_addr)
        .await
        .with_context(|| format!("Failed to bind {bind_addr}"))?;
    info!(addr = %bind_addr, "Listening for requests");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Server error")?;

    info!("Shutdown complete");
    Ok(())
}

/// Resolve when the process receives Ctrl-C
async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        error!(error = %err, "Failed to listen for shutdown signal");
    }
}
