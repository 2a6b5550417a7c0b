//! slapvote-srv - Main entry point
//!
//! Music review and voting backend: starts the HTTP API, initializes the
//! database, runs the candidate-submission retention sweep, and wires the
//! catalog proxy credentials from the environment.

use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;
use tracing::{info, warn};

use slapvote_common::config::{prepare_root_folder, resolve_root_folder, CatalogCredentials};
use slapvote_common::db::init_database;
use slapvote_common::time;
use slapvote_srv::catalog::CatalogClient;
use slapvote_srv::db::submissions;
use slapvote_srv::{build_router, AppState};

/// Command-line arguments for slapvote-srv
#[derive(Parser, Debug)]
#[command(name = "slapvote-srv")]
#[command(about = "Music review and voting backend")]
#[command(version)]
struct Args {
    /// Port to listen on
    #[arg(short, long, default_value = "5750", env = "SLAPVOTE_PORT")]
    port: u16,

    /// Root folder for the database (overrides env and config file)
    #[arg(short, long)]
    root_folder: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing subscriber
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .init();

    // Log build identification immediately after tracing init
    info!(
        "Starting slapvote-srv v{} [{}] built {} ({})",
        env!("CARGO_PKG_VERSION"),
        env!("GIT_HASH"),
        env!("BUILD_TIMESTAMP"),
        env!("BUILD_PROFILE")
    );

    let args = Args::parse();

    let root_folder = resolve_root_folder(args.root_folder.as_deref());
    let db_path = prepare_root_folder(&root_folder)?;
    info!("Database path: {}", db_path.display());

    let pool = init_database(&db_path).await?;

    // Catalog credentials are per-request failures, not startup failures:
    // voting and charts work without them
    let credentials = CatalogCredentials::from_env();
    if credentials.is_none() {
        warn!("Catalog credentials not set; proxy endpoints will return errors");
    }
    let catalog = CatalogClient::new(credentials)?;

    // Session-start retention sweep for candidate submissions
    let swept = submissions::sweep_expired(&pool, time::now_ms()).await?;
    info!(swept, "Startup submission sweep complete");

    let state = AppState::new(pool, catalog);
    let app = build_router(state);

    let listener = tokio::net::TcpListener::bind(("127.0.0.1", args.port)).await?;
    info!("slapvote-srv listening on http://127.0.0.1:{}", args.port);
    info!("Health check: http://127.0.0.1:{}/health", args.port);

    axum::serve(listener, app).await?;

    Ok(())
}
