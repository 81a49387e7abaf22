use std::net::SocketAddr;

use anyhow::Context;
use dotenv::dotenv;
use tokio::net::TcpListener;
use tokio::signal;
use tracing::{error, info, warn};
use tracing_subscriber::{
    fmt::{self, format::FmtSpan},
    prelude::*,
    EnvFilter,
};

use vitals_tracker_api::api::create_application;
use vitals_tracker_domain::database::{get_connection_info, initialize_database_pool, DatabaseConfig};

const DEFAULT_PORT: u16 = 3000;

/// The main entry point for the Vitals Tracker API server
///
/// Loads `.env`, installs tracing, opens the SQLite pool (falling back to
/// in-memory storage if that fails), then serves until Ctrl+C or SIGTERM.
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let env_loaded = dotenv().is_ok();

    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::registry()
        .with(
            fmt::layer()
                .with_span_events(FmtSpan::CLOSE)
                .with_target(false)
                .with_timer(fmt::time::uptime())
                .with_writer(std::io::stdout),
        )
        .with(env_filter)
        .init();

    if !env_loaded {
        warn!(".env file not found or couldn't be read. Using environment variables.");
    }

    info!("🚀 Starting Vitals Tracker API server");

    let db_config = DatabaseConfig::from_env();
    match initialize_database_pool(&db_config) {
        Ok(()) => info!(
            "Database pool initialized: {}",
            get_connection_info().unwrap_or_else(|| db_config.sqlite_path.clone())
        ),
        Err(e) => {
            // Keep serving; repositories fall back to in-memory storage
            error!("Failed to initialize database pool: {}", e);
        }
    }

    let app = create_application();

    let port = match std::env::var("PORT") {
        Ok(value) => value
            .parse::<u16>()
            .with_context(|| format!("PORT must be a number, got {:?}", value))?,
        Err(_) => DEFAULT_PORT,
    };

    let addr = SocketAddr::from(([0, 0, 0, 0], port));
    let listener = TcpListener::bind(addr)
        .await
        .with_context(|| format!("failed to bind {}", addr))?;
    info!("Listening on {}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("server error")?;

    info!("Server shutdown complete");
    Ok(())
}

/// Resolves on Ctrl+C or, on Unix, SIGTERM
async fn shutdown_signal() {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("Failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    info!("Shutting down server...");
}
