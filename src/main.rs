//! Mini LRU - A bounded in-memory cache
//!
//! Runs a cache shell over stdin/stdout. Logs go to stderr so stdout carries
//! only JSON responses.

use anyhow::Context;
use tokio::io::{self, BufReader};
use tokio::signal;
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use mini_lru::{shell, AppState, Config};

/// Main entry point for the Mini LRU cache shell.
///
/// # Startup Sequence
/// 1. Initialize tracing subscriber for logging
/// 2. Load configuration from environment variables
/// 3. Create the shared cache store
/// 4. Serve commands from stdin until EOF, `quit`, or a shutdown signal
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Defaults to "info" level, can be overridden with RUST_LOG env var
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "mini_lru=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    info!("Starting Mini LRU cache shell");

    let config = Config::from_env();
    info!(
        "Configuration loaded: capacity={}, expiry_policy={}",
        config.capacity, config.expiry_policy
    );
    if config.capacity == 0 {
        warn!("Capacity is 0; every insertion will be dropped");
    }

    let state = AppState::from_config(&config);

    let session = shell::run(BufReader::new(io::stdin()), io::stdout(), state);

    tokio::select! {
        result = session => {
            let executed = result.context("cache shell session failed")?;
            info!("Session finished after {} commands", executed);
        }
        _ = shutdown_signal() => {}
    }

    info!("Shutdown complete");
    Ok(())
}

/// Waits for shutdown signal (Ctrl+C or SIGTERM).
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(err) = signal::ctrl_c().await {
            warn!("Failed to listen for Ctrl+C: {}", err);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(err) => {
                warn!("Failed to install SIGTERM handler: {}", err);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            info!("Received Ctrl+C, initiating shutdown...");
        }
        _ = terminate => {
            info!("Received SIGTERM, initiating shutdown...");
        }
    }
}
