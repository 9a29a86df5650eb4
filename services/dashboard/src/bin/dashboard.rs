//! services/dashboard/src/bin/dashboard.rs

use dashboard_lib::{config::Config, error::DashboardError, shell};
use std::sync::Arc;
use tokio::io::BufReader;
use tokio_util::sync::CancellationToken;
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<(), DashboardError> {
    // --- 1. Load Configuration & Set Up Logging ---
    let config = Arc::new(Config::from_env()?);
    // Logs go to stderr so they never interleave with the shell on stdout.
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(config.log_level.to_string()))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .try_init()
        .map_err(|e| DashboardError::Internal(e.to_string()))?;
    info!("Configuration loaded. Loading DEH Dashboard...");

    // --- 2. Build the Stores & Restore Persisted State ---
    let app_state = shell::AppState::build(config.clone())?;
    if let Some(user) = app_state.identity.session() {
        info!("Resuming session of {}", user.email);
    }

    // --- 3. Cancel the Shell on Ctrl-C ---
    let shutdown = CancellationToken::new();
    let ctrl_c_token = shutdown.clone();
    tokio::spawn(async move {
        match tokio::signal::ctrl_c().await {
            Ok(()) => ctrl_c_token.cancel(),
            Err(e) => warn!("Could not listen for Ctrl-C: {}", e),
        }
    });

    // --- 4. Run the Shell ---
    shell::run(
        &app_state,
        BufReader::new(tokio::io::stdin()),
        tokio::io::stdout(),
        shutdown,
    )
    .await?;

    info!("Dashboard closed");
    Ok(())
}
