//! EquityPath API Server
//!
//! HTTP API with asset search, history, prediction and watchlist endpoints,
//! plus health check and metrics.

use dotenvy::dotenv;
use equitypath::config::Config;
use equitypath::core::http::start_server;
use equitypath::logging;
use tokio::signal;
use tracing::{error, info};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Load environment variables from .env if present
    dotenv().ok();

    logging::init_logging();

    let config = Config::from_env()?;
    info!("Starting EquityPath API Server");
    info!(environment = %config.environment, "Environment");
    info!(port = config.port, "HTTP Server: http://0.0.0.0:{}", config.port);
    info!(
        remote_analysis = config.remote_analysis_url.is_some(),
        live_data = config.live_data_url.is_some(),
        "Analysis backends"
    );

    tokio::select! {
        _ = signal::ctrl_c() => {
            info!("Shutting down API server...");
        }
        result = start_server(&config) => {
            if let Err(e) = result {
                error!(error = %e, "HTTP server error");
                return Err(e);
            }
            error!("HTTP server stopped");
        }
    }

    Ok(())
}
