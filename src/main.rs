//! Gateway binary entry point.
//!
//! Startup order: configuration first (the log level lives in it), then
//! logging, then metrics, then the listener. The configuration path comes
//! from the first argument or `GATEWAY_CONFIG`; with neither, built-in
//! defaults apply and only `GATEWAY_*_URL` overrides take effect.

use std::path::Path;

use tokio::net::TcpListener;

use backoffice_gateway::config::loader::{load_config, load_default_config};
use backoffice_gateway::lifecycle::{shutdown_on_signal, Shutdown};
use backoffice_gateway::observability::{logging, metrics};
use backoffice_gateway::GatewayServer;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config_path = std::env::args()
        .nth(1)
        .or_else(|| std::env::var("GATEWAY_CONFIG").ok());
    let config = match &config_path {
        Some(path) => load_config(Path::new(path))?,
        None => load_default_config()?,
    };

    logging::init(&config.observability);

    tracing::info!("backoffice-gateway v0.1.0 starting");
    tracing::info!(
        bind_address = %config.listener.bind_address,
        auth = %config.services.auth,
        ledger = %config.services.ledger,
        hr = %config.services.hr,
        student = %config.services.student,
        reporting = %config.services.reporting,
        max_attempts = config.retries.max_attempts,
        "Configuration loaded"
    );

    if config.observability.metrics_enabled {
        if let Ok(addr) = config.observability.metrics_address.parse() {
            metrics::init_metrics(addr);
        } else {
            tracing::error!(
                metrics_address = %config.observability.metrics_address,
                "Failed to parse metrics address"
            );
        }
    }

    let listener = TcpListener::bind(&config.listener.bind_address).await?;

    let shutdown = Shutdown::new();
    let server_shutdown = shutdown.subscribe();
    tokio::spawn(shutdown_on_signal(shutdown));

    let server = GatewayServer::new(config);
    server.run(listener, server_shutdown).await?;

    tracing::info!("Shutdown complete");
    Ok(())
}
