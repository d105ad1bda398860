//! Traefik mapper service.
//!
//! # Architecture Overview
//!
//! ```text
//!   GET /
//!     → http server (request ID, tracing, timeout)
//!     → upstream client (GET base endpoint)   ◀── control plane JSON
//!     → mapper pipeline (filter → rename → inject)
//!     → rewritten JSON response
//!
//!   Cross-cutting: config (env) · observability · lifecycle
//! ```

use tokio::net::TcpListener;

use traefik_mapper::config::load_from_env;
use traefik_mapper::observability::{logging, metrics};
use traefik_mapper::{HttpServer, Shutdown};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    logging::init_tracing();

    tracing::info!("traefik-mapper v{} starting", env!("CARGO_PKG_VERSION"));

    let config = match load_from_env() {
        Ok(config) => config,
        Err(e) => {
            tracing::error!(error = %e, "Invalid configuration");
            return Err(e.into());
        }
    };

    tracing::info!(
        base_endpoint = %config.base_endpoint,
        bind_address = %config.listener.bind_address,
        request_timeout_secs = config.request_timeout_secs,
        "Configuration loaded"
    );

    if let Some(addr) = config.observability.metrics_address {
        metrics::init_metrics(addr);
    }

    let listener = match TcpListener::bind(&config.listener.bind_address).await {
        Ok(listener) => listener,
        Err(e) => {
            tracing::error!(
                bind_address = %config.listener.bind_address,
                error = %e,
                "Failed to bind listener"
            );
            std::process::exit(1);
        }
    };

    tracing::info!(address = %listener.local_addr()?, "Listening for connections");

    let shutdown = Shutdown::new();
    shutdown.trigger_on_signal();

    let server = HttpServer::new(config)?;
    server.run(listener, shutdown.subscribe()).await?;

    tracing::info!("Shutdown complete");
    Ok(())
}
