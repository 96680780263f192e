//! Startup orchestration.
//!
//! # Responsibilities
//! - Start the metrics exporter when enabled
//! - Build the HTTP server and bind its listener
//! - Wire OS signals to graceful shutdown
//!
//! Fail fast: any startup error is fatal. The listener binds last so
//! traffic only arrives once everything else is ready.

use std::net::SocketAddr;

use thiserror::Error;
use tokio::net::TcpListener;

use crate::config::ProxyConfig;
use crate::http::server::{HttpServer, ServerError};
use crate::lifecycle::shutdown::Shutdown;
use crate::lifecycle::signals::spawn_signal_handler;
use crate::observability::metrics;

/// Fatal startup errors.
#[derive(Debug, Error)]
pub enum StartupError {
    #[error(transparent)]
    Server(#[from] ServerError),

    #[error("failed to bind {address}: {source}")]
    Bind {
        address: String,
        source: std::io::Error,
    },

    #[error("server error: {0}")]
    Serve(#[from] std::io::Error),
}

/// Run the proxy with a validated configuration until a shutdown signal.
pub async fn serve(config: ProxyConfig) -> Result<(), StartupError> {
    if config.observability.metrics_enabled {
        match config.observability.metrics_address.parse::<SocketAddr>() {
            Ok(addr) => metrics::init_metrics(addr),
            Err(_) => tracing::error!(
                metrics_address = %config.observability.metrics_address,
                "Failed to parse metrics address"
            ),
        }
    }

    let bind_address = config.listener.bind_address.clone();
    let server = HttpServer::new(config)?;

    let listener = TcpListener::bind(&bind_address)
        .await
        .map_err(|source| StartupError::Bind {
            address: bind_address.clone(),
            source,
        })?;

    tracing::info!(
        address = %listener.local_addr()?,
        max_connections = server.config().listener.max_connections,
        request_timeout_secs = server.config().timeouts.request_secs,
        "Listening for connections"
    );

    let shutdown = Shutdown::new();
    let receiver = shutdown.subscribe();
    spawn_signal_handler(shutdown);

    server.run(listener, receiver).await?;
    Ok(())
}
