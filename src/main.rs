//! SearchCal GetStar proxy.
//!
//! Serves GetStar over plain HTTP GET in front of the SearchCal SOAP server,
//! which listens on a non-public address.
//!
//! # Architecture Overview
//!
//! ```text
//!                        ┌──────────────────────────────────────────────────────┐
//!                        │                   GETSTAR PROXY                       │
//!                        │                                                       │
//!   GET /getstar?star=…  │  ┌──────────┐   ┌──────────┐   ┌────────────────┐     │
//!   ─────────────────────┼─▶│  query   │──▶│  query   │──▶│ soap::envelope │     │
//!                        │  │  params  │   │  flags   │   └───────┬────────┘     │
//!                        │  └──────────┘   └──────────┘           │              │
//!                        │                                        ▼              │
//!                        │                               ┌────────────────┐      │   SOAP POST
//!                        │                               │ backend client │──────┼──────────▶ SearchCal
//!                        │                               │ (300 s bound)  │◀─────┼─────────── server
//!                        │                               └───────┬────────┘      │
//!                        │                                       ▼               │
//!   200 tsv/xml, 500 html│  ┌──────────┐                ┌────────────────┐      │
//!   ◀────────────────────┼──│ response │◀───────────────│ soap::classify │      │
//!                        │  │ renderer │                └────────────────┘      │
//!                        │  └──────────┘                                        │
//!                        │  config · observability · lifecycle                  │
//!                        └──────────────────────────────────────────────────────┘
//! ```

use std::path::PathBuf;

use clap::Parser;

use sclws_proxy::config::loader::{apply_env_overrides, load_config, ConfigError};
use sclws_proxy::config::validation::validate_config;
use sclws_proxy::config::ProxyConfig;
use sclws_proxy::lifecycle::startup;
use sclws_proxy::observability::logging;

#[derive(Parser)]
#[command(name = "sclws-proxy")]
#[command(about = "HTTP proxy for the SearchCal GetStar SOAP service", long_about = None)]
struct Cli {
    /// TOML configuration file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// SearchCal SOAP server URL (overrides config and SCLWS_BACKEND_URL)
    #[arg(long)]
    backend_url: Option<String>,

    /// Listen address (overrides config and SCLWS_BIND_ADDRESS)
    #[arg(long)]
    bind: Option<String>,
}

fn resolve_config(cli: &Cli) -> Result<ProxyConfig, ConfigError> {
    let mut config = match &cli.config {
        Some(path) => load_config(path)?,
        None => ProxyConfig::default(),
    };

    apply_env_overrides(&mut config);
    if let Some(url) = &cli.backend_url {
        config.backend.url = url.clone();
    }
    if let Some(bind) = &cli.bind {
        config.listener.bind_address = bind.clone();
    }

    validate_config(&config).map_err(ConfigError::Validation)?;
    Ok(config)
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    let config = resolve_config(&cli)?;

    logging::init_logging(&config.observability);

    tracing::info!("sclws-proxy v{} starting", env!("CARGO_PKG_VERSION"));
    tracing::info!(
        bind_address = %config.listener.bind_address,
        path = %config.listener.path,
        backend = %config.backend.url,
        backend_timeout_secs = config.backend.timeout_secs,
        escape_html = config.render.escape_html,
        "Configuration loaded"
    );

    startup::serve(config).await?;

    tracing::info!("Shutdown complete");
    Ok(())
}
