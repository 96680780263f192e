//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation (serde handles syntactic)
//! - Validate value ranges (timeouts, limits, addresses)
//! - Check the backend URL is reachable by the plain HTTP connector
//!
//! # Design Decisions
//! - Returns all validation errors, not just first
//! - Validation is pure function: ProxyConfig → Result<(), Vec<ValidationError>>
//! - Runs before config is accepted into the system

use std::net::SocketAddr;

use thiserror::Error;
use url::Url;

use crate::config::schema::{ProxyConfig, MAX_BACKEND_TIMEOUT_SECS};

/// A single semantic problem found in a configuration.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("listener.bind_address '{0}' is not a socket address")]
    BindAddress(String),

    #[error("listener.path '{0}' must start with '/' and must not be '/health'")]
    RoutePath(String),

    #[error("listener.max_connections must be greater than zero")]
    MaxConnections,

    #[error("backend.url '{url}' is invalid: {reason}")]
    BackendUrl { url: String, reason: String },

    #[error("backend.timeout_secs must be between 1 and {max}, got {got}")]
    BackendTimeout { got: u64, max: u64 },

    #[error("backend.max_response_bytes must be greater than zero")]
    MaxResponseBytes,

    #[error("timeouts.request_secs ({request}) must be longer than backend.timeout_secs ({backend})")]
    RequestTimeout { request: u64, backend: u64 },

    #[error("observability.metrics_address '{0}' is not a socket address")]
    MetricsAddress(String),
}

/// Check a configuration, collecting every violation.
pub fn validate_config(config: &ProxyConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    if config.listener.bind_address.parse::<SocketAddr>().is_err() {
        errors.push(ValidationError::BindAddress(config.listener.bind_address.clone()));
    }

    let path = &config.listener.path;
    if !path.starts_with('/') || path == "/health" {
        errors.push(ValidationError::RoutePath(path.clone()));
    }

    if config.listener.max_connections == 0 {
        errors.push(ValidationError::MaxConnections);
    }

    if let Err(reason) = check_backend_url(&config.backend.url) {
        errors.push(ValidationError::BackendUrl {
            url: config.backend.url.clone(),
            reason,
        });
    }

    let backend_secs = config.backend.timeout_secs;
    if backend_secs == 0 || backend_secs > MAX_BACKEND_TIMEOUT_SECS {
        errors.push(ValidationError::BackendTimeout {
            got: backend_secs,
            max: MAX_BACKEND_TIMEOUT_SECS,
        });
    }

    if config.backend.max_response_bytes == 0 {
        errors.push(ValidationError::MaxResponseBytes);
    }

    // The inbound timer starts first; an equal bound would preempt the backend deadline.
    if config.timeouts.request_secs <= backend_secs {
        errors.push(ValidationError::RequestTimeout {
            request: config.timeouts.request_secs,
            backend: backend_secs,
        });
    }

    if config.observability.metrics_enabled
        && config.observability.metrics_address.parse::<SocketAddr>().is_err()
    {
        errors.push(ValidationError::MetricsAddress(
            config.observability.metrics_address.clone(),
        ));
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

fn check_backend_url(raw: &str) -> Result<(), String> {
    let url = Url::parse(raw).map_err(|e| e.to_string())?;
    if url.scheme() != "http" {
        return Err(format!("scheme must be http, got {}", url.scheme()));
    }
    if url.host_str().is_none() {
        return Err("missing host".to_string());
    }
    Ok(())
}
