//! Configuration schema definitions.
//!
//! This module defines the complete configuration structure for the proxy.
//! All types derive Serde traits for deserialization from config files.

use serde::{Deserialize, Serialize};

/// Upper bound on a single backend exchange, in seconds.
pub const MAX_BACKEND_TIMEOUT_SECS: u64 = 300;

/// Root configuration for the GetStar proxy.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct ProxyConfig {
    /// Listener configuration (bind address, route path).
    pub listener: ListenerConfig,

    /// SOAP backend the proxy forwards to.
    pub backend: BackendConfig,

    /// Inbound timeout configuration.
    pub timeouts: TimeoutConfig,

    /// Response rendering options.
    pub render: RenderConfig,

    /// Observability settings.
    pub observability: ObservabilityConfig,
}

/// Listener configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ListenerConfig {
    /// Bind address (e.g., "0.0.0.0:8080").
    pub bind_address: String,

    /// Path of the GetStar route (e.g., "/getstar").
    pub path: String,

    /// Maximum requests handled concurrently; excess requests queue.
    pub max_connections: usize,
}

impl Default for ListenerConfig {
    fn default() -> Self {
        Self {
            bind_address: "0.0.0.0:8080".to_string(),
            path: "/getstar".to_string(),
            max_connections: 1024,
        }
    }
}

/// Backend (SOAP server) configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct BackendConfig {
    /// Base URL of the SOAP server (e.g., "http://127.0.0.1:8079").
    pub url: String,

    /// Overall deadline for one exchange (connect, write, read) in seconds.
    pub timeout_secs: u64,

    /// Largest response body accepted from the backend, in bytes.
    pub max_response_bytes: usize,
}

impl Default for BackendConfig {
    fn default() -> Self {
        Self {
            url: "http://127.0.0.1:8079".to_string(),
            timeout_secs: MAX_BACKEND_TIMEOUT_SECS,
            max_response_bytes: 64 * 1024 * 1024,
        }
    }
}

/// Timeout configuration for inbound requests.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct TimeoutConfig {
    /// Request timeout (total time for request/response) in seconds.
    /// Must not be shorter than the backend deadline.
    pub request_secs: u64,
}

impl Default for TimeoutConfig {
    fn default() -> Self {
        Self {
            request_secs: MAX_BACKEND_TIMEOUT_SECS + 10,
        }
    }
}

/// Rendering options for proxied responses.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct RenderConfig {
    /// Stylesheet referenced from VOTable responses.
    pub stylesheet_href: String,

    /// HTML-escape values echoed into error pages.
    /// Disable only for byte-identical legacy output.
    pub escape_html: bool,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            stylesheet_href: "./getstarVOTableToHTML.xsl".to_string(),
            escape_html: true,
        }
    }
}

/// Observability configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ObservabilityConfig {
    /// Log level (trace, debug, info, warn, error).
    pub log_level: String,

    /// Enable metrics endpoint.
    pub metrics_enabled: bool,

    /// Metrics endpoint bind address.
    pub metrics_address: String,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            metrics_enabled: false,
            metrics_address: "127.0.0.1:9090".to_string(),
        }
    }
}
