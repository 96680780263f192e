//! Error types for a GetStar request.
//!
//! Backend faults and unusable replies are classifications, not errors:
//! see [`crate::soap::ClassifiedResponse`].

use std::time::Duration;
use thiserror::Error;

/// Errors that end a GetStar request before a backend reply is classified.
#[derive(Debug, Error)]
pub enum ProxyError {
    /// The `star` parameter is missing, empty or a placeholder identity.
    #[error("star parameter is missing or invalid: '{0}'")]
    InvalidInput(String),

    /// The backend exchange did not complete.
    #[error("backend transport failure: {0}")]
    Transport(#[from] TransportError),
}

impl ProxyError {
    /// Metrics/log label for this error.
    pub fn outcome(&self) -> &'static str {
        match self {
            ProxyError::InvalidInput(_) => "invalid_input",
            ProxyError::Transport(_) => "unavailable",
        }
    }
}

/// Failures of a single backend exchange.
#[derive(Debug, Error)]
pub enum TransportError {
    /// The outbound request could not be built.
    #[error("invalid backend request: {0}")]
    Request(#[from] axum::http::Error),

    /// Connection or exchange failure before a response head arrived.
    #[error("connection failed: {0}")]
    Connect(#[from] hyper_util::client::legacy::Error),

    /// The response body could not be read completely.
    #[error("response body read failed: {0}")]
    Body(#[from] axum::Error),

    /// The exchange exceeded its deadline.
    #[error("no complete response within {0:?}")]
    Timeout(Duration),
}

/// Result type for backend exchanges.
pub type TransportResult<T> = Result<T, TransportError>;
