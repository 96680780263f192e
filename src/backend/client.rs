//! SOAP backend client with a hard deadline.
//!
//! # Responsibilities
//! - POST one envelope to the configured backend
//! - Bound connect, write and full body read by one deadline
//! - Hand back the raw bytes of any completed exchange, whatever its status
//!
//! One attempt per request: no retry, no backoff.

use axum::{
    body::{Body, Bytes},
    http::{header, HeaderValue, Method, Request, Response, Uri},
};
use hyper_util::{
    client::legacy::{connect::HttpConnector, Client},
    rt::TokioExecutor,
};
use std::str::FromStr;
use std::time::{Duration, Instant};
use tokio::time::timeout;

use crate::config::BackendConfig;
use crate::error::{TransportError, TransportResult};
use crate::observability::metrics;
use crate::soap::SoapEnvelope;

const SOAP_CONTENT_TYPE: &str = "text/xml; charset=utf-8";

/// Client for the SearchCal SOAP server.
#[derive(Clone)]
pub struct BackendClient {
    client: Client<HttpConnector, Body>,
    endpoint: Uri,
    deadline: Duration,
    max_response_bytes: usize,
}

impl BackendClient {
    /// Create a client for the configured backend address.
    pub fn new(config: &BackendConfig) -> Result<Self, axum::http::uri::InvalidUri> {
        let endpoint = Uri::from_str(&config.url)?;
        let client = Client::builder(TokioExecutor::new()).build(HttpConnector::new());

        Ok(Self {
            client,
            endpoint,
            deadline: Duration::from_secs(config.timeout_secs),
            max_response_bytes: config.max_response_bytes,
        })
    }

    pub fn endpoint(&self) -> &Uri {
        &self.endpoint
    }

    pub fn deadline(&self) -> Duration {
        self.deadline
    }

    /// Post `envelope` and return the raw reply body.
    pub async fn call(&self, envelope: &SoapEnvelope) -> TransportResult<Bytes> {
        let start = Instant::now();

        let result = match timeout(self.deadline, self.exchange(envelope)).await {
            Ok(result) => result,
            Err(_) => Err(TransportError::Timeout(self.deadline)),
        };

        match &result {
            Ok(body) => {
                tracing::debug!(
                    endpoint = %self.endpoint,
                    bytes = body.len(),
                    elapsed_ms = start.elapsed().as_millis() as u64,
                    "Backend exchange completed"
                );
                metrics::record_backend_call("completed", start);
            }
            Err(TransportError::Timeout(_)) => metrics::record_backend_call("timeout", start),
            Err(_) => metrics::record_backend_call("failed", start),
        }

        result
    }

    async fn exchange(&self, envelope: &SoapEnvelope) -> TransportResult<Bytes> {
        let request = Request::builder()
            .method(Method::POST)
            .uri(self.endpoint.clone())
            .header(header::CONTENT_TYPE, HeaderValue::from_static(SOAP_CONTENT_TYPE))
            .header("SOAPAction", HeaderValue::from_static("\"\""))
            .body(Body::from(envelope.to_bytes()))?;

        let response: Response<hyper::body::Incoming> = self.client.request(request).await?;
        let status = response.status();
        if !status.is_success() {
            // SOAP faults travel with 500; the body still gets classified.
            tracing::debug!(status = %status, "Backend replied with non-success status");
        }

        let body = axum::body::to_bytes(Body::new(response.into_body()), self.max_response_bytes).await?;
        Ok(body)
    }
}
