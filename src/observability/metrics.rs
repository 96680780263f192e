//! Metrics collection and exposition.
//!
//! # Metrics
//! - `sclws_requests_total` (counter): GetStar requests by outcome, status
//! - `sclws_request_duration_seconds` (histogram): end-to-end latency by outcome
//! - `sclws_backend_calls_total` (counter): backend exchanges by result
//! - `sclws_backend_call_duration_seconds` (histogram): backend latency
//!
//! Recording is a no-op until [`init_metrics`] installs the exporter.

use std::net::SocketAddr;
use std::time::Instant;

use metrics_exporter_prometheus::PrometheusBuilder;

/// Install the Prometheus exporter with its own HTTP listener.
pub fn init_metrics(addr: SocketAddr) {
    match PrometheusBuilder::new().with_http_listener(addr).install() {
        Ok(()) => tracing::info!(address = %addr, "Metrics endpoint listening"),
        Err(e) => tracing::error!(address = %addr, error = %e, "Failed to install metrics exporter"),
    }
}

/// Record one finished GetStar request.
pub fn record_request(outcome: &'static str, status: u16, start: Instant) {
    metrics::counter!(
        "sclws_requests_total",
        "outcome" => outcome,
        "status" => status.to_string()
    )
    .increment(1);
    metrics::histogram!("sclws_request_duration_seconds", "outcome" => outcome)
        .record(start.elapsed().as_secs_f64());
}

/// Record one backend exchange (`completed`, `timeout` or `failed`).
pub fn record_backend_call(result: &'static str, start: Instant) {
    metrics::counter!("sclws_backend_calls_total", "result" => result).increment(1);
    metrics::histogram!("sclws_backend_call_duration_seconds")
        .record(start.elapsed().as_secs_f64());
}
