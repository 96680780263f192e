//! Observability subsystem.
//!
//! # Data Flow
//! ```text
//! http::server and backend::client produce:
//!     → logging.rs (structured log events, request ID in every line)
//!     → metrics.rs (counters, histograms)
//!
//! Consumers:
//!     → Log aggregation (stdout)
//!     → Metrics endpoint (Prometheus scrape)
//! ```

pub mod logging;
pub mod metrics;
