//! Backend connectivity.
//!
//! # Design Decisions
//! - One pooled HTTP/1.1 client shared by all requests
//! - Every call carries a deadline (at most 300 seconds)
//! - Transport failures are reported, never retried

pub mod client;

pub use client::BackendClient;
