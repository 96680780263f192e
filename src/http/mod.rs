//! HTTP protocol handling subsystem.
//!
//! # Data Flow
//! ```text
//! TCP connection
//!     → server.rs (Axum setup, middleware)
//!     → request.rs (request ID)
//!     → GetStar handler: query::params → query::flags → soap::envelope
//!     → backend::client → soap::classify
//!     → response.rs (status, media type, body)
//!     → Send to client
//! ```

pub mod request;
pub mod response;
pub mod server;

pub use request::X_REQUEST_ID;
pub use response::Renderer;
pub use server::{AppState, HttpServer};
