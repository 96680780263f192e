//! Configuration management subsystem.
//!
//! # Data Flow
//! ```text
//! config file (TOML, optional)
//!     → loader.rs (parse & deserialize)
//!     → SCLWS_* environment / CLI overrides
//!     → validation.rs (semantic checks)
//!     → ProxyConfig (validated, immutable)
//!     → shared with the server and backend client at startup
//! ```
//!
//! # Design Decisions
//! - Config is immutable once loaded; the backend address is fixed for the process lifetime
//! - All fields have defaults to allow minimal configs
//! - Validation separates syntactic (serde) from semantic checks

pub mod loader;
pub mod schema;
pub mod validation;

pub use schema::ProxyConfig;
pub use schema::ListenerConfig;
pub use schema::BackendConfig;
pub use schema::RenderConfig;
pub use schema::ObservabilityConfig;
