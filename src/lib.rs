//! SearchCal GetStar proxy library.
//!
//! Translates plain HTTP GET requests into SOAP `GetStar` calls against a
//! SearchCal server on a private address, and re-emits the answer as TSV,
//! VOTable or an HTML error page.

pub mod backend;
pub mod config;
pub mod error;
pub mod http;
pub mod lifecycle;
pub mod observability;
pub mod query;
pub mod soap;

pub use config::schema::ProxyConfig;
pub use error::{ProxyError, TransportError};
pub use http::HttpServer;
pub use lifecycle::Shutdown;
