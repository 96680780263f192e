//! Request translation subsystem.
//!
//! # Data Flow
//! ```text
//! GET query string
//!     → params.rs (decode, default, validate star)
//!     → QueryDescriptor
//!     → flags.rs (ordered -name value tuples)
//!     → FlagString, embedded by soap::envelope
//! ```

pub mod flags;
pub mod params;

pub use flags::FlagString;
pub use params::{OutputFormat, Photometry, QueryDescriptor, QueryParams};
