//! SOAP protocol handling for the SearchCal GetStar service.
//!
//! # Data Flow
//! ```text
//! FlagString
//!     → envelope.rs (GetStar request, single escaped insertion point)
//!     → backend::BackendClient (POST, raw bytes back)
//!     → classify.rs (<output> / <faultstring> boundaries)
//!     → entities.rs (decode &#xA; &lt; &gt; &amp;, in that order)
//!     → ClassifiedResponse
//! ```

pub mod classify;
pub mod entities;
pub mod envelope;

pub use classify::{classify, ClassifiedResponse};
pub use envelope::SoapEnvelope;
