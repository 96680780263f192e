//! Classification of raw backend replies.
//!
//! The backend envelope shape is fixed, so boundaries are found by plain
//! first-occurrence search rather than a full XML parse. Decoding happens
//! after the boundaries are cut, so decoded `<` never looks like a tag.

use std::borrow::Cow;

use crate::query::OutputFormat;
use crate::soap::entities::decode_output;

const OUTPUT_OPEN: &str = "<output>";
const OUTPUT_CLOSE: &str = "</output>";
const FAULT_OPEN: &str = "<faultstring>";
const FAULT_CLOSE: &str = "</faultstring>";

/// Root marker of an embedded VOTable document.
pub const VOTABLE_MARKER: &str = "<VOTABLE";

/// Outcome of one backend exchange.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ClassifiedResponse {
    /// Result payload; `kind` tells TSV from VOTable.
    Success { content: String, kind: OutputFormat },
    /// The backend reported an application-level error.
    Fault { message: String },
    /// No usable reply (nothing recognizable, or no reply at all).
    Unavailable,
}

impl ClassifiedResponse {
    /// Metrics/log label for this outcome.
    pub fn outcome(&self) -> &'static str {
        match self {
            ClassifiedResponse::Success { kind: OutputFormat::Tsv, .. } => "success_tsv",
            ClassifiedResponse::Success { kind: OutputFormat::Vot, .. } => "success_vot",
            ClassifiedResponse::Fault { .. } => "fault",
            ClassifiedResponse::Unavailable => "unavailable",
        }
    }
}

/// Classify the raw bytes of a completed backend exchange.
pub fn classify(raw: &[u8]) -> ClassifiedResponse {
    let text: Cow<'_, str> = String::from_utf8_lossy(raw);

    if let Some(output) = between(&text, OUTPUT_OPEN, OUTPUT_CLOSE) {
        let decoded = decode_output(output);
        return match decoded.find(VOTABLE_MARKER) {
            Some(at) => ClassifiedResponse::Success {
                content: decoded[at..].to_string(),
                kind: OutputFormat::Vot,
            },
            None => ClassifiedResponse::Success {
                content: decoded,
                kind: OutputFormat::Tsv,
            },
        };
    }

    if let Some(fault) = between(&text, FAULT_OPEN, FAULT_CLOSE) {
        return ClassifiedResponse::Fault {
            message: fault.to_string(),
        };
    }

    ClassifiedResponse::Unavailable
}

/// Text between the first `open` and the first `close` following it.
fn between<'a>(text: &'a str, open: &str, close: &str) -> Option<&'a str> {
    let start = text.find(open)? + open.len();
    let len = text[start..].find(close)?;
    Some(&text[start..start + len])
}
