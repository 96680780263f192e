//! SOAP 1.1 request envelope for the `GetStar` operation.

use axum::body::Bytes;

use crate::query::FlagString;
use crate::soap::entities::escape_text;

/// Namespace of the SearchCal web service operations.
pub const SCLWS_NAMESPACE: &str = "urn:sclws";

const ENVELOPE_HEAD: &str = concat!(
    "<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n",
    "<soapenv:Envelope xmlns:soapenv=\"http://schemas.xmlsoap.org/soap/envelope/\" ",
    "xmlns:xsd=\"http://www.w3.org/2001/XMLSchema\" ",
    "xmlns:xsi=\"http://www.w3.org/2001/XMLSchema-instance\">\n",
    "  <soapenv:Body>\n",
    "    <GetStar xmlns=\"urn:sclws\">\n",
    "     <query>",
);

const ENVELOPE_TAIL: &str = concat!(
    "</query>\n",
    "    </GetStar>\n",
    "  </soapenv:Body>\n",
    "</soapenv:Envelope>",
);

/// A complete request envelope, ready to be posted unmodified.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SoapEnvelope {
    body: Bytes,
}

impl SoapEnvelope {
    /// Wrap a query in the `GetStar` envelope.
    ///
    /// The query is XML-escaped at this single insertion point; the SOAP
    /// server decodes it back, so the backend sees the exact flag string.
    pub fn get_star(query: &FlagString) -> Self {
        let query = escape_text(&query.to_string());
        let mut body = String::with_capacity(ENVELOPE_HEAD.len() + query.len() + ENVELOPE_TAIL.len());
        body.push_str(ENVELOPE_HEAD);
        body.push_str(&query);
        body.push_str(ENVELOPE_TAIL);
        Self { body: Bytes::from(body) }
    }

    /// Cheap clone of the payload for a request body.
    pub fn to_bytes(&self) -> Bytes {
        self.body.clone()
    }
}
