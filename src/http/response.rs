//! Response rendering.
//!
//! # Responsibilities
//! - Map a classified backend reply (or rejected input) to status, media type and body
//! - Prefix VOTable documents with the XML declaration and stylesheet reference
//! - Apply the HTML escaping policy to echoed values
//!
//! | Outcome           | Status | Media type |
//! |-------------------|--------|------------|
//! | invalid input     | 500    | text/html  |
//! | TSV success       | 200    | text/plain |
//! | VOTable success   | 200    | text/xml   |
//! | backend fault     | 500    | text/html  |
//! | unavailable       | 500    | text/html  |

use std::borrow::Cow;

use axum::{
    body::Body,
    http::{header, HeaderValue, StatusCode},
    response::{IntoResponse, Response},
};

use crate::config::RenderConfig;
use crate::query::OutputFormat;
use crate::soap::entities::{decode_output, escape_text};
use crate::soap::ClassifiedResponse;

const TEXT_HTML: &str = "text/html";
const TEXT_PLAIN: &str = "text/plain";
const TEXT_XML: &str = "text/xml";

const XML_DECLARATION: &str = "<?xml version=\"1.0\" encoding=\"UTF-8\"?>";

const PAGE_HEAD: &str = "<?xml version='1.0' encoding='UTF-8'?>\n\
<html xmlns=\"http://www.w3.org/1999/xhtml\" xml:lang=\"en\" lang=\"en\">\n\
<body>\n";

const INVALID_INPUT_INTRO: &str = "The given star parameter is missing or invalid:\n<br/>'";
const INVALID_INPUT_OUTRO: &str = "'</body>\n</html>";

const FAULT_INTRO: &str = "The SearchCal Server returned the error:\n<hr/>";
const FAULT_OUTRO: &str = "<hr/>\n\
If the problem still occurs, please send a feedback report.\n\
</body>\n\
</html>";

const UNAVAILABLE_BODY: &str = "The SearchCal Server is probably down now.\n\
Please check again in a couple of minutes.\n\
If the problem still occurs, please send a feedback report.\n\
</body>\n\
</html>";

/// Renders GetStar outcomes as HTTP responses.
#[derive(Debug, Clone)]
pub struct Renderer {
    stylesheet_pi: String,
    escape_html: bool,
}

impl Renderer {
    pub fn new(config: &RenderConfig) -> Self {
        Self {
            stylesheet_pi: format!(
                "<?xml-stylesheet href=\"{}\" type=\"text/xsl\"?>",
                config.stylesheet_href
            ),
            escape_html: config.escape_html,
        }
    }

    /// Page for a missing or placeholder star.
    pub fn invalid_input(&self, star: &str) -> Response {
        let body = [PAGE_HEAD, INVALID_INPUT_INTRO, &*self.echo(star), INVALID_INPUT_OUTRO].concat();
        build(StatusCode::INTERNAL_SERVER_ERROR, TEXT_HTML, body)
    }

    /// Response for a classified backend reply.
    pub fn render(&self, classified: &ClassifiedResponse) -> Response {
        match classified {
            ClassifiedResponse::Success { content, kind: OutputFormat::Tsv } => {
                build(StatusCode::OK, TEXT_PLAIN, content.clone())
            }
            ClassifiedResponse::Success { content, kind: OutputFormat::Vot } => {
                let body = [XML_DECLARATION, self.stylesheet_pi.as_str(), content.as_str()].concat();
                build(StatusCode::OK, TEXT_XML, body)
            }
            ClassifiedResponse::Fault { message } => {
                let body = [PAGE_HEAD, FAULT_INTRO, &*self.echo_fault(message), FAULT_OUTRO].concat();
                build(StatusCode::INTERNAL_SERVER_ERROR, TEXT_HTML, body)
            }
            ClassifiedResponse::Unavailable => {
                let body = [PAGE_HEAD, UNAVAILABLE_BODY].concat();
                build(StatusCode::INTERNAL_SERVER_ERROR, TEXT_HTML, body)
            }
        }
    }

    fn echo<'a>(&self, value: &'a str) -> Cow<'a, str> {
        if self.escape_html {
            Cow::Owned(escape_text(value))
        } else {
            Cow::Borrowed(value)
        }
    }

    /// Fault text is still XML-encoded; decode before escaping it once.
    fn echo_fault<'a>(&self, message: &'a str) -> Cow<'a, str> {
        if self.escape_html {
            Cow::Owned(escape_text(&decode_output(message)))
        } else {
            Cow::Borrowed(message)
        }
    }
}

impl Default for Renderer {
    fn default() -> Self {
        Self::new(&RenderConfig::default())
    }
}

fn build(status: StatusCode, content_type: &'static str, body: String) -> Response {
    (
        status,
        [(header::CONTENT_TYPE, HeaderValue::from_static(content_type))],
        Body::from(body),
    )
        .into_response()
}
