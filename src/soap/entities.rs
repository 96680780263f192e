//! XML entity handling for the SOAP exchange.

/// Decode the entities the backend emits inside `<output>`.
///
/// Replacement order is fixed: `&#xA;`, `&lt;`, `&gt;`, then `&amp;` last so
/// that an escaped entity such as `&amp;lt;` decodes to `&lt;` only once.
pub fn decode_output(text: &str) -> String {
    text.replace("&#xA;", "\n")
        .replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&amp;", "&")
}

/// Escape text for an XML element body. Also safe for HTML element bodies.
pub fn escape_text(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}
