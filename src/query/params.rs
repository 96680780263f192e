//! Request parameter collection.
//!
//! # Responsibilities
//! - Decode the raw query string (lossy, never rejected)
//! - Apply defaults for `format` and `scenario`
//! - Reject missing or placeholder star names
//!
//! Every other parameter is an opaque string forwarded verbatim.

use std::collections::HashMap;
use std::fmt;

use crate::error::ProxyError;

/// Star names that denote an unresolved identity.
pub const PLACEHOLDER_STARS: [&str; 3] = ["INTERNAL", "UNKNOWN", "No_name"];

/// Scenario sent when the caller gives none.
pub const DEFAULT_SCENARIO: &str = "false";

/// Output format requested from the backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    /// Tab separated values.
    Tsv,
    /// VOTable XML document.
    #[default]
    Vot,
}

impl OutputFormat {
    /// Case-exact parse; anything else (including absence) means VOTable.
    pub fn from_param(value: Option<&str>) -> Self {
        match value {
            Some("tsv") => OutputFormat::Tsv,
            _ => OutputFormat::Vot,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            OutputFormat::Tsv => "tsv",
            OutputFormat::Vot => "vot",
        }
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Decoded query-string parameters of one request.
#[derive(Debug, Clone, Default)]
pub struct QueryParams {
    values: HashMap<String, String>,
}

impl QueryParams {
    /// Decode an `application/x-www-form-urlencoded` query string.
    /// Later occurrences of a name replace earlier ones.
    pub fn parse(raw: Option<&str>) -> Self {
        url::form_urlencoded::parse(raw.unwrap_or_default().as_bytes())
            .map(|(k, v)| (k.into_owned(), v.into_owned()))
            .collect()
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.values.get(name).map(String::as_str)
    }

    /// Value of `name`, or `None` when absent or empty.
    fn non_empty(&self, name: &str) -> Option<String> {
        self.get(name).filter(|v| !v.is_empty()).map(str::to_string)
    }
}

impl<K, V> FromIterator<(K, V)> for QueryParams
where
    K: Into<String>,
    V: Into<String>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            values: iter.into_iter().map(|(k, v)| (k.into(), v.into())).collect(),
        }
    }
}

/// Photometric overrides forwarded to the backend untouched.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Photometry {
    pub v: Option<String>,
    pub e_v: Option<String>,
    pub j: Option<String>,
    pub e_j: Option<String>,
    pub h: Option<String>,
    pub e_h: Option<String>,
    pub k: Option<String>,
    pub e_k: Option<String>,
}

/// A validated GetStar request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QueryDescriptor {
    pub star: String,
    pub format: OutputFormat,
    pub scenario: String,
    pub force_update: Option<String>,
    pub photometry: Photometry,
    pub sp_type: Option<String>,
}

impl QueryDescriptor {
    /// Collect and default the request parameters.
    ///
    /// Fails with [`ProxyError::InvalidInput`] carrying the raw star value
    /// (empty when absent) if the star is missing or a placeholder.
    pub fn collect(params: &QueryParams) -> Result<Self, ProxyError> {
        let star = params.get("star").unwrap_or_default();
        if star.is_empty() || PLACEHOLDER_STARS.contains(&star) {
            return Err(ProxyError::InvalidInput(star.to_string()));
        }

        Ok(Self {
            star: star.to_string(),
            format: OutputFormat::from_param(params.get("format")),
            scenario: params
                .non_empty("scenario")
                .unwrap_or_else(|| DEFAULT_SCENARIO.to_string()),
            force_update: params.non_empty("forceUpdate"),
            photometry: Photometry {
                v: params.non_empty("V"),
                e_v: params.non_empty("e_V"),
                j: params.non_empty("J"),
                e_j: params.non_empty("e_J"),
                h: params.non_empty("H"),
                e_h: params.non_empty("e_H"),
                k: params.non_empty("K"),
                e_k: params.non_empty("e_K"),
            },
            sp_type: params.non_empty("SP_TYPE"),
        })
    }
}
