//! Flag-string serialization of a [`QueryDescriptor`].
//!
//! The backend reads `-name value` tuples separated by single spaces.
//! Values are written verbatim: the backend groups everything up to the
//! next ` -<letter>` into one value, so names with spaces survive as-is.

use std::fmt;

use crate::query::params::QueryDescriptor;

/// An ordered list of `-name value` flags.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FlagString {
    flags: Vec<(&'static str, String)>,
}

impl FlagString {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a flag unconditionally.
    pub fn push(&mut self, name: &'static str, value: impl Into<String>) -> &mut Self {
        self.flags.push((name, value.into()));
        self
    }

    /// Append a flag only when `value` is present and non-empty.
    pub fn push_opt(&mut self, name: &'static str, value: Option<&str>) -> &mut Self {
        if let Some(v) = value.filter(|v| !v.is_empty()) {
            self.flags.push((name, v.to_string()));
        }
        self
    }

    /// Build the GetStar query for a validated descriptor.
    pub fn from_descriptor(desc: &QueryDescriptor) -> Self {
        let photometry = &desc.photometry;
        let mut flags = Self::new();
        flags
            .push("objectName", desc.star.as_str())
            .push("format", desc.format.as_str())
            .push_opt("forceUpdate", desc.force_update.as_deref())
            .push_opt("scenario", Some(desc.scenario.as_str()))
            .push_opt("V", photometry.v.as_deref())
            .push_opt("e_V", photometry.e_v.as_deref())
            .push_opt("J", photometry.j.as_deref())
            .push_opt("e_J", photometry.e_j.as_deref())
            .push_opt("H", photometry.h.as_deref())
            .push_opt("e_H", photometry.e_h.as_deref())
            .push_opt("K", photometry.k.as_deref())
            .push_opt("e_K", photometry.e_k.as_deref())
            .push_opt("SP_TYPE", desc.sp_type.as_deref());
        flags
    }
}

impl fmt::Display for FlagString {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, (name, value)) in self.flags.iter().enumerate() {
            if i > 0 {
                f.write_str(" ")?;
            }
            write!(f, "-{} {}", name, value)?;
        }
        Ok(())
    }
}
