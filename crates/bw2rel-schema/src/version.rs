//! Release version strings.
//!
//! Versions are carried verbatim; publishing policy decides whether a
//! non-canonical version is a warning or a fatal error, so construction
//! never fails.

use regex::Regex;
use std::sync::OnceLock;

static VERSION_RE: OnceLock<Regex> = OnceLock::new();

fn version_re() -> &'static Regex {
    // Static pattern must be valid
    VERSION_RE.get_or_init(|| Regex::new(r"^\d+\.\d+\.\d+$").expect("static version pattern"))
}

/// A release version string, e.g. `2.3.1`.
///
/// The canonical form is `x.x.x` (three dot-separated decimal components).
/// Any string can be wrapped; [`is_canonical`](Self::is_canonical) reports
/// whether it matches the canonical form.
#[derive(Debug, Clone, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(transparent)]
pub struct Version(String);

impl Version {
    /// Wrap a raw version string.
    pub fn new(version: impl Into<String>) -> Self {
        Self(version.into())
    }

    /// Whether the version matches the canonical `x.x.x` form.
    pub fn is_canonical(&self) -> bool {
        version_re().is_match(&self.0)
    }

    /// The raw version string.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for Version {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for Version {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}
