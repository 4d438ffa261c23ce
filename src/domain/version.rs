//! The API version token used to build every downstream URL.

use std::{fmt, str::FromStr, sync::LazyLock};

use regex::Regex;

/// Locates the version in the catalog page heading, e.g.
/// `Operation Directory: (v41.2 / ...`.
static ANCHOR: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"Operation Directory: \(v(\d+(?:\.\d+)*)\s*/").expect("anchor pattern is valid")
});

static VERSION: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^v\d+(?:\.\d+)*$").expect("version pattern is valid"));

/// A dotted API version such as `v41.2`, always carrying its `v` prefix.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub struct Version(String);

impl Version {
    /// Returns the version token, including the leading `v`.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Version {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for Version {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl FromStr for Version {
    type Err = InvalidVersionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if VERSION.is_match(s) {
            Ok(Self(s.to_string()))
        } else {
            Err(InvalidVersionError(s.to_string()))
        }
    }
}

/// Error returned when a string is not of the form `vMAJOR.MINOR[.PATCH...]`.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
#[error("Invalid version '{0}': expected the form vMAJOR.MINOR")]
pub struct InvalidVersionError(String);

/// The catalog page does not contain the version anchor.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
#[error("Version not found in the catalog page (expected 'Operation Directory: (v<version>/')")]
pub struct VersionNotFoundError;

/// Extracts the API version from the catalog page text.
///
/// # Errors
///
/// Returns [`VersionNotFoundError`] if the anchor pattern is absent.
pub fn extract_version(page: &str) -> Result<Version, VersionNotFoundError> {
    ANCHOR
        .captures(page)
        .and_then(|captures| captures.get(1))
        .map(|number| Version(format!("v{}", number.as_str())))
        .ok_or(VersionNotFoundError)
}
