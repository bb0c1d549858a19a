//! Docker client versions and the API-version compatibility table.
//!
//! A [`Version`] is an opaque string: dkenv never parses it, it only checks that it
//! can safely name an install entry (`docker-<version>`). Versions compare by exact
//! string equality, so `"1.9"` and `"1.9.0"` are different versions.
//!
//! API versions (the numbering scheme reported by the docker daemon) are mapped to
//! client versions through the fixed [`catalog`].

pub mod catalog;

pub use catalog::{API_VERSIONS, VersionCatalog};

use crate::core::{DkenvError, Result};
use std::fmt;

/// A docker client version such as `"1.9.1"`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Version(String);

impl Version {
    /// Validate and wrap a version string.
    ///
    /// Surrounding whitespace is trimmed. Empty strings and strings containing a path
    /// separator are rejected with [`DkenvError::InvalidVersion`].
    pub fn parse(version: &str) -> Result<Self> {
        let trimmed = version.trim();

        if trimmed.is_empty() || trimmed.contains(['/', '\\']) || trimmed == "." || trimmed == ".."
        {
            return Err(DkenvError::InvalidVersion {
                version: version.to_string(),
            });
        }

        Ok(Self(trimmed.to_string()))
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// File name of the install entry for this version.
    #[must_use]
    pub fn entry_name(&self) -> String {
        format!("docker-{}", self.0)
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
