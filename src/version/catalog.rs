//! Fixed API version → client version table.

use super::Version;
use crate::core::{DkenvError, Result};

/// Docker API versions and the client release that first shipped each one.
pub const API_VERSIONS: &[(&str, &str)] = &[
    ("1.12", "1.0.1"),
    ("1.13", "1.1.2"),
    ("1.14", "1.2.0"),
    ("1.15", "1.3.3"),
    ("1.16", "1.4.1"),
    ("1.17", "1.5.0"),
    ("1.18", "1.6.0"),
    ("1.19", "1.7.1"),
    ("1.20", "1.8.3"),
    ("1.21", "1.9.1"),
    ("1.22", "1.10.1"),
];

/// Resolves API versions to client versions.
///
/// The table is borrowed for the whole program lifetime and never mutated. Lookups
/// are exact string matches; there is no fallback for unknown keys.
#[derive(Debug, Clone, Copy)]
pub struct VersionCatalog {
    table: &'static [(&'static str, &'static str)],
}

impl Default for VersionCatalog {
    fn default() -> Self {
        Self::new(API_VERSIONS)
    }
}

impl VersionCatalog {
    #[must_use]
    pub const fn new(table: &'static [(&'static str, &'static str)]) -> Self {
        Self {
            table,
        }
    }

    /// Resolve an API version to its client version.
    ///
    /// # Errors
    ///
    /// [`DkenvError::UnknownCompatibilityId`] when `api_version` is not in the table.
    pub fn resolve(&self, api_version: &str) -> Result<Version> {
        self.table
            .iter()
            .find(|(api, _)| *api == api_version)
            .map(|(_, client)| Version((*client).to_string()))
            .ok_or_else(|| DkenvError::UnknownCompatibilityId {
                id: api_version.to_string(),
            })
    }

    /// Table entries in declaration order.
    pub fn entries(&self) -> impl Iterator<Item = (&'static str, &'static str)> + '_ {
        self.table.iter().copied()
    }
}
