//! Local store of downloaded docker binaries.
//!
//! The store is a flat directory (`~/.dkenv` by default) holding one file per
//! version, named `docker-<version>`. Whether a version is installed is decided
//! purely by the existence of that file; there is no index or metadata.
//!
//! Downloads in progress live next to the entries as hidden
//! `.docker-<version>.<uuid>.part` files. They never match the entry naming
//! pattern, so an interrupted download is never reported as installed.

use crate::core::{DkenvError, Result};
use crate::version::Version;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tracing::debug;

/// File name prefix shared by all install entries.
pub const ENTRY_PREFIX: &str = "docker-";

/// Read-only view over the version-store directory.
#[derive(Debug, Clone)]
pub struct InstallStore {
    root: PathBuf,
}

impl InstallStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
        }
    }

    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Absolute path of the install entry for `version`.
    #[must_use]
    pub fn entry_path(&self, version: &Version) -> PathBuf {
        self.root.join(version.entry_name())
    }

    /// A fresh temporary path for an in-progress download of `version`.
    #[must_use]
    pub fn temp_path(&self, version: &Version) -> PathBuf {
        self.root.join(format!(".{}.{}.part", version.entry_name(), uuid::Uuid::new_v4()))
    }

    /// Whether the install entry for `version` exists.
    ///
    /// Symlinks are followed, so a dangling `docker-<version>` link counts as not
    /// installed and gets downloaded over.
    ///
    /// # Errors
    ///
    /// Any I/O error other than "not found" is returned as
    /// [`DkenvError::FilesystemError`].
    pub fn is_installed(&self, version: &Version) -> Result<bool> {
        let path = self.entry_path(version);
        match std::fs::metadata(&path) {
            Ok(_) => Ok(true),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(false),
            Err(e) => Err(DkenvError::fs("inspect install entry", &path, e)),
        }
    }

    /// Names of all install entries, in directory iteration order.
    ///
    /// # Errors
    ///
    /// [`DkenvError::FilesystemError`] when the store directory cannot be read.
    pub fn list_installed(&self) -> Result<Vec<String>> {
        let entries = std::fs::read_dir(&self.root)
            .map_err(|e| DkenvError::fs("read store directory", &self.root, e))?;

        let mut found = Vec::new();
        for entry in entries {
            let entry = entry.map_err(|e| DkenvError::fs("read store directory", &self.root, e))?;
            let name = entry.file_name().to_string_lossy().into_owned();

            if is_entry_name(&name) {
                found.push(name);
            }
        }

        debug!("Found {} install entries in {}", found.len(), self.root.display());
        Ok(found)
    }
}

/// Whether `name` follows the `docker-<version>` pattern.
#[must_use]
pub fn is_entry_name(name: &str) -> bool {
    name.strip_prefix(ENTRY_PREFIX).is_some_and(|version| !version.is_empty())
}
