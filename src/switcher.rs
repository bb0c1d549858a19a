//! Switching the active `docker` binary.
//!
//! The active binary is a single symlink, `<bin_dir>/docker`, pointing at an
//! install entry in the store. [`SymlinkSwitcher::activate`] inspects whatever
//! currently occupies that path and moves it to the requested entry:
//!
//! | Found at `<bin_dir>/docker`      | Action                                   |
//! |----------------------------------|------------------------------------------|
//! | nothing                          | create the symlink                       |
//! | symlink to the requested entry   | nothing, the filesystem is not touched   |
//! | symlink to anything else         | remove it, create a fresh symlink        |
//! | regular file (a foreign docker)  | rename to `docker.<timestamp>.dkenv`, create the symlink |
//! | directory                        | refuse                                   |
//!
//! # Known limitations
//!
//! The steps are not transactional. If creating the new symlink fails after the old
//! one was removed (or the foreign binary was renamed), the path is left empty and
//! the backup stays where it is; nothing is rolled back. Running the command again
//! completes the switch. Concurrent invocations against the same bin directory are
//! not coordinated.

use crate::constants::{ACTIVE_LINK_NAME, BACKUP_SUFFIX};
use crate::core::{DkenvError, Result};
use crate::store::InstallStore;
use crate::version::Version;
use chrono::{DateTime, Utc};
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

/// What [`SymlinkSwitcher::activate`] did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SwitchOutcome {
    /// No link existed; one was created.
    Created,
    /// The link already pointed at the entry.
    Unchanged,
    /// A link to `previous` was replaced.
    Replaced {
        previous: PathBuf,
    },
    /// A foreign file was moved to `backup` before linking.
    BackedUp {
        backup: PathBuf,
    },
}

/// Points `<bin_dir>/docker` at install entries.
#[derive(Debug, Clone)]
pub struct SymlinkSwitcher {
    store: InstallStore,
    bin_dir: PathBuf,
}

impl SymlinkSwitcher {
    pub fn new(store: InstallStore, bin_dir: impl Into<PathBuf>) -> Self {
        Self {
            store,
            bin_dir: bin_dir.into(),
        }
    }

    /// Path of the active-pointer symlink.
    #[must_use]
    pub fn link_path(&self) -> PathBuf {
        self.bin_dir.join(ACTIVE_LINK_NAME)
    }

    /// Target of the active symlink, or `None` when there is no symlink.
    pub fn current(&self) -> Result<Option<PathBuf>> {
        let link = self.link_path();
        match fs::symlink_metadata(&link) {
            Ok(meta) if meta.file_type().is_symlink() => fs::read_link(&link)
                .map(Some)
                .map_err(|e| DkenvError::fs("read docker symlink", &link, e)),
            Ok(_) => Ok(None),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(DkenvError::fs("inspect docker symlink", &link, e)),
        }
    }

    /// Make the install entry for `version` the active docker binary.
    ///
    /// # Errors
    ///
    /// - [`DkenvError::SourceMissing`] if the install entry does not exist
    /// - [`DkenvError::BackupExists`] if a foreign binary's backup name is taken
    /// - [`DkenvError::FilesystemError`] for any failing filesystem step
    pub fn activate(&self, version: &Version) -> Result<SwitchOutcome> {
        self.activate_at(version, Utc::now())
    }

    pub(crate) fn activate_at(&self, version: &Version, now: DateTime<Utc>) -> Result<SwitchOutcome> {
        let src = self.store.entry_path(version);
        let dst = self.link_path();

        match fs::metadata(&src) {
            Ok(_) => {}
            Err(e) if e.kind() == ErrorKind::NotFound => {
                return Err(DkenvError::SourceMissing {
                    path: src,
                });
            }
            Err(e) => return Err(DkenvError::fs("inspect source binary", &src, e)),
        }

        let existing = match fs::symlink_metadata(&dst) {
            Ok(meta) => meta,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                create_link(&src, &dst)?;
                return Ok(SwitchOutcome::Created);
            }
            Err(e) => return Err(DkenvError::fs("inspect existing docker file", &dst, e)),
        };

        if existing.file_type().is_symlink() {
            let previous =
                fs::read_link(&dst).map_err(|e| DkenvError::fs("read docker symlink", &dst, e))?;

            if previous == src {
                info!("'{}' already pointing to '{}' - nothing to do!", dst.display(), src.display());
                return Ok(SwitchOutcome::Unchanged);
            }

            debug!("Removing stale symlink '{}' -> '{}'", dst.display(), previous.display());
            fs::remove_file(&dst).map_err(|e| DkenvError::fs("remove old symlink", &dst, e))?;
            create_link(&src, &dst)?;
            return Ok(SwitchOutcome::Replaced {
                previous,
            });
        }

        if existing.is_dir() {
            return Err(DkenvError::fs(
                "replace",
                &dst,
                std::io::Error::other("a directory occupies the docker symlink path"),
            ));
        }

        let backup = backup_path(&dst, now);
        match fs::symlink_metadata(&backup) {
            Ok(_) => {
                return Err(DkenvError::BackupExists {
                    path: backup,
                });
            }
            Err(e) if e.kind() == ErrorKind::NotFound => {}
            Err(e) => return Err(DkenvError::fs("inspect backup path", &backup, e)),
        }

        warn!("Backing up existing docker file {} to {}", dst.display(), backup.display());
        fs::rename(&dst, &backup)
            .map_err(|e| DkenvError::fs("backup existing docker file", &dst, e))?;
        create_link(&src, &dst)?;

        Ok(SwitchOutcome::BackedUp {
            backup,
        })
    }
}

/// `<dst>.<UTC timestamp with milliseconds>.dkenv`
fn backup_path(dst: &Path, now: DateTime<Utc>) -> PathBuf {
    let mut name = dst.file_name().unwrap_or_default().to_os_string();
    name.push(format!(".{}.{}", now.format("%Y%m%d%H%M%S%3f"), BACKUP_SUFFIX));
    dst.with_file_name(name)
}

fn create_link(src: &Path, dst: &Path) -> Result<()> {
    info!("Creating symlink for '{}' -> '{}'", dst.display(), src.display());

    #[cfg(unix)]
    let result = std::os::unix::fs::symlink(src, dst);
    #[cfg(windows)]
    let result = std::os::windows::fs::symlink_file(src, dst);

    result.map_err(|e| DkenvError::fs("create docker symlink", dst, e))
}
