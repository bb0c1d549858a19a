//! Top-level dkenv actions.
//!
//! [`Dkenv`] ties the pieces together: the [`VersionCatalog`] resolves API versions,
//! the [`InstallStore`] answers whether a version is present, the [`Downloader`]
//! fills cache misses, and the [`SymlinkSwitcher`] points `docker` at the result.
//!
//! ```text
//! identifier ──(api?)──► VersionCatalog::resolve ──► Version
//!                                                     │
//!                        InstallStore::is_installed ◄─┘
//!                           │ no            │ yes
//!                    Downloader::fetch      │
//!                           └──────► SymlinkSwitcher::activate
//! ```
//!
//! Switching always runs, so asking for the version that is already active is a
//! cheap no-op. A failed download stops the pipeline before anything is switched.

use crate::core::Result;
use crate::download::Downloader;
use crate::store::InstallStore;
use crate::switcher::{SwitchOutcome, SymlinkSwitcher};
use crate::version::{Version, VersionCatalog};
use std::path::PathBuf;
use tracing::info;

/// Result of [`Dkenv::fetch_version_action`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchOutcome {
    /// The client version that is now active.
    pub version: Version,
    /// Whether the binary had to be downloaded.
    pub downloaded: bool,
    /// What happened to the `docker` symlink.
    pub switch: SwitchOutcome,
}

/// One install entry as reported by [`Dkenv::list_action`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InstalledEntry {
    /// File name, e.g. `docker-1.9.1`.
    pub name: String,
    /// Whether the `docker` symlink currently points at this entry.
    pub active: bool,
}

/// The version manager for one store directory and one bin directory.
#[derive(Debug, Clone)]
pub struct Dkenv {
    catalog: VersionCatalog,
    store: InstallStore,
    downloader: Downloader,
    switcher: SymlinkSwitcher,
}

impl Dkenv {
    /// Build a manager over validated `dkenv_dir` (store) and `bin_dir` paths,
    /// downloading from the official origin.
    pub fn new(dkenv_dir: impl Into<PathBuf>, bin_dir: impl Into<PathBuf>) -> Result<Self> {
        let downloader = Downloader::new(InstallStore::new(dkenv_dir))?;
        Ok(Self::with_downloader(downloader, bin_dir))
    }

    /// Build a manager around a configured downloader (a mirror, hidden progress).
    ///
    /// The store is the one the downloader writes into.
    pub fn with_downloader(downloader: Downloader, bin_dir: impl Into<PathBuf>) -> Self {
        let store = downloader.store().clone();
        let switcher = SymlinkSwitcher::new(store.clone(), bin_dir);

        Self {
            catalog: VersionCatalog::default(),
            store,
            downloader,
            switcher,
        }
    }

    #[must_use]
    pub const fn with_catalog(mut self, catalog: VersionCatalog) -> Self {
        self.catalog = catalog;
        self
    }

    #[must_use]
    pub const fn catalog(&self) -> &VersionCatalog {
        &self.catalog
    }

    #[must_use]
    pub const fn store(&self) -> &InstallStore {
        &self.store
    }

    #[must_use]
    pub const fn downloader(&self) -> &Downloader {
        &self.downloader
    }

    #[must_use]
    pub const fn switcher(&self) -> &SymlinkSwitcher {
        &self.switcher
    }

    /// Turn a CLI identifier into a client version.
    pub fn resolve(&self, identifier: &str, api: bool) -> Result<Version> {
        if api {
            let version = self.catalog.resolve(identifier)?;
            info!("Found client '{}' for API version '{}'", version, identifier);
            Ok(version)
        } else {
            Version::parse(identifier)
        }
    }

    /// Resolve, install if needed, and activate a docker version.
    ///
    /// `api` selects whether `identifier` is an API version or a client version.
    /// Errors from every stage are returned unchanged.
    pub async fn fetch_version_action(&self, identifier: &str, api: bool) -> Result<FetchOutcome> {
        let version = self.resolve(identifier, api)?;

        let downloaded = if self.store.is_installed(&version)? {
            info!("Docker version {} already installed!", version);
            false
        } else {
            info!("Docker version {} not found - attempting to download...", version);
            self.downloader.fetch(&version).await?;
            true
        };

        let switch = self.switcher.activate(&version)?;

        Ok(FetchOutcome {
            version,
            downloaded,
            switch,
        })
    }

    /// All install entries, flagged with whether they are the active one.
    pub fn list_action(&self) -> Result<Vec<InstalledEntry>> {
        let active = self.switcher.current()?;

        let entries = self
            .store
            .list_installed()?
            .into_iter()
            .map(|name| {
                let is_active = active.as_deref() == Some(self.store.root().join(&name).as_path());
                InstalledEntry {
                    name,
                    active: is_active,
                }
            })
            .collect();

        Ok(entries)
    }
}
