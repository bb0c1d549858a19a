//! dkenv - docker client version manager
//!
//! dkenv keeps several downloaded copies of the `docker` client binary in a local
//! store and exposes exactly one of them on the `PATH` through a single symlink.
//! A version can be requested directly (`1.9.1`) or through the docker API version
//! it speaks (`1.21`), which a fixed table maps to a client version.
//!
//! # Architecture Overview
//!
//! ```text
//!            ┌──────────────┐
//!  cli ────► │ actions::Dkenv│
//!            └──────┬───────┘
//!     ┌─────────────┼──────────────┬───────────────────┐
//!     ▼             ▼              ▼                   ▼
//! VersionCatalog  InstallStore   Downloader      SymlinkSwitcher
//! (version)       (store)        (download)      (switcher)
//! ```
//!
//! # Core Modules
//!
//! - [`actions`] - The fetch-and-switch pipeline and installed listing
//! - [`version`] - The `Version` newtype and the API version catalog
//! - [`store`] - The directory of `docker-<version>` install entries
//! - [`download`] - Streaming HTTPS download with a strict redirect policy
//! - [`switcher`] - Safe (re)pointing of the `docker` symlink
//!
//! ## Supporting Modules
//!
//! - [`cli`] - Command-line interface and directory resolution
//! - [`config`] - Global configuration (`~/.dkenv/config.toml`)
//! - [`core`] - Error types and user-facing error rendering
//! - [`constants`] - Default paths, URLs and limits
//! - [`utils`] - Platform detection and progress reporting
//!
//! # Directory Layout
//!
//! ```text
//! ~/.dkenv/
//! ├── config.toml        # optional
//! ├── docker-1.8.3
//! └── docker-1.9.1
//! /usr/local/bin/
//! └── docker -> ~/.dkenv/docker-1.9.1
//! ```
//!
//! # Example
//!
//! ```rust,no_run
//! use dkenv::actions::Dkenv;
//!
//! # async fn example() -> dkenv::core::Result<()> {
//! let dkenv = Dkenv::new("/home/me/.dkenv", "/usr/local/bin")?;
//! let outcome = dkenv.fetch_version_action("1.21", true).await?;
//! println!("docker {} is active", outcome.version);
//! # Ok(())
//! # }
//! ```

pub mod actions;
pub mod cli;
pub mod config;
pub mod constants;
pub mod core;
pub mod download;
pub mod store;
pub mod switcher;
pub mod utils;
pub mod version;

// test utilities
#[cfg(any(test, feature = "test-utils"))]
pub mod test_utils;
