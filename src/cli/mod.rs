//! Command-line interface for dkenv.
//!
//! # Commands
//!
//! - `client <version>` - install (if needed) and activate a docker client version
//! - `api <version>` - same, selecting the client through a docker API version
//! - `list` - list installed docker binaries
//! - `apis` - print the API to client version table
//!
//! # Global options
//!
//! - `--bindir <dir>` - directory holding the `docker` symlink
//! - `--homedir <dir>` - override the detected home directory
//! - `--dkenvdir <dir>` - version-store directory, created if missing
//! - `-d, --debug` - debug logging
//! - `--no-progress` - hide the download progress bar
//! - `--config <file>` - configuration file (also `DKENV_CONFIG`)
//!
//! # Examples
//!
//! ```bash
//! dkenv client 1.9.1
//! dkenv api 1.21
//! dkenv --bindir ~/bin list
//! ```

mod list;
pub mod paths;

use crate::actions::Dkenv;
use crate::config::GlobalConfig;
use crate::download::Downloader;
use crate::store::InstallStore;
use anyhow::Result;
use clap::{Parser, Subcommand};
use paths::Directories;
use std::path::PathBuf;

/// Settings derived from global flags that apply before any command runs.
#[derive(Debug, Clone, Default)]
pub struct CliConfig {
    /// Default log level when `RUST_LOG` is not set.
    pub log_level: String,

    /// Hide the download progress bar.
    pub no_progress: bool,

    /// Explicit configuration file path.
    pub config_path: Option<PathBuf>,
}

#[derive(Parser)]
#[command(
    name = "dkenv",
    about = "Docker version manager - switch between docker client versions",
    version,
    long_about = "dkenv downloads docker client binaries into a local store and \
                  points a single `docker` symlink at the one you ask for."
)]
pub struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Directory holding the `docker` symlink [default: /usr/local/bin]
    #[arg(long, global = true, value_name = "DIR")]
    bindir: Option<String>,

    /// Override the detected home directory
    #[arg(long, global = true, value_name = "DIR")]
    homedir: Option<PathBuf>,

    /// Directory storing downloaded binaries [default: ~/.dkenv]
    #[arg(long, global = true, value_name = "DIR")]
    dkenvdir: Option<String>,

    /// Enable debug logging
    #[arg(short, long, global = true)]
    debug: bool,

    /// Hide the download progress bar
    #[arg(long, global = true)]
    no_progress: bool,

    /// Path to the configuration file
    #[arg(long, global = true, value_name = "FILE", env = "DKENV_CONFIG")]
    config: Option<PathBuf>,
}

#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
enum Commands {
    /// Download and switch to a docker client version
    Client {
        /// Client version, e.g. 1.9.1
        version: String,
    },

    /// Download and switch to the client matching a docker API version
    Api {
        /// API version, e.g. 1.21
        version: String,
    },

    /// List installed docker binaries
    List,

    /// Show which client version each API version maps to
    Apis,
}

impl Cli {
    #[must_use]
    pub fn build_config(&self) -> CliConfig {
        let log_level = if self.debug {
            "debug"
        } else {
            "info"
        };

        CliConfig {
            log_level: log_level.to_string(),
            no_progress: self.no_progress,
            config_path: self.config.clone(),
        }
    }

    pub async fn execute_with_config(self, config: CliConfig) -> Result<()> {
        if self.command == Commands::Apis {
            list::print_apis(crate::version::VersionCatalog::default().entries());
            return Ok(());
        }

        let home = paths::resolve_home(self.homedir.as_deref())?;
        let global = GlobalConfig::load_with_optional(config.config_path.clone(), &home).await?;
        let dirs = paths::resolve_directories(
            home,
            self.bindir.as_deref(),
            self.dkenvdir.as_deref(),
            &global,
        )?;
        let dkenv = build_dkenv(&dirs, &global, &config)?;

        match self.command {
            Commands::Client {
                version,
            } => {
                dkenv.fetch_version_action(&version, false).await?;
            }
            Commands::Api {
                version,
            } => {
                dkenv.fetch_version_action(&version, true).await?;
            }
            Commands::List => list::print_installed(&dkenv.list_action()?),
            Commands::Apis => {}
        }

        Ok(())
    }
}

fn build_dkenv(dirs: &Directories, global: &GlobalConfig, config: &CliConfig) -> Result<Dkenv> {
    let mut downloader =
        Downloader::new(InstallStore::new(&dirs.dkenv_dir))?.show_progress(!config.no_progress);
    if let Some(url) = &global.download_base_url {
        downloader = downloader.with_base_url(url.clone());
    }

    Ok(Dkenv::with_downloader(downloader, &dirs.bin_dir))
}
