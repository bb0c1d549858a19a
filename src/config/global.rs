//! Global configuration stored in `~/.dkenv/config.toml`.

use crate::constants::{CONFIG_FILE_NAME, DEFAULT_DKENV_DIR};
use crate::core::{DkenvError, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};
use tokio::fs;
use tracing::debug;

/// Environment variable overriding the configuration file location.
pub const CONFIG_ENV_VAR: &str = "DKENV_CONFIG";

/// User-wide defaults for the command line.
///
/// Every key is optional; a missing key falls back to the built-in default and
/// any command-line flag overrides the file.
///
/// ```toml
/// bin_dir = "~/bin"
/// dkenv_dir = "~/.local/share/dkenv"
/// download_base_url = "https://mirror.example.com/docker"
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct GlobalConfig {
    /// Directory holding the `docker` symlink.
    #[serde(default)]
    pub bin_dir: Option<String>,

    /// Version-store directory. `~` is expanded against the home directory.
    #[serde(default)]
    pub dkenv_dir: Option<String>,

    /// Origin serving docker builds. Must be `https://`.
    #[serde(default)]
    pub download_base_url: Option<String>,
}

impl GlobalConfig {
    /// Default configuration path for a given home directory.
    #[must_use]
    pub fn default_path(home: &Path) -> PathBuf {
        let store = DEFAULT_DKENV_DIR.trim_start_matches("~/");
        home.join(store).join(CONFIG_FILE_NAME)
    }

    /// Load from `path` if given, else from `DKENV_CONFIG`, else from
    /// [`default_path`](Self::default_path).
    ///
    /// A file that does not exist yields the default configuration.
    ///
    /// # Errors
    ///
    /// [`DkenvError::ConfigurationError`] if the file cannot be read, is not valid
    /// TOML, or fails [`validate`](Self::validate).
    pub async fn load_with_optional(path: Option<PathBuf>, home: &Path) -> Result<Self> {
        let path = path
            .or_else(|| std::env::var_os(CONFIG_ENV_VAR).map(PathBuf::from))
            .unwrap_or_else(|| Self::default_path(home));

        if fs::try_exists(&path).await.unwrap_or(false) {
            Self::load_from(&path).await
        } else {
            debug!("No config file at {}, using defaults", path.display());
            Ok(Self::default())
        }
    }

    /// Load and validate the configuration file at `path`.
    ///
    /// # Errors
    ///
    /// [`DkenvError::ConfigurationError`] if the file cannot be read, is not valid
    /// TOML, or fails [`validate`](Self::validate).
    pub async fn load_from(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path).await.map_err(|e| {
            DkenvError::config(format!("Failed to read config file {}: {e}", path.display()))
        })?;

        let config: Self = toml::from_str(&content).map_err(|e| {
            DkenvError::config(format!("Failed to parse config file {}: {e}", path.display()))
        })?;

        config.validate()?;
        debug!("Loaded config from {}", path.display());
        Ok(config)
    }

    /// Reject settings that would weaken the download policy.
    pub fn validate(&self) -> Result<()> {
        if let Some(url) = &self.download_base_url {
            let parsed = reqwest::Url::parse(url).map_err(|e| {
                DkenvError::config(format!("Invalid download_base_url '{url}': {e}"))
            })?;
            if parsed.scheme() != "https" {
                return Err(DkenvError::config(format!(
                    "download_base_url must use https, got '{url}'"
                )));
            }
        }
        Ok(())
    }
}
