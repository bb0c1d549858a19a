//! Global constants used throughout the dkenv codebase.
//!
//! Default locations, the download origin and the redirect limit live here so the
//! CLI, configuration and core modules agree on them.

/// Default directory for the `docker` symlink.
pub const DEFAULT_BIN_DIR: &str = "/usr/local/bin";

/// Default version-store directory, expanded against the home directory.
pub const DEFAULT_DKENV_DIR: &str = "~/.dkenv";

/// Name of the configuration file inside `~/.dkenv`.
pub const CONFIG_FILE_NAME: &str = "config.toml";

/// Origin serving `builds/<Platform>/x86_64/docker-<version>`.
pub const DEFAULT_DOWNLOAD_BASE_URL: &str = "https://get.docker.com";

/// CPU architecture segment of the download URL. Only x86_64 builds are published.
pub const DOWNLOAD_ARCH: &str = "x86_64";

/// File name of the active-pointer symlink inside the bin directory.
pub const ACTIVE_LINK_NAME: &str = "docker";

/// Maximum number of redirects followed for a single download.
pub const MAX_REDIRECTS: usize = 10;

/// Suffix appended to backups of foreign `docker` binaries.
pub const BACKUP_SUFFIX: &str = "dkenv";
