//! Platform detection and path helpers
//!
//! Docker client builds are published per operating system under a capitalised
//! directory name (`Linux`, `Darwin`, `Windows`). [`Platform`] maps the running OS
//! onto that closed set; any other OS is rejected up front instead of requesting a
//! URL that cannot exist.
//!
//! # Examples
//!
//! ```rust,no_run
//! use dkenv::utils::platform::Platform;
//!
//! # fn example() -> dkenv::core::Result<()> {
//! let platform = Platform::current()?;
//! println!("Downloading builds for {platform}");
//! # Ok(())
//! # }
//! ```

use crate::core::{DkenvError, Result};
use std::fmt;
use std::path::{Path, PathBuf};

/// Operating systems with published docker client builds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Platform {
    Linux,
    Darwin,
    Windows,
}

impl Platform {
    /// Map a `std::env::consts::OS` value onto a platform.
    ///
    /// # Errors
    ///
    /// [`DkenvError::UnsupportedPlatform`] for anything other than linux, macos or windows.
    pub fn from_os(os: &str) -> Result<Self> {
        match os {
            "linux" => Ok(Self::Linux),
            "macos" => Ok(Self::Darwin),
            "windows" => Ok(Self::Windows),
            other => Err(DkenvError::UnsupportedPlatform {
                os: other.to_string(),
            }),
        }
    }

    /// Platform of the running process.
    pub fn current() -> Result<Self> {
        Self::from_os(std::env::consts::OS)
    }

    /// Directory name used in the download URL.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Linux => "Linux",
            Self::Darwin => "Darwin",
            Self::Windows => "Windows",
        }
    }
}

impl fmt::Display for Platform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Checks if the current platform is Windows.
#[must_use]
pub const fn is_windows() -> bool {
    cfg!(windows)
}

/// Returns the home directory of the current user.
///
/// # Errors
///
/// [`DkenvError::ConfigurationError`] when the home directory cannot be determined.
pub fn get_home_dir() -> Result<PathBuf> {
    dirs::home_dir().ok_or_else(|| {
        let platform_help = if is_windows() {
            "check that the USERPROFILE environment variable is set"
        } else {
            "check that the HOME environment variable is set"
        };
        DkenvError::config(format!("Unable to fetch current home dir: {platform_help}"))
    })
}

/// Expand `~` and environment variables in `path`, resolving `~` against `home`.
///
/// `home` is passed explicitly because `--homedir` may override the detected home.
///
/// # Errors
///
/// [`DkenvError::ConfigurationError`] when the path references an undefined
/// environment variable.
pub fn resolve_path(path: &str, home: &Path) -> Result<PathBuf> {
    let home = home.to_string_lossy().into_owned();
    let expanded = shellexpand::full_with_context(path, || Some(home.as_str()), |var| {
        std::env::var(var).map(Some)
    })
    .map_err(|e| DkenvError::config(format!("Unable to expand path '{path}': {e}")))?;

    Ok(PathBuf::from(expanded.as_ref()))
}
