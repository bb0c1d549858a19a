//! Resolution and validation of the directories dkenv works in.
//!
//! The core only ever receives absolute, existing directories. Everything
//! user-supplied (flags, config file, defaults) is expanded, normalised and
//! checked here first.

use crate::config::GlobalConfig;
use crate::constants::{DEFAULT_BIN_DIR, DEFAULT_DKENV_DIR};
use crate::core::{DkenvError, Result};
use crate::utils::platform::{get_home_dir, resolve_path};
use std::path::{Path, PathBuf};
use tracing::debug;

/// The three validated directories a command runs against.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Directories {
    pub home: PathBuf,
    pub bin_dir: PathBuf,
    pub dkenv_dir: PathBuf,
}

/// Home directory from `--homedir`, or the detected one.
///
/// # Errors
///
/// [`DkenvError::ConfigurationError`] if no home can be found or it is not a directory.
pub fn resolve_home(flag: Option<&Path>) -> Result<PathBuf> {
    let home = match flag {
        Some(path) => absolute(path)?,
        None => get_home_dir()?,
    };
    require_dir(&home, "Home")?;
    Ok(home)
}

/// Resolve the bin and store directories, creating the store when missing.
///
/// `bin_dir` and `dkenv_dir` are the raw flag values; they win over `config`,
/// which wins over the built-in defaults.
pub fn resolve_directories(
    home: PathBuf,
    bin_dir: Option<&str>,
    dkenv_dir: Option<&str>,
    config: &GlobalConfig,
) -> Result<Directories> {
    let bin_raw = bin_dir.or(config.bin_dir.as_deref()).unwrap_or(DEFAULT_BIN_DIR);
    let bin_dir = absolute(&resolve_path(bin_raw, &home)?)?;
    require_dir(&bin_dir, "Bin")?;

    let store_raw = dkenv_dir.or(config.dkenv_dir.as_deref()).unwrap_or(DEFAULT_DKENV_DIR);
    let dkenv_dir = absolute(&resolve_path(store_raw, &home)?)?;
    ensure_store_dir(&dkenv_dir)?;

    debug!(
        "Using home '{}', bin dir '{}', dkenv dir '{}'",
        home.display(),
        bin_dir.display(),
        dkenv_dir.display()
    );

    Ok(Directories {
        home,
        bin_dir,
        dkenv_dir,
    })
}

/// Make `path` absolute and drop trailing separators and `.` components.
fn absolute(path: &Path) -> Result<PathBuf> {
    let path = std::path::absolute(path)
        .map_err(|e| DkenvError::config(format!("Unable to resolve '{}': {e}", path.display())))?;
    Ok(path.components().collect())
}

fn require_dir(path: &Path, what: &str) -> Result<()> {
    if path.is_dir() {
        Ok(())
    } else {
        Err(DkenvError::config(format!(
            "{what} dir '{}' does not exist or is not a directory",
            path.display()
        )))
    }
}

fn ensure_store_dir(path: &Path) -> Result<()> {
    if path.is_dir() {
        return Ok(());
    }

    let mut builder = std::fs::DirBuilder::new();
    builder.recursive(true);
    #[cfg(unix)]
    {
        use std::os::unix::fs::DirBuilderExt;
        builder.mode(0o700);
    }

    builder.create(path).map_err(|e| {
        DkenvError::config(format!("Error creating dkenv dir '{}': {e}", path.display()))
    })?;
    debug!("Created dkenv dir '{}'", path.display());
    Ok(())
}
