//! Test utilities shared by unit and integration tests.
//!
//! Available under `cfg(test)` and with the `test-utils` feature.

use crate::constants::ACTIVE_LINK_NAME;
use std::path::{Path, PathBuf};
use std::sync::Once;
use tempfile::TempDir;
use tracing::Level;
use tracing_subscriber::EnvFilter;

/// Global flag to ensure logging is only initialized once in tests
static INIT_LOGGING: Once = Once::new();

/// Initialize logging for tests.
///
/// Uses `level` when given, else `RUST_LOG` when set, else stays silent. Safe to
/// call from every test.
///
/// ```bash
/// RUST_LOG=debug cargo test
/// ```
pub fn init_test_logging(level: Option<Level>) {
    INIT_LOGGING.call_once(|| {
        let filter = if let Some(level) = level {
            EnvFilter::new(level.to_string())
        } else if std::env::var("RUST_LOG").is_ok() {
            EnvFilter::from_default_env()
        } else {
            return;
        };

        let _ = tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_test_writer()
            .with_target(true)
            .with_thread_ids(false)
            .try_init();
    });
}

/// Scratch home directory with a bin dir and a version store.
///
/// ```text
/// <temp>/home/
/// ├── bin/
/// └── .dkenv/
/// ```
pub struct TestEnvironment {
    _temp: TempDir,
    pub home: PathBuf,
    pub bin_dir: PathBuf,
    pub store_dir: PathBuf,
}

impl TestEnvironment {
    /// # Panics
    ///
    /// When the scratch directories cannot be created.
    pub fn new() -> Self {
        let temp = TempDir::new().expect("create temp dir");
        let home = temp.path().join("home");
        let bin_dir = home.join("bin");
        let store_dir = home.join(".dkenv");
        std::fs::create_dir_all(&bin_dir).expect("create bin dir");
        std::fs::create_dir_all(&store_dir).expect("create store dir");

        Self {
            _temp: temp,
            home,
            bin_dir,
            store_dir,
        }
    }

    /// Place a fake install entry for `version` in the store.
    ///
    /// # Panics
    ///
    /// When the file cannot be written.
    pub fn install(&self, version: &str, content: &[u8]) -> PathBuf {
        let path = self.store_dir.join(format!("docker-{version}"));
        std::fs::write(&path, content).expect("write install entry");
        path
    }

    /// Path of the `docker` symlink.
    pub fn link_path(&self) -> PathBuf {
        self.bin_dir.join(ACTIVE_LINK_NAME)
    }

    /// Target of the `docker` symlink, if it is one.
    pub fn link_target(&self) -> Option<PathBuf> {
        std::fs::read_link(self.link_path()).ok()
    }

    /// Number of entries directly inside `dir`.
    ///
    /// # Panics
    ///
    /// When `dir` cannot be read.
    pub fn count_entries(dir: &Path) -> usize {
        std::fs::read_dir(dir).expect("read dir").count()
    }
}

impl Default for TestEnvironment {
    fn default() -> Self {
        Self::new()
    }
}
