//! Cross-platform utilities and helpers
//!
//! # Modules
//!
//! - [`platform`] - OS detection for download URLs, home directory and `~` expansion
//! - [`progress`] - Byte-progress tracking for streams and the terminal progress bar

pub mod platform;
pub mod progress;

pub use platform::{Platform, get_home_dir, is_windows, resolve_path};
pub use progress::{ObservedStream, Progress, ProgressBar, ProgressTracker};
