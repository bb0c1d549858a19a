//! Error handling for dkenv
//!
//! This module provides the error taxonomy of the version-switching engine and the
//! user-facing rendering used at the CLI boundary. The error system follows two rules:
//! 1. **Strongly-typed errors** inside the library: every core operation returns
//!    `Result<T, DkenvError>` so callers (and tests) can match on the exact failure
//! 2. **One human-readable message** at the top: [`user_friendly_error`] turns any
//!    error into an [`ErrorContext`] with details and a suggestion, and `main` prints
//!    it once before exiting
//!
//! # Error Categories
//!
//! - **Configuration**: [`DkenvError::ConfigurationError`]
//! - **Version resolution**: [`DkenvError::InvalidVersion`], [`DkenvError::UnknownCompatibilityId`]
//! - **Download**: [`DkenvError::UnsupportedPlatform`], [`DkenvError::VersionNotFound`],
//!   [`DkenvError::TooManyRedirects`], [`DkenvError::InsecureRedirect`], [`DkenvError::Network`]
//! - **File system**: [`DkenvError::FilesystemError`], [`DkenvError::SourceMissing`],
//!   [`DkenvError::BackupExists`]
//!
//! None of these are retried. Partial side effects (a backup file, a removed stale
//! symlink) are left in place; re-running the command converges on the same end state.
//!
//! # Examples
//!
//! ```rust,no_run
//! use dkenv::core::{DkenvError, user_friendly_error};
//!
//! let err = DkenvError::UnknownCompatibilityId {
//!     id: "9.99".to_string(),
//! };
//! user_friendly_error(anyhow::Error::from(err)).display();
//! ```

use colored::Colorize;
use std::fmt;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// The main error type for dkenv operations
///
/// Each variant maps to one failure mode of the resolve → install → switch pipeline.
/// Variants carry the values needed to diagnose the failure (paths, URLs, versions);
/// I/O failures keep the original [`std::io::Error`] as their source.
#[derive(Error, Debug)]
pub enum DkenvError {
    /// Required directories are missing, are not directories, or cannot be created.
    ///
    /// Raised by the CLI layer and configuration loading before the core runs.
    #[error("Configuration error: {message}")]
    ConfigurationError {
        /// Description of the configuration problem
        message: String,
    },

    /// A client version string that cannot name an install entry
    #[error("Invalid docker version '{version}'")]
    InvalidVersion {
        /// The rejected version string
        version: String,
    },

    /// The API version is not present in the compatibility table
    #[error("Invalid API version '{id}'")]
    UnknownCompatibilityId {
        /// The API version that was requested
        id: String,
    },

    /// The running OS has no published docker builds
    #[error("Unsupported system type - {os}")]
    UnsupportedPlatform {
        /// Value of `std::env::consts::OS`
        os: String,
    },

    /// The download server answered with a non-2xx status
    ///
    /// This means the artifact for the version/platform pair does not exist. It is
    /// not a transient condition.
    #[error("No such docker version '{version}' (HTTP {status})")]
    VersionNotFound {
        /// The requested client version
        version: String,
        /// Final HTTP status code
        status: u16,
    },

    /// The server redirected more than the allowed number of times
    #[error("Too many redirects (stopped after {hops} hops)")]
    TooManyRedirects {
        /// Number of redirects already followed when the request was stopped
        hops: usize,
    },

    /// A redirect pointed at a non-HTTPS location
    #[error("Redirect to non-https server: {url}")]
    InsecureRedirect {
        /// The rejected redirect target
        url: String,
    },

    /// Transport-level failure talking to the download server
    #[error("Network error while downloading {url}")]
    Network {
        /// The URL being requested
        url: String,
        /// Underlying HTTP client error
        #[source]
        source: reqwest::Error,
    },

    /// Any I/O failure while reading the store, writing a download, or switching
    #[error("Failed to {operation} '{}': {source}", path.display())]
    FilesystemError {
        /// What was being attempted (e.g. "create symlink")
        operation: String,
        /// The path the operation was applied to
        path: PathBuf,
        /// Original OS error
        #[source]
        source: std::io::Error,
    },

    /// The install entry to activate does not exist
    ///
    /// The orchestrator only switches after confirming the entry is installed, so
    /// this indicates an internal-consistency fault.
    #[error("Unable to lookup source binary '{}'", path.display())]
    SourceMissing {
        /// Expected install-entry path
        path: PathBuf,
    },

    /// The backup name chosen for a foreign binary is already taken
    #[error("Backup target '{}' already exists", path.display())]
    BackupExists {
        /// The backup path that is already occupied
        path: PathBuf,
    },

    /// Any other failure surfaced at the CLI boundary
    #[error("{message}")]
    Other {
        /// Full error message including its cause chain
        message: String,
    },
}

impl DkenvError {
    /// Build a [`DkenvError::FilesystemError`] from an I/O error.
    pub fn fs(operation: impl Into<String>, path: impl AsRef<Path>, source: std::io::Error) -> Self {
        Self::FilesystemError {
            operation: operation.into(),
            path: path.as_ref().to_path_buf(),
            source,
        }
    }

    /// Build a [`DkenvError::ConfigurationError`].
    pub fn config(message: impl Into<String>) -> Self {
        Self::ConfigurationError {
            message: message.into(),
        }
    }
}

/// Error wrapper carrying user-facing details and a suggestion
///
/// This is what gets printed when a command fails. The suggestion is shown in green
/// and should be an actionable next step.
#[derive(Debug)]
pub struct ErrorContext {
    /// The underlying dkenv error
    pub error: DkenvError,
    /// Optional suggestion for resolving the error
    pub suggestion: Option<String>,
    /// Optional additional details about the error
    pub details: Option<String>,
}

impl ErrorContext {
    #[must_use]
    pub const fn new(error: DkenvError) -> Self {
        Self {
            error,
            suggestion: None,
            details: None,
        }
    }

    /// Add a suggestion for resolving the error
    #[must_use]
    pub fn with_suggestion(mut self, suggestion: impl Into<String>) -> Self {
        self.suggestion = Some(suggestion.into());
        self
    }

    /// Add details explaining the error
    #[must_use]
    pub fn with_details(mut self, details: impl Into<String>) -> Self {
        self.details = Some(details.into());
        self
    }

    /// Print the error to stderr with colour.
    pub fn display(&self) {
        eprintln!("{}: {}", "error".red().bold(), self.error);

        if let Some(details) = &self.details {
            eprintln!("{}: {}", "details".yellow(), details);
        }

        if let Some(suggestion) = &self.suggestion {
            eprintln!("{}: {}", "suggestion".green(), suggestion);
        }
    }
}

impl fmt::Display for ErrorContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.error)?;

        if let Some(details) = &self.details {
            write!(f, "\nDetails: {details}")?;
        }

        if let Some(suggestion) = &self.suggestion {
            write!(f, "\nSuggestion: {suggestion}")?;
        }

        Ok(())
    }
}

impl std::error::Error for ErrorContext {}

/// Convert any error to a user-friendly [`ErrorContext`]
///
/// [`DkenvError`]s get a tailored suggestion. Anything else is flattened into a
/// [`DkenvError::Other`] that keeps the full cause chain.
pub fn user_friendly_error(error: anyhow::Error) -> ErrorContext {
    let error = match error.downcast::<DkenvError>() {
        Ok(dkenv_error) => return create_error_context(dkenv_error),
        Err(error) => error,
    };

    let mut message = error.to_string();

    let chain: Vec<String> = error.chain().skip(1).map(std::string::ToString::to_string).collect();

    if !chain.is_empty() {
        message.push_str("\n\nCaused by:");
        for (i, cause) in chain.iter().enumerate() {
            message.push_str(&format!("\n  {}: {}", i + 1, cause));
        }
    }

    ErrorContext::new(DkenvError::Other {
        message,
    })
}

fn create_error_context(error: DkenvError) -> ErrorContext {
    match &error {
        DkenvError::ConfigurationError { .. } => ErrorContext::new(error)
            .with_suggestion("Check the --bindir, --homedir and --dkenvdir flags and ~/.dkenv/config.toml"),

        DkenvError::InvalidVersion { .. } => ErrorContext::new(error)
            .with_suggestion("Pass a docker client version such as '1.9.1'"),

        DkenvError::UnknownCompatibilityId { .. } => ErrorContext::new(error)
            .with_suggestion("Run 'dkenv apis' to see the supported API versions")
            .with_details("API versions are resolved through a fixed table shipped with dkenv"),

        DkenvError::UnsupportedPlatform { .. } => ErrorContext::new(error)
            .with_details("Docker client builds are published for Linux, Darwin and Windows only"),

        DkenvError::VersionNotFound { version, .. } => {
            let suggestion = format!(
                "Check that docker {version} was released for this platform, or use 'dkenv api <version>'"
            );
            ErrorContext::new(error)
                .with_suggestion(suggestion)
                .with_details("The download server has no binary for this version")
        }

        DkenvError::TooManyRedirects { .. } | DkenvError::InsecureRedirect { .. } => {
            ErrorContext::new(error)
                .with_details("Downloads only follow up to 10 redirects, all of them over HTTPS")
        }

        DkenvError::Network { source, .. } => {
            let details = source.to_string();
            ErrorContext::new(error)
                .with_suggestion("Check your internet connection and try again")
                .with_details(details)
        }

        DkenvError::FilesystemError { source, .. } => {
            let suggestion = if source.kind() == std::io::ErrorKind::PermissionDenied {
                "Try running with elevated permissions (sudo) or choose another --bindir"
            } else {
                "Check that the path exists and is writable"
            };
            ErrorContext::new(error).with_suggestion(suggestion)
        }

        DkenvError::SourceMissing { .. } => ErrorContext::new(error)
            .with_details("The binary disappeared from the store between install and switch")
            .with_suggestion("Re-run the command to download it again"),

        DkenvError::BackupExists { .. } => ErrorContext::new(error)
            .with_suggestion("Move the existing backup aside and re-run the command"),

        DkenvError::Other { .. } => ErrorContext::new(error),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let error = DkenvError::UnknownCompatibilityId {
            id: "9.99".to_string(),
        };
        assert_eq!(error.to_string(), "Invalid API version '9.99'");

        let error = DkenvError::VersionNotFound {
            version: "0.0.0".to_string(),
            status: 404,
        };
        assert_eq!(error.to_string(), "No such docker version '0.0.0' (HTTP 404)");

        let error = DkenvError::fs(
            "create symlink",
            "/usr/local/bin/docker",
            std::io::Error::from(std::io::ErrorKind::PermissionDenied),
        );
        assert!(error.to_string().starts_with("Failed to create symlink '/usr/local/bin/docker'"));
    }

    #[test]
    fn test_error_context() {
        let ctx = ErrorContext::new(DkenvError::config("bin dir missing"))
            .with_suggestion("Create it")
            .with_details("Needed for the docker symlink");

        assert_eq!(ctx.suggestion, Some("Create it".to_string()));
        assert_eq!(ctx.details, Some("Needed for the docker symlink".to_string()));

        let display = format!("{ctx}");
        assert!(display.contains("Configuration error: bin dir missing"));
        assert!(display.contains("Suggestion: Create it"));
    }

    #[test]
    fn test_user_friendly_error_keeps_variant() {
        let err = anyhow::Error::from(DkenvError::UnknownCompatibilityId {
            id: "9.99".to_string(),
        });
        let ctx = user_friendly_error(err);

        assert!(matches!(ctx.error, DkenvError::UnknownCompatibilityId { .. }));
        assert!(ctx.suggestion.unwrap().contains("dkenv apis"));
    }

    #[test]
    fn test_user_friendly_error_permission_suggestion() {
        let err = anyhow::Error::from(DkenvError::fs(
            "rename",
            "/usr/local/bin/docker",
            std::io::Error::from(std::io::ErrorKind::PermissionDenied),
        ));
        let ctx = user_friendly_error(err);
        assert!(ctx.suggestion.unwrap().contains("sudo"));
    }

    #[test]
    fn test_user_friendly_error_generic_chain() {
        let err = anyhow::anyhow!("inner failure").context("outer failure");
        let ctx = user_friendly_error(err);

        let message = ctx.error.to_string();
        assert!(message.contains("outer failure"));
        assert!(message.contains("Caused by:"));
        assert!(message.contains("inner failure"));
    }
}
