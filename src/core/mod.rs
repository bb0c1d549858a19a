//! Core types shared by every dkenv module
//!
//! - [`error`] - [`DkenvError`] taxonomy and user-facing [`ErrorContext`] rendering

pub mod error;

pub use error::{DkenvError, ErrorContext, user_friendly_error};

/// Result alias used by the core modules.
pub type Result<T, E = DkenvError> = std::result::Result<T, E>;
