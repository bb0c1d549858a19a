//! Configuration management for dkenv
//!
//! dkenv reads a single optional TOML file holding user-wide defaults for the
//! command line. It never writes the file.
//!
//! # Location
//!
//! The first of these that is set wins:
//!
//! 1. `--config <file>`
//! 2. the `DKENV_CONFIG` environment variable
//! 3. `<home>/.dkenv/config.toml`, where `<home>` honours `--homedir`
//!
//! # Precedence
//!
//! Command-line flag, then config file, then the built-in defaults in
//! [`crate::constants`].

mod global;

pub use global::{CONFIG_ENV_VAR, GlobalConfig};
