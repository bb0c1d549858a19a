//! Integration test suite for dkenv
//!
//! End-to-end tests for the `dkenv` binary and the fetch-and-switch pipeline.
//! Downloads are served by a local `wiremock` server; nothing touches the network.
//!
//! # Running Integration Tests
//!
//! ```bash
//! cargo test --test integration
//! ```
//!
//! # Test Organization
//!
//! - **cli**: Commands, global flags and error rendering of the binary
//! - **config**: Configuration file discovery and precedence
//! - **fetch_flow**: Download, install and switch through the library

mod cli;
mod config;
mod fetch_flow;
