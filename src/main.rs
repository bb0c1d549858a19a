//! dkenv CLI entry point
//!
//! Parses arguments, sets up logging, runs the command and renders any error.
//! The commands are:
//! - `client` - switch to a docker client version
//! - `api` - switch to the client for a docker API version
//! - `list` - list installed binaries
//! - `apis` - show the API version table

use anyhow::Result;
use clap::Parser;
use dkenv::cli;
use dkenv::core::error::user_friendly_error;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    // Parse CLI arguments
    let cli = cli::Cli::parse();
    let config = cli.build_config();

    init_logging(&config.log_level);

    // Set up colored output for Windows
    #[cfg(windows)]
    colored::control::set_virtual_terminal(true).ok();

    match cli.execute_with_config(config).await {
        Ok(()) => Ok(()),
        Err(e) => {
            let error_ctx = user_friendly_error(e);
            error_ctx.display();
            std::process::exit(1);
        }
    }
}

/// `RUST_LOG` wins; otherwise `default_level` from the command line.
fn init_logging(default_level: &str) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .try_init();
}
