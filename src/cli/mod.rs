//! cli
//!
//! Command-line interface layer for nexmeta.
//!
//! # Responsibilities
//!
//! - Parse command-line arguments and global flags
//! - Initialize diagnostics
//! - Delegate to command handlers
//!
//! The CLI layer is thin: the synchronization itself lives in
//! [`crate::engine`].

pub mod args;
pub mod commands;

pub use args::{Cli, Shell};

use anyhow::Result;
use tracing_subscriber::{fmt, EnvFilter};

/// Run the CLI application.
///
/// This is the main entry point called from `main.rs`.
pub fn run() -> Result<()> {
    let cli = Cli::parse_args();
    init_tracing(cli.debug);

    let ctx = commands::Context {
        config_path: cli.config.clone(),
        debug: cli.debug,
        quiet: cli.quiet,
        interactive: cli.interactive(),
    };

    commands::dispatch(cli.command, &ctx)
}

/// Install the stderr diagnostics subscriber.
///
/// `RUST_LOG` wins; otherwise `warn`, or `debug` under `--debug`.
fn init_tracing(debug: bool) {
    let default = if debug { "nexmeta=debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    let _ = fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .try_init();
}
