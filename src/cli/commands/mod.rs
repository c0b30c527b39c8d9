//! cli::commands
//!
//! Command dispatch and handlers.
//!
//! # Architecture
//!
//! Each command handler:
//! 1. Validates command-specific arguments
//! 2. Loads configuration and credentials
//! 3. Calls the engine
//! 4. Formats and displays output
//!
//! # Async Commands
//!
//! Commands talking to Nexus (sync, show, check) are async because they
//! involve network I/O. Each builds its own tokio runtime and blocks on it.

mod auth;
mod check;
mod completion;
mod config_cmd;
mod show;
mod sync;

pub use auth::auth;
pub use check::check;
pub use completion::completion;
pub use config_cmd::{get as config_get, list as config_list, set as config_set};
pub use show::show;
pub use sync::sync;

use std::path::PathBuf;

use anyhow::{bail, Context as _, Result};

use super::args::{Command, ConfigAction};
use crate::core::config::Config;
use crate::core::types::ServiceConfig;
use crate::secrets::{self, PasswordSource};
use crate::ui::output::{self, Verbosity};

/// Execution context for commands.
///
/// Global settings derived from CLI flags.
#[derive(Debug, Clone, Default)]
pub struct Context {
    /// Settings file override.
    pub config_path: Option<PathBuf>,
    /// Debug logging enabled.
    pub debug: bool,
    /// Quiet mode (minimal output).
    pub quiet: bool,
    /// Interactive mode enabled.
    pub interactive: bool,
}

impl Context {
    pub fn verbosity(&self) -> Verbosity {
        Verbosity::from_flags(self.quiet, self.debug)
    }
}

/// Dispatch a command to its handler.
pub fn dispatch(command: Command, ctx: &Context) -> Result<()> {
    match command {
        Command::Sync {
            coordinate,
            key,
            value,
        } => sync(ctx, &coordinate, &key, &value),
        Command::Show { coordinate } => show(ctx, &coordinate),
        Command::Check => check(ctx),
        Command::Config { action } => match action {
            ConfigAction::Get { key } => config_get(ctx, &key),
            ConfigAction::Set { key, value } => config_set(ctx, &key, &value),
            ConfigAction::List => config_list(ctx),
        },
        Command::Auth {
            password,
            status,
            logout,
        } => auth(ctx, password.as_deref(), status, logout),
        Command::Completion { shell } => completion(shell),
    }
}

/// Load the settings file named by `--config`, or the default one.
fn load_config(ctx: &Context) -> Result<Config> {
    let config = Config::load(ctx.config_path.as_deref()).context("Failed to load config")?;
    if let Some(path) = config.loaded_from() {
        output::debug(format!("config loaded from {}", path.display()), ctx.verbosity());
    }
    Ok(config)
}

/// Join the settings with the password for one invocation.
fn service_config(ctx: &Context, config: &Config) -> Result<ServiceConfig> {
    let store = secrets::create_store(config.secrets_provider())
        .context("Failed to initialize secret store")?;
    let (password, source) =
        secrets::resolve_password(store.as_ref(), std::env::var(secrets::PASSWORD_ENV).ok())
            .context("Failed to read password")?;

    let origin = match source {
        PasswordSource::Environment => secrets::PASSWORD_ENV,
        PasswordSource::Store => config.secrets_provider(),
        PasswordSource::Missing => "nowhere",
    };
    output::debug(format!("password from {}", origin), ctx.verbosity());

    Ok(config.service_config(password))
}

/// Fail with setup hints when connection settings are missing.
fn require_complete(service: &ServiceConfig) -> Result<()> {
    let missing = service.missing_fields();
    if missing.is_empty() {
        return Ok(());
    }
    bail!(
        "Missing configuration: {}.\n{}",
        missing.join(", "),
        setup_hint(&missing)
    )
}

/// How to supply the given missing settings.
fn setup_hint(missing: &[&str]) -> String {
    missing
        .iter()
        .map(|field| match *field {
            "url" => "  nexmeta config set url <URL>",
            "username" => "  nexmeta config set user <NAME>",
            _ => "  nexmeta auth",
        })
        .collect::<Vec<_>>()
        .join("\n")
}

fn runtime() -> Result<tokio::runtime::Runtime> {
    tokio::runtime::Runtime::new().context("Failed to start async runtime")
}
