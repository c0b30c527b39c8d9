//! config command - Get, set, or list configuration values

use anyhow::{Context as _, Result};

use super::{load_config, Context};
use crate::core::config::SettingsFile;
use crate::ui::output;

/// Get a configuration value.
///
/// Prints nothing when the key is valid but unset.
pub fn get(ctx: &Context, key: &str) -> Result<()> {
    let config = load_config(ctx)?;
    if let Some(value) = config.settings.get(key)? {
        println!("{}", value);
    }
    Ok(())
}

/// Set a configuration value and persist it.
pub fn set(ctx: &Context, key: &str, value: &str) -> Result<()> {
    let mut config = load_config(ctx)?;
    config.settings.set(key, value)?;
    let path = config.save().context("Failed to write config")?;

    output::success(format!("Set {} = {}", key, value), ctx.verbosity());
    output::debug(format!("written to {}", path.display()), ctx.verbosity());
    Ok(())
}

/// List all configuration values.
pub fn list(ctx: &Context) -> Result<()> {
    let config = load_config(ctx)?;

    match config.loaded_from() {
        Some(path) => println!("# {}", path.display()),
        None => println!("# (no config file, defaults)"),
    }
    for key in SettingsFile::KEYS {
        let value = config.settings.get(key)?;
        println!("{} = {}", key, value.as_deref().unwrap_or("(not set)"));
    }
    Ok(())
}
