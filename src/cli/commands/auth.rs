//! cli::commands::auth
//!
//! Stores the Nexus password in the configured secret store.
//!
//! The password is never printed; only its presence is reported.
//!
//! # Example
//!
//! ```bash
//! # Interactive (prompts with hidden input)
//! nexmeta auth
//!
//! # Non-interactive
//! nexmeta auth --password "$NEXUS_PASSWORD"
//!
//! # Check status
//! nexmeta auth --status
//!
//! # Remove stored password
//! nexmeta auth --logout
//! ```

use anyhow::{bail, Context as _, Result};

use super::{load_config, Context};
use crate::secrets::{self, PasswordSource, SecretStore, PASSWORD_KEY};
use crate::ui::{output, prompts};

/// Run the auth command.
pub fn auth(ctx: &Context, password: Option<&str>, status: bool, logout: bool) -> Result<()> {
    let config = load_config(ctx)?;
    let store = secrets::create_store(config.secrets_provider())
        .context("Failed to initialize secret store")?;

    if status {
        return show_status(store.as_ref(), ctx.quiet);
    }

    if logout {
        store
            .delete(PASSWORD_KEY)
            .context("Failed to remove stored password")?;
        output::success("Stored password removed.", ctx.verbosity());
        return Ok(());
    }

    let password = match password {
        Some(p) => p.to_string(),
        None => prompt(ctx)?,
    };
    validate_password(&password)?;

    store
        .set(PASSWORD_KEY, &password)
        .context("Failed to store password")?;
    output::success(
        format!("Password stored ({}).", config.secrets_provider()),
        ctx.verbosity(),
    );
    Ok(())
}

fn show_status(store: &dyn SecretStore, quiet: bool) -> Result<()> {
    let (_, source) =
        secrets::resolve_password(store, std::env::var(secrets::PASSWORD_ENV).ok())?;

    if quiet {
        // Machine-readable output
        let word = match source {
            PasswordSource::Missing => "not_authenticated",
            _ => "authenticated",
        };
        println!("{}", word);
        return Ok(());
    }

    match source {
        PasswordSource::Environment => {
            println!("Password provided by {}.", secrets::PASSWORD_ENV)
        }
        PasswordSource::Store => println!("Password stored."),
        PasswordSource::Missing => {
            println!("No password stored.");
            println!("Run 'nexmeta auth' to store one.");
        }
    }
    Ok(())
}

fn prompt(ctx: &Context) -> Result<String> {
    match prompts::password("Nexus password: ", ctx.interactive) {
        Ok(p) => Ok(p),
        Err(prompts::PromptError::NotInteractive) => {
            bail!("Password required. Use --password <PASSWORD> or run interactively.")
        }
        Err(e) => Err(e).context("Failed to read password"),
    }
}

fn validate_password(password: &str) -> Result<()> {
    if password.is_empty() {
        bail!("Password cannot be empty.");
    }
    if password.contains('\n') || password.contains('\r') {
        bail!("Password should not contain newlines.");
    }
    Ok(())
}
