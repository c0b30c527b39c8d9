//! ui::prompts
//!
//! Interactive prompts.
//!
//! Prompts are only shown in interactive mode. Without a terminal, commands
//! that need input must take it from a flag or fail with a clear message.

use std::io::IsTerminal;

use thiserror::Error;

/// Errors from prompts.
#[derive(Debug, Error)]
pub enum PromptError {
    #[error("not in interactive mode")]
    NotInteractive,

    #[error("no input given")]
    Empty,

    #[error("IO error: {0}")]
    IoError(String),
}

/// True when stdin is attached to a terminal.
pub fn stdin_is_terminal() -> bool {
    std::io::stdin().is_terminal()
}

/// Prompt for masked input. The input is not echoed to the terminal.
pub fn password(message: &str, interactive: bool) -> Result<String, PromptError> {
    if !interactive {
        return Err(PromptError::NotInteractive);
    }
    let value =
        rpassword::prompt_password(message).map_err(|e| PromptError::IoError(e.to_string()))?;
    if value.is_empty() {
        return Err(PromptError::Empty);
    }
    Ok(value)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn password_requires_interactive_mode() {
        assert!(matches!(
            password("Password: ", false),
            Err(PromptError::NotInteractive)
        ));
    }
}
