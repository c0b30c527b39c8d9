//! cli::args
//!
//! Command-line argument definitions using clap derive.
//!
//! # Global Flags
//!
//! These flags are available on all commands:
//! - `--help` / `-h`: Show help
//! - `--version`: Show version
//! - `--config <path>`: Use this settings file
//! - `--debug`: Enable debug logging
//! - `--no-interactive`: Never prompt
//! - `--quiet` / `-q`: Minimal output

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

use crate::core::types::ArtifactCoordinate;
use crate::ui::prompts::stdin_is_terminal;

/// nexmeta - upsert custom metadata on Nexus repository artifacts
#[derive(Parser, Debug)]
#[command(name = "nexmeta")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Settings file to use instead of the default locations
    #[arg(long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Enable debug logging
    #[arg(long, global = true)]
    pub debug: bool,

    /// Minimal output; implies --no-interactive
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Disable interactive prompts
    #[arg(long, global = true)]
    pub no_interactive: bool,

    #[command(subcommand)]
    pub command: Command,
}

impl Cli {
    /// Parse command-line arguments.
    pub fn parse_args() -> Self {
        Parser::parse()
    }

    /// Determine if interactive mode is enabled.
    ///
    /// Interactive unless `--no-interactive` or `--quiet` was set, or stdin
    /// is not a terminal.
    pub fn interactive(&self) -> bool {
        !self.no_interactive && !self.quiet && stdin_is_terminal()
    }
}

/// Identifies one artifact on the service.
#[derive(Args, Debug, Clone, PartialEq, Eq)]
pub struct CoordinateArgs {
    /// Namespace owning the metadata (e.g. urn:maven/artifact)
    #[arg(long, short = 'n')]
    pub namespace: String,

    /// Maven group id
    #[arg(long, short = 'g')]
    pub group_id: String,

    /// Maven artifact id
    #[arg(long, short = 'a')]
    pub artifact_id: String,

    /// Artifact version
    #[arg(long = "artifact-version", short = 'v')]
    pub version: String,

    /// Packaging type
    #[arg(long, short = 'p', default_value = "jar")]
    pub packaging: String,
}

impl CoordinateArgs {
    pub fn to_coordinate(&self) -> ArtifactCoordinate {
        ArtifactCoordinate::new(
            &self.namespace,
            &self.group_id,
            &self.artifact_id,
            &self.version,
            &self.packaging,
        )
    }
}

/// Available commands.
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Set a metadata entry on an artifact
    #[command(
        name = "sync",
        long_about = "Set a key/value metadata entry on an artifact.\n\n\
            Checks that the service runs Sonatype Nexus Professional with the custom \
            metadata plugin, reads the artifact's current metadata, merges the new entry \
            in, and writes the result back. Read-only entries are left to the service. \
            An existing entry with the same key in the same namespace is replaced.",
        after_help = "\
WORKFLOW EXAMPLES:
    # Record a build number on a released jar
    nexmeta sync -n urn:maven/artifact -g de.mb -a rest-test -v 0.0.1 \\
        --key build --value 42

    # Same, for a war, without progress output
    nexmeta -q sync -n urn:maven/artifact -g de.mb -a rest-web -v 1.2.0 -p war \\
        --key approved-by --value qa-team

EXIT STATUS:
    0 when the write succeeded, 1 when the synchronization was aborted."
    )]
    Sync {
        #[command(flatten)]
        coordinate: CoordinateArgs,

        /// Metadata key
        #[arg(long, short = 'k')]
        key: String,

        /// Metadata value
        #[arg(long)]
        value: String,
    },

    /// Show the metadata stored for an artifact
    #[command(
        name = "show",
        after_help = "\
WORKFLOW EXAMPLES:
    nexmeta show -n urn:maven/artifact -g de.mb -a rest-test -v 0.0.1"
    )]
    Show {
        #[command(flatten)]
        coordinate: CoordinateArgs,
    },

    /// Test the connection and the service capabilities
    #[command(
        name = "check",
        long_about = "Test the connection to the configured Nexus instance.\n\n\
            Verifies that the status endpoint answers with the configured credentials, \
            then checks for the custom metadata plugin and the Professional edition."
    )]
    Check,

    /// Get, set, or list configuration values
    #[command(
        name = "config",
        after_help = "\
KEYS:
    url               Base URL of the Nexus instance, e.g. http://nexus:8081/nexus
    user              User name for HTTP Basic authentication
    timeout_secs      Per-request timeout (default 30)
    secrets_provider  Where the password is stored: file (default) or keychain

WORKFLOW EXAMPLES:
    nexmeta config set url http://nexus.example.com:8081/nexus
    nexmeta config set user deployment
    nexmeta config list"
    )]
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },

    /// Store the Nexus password
    #[command(
        name = "auth",
        long_about = "Store the password used for HTTP Basic authentication.\n\n\
            The password goes to the configured secret store and is never printed. \
            The NEXMETA_PASSWORD environment variable takes precedence over the \
            stored password.",
        after_help = "\
WORKFLOW EXAMPLES:
    # Prompt for the password (input is hidden)
    nexmeta auth

    # Check whether a password is available
    nexmeta auth --status

    # Remove the stored password
    nexmeta auth --logout"
    )]
    Auth {
        /// Password (prompted for when omitted)
        #[arg(long)]
        password: Option<String>,

        /// Show whether a password is available
        #[arg(long, conflicts_with = "logout")]
        status: bool,

        /// Remove the stored password
        #[arg(long)]
        logout: bool,
    },

    /// Generate shell completion scripts
    #[command(
        name = "completion",
        after_help = "\
WORKFLOW EXAMPLES:
    # Bash (add to ~/.bashrc)
    nexmeta completion bash >> ~/.bashrc

    # Zsh (add to ~/.zshrc)
    nexmeta completion zsh >> ~/.zshrc"
    )]
    Completion {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

/// Config subcommand actions.
#[derive(Subcommand, Debug, Clone)]
pub enum ConfigAction {
    /// Get a configuration value
    Get {
        /// Configuration key
        key: String,
    },
    /// Set a configuration value
    Set {
        /// Configuration key
        key: String,
        /// Value to set
        value: String,
    },
    /// List all configuration values
    List,
}

/// Supported shells for completion
#[derive(clap::ValueEnum, Debug, Clone, Copy)]
#[allow(clippy::enum_variant_names)]
pub enum Shell {
    Bash,
    Zsh,
    Fish,
    PowerShell,
}
