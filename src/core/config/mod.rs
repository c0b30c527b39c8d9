//! core::config
//!
//! Configuration schema and loading.
//!
//! # Overview
//!
//! nexmeta has a single user-level settings file holding the service URL,
//! user name, request timeout, and secrets provider. The password is kept in
//! the secret store (see [`crate::secrets`]) and joined with the settings
//! only when a [`ServiceConfig`] is built for one invocation.
//!
//! # Locations
//!
//! Searched in order:
//! 1. An explicit path (the `--config` flag)
//! 2. `$NEXMETA_CONFIG` if set
//! 3. `$XDG_CONFIG_HOME/nexmeta/config.toml`
//! 4. `~/.nexmeta/config.toml` (canonical write location)
//!
//! A missing file is not an error; defaults are used and writes go to the
//! explicit path, or the canonical location.
//!
//! # Example
//!
//! ```no_run
//! use nexmeta::core::config::Config;
//!
//! let config = Config::load(None).unwrap();
//! let service = config.service_config("admin123");
//!
//! println!("Nexus: {}", service.base_url);
//! println!("Timeout: {:?}", config.timeout());
//! ```

pub mod schema;

pub use schema::SettingsFile;

use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::time::Duration;
use thiserror::Error;

use crate::core::types::ServiceConfig;

/// Request timeout used when none is configured.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Environment variable overriding the settings file location.
pub const CONFIG_ENV: &str = "NEXMETA_CONFIG";

/// Errors from configuration operations.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file '{path}': {source}")]
    ReadError {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to parse config file '{path}': {message}")]
    ParseError { path: PathBuf, message: String },

    #[error("failed to write config file '{path}': {source}")]
    WriteError {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("invalid config value: {0}")]
    InvalidValue(String),

    #[error(
        "unknown configuration key '{0}' (expected one of: {keys})",
        keys = SettingsFile::KEYS.join(", ")
    )]
    UnknownKey(String),

    #[error("home directory not found")]
    NoHomeDir,
}

/// Loaded configuration and where it came from.
#[derive(Debug, Clone, Default)]
pub struct Config {
    /// Parsed settings
    pub settings: SettingsFile,
    /// File the settings were read from, if any
    loaded_from: Option<PathBuf>,
    /// File writes go to
    write_path: Option<PathBuf>,
}

impl Config {
    /// Load configuration.
    ///
    /// If `explicit` is provided, only that path is considered.
    ///
    /// # Errors
    ///
    /// Returns an error if a config file exists but cannot be parsed or
    /// holds invalid values. Missing config files are not an error.
    pub fn load(explicit: Option<&Path>) -> Result<Self, ConfigError> {
        if let Some(path) = explicit {
            return Self::load_or_default(path);
        }

        // 1. Check $NEXMETA_CONFIG
        if let Ok(path) = std::env::var(CONFIG_ENV) {
            let path = PathBuf::from(path);
            if path.exists() {
                return Self::load_from(&path);
            }
        }

        // 2. Check $XDG_CONFIG_HOME/nexmeta/config.toml
        if let Ok(xdg_home) = std::env::var("XDG_CONFIG_HOME") {
            let path = PathBuf::from(xdg_home).join("nexmeta/config.toml");
            if path.exists() {
                return Self::load_from(&path);
            }
        }

        // 3. Check ~/.nexmeta/config.toml
        if let Some(home) = dirs::home_dir() {
            let path = home.join(".nexmeta/config.toml");
            if path.exists() {
                return Self::load_from(&path);
            }
        }

        Ok(Self::default())
    }

    /// Load from `path`, or start from defaults if it does not exist yet.
    ///
    /// Writes go to `path` either way.
    pub fn load_or_default(path: &Path) -> Result<Self, ConfigError> {
        if path.exists() {
            Self::load_from(path)
        } else {
            Ok(Self {
                settings: SettingsFile::default(),
                loaded_from: None,
                write_path: Some(path.to_path_buf()),
            })
        }
    }

    /// Read, parse, and validate a settings file.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        let contents = fs::read_to_string(path).map_err(|e| ConfigError::ReadError {
            path: path.to_path_buf(),
            source: e,
        })?;

        let settings: SettingsFile =
            toml::from_str(&contents).map_err(|e| ConfigError::ParseError {
                path: path.to_path_buf(),
                message: e.to_string(),
            })?;
        settings.validate()?;

        Ok(Self {
            settings,
            loaded_from: Some(path.to_path_buf()),
            write_path: Some(path.to_path_buf()),
        })
    }

    /// Get the canonical path for the settings file.
    ///
    /// Returns `~/.nexmeta/config.toml`.
    pub fn canonical_path() -> Result<PathBuf, ConfigError> {
        let home = dirs::home_dir().ok_or(ConfigError::NoHomeDir)?;
        Ok(home.join(".nexmeta/config.toml"))
    }

    /// Persist the current settings.
    ///
    /// Writes back to the file the settings came from, or to the canonical
    /// location. Returns the path written.
    pub fn save(&self) -> Result<PathBuf, ConfigError> {
        let path = match &self.write_path {
            Some(path) => path.clone(),
            None => Self::canonical_path()?,
        };
        Self::write_config_atomic(&path, &self.settings)?;
        Ok(path)
    }

    /// Write a config file atomically.
    fn write_config_atomic<T: serde::Serialize>(
        path: &Path,
        config: &T,
    ) -> Result<(), ConfigError> {
        // Ensure parent directory exists
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(|e| ConfigError::WriteError {
                path: path.to_path_buf(),
                source: e,
            })?;
        }

        let contents =
            toml::to_string_pretty(config).map_err(|e| ConfigError::InvalidValue(e.to_string()))?;

        // Write to temp file in same directory (for atomic rename)
        let temp_path = path.with_extension("toml.tmp");
        let mut file = fs::File::create(&temp_path).map_err(|e| ConfigError::WriteError {
            path: temp_path.clone(),
            source: e,
        })?;

        file.write_all(contents.as_bytes())
            .map_err(|e| ConfigError::WriteError {
                path: temp_path.clone(),
                source: e,
            })?;

        file.sync_all().map_err(|e| ConfigError::WriteError {
            path: temp_path.clone(),
            source: e,
        })?;

        fs::rename(&temp_path, path).map_err(|e| ConfigError::WriteError {
            path: path.to_path_buf(),
            source: e,
        })?;

        Ok(())
    }

    // =========================================================================
    // Accessor methods with defaults
    // =========================================================================

    /// Service base URL, empty if not configured.
    pub fn url(&self) -> &str {
        self.settings.url.as_deref().unwrap_or("")
    }

    /// User name, empty if not configured.
    pub fn user(&self) -> &str {
        self.settings.user.as_deref().unwrap_or("")
    }

    /// Per-request timeout.
    ///
    /// Defaults to [`DEFAULT_TIMEOUT`] if not configured.
    pub fn timeout(&self) -> Duration {
        self.settings
            .timeout_secs
            .map(Duration::from_secs)
            .unwrap_or(DEFAULT_TIMEOUT)
    }

    /// Get the secrets provider.
    ///
    /// Defaults to "file" if not configured.
    pub fn secrets_provider(&self) -> &str {
        self.settings.secrets_provider.as_deref().unwrap_or("file")
    }

    /// Connection settings for one invocation.
    ///
    /// Missing values stay empty; the synchronization reports them.
    pub fn service_config(&self, password: impl Into<String>) -> ServiceConfig {
        ServiceConfig::new(self.url(), self.user(), password).with_timeout(self.timeout())
    }

    /// Get the path the settings were loaded from.
    pub fn loaded_from(&self) -> Option<&Path> {
        self.loaded_from.as_deref()
    }
}
