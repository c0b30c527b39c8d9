//! core::config::schema
//!
//! Configuration schema types.
//!
//! # Settings File
//!
//! Located at (in order of precedence):
//! 1. `$NEXMETA_CONFIG` if set
//! 2. `$XDG_CONFIG_HOME/nexmeta/config.toml`
//! 3. `~/.nexmeta/config.toml` (canonical write location)
//!
//! # Validation
//!
//! Config values are validated after parsing: the URL must be an absolute
//! http(s) URL, the timeout must be positive, and the secrets provider must
//! be a known one.

use serde::{Deserialize, Serialize};

use super::ConfigError;
use crate::service::nexus::parse_base_url;

/// Settings persisted between invocations.
///
/// The password is deliberately absent; it lives in the secret store.
///
/// # Example
///
/// ```toml
/// url = "http://nexus.example.com:8081/nexus"
/// user = "deployment"
/// timeout_secs = 30
/// secrets_provider = "file"
/// ```
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default, deny_unknown_fields)]
pub struct SettingsFile {
    /// Base URL of the Nexus instance, including any context path
    pub url: Option<String>,

    /// User name for HTTP Basic authentication
    pub user: Option<String>,

    /// Per-request timeout in seconds
    pub timeout_secs: Option<u64>,

    /// Secret storage provider ("file" or "keychain")
    pub secrets_provider: Option<String>,
}

impl SettingsFile {
    /// Keys accepted by [`get`](Self::get) and [`set`](Self::set), in display order.
    pub const KEYS: &'static [&'static str] = &["url", "user", "timeout_secs", "secrets_provider"];

    /// Valid secret providers.
    pub const VALID_PROVIDERS: &'static [&'static str] = &["file", "keychain"];

    /// Validate the configuration values.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidValue` if any value is invalid.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if let Some(url) = &self.url {
            parse_base_url(url).map_err(|e| ConfigError::InvalidValue(e.to_string()))?;
        }

        if self.timeout_secs == Some(0) {
            return Err(ConfigError::InvalidValue(
                "timeout_secs must be greater than zero".to_string(),
            ));
        }

        if let Some(provider) = &self.secrets_provider {
            if !Self::VALID_PROVIDERS.contains(&provider.as_str()) {
                return Err(ConfigError::InvalidValue(format!(
                    "invalid secrets provider '{}', must be one of: {}",
                    provider,
                    Self::VALID_PROVIDERS.join(", ")
                )));
            }
        }

        Ok(())
    }

    /// Get a value by key, as text.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::UnknownKey` for keys not in [`KEYS`](Self::KEYS).
    pub fn get(&self, key: &str) -> Result<Option<String>, ConfigError> {
        match key {
            "url" => Ok(self.url.clone()),
            "user" => Ok(self.user.clone()),
            "timeout_secs" => Ok(self.timeout_secs.map(|t| t.to_string())),
            "secrets_provider" => Ok(self.secrets_provider.clone()),
            _ => Err(ConfigError::UnknownKey(key.to_string())),
        }
    }

    /// Set a value by key from text.
    ///
    /// The updated settings are validated; on error `self` is unchanged.
    pub fn set(&mut self, key: &str, value: &str) -> Result<(), ConfigError> {
        let mut updated = self.clone();
        match key {
            "url" => updated.url = Some(value.trim().to_string()),
            "user" => updated.user = Some(value.to_string()),
            "timeout_secs" => {
                let secs = value.trim().parse::<u64>().map_err(|_| {
                    ConfigError::InvalidValue(format!(
                        "timeout_secs must be a whole number of seconds, got '{}'",
                        value
                    ))
                })?;
                updated.timeout_secs = Some(secs);
            }
            "secrets_provider" => updated.secrets_provider = Some(value.to_string()),
            _ => return Err(ConfigError::UnknownKey(key.to_string())),
        }
        updated.validate()?;
        *self = updated;
        Ok(())
    }
}
