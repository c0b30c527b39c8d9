//! secrets
//!
//! Storage for the Nexus password.
//!
//! # Architecture
//!
//! Secrets go through the [`SecretStore`] trait:
//!
//! - [`FileSecretStore`]: `~/.nexmeta/secrets.toml` (default)
//! - `KeychainSecretStore`: OS keychain (feature `keychain`)
//! - [`MemorySecretStore`]: in-process only
//!
//! The password is never logged or included in error messages. The
//! `NEXMETA_PASSWORD` environment variable overrides the stored value, so
//! CI hosts need no secrets file at all.

mod file_store;
#[cfg(feature = "keychain")]
mod keychain_store;
mod traits;

pub use file_store::FileSecretStore;
#[cfg(feature = "keychain")]
pub use keychain_store::KeychainSecretStore;
pub use traits::{MemorySecretStore, SecretError, SecretStore};

/// Key the service password is stored under.
pub const PASSWORD_KEY: &str = "nexus.password";

/// Environment variable overriding the stored password.
pub const PASSWORD_ENV: &str = "NEXMETA_PASSWORD";

/// The default secret store provider name.
pub const DEFAULT_PROVIDER: &str = "file";

/// Create a secret store based on the provider name.
///
/// # Errors
///
/// - Unknown provider name
/// - `"keychain"` without the `keychain` feature
/// - Initialization errors from the store
pub fn create_store(provider: &str) -> Result<Box<dyn SecretStore>, SecretError> {
    match provider {
        "file" => Ok(Box::new(FileSecretStore::new()?)),
        #[cfg(feature = "keychain")]
        "keychain" => Ok(Box::new(KeychainSecretStore::new())),
        #[cfg(not(feature = "keychain"))]
        "keychain" => Err(SecretError::ProviderNotAvailable(
            "keychain support not enabled (compile with --features keychain)".into(),
        )),
        other => Err(SecretError::ProviderNotAvailable(format!(
            "unknown secret provider: '{}' (valid: file, keychain)",
            other
        ))),
    }
}

/// Where a resolved password came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PasswordSource {
    Environment,
    Store,
    Missing,
}

/// Resolve the service password.
///
/// A non-empty `env_override` wins over the store. A missing password
/// resolves to an empty string; the synchronization reports it as missing
/// configuration.
pub fn resolve_password(
    store: &dyn SecretStore,
    env_override: Option<String>,
) -> Result<(String, PasswordSource), SecretError> {
    if let Some(password) = env_override.filter(|p| !p.is_empty()) {
        return Ok((password, PasswordSource::Environment));
    }
    match store.get(PASSWORD_KEY)? {
        Some(password) if !password.is_empty() => Ok((password, PasswordSource::Store)),
        _ => Ok((String::new(), PasswordSource::Missing)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn create_unknown_provider() {
        match create_store("vault") {
            Err(SecretError::ProviderNotAvailable(msg)) => assert!(msg.contains("unknown")),
            Err(e) => panic!("unexpected error type: {:?}", e),
            Ok(_) => panic!("expected error"),
        }
    }

    #[cfg(not(feature = "keychain"))]
    #[test]
    fn create_keychain_without_feature() {
        let err = create_store("keychain").err().expect("expected error");
        assert!(err.to_string().contains("not enabled"));
    }

    #[test]
    fn environment_overrides_store() {
        let store = MemorySecretStore::new();
        store.set(PASSWORD_KEY, "stored").unwrap();

        let (password, source) = resolve_password(&store, Some("from-env".into())).unwrap();
        assert_eq!(password, "from-env");
        assert_eq!(source, PasswordSource::Environment);
    }

    #[test]
    fn empty_environment_falls_back_to_store() {
        let store = MemorySecretStore::new();
        store.set(PASSWORD_KEY, "stored").unwrap();

        let (password, source) = resolve_password(&store, Some(String::new())).unwrap();
        assert_eq!(password, "stored");
        assert_eq!(source, PasswordSource::Store);
    }

    #[test]
    fn missing_password_is_empty() {
        let store = MemorySecretStore::new();
        let (password, source) = resolve_password(&store, None).unwrap();
        assert!(password.is_empty());
        assert_eq!(source, PasswordSource::Missing);
    }
}
