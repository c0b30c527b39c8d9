//! secrets::keychain_store
//!
//! OS keychain storage through the `keyring` crate (macOS Keychain, Windows
//! Credential Manager, Linux Secret Service). Only compiled with the
//! `keychain` feature.

use keyring::Entry;

use super::traits::{SecretError, SecretStore};

/// Keychain service name entries are filed under.
pub const KEYCHAIN_SERVICE: &str = "nexmeta";

/// Keychain-based secret storage.
#[derive(Debug)]
pub struct KeychainSecretStore {
    service: String,
}

impl KeychainSecretStore {
    pub fn new() -> Self {
        Self::with_service(KEYCHAIN_SERVICE)
    }

    /// Use a different service name, e.g. to isolate tests.
    pub fn with_service(service: impl Into<String>) -> Self {
        Self {
            service: service.into(),
        }
    }

    pub fn service(&self) -> &str {
        &self.service
    }

    fn entry(&self, key: &str) -> Result<Entry, SecretError> {
        Entry::new(&self.service, key)
            .map_err(|e| SecretError::ReadError(format!("cannot create keyring entry: {}", e)))
    }
}

impl Default for KeychainSecretStore {
    fn default() -> Self {
        Self::new()
    }
}

impl SecretStore for KeychainSecretStore {
    fn get(&self, key: &str) -> Result<Option<String>, SecretError> {
        match self.entry(key)?.get_password() {
            Ok(password) => Ok(Some(password)),
            Err(keyring::Error::NoEntry) => Ok(None),
            Err(e) => Err(SecretError::ReadError(format!(
                "cannot read '{}' from keychain: {}",
                key, e
            ))),
        }
    }

    fn set(&self, key: &str, value: &str) -> Result<(), SecretError> {
        self.entry(key)?
            .set_password(value)
            .map_err(|e| SecretError::WriteError(format!("cannot write to keychain: {}", e)))
    }

    fn delete(&self, key: &str) -> Result<(), SecretError> {
        match self.entry(key)?.delete_credential() {
            Ok(()) | Err(keyring::Error::NoEntry) => Ok(()),
            Err(e) => Err(SecretError::WriteError(format!(
                "cannot delete from keychain: {}",
                e
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_service_name() {
        assert_eq!(KeychainSecretStore::new().service(), "nexmeta");
        assert_eq!(KeychainSecretStore::with_service("t").service(), "t");
    }
}
