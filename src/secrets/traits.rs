//! secrets::traits
//!
//! Secret storage trait definition.
//!
//! Keys are namespaced strings such as `nexus.password`. Implementations must
//! never log, print, or include secret values in error messages.

use std::collections::BTreeMap;
use std::sync::Mutex;

use thiserror::Error;

/// Errors from secret storage operations.
///
/// Messages name the key or the storage problem, never the value.
#[derive(Debug, Error)]
pub enum SecretError {
    /// Failed to read from secret storage.
    #[error("failed to read secret: {0}")]
    ReadError(String),

    /// Failed to write to secret storage.
    #[error("failed to write secret: {0}")]
    WriteError(String),

    /// Provider not available or not configured.
    #[error("secret provider not available: {0}")]
    ProviderNotAvailable(String),
}

/// Key/value storage for credentials.
pub trait SecretStore: Send + Sync {
    /// Get a secret by key, `Ok(None)` if absent.
    fn get(&self, key: &str) -> Result<Option<String>, SecretError>;

    /// Store a secret, replacing any previous value.
    fn set(&self, key: &str, value: &str) -> Result<(), SecretError>;

    /// Remove a secret. Removing an absent key succeeds.
    fn delete(&self, key: &str) -> Result<(), SecretError>;

    /// Check if a secret exists.
    fn exists(&self, key: &str) -> Result<bool, SecretError> {
        Ok(self.get(key)?.is_some())
    }
}

/// Process-local store, for tests and one-shot hosts.
#[derive(Debug, Default)]
pub struct MemorySecretStore {
    secrets: Mutex<BTreeMap<String, String>>,
}

impl MemorySecretStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl SecretStore for MemorySecretStore {
    fn get(&self, key: &str) -> Result<Option<String>, SecretError> {
        let secrets = self
            .secrets
            .lock()
            .map_err(|_| SecretError::ReadError("memory store poisoned".into()))?;
        Ok(secrets.get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<(), SecretError> {
        let mut secrets = self
            .secrets
            .lock()
            .map_err(|_| SecretError::WriteError("memory store poisoned".into()))?;
        secrets.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn delete(&self, key: &str) -> Result<(), SecretError> {
        let mut secrets = self
            .secrets
            .lock()
            .map_err(|_| SecretError::WriteError("memory store poisoned".into()))?;
        secrets.remove(key);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_display_formatting() {
        let err = SecretError::ReadError("disk full".into());
        assert!(err.to_string().contains("read"));

        let err = SecretError::WriteError("permission denied".into());
        assert!(err.to_string().contains("write"));

        let err = SecretError::ProviderNotAvailable("keychain".into());
        assert!(err.to_string().contains("provider"));
    }

    #[test]
    fn memory_store_roundtrip() {
        let store = MemorySecretStore::new();
        assert!(!store.exists("nexus.password").unwrap());

        store.set("nexus.password", "admin123").unwrap();
        assert_eq!(
            store.get("nexus.password").unwrap().as_deref(),
            Some("admin123")
        );

        store.delete("nexus.password").unwrap();
        store.delete("nexus.password").unwrap();
        assert!(store.get("nexus.password").unwrap().is_none());
    }
}
