//! Secure credential storage seam.
//!
//! API keys and usernames live in the configuration; secrets, passphrases and
//! passwords belong in a secure store (an OS keyring, a vault, ...). This
//! module defines the interface the rest of the toolkit talks to and an
//! in-memory implementation for tests and programmatic injection.

use crate::config::ConfigStore;
use std::collections::HashMap;
use std::sync::Mutex;
use thiserror::Error;

/// Service name used for plain configuration keys.
pub const DEFAULT_SERVICE: &str = "stocklook";

#[derive(Error, Debug)]
pub enum CredentialError {
    #[error("Credential backend unavailable: {0}")]
    Unavailable(String),

    #[error("Credential backend rejected {service}/{username}: {reason}")]
    Rejected { service: String, username: String, reason: String },
}

pub trait CredentialStore {
    fn get_secret(&self, service: &str, username: &str) -> Result<Option<String>, CredentialError>;

    fn set_secret(&self, service: &str, username: &str, secret: &str) -> Result<(), CredentialError>;
}

#[derive(Debug, Default)]
pub struct MemoryCredentialStore {
    secrets: Mutex<HashMap<(String, String), String>>,
}

impl MemoryCredentialStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl CredentialStore for MemoryCredentialStore {
    fn get_secret(&self, service: &str, username: &str) -> Result<Option<String>, CredentialError> {
        let secrets = self
            .secrets
            .lock()
            .map_err(|_| CredentialError::Unavailable("memory store lock poisoned".to_string()))?;
        Ok(secrets.get(&(service.to_string(), username.to_string())).cloned())
    }

    fn set_secret(&self, service: &str, username: &str, secret: &str) -> Result<(), CredentialError> {
        if username.is_empty() {
            return Err(CredentialError::Rejected {
                service: service.to_string(),
                username: String::new(),
                reason: "empty username".to_string(),
            });
        }
        let mut secrets = self
            .secrets
            .lock()
            .map_err(|_| CredentialError::Unavailable("memory store lock poisoned".to_string()))?;
        secrets.insert((service.to_string(), username.to_string()), secret.to_string());
        Ok(())
    }
}

/// Resolves credentials: a non-empty configuration value wins, otherwise the
/// secure store is asked under [`DEFAULT_SERVICE`] with the key as username.
pub struct Credentials<'a> {
    config: &'a ConfigStore,
    store: &'a dyn CredentialStore,
}

impl<'a> Credentials<'a> {
    pub fn new(config: &'a ConfigStore, store: &'a dyn CredentialStore) -> Self {
        Self { config, store }
    }

    pub fn get(&self, key: &str) -> Result<Option<String>, CredentialError> {
        if let Some(value) = self.config.credential(key) {
            return Ok(Some(value.to_string()));
        }
        let secret = self.store.get_secret(DEFAULT_SERVICE, key)?;
        if secret.is_none() {
            tracing::debug!("No value for {} in configuration or credential store", key);
        }
        Ok(secret)
    }

    /// Persist `secret` for `key` in the secure store.
    pub fn store_secret(&self, key: &str, secret: &str) -> Result<(), CredentialError> {
        self.store.set_secret(DEFAULT_SERVICE, key, secret)
    }
}
