//! stocklook-config: process configuration for the stocklook toolkit
//!
//! Credentials, API keys and defaults are collected into a single
//! [`ConfigStore`] at startup. Callers merge their own values over it, which
//! also sets the log level and creates any configured data directories.

pub mod config;
pub mod credentials;
pub mod logging;
pub mod redact;

pub use config::{ConfigError, ConfigStore, ConfigValue, DatabaseUrl, MergeOutcome};
pub use credentials::{CredentialStore, Credentials, MemoryCredentialStore};
