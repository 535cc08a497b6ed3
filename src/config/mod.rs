//! Configuration store, keys and override loading
//!
//! A [`ConfigStore`] is seeded from the environment and static defaults, then
//! grows through [`ConfigStore::merge`] (overrides from code, files or the CLI).

pub mod database;
pub mod error;
pub mod keys;
pub mod loader;
pub mod provision;
pub mod store;
pub mod value;

pub use database::DatabaseUrl;
pub use error::ConfigError;
pub use loader::{load_overrides, Overrides};
pub use store::{ConfigStore, MergeOutcome};
pub use value::ConfigValue;
