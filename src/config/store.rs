//! The configuration store.

use super::database::DatabaseUrl;
use super::keys::{self, KeyKind, KNOWN_KEYS};
use super::provision::provision_directories;
use super::value::{ConfigValue, NULL};
use crate::credentials::{CredentialError, CredentialStore};
use crate::logging;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use tracing::level_filters::LevelFilter;

pub const DEFAULT_LOG_LEVEL_NAME: &str = "DEBUG";
pub const DEFAULT_PYTZ_TIMEZONE: &str = "US/Pacific";

/// `data/` beside the install prefix of the running executable, resolved at
/// runtime: `<prefix>/bin/stocklook-config` gives `<prefix>/data`. Falls back
/// to `./data` when the executable path is unavailable.
pub fn default_data_directory() -> PathBuf {
    std::env::current_exe()
        .ok()
        .and_then(|exe| exe.parent().and_then(Path::parent).map(Path::to_path_buf))
        .unwrap_or_else(|| PathBuf::from("."))
        .join("data")
}

/// What a merge did to the process.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MergeOutcome {
    /// Level the logging subsystem was set to.
    pub log_level: LevelFilter,
    /// Directory entries that exist on disk after provisioning.
    pub directories: Vec<PathBuf>,
}

/// Flat key/value configuration built once at startup and handed to whoever
/// needs credentials, the database descriptor or the data directory.
///
/// Entries are only ever added or overwritten, through [`ConfigStore::merge`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigStore {
    entries: BTreeMap<String, ConfigValue>,
}

impl Default for ConfigStore {
    /// Static defaults with every credential null.
    fn default() -> Self {
        Self::from_lookup(|_| None)
    }
}

impl ConfigStore {
    /// Seed the store from the process environment. Values that are not
    /// valid UTF-8 are kept with the invalid bytes replaced.
    pub fn from_env() -> Self {
        Self::from_lookup(|var| {
            let raw = std::env::var_os(var)?;
            if raw.to_str().is_none() {
                tracing::debug!("{} is not valid UTF-8, replacing invalid bytes", var);
            }
            Some(raw.to_string_lossy().into_owned())
        })
    }

    /// Seed the store from an arbitrary variable lookup. Unset variables
    /// become null; nothing here touches the filesystem.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut entries = BTreeMap::new();

        for spec in KNOWN_KEYS {
            let value = match spec.kind {
                KeyKind::Credential | KeyKind::Secret => {
                    ConfigValue::from(spec.env_var.and_then(&lookup))
                }
                KeyKind::Composite => DatabaseUrl::default().to_value(),
                KeyKind::Setting => match spec.key {
                    keys::DATA_DIRECTORY => {
                        let from_env = spec.env_var.and_then(&lookup);
                        ConfigValue::from(from_env.unwrap_or_else(|| {
                            default_data_directory().to_string_lossy().into_owned()
                        }))
                    }
                    keys::LOG_LEVEL => ConfigValue::from(DEFAULT_LOG_LEVEL_NAME),
                    keys::PYTZ_TIMEZONE => ConfigValue::from(DEFAULT_PYTZ_TIMEZONE),
                    _ => ConfigValue::Null,
                },
            };
            entries.insert(spec.key.to_string(), value);
        }

        Self { entries }
    }

    /// Current value of `key`, null when it was never set.
    pub fn get(&self, key: &str) -> &ConfigValue {
        self.entries.get(key).unwrap_or(&NULL)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &ConfigValue)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn entries(&self) -> &BTreeMap<String, ConfigValue> {
        &self.entries
    }

    /// Merge caller values over the current ones (last writer wins), then
    /// apply the resulting log level and provision `*DIRECTORY` entries.
    ///
    /// Never fails: directory creation is best effort.
    pub fn merge<I, K, V>(&mut self, overrides: I) -> MergeOutcome
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<ConfigValue>,
    {
        for (key, value) in overrides {
            self.entries.insert(key.into(), value.into());
        }

        let log_level = logging::resolve_level(self.entries.get(keys::LOG_LEVEL));
        logging::apply_level(log_level);

        // Attempt and ignore: failures are logged inside and never surface here.
        let directories = provision_directories(&self.entries);

        tracing::debug!(
            "Configuration merged: {} entries, log level {}, {} directories ready",
            self.entries.len(),
            log_level,
            directories.len()
        );

        MergeOutcome { log_level, directories }
    }

    pub fn log_level(&self) -> LevelFilter {
        logging::resolve_level(self.entries.get(keys::LOG_LEVEL))
    }

    pub fn timezone(&self) -> Option<&str> {
        self.get(keys::PYTZ_TIMEZONE).as_str()
    }

    pub fn data_directory(&self) -> Option<PathBuf> {
        self.get(keys::DATA_DIRECTORY).as_str().map(PathBuf::from)
    }

    /// String value of a credential; null and empty values read as `None`.
    pub fn credential(&self, key: &str) -> Option<&str> {
        self.get(key).as_str().filter(|s| !s.is_empty())
    }

    pub fn database(&self) -> DatabaseUrl {
        DatabaseUrl::from_value(self.get(keys::GDAX_FEED_URL_KWARGS))
    }

    /// The database descriptor with its password filled from `store` when the
    /// configuration does not carry one. Looked up under service
    /// `GDAX_FEED_URL_KWARGS` and the configured username.
    pub fn database_with_password(
        &self,
        store: &dyn CredentialStore,
    ) -> Result<DatabaseUrl, CredentialError> {
        let mut db = self.database();
        if db.password.is_none() {
            if let Some(username) = db.username.as_deref() {
                db.password = store.get_secret(keys::GDAX_FEED_URL_KWARGS, username)?;
            }
        }
        Ok(db)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::keys::{credential_keys, DATA_DIRECTORY, GDAX_KEY, GMAIL_EMAIL, LOG_LEVEL};
    use crate::credentials::MemoryCredentialStore;
    use std::collections::HashMap;
    use std::fs;
    use tempfile::TempDir;

    fn store_with(vars: &[(&str, &str)]) -> ConfigStore {
        let env: HashMap<String, String> =
            vars.iter().map(|(k, v)| (k.to_string(), v.to_string())).collect();
        ConfigStore::from_lookup(|var| env.get(var).cloned())
    }

    /// Keeps merges in tests from provisioning the default data dir.
    fn with_tmp_data_dir(store: &mut ConfigStore, tmp: &TempDir) -> MergeOutcome {
        store.merge([(DATA_DIRECTORY, tmp.path().join("data").to_string_lossy().into_owned())])
    }

    #[test]
    fn every_known_key_is_present() {
        let store = ConfigStore::default();
        for spec in KNOWN_KEYS {
            assert!(store.contains_key(spec.key), "missing {}", spec.key);
        }
        assert_eq!(store.len(), KNOWN_KEYS.len());
    }

    #[test]
    fn credentials_are_null_without_environment() {
        let store = ConfigStore::default();
        for spec in credential_keys() {
            assert!(store.get(spec.key).is_null(), "{} should be null", spec.key);
        }
    }

    #[test]
    fn credentials_come_from_environment() {
        let vars: Vec<(&str, &str)> =
            credential_keys().filter_map(|s| s.env_var).map(|var| (var, "value-from-env")).collect();
        let store = store_with(&vars);
        for spec in credential_keys() {
            assert_eq!(store.get(spec.key).as_str(), Some("value-from-env"), "{}", spec.key);
        }
    }

    #[test]
    fn gmail_mirrors_stocklook_email() {
        let store = store_with(&[("STOCKLOOK_EMAIL", "me@example.com"), ("GMAIL_EMAIL", "ignored")]);
        assert_eq!(store.get(GMAIL_EMAIL).as_str(), Some("me@example.com"));
    }

    #[test]
    fn static_defaults() {
        let store = ConfigStore::default();
        assert_eq!(store.get(LOG_LEVEL).as_str(), Some("DEBUG"));
        assert_eq!(store.log_level(), LevelFilter::DEBUG);
        assert_eq!(store.timezone(), Some("US/Pacific"));
        assert_eq!(store.data_directory(), Some(default_data_directory()));
    }

    #[test]
    fn default_data_directory_follows_the_executable() {
        let exe = std::env::current_exe().expect("exe");
        let prefix = exe.parent().and_then(Path::parent).expect("prefix");
        assert_eq!(default_data_directory(), prefix.join("data"));
    }

    #[test]
    fn data_directory_env_override() {
        let store = store_with(&[("DATA_DIRECTORY", "/srv/stocklook")]);
        assert_eq!(store.data_directory(), Some(PathBuf::from("/srv/stocklook")));
    }

    #[test]
    fn initialization_does_not_touch_filesystem() {
        let tmp = TempDir::new().expect("tmp");
        let target = tmp.path().join("later");
        let _store = store_with(&[("DATA_DIRECTORY", target.to_str().expect("utf8"))]);
        assert!(!target.exists());
    }

    #[test]
    fn missing_key_reads_null() {
        assert!(ConfigStore::default().get("NOT_A_KEY").is_null());
    }

    #[test]
    fn merge_overrides_and_keeps_the_rest() {
        let tmp = TempDir::new().expect("tmp");
        let mut store = store_with(&[("GDAX_KEY", "env-key"), ("POLONIEX_KEY", "polo")]);
        with_tmp_data_dir(&mut store, &tmp);
        let before = store.clone();

        store.merge([(GDAX_KEY, ConfigValue::from("override")), ("EXTRA", ConfigValue::Integer(7))]);

        assert_eq!(store.get(GDAX_KEY).as_str(), Some("override"));
        assert_eq!(store.get("EXTRA").as_integer(), Some(7));
        for (key, value) in before.iter().filter(|(k, _)| *k != GDAX_KEY) {
            assert_eq!(store.get(key), value, "{key} changed");
        }
    }

    #[test]
    fn merge_reports_log_level() {
        let tmp = TempDir::new().expect("tmp");
        let mut store = ConfigStore::default();
        with_tmp_data_dir(&mut store, &tmp);

        let outcome = store.merge([(LOG_LEVEL, "warning")]);
        assert_eq!(outcome.log_level, LevelFilter::WARN);

        let outcome = store.merge([(LOG_LEVEL, ConfigValue::Null)]);
        assert_eq!(outcome.log_level, LevelFilter::DEBUG);
    }

    #[test]
    fn merge_provisions_directories() {
        let tmp = TempDir::new().expect("tmp");
        let data = tmp.path().join("nested").join("data");
        let cache = tmp.path().join("cache");
        let mut store = ConfigStore::default();

        let outcome = store.merge([
            (DATA_DIRECTORY, data.to_string_lossy().into_owned()),
            ("CACHE_DIRECTORY", cache.to_string_lossy().into_owned()),
        ]);

        assert!(data.is_dir());
        assert!(cache.is_dir());
        assert_eq!(outcome.directories.len(), 2);
    }

    #[test]
    fn merge_survives_uncreatable_directory() {
        let tmp = TempDir::new().expect("tmp");
        let blocker = tmp.path().join("file");
        fs::write(&blocker, "not a dir").expect("write");
        let impossible = blocker.join("data");
        let mut store = ConfigStore::default();

        let outcome = store.merge([(DATA_DIRECTORY, impossible.to_string_lossy().into_owned())]);

        assert!(!impossible.exists());
        assert!(outcome.directories.is_empty());
        assert_eq!(store.data_directory(), Some(impossible));
    }

    #[test]
    fn database_defaults() {
        let db = ConfigStore::default().database();
        assert_eq!(db, DatabaseUrl::default());
        assert!(db.password.is_none());
        assert_eq!(db.host.as_deref(), Some("localhost"));
        assert_eq!(db.username.as_deref(), Some("gdaxer"));
        assert_eq!(db.database.as_deref(), Some("gdax"));
    }

    #[test]
    fn database_password_from_credential_store() {
        let store = ConfigStore::default();
        let secrets = MemoryCredentialStore::new();
        secrets.set_secret("GDAX_FEED_URL_KWARGS", "gdaxer", "s3cret").expect("set");

        let db = store.database_with_password(&secrets).expect("db");
        assert_eq!(db.password.as_deref(), Some("s3cret"));
    }

    #[test]
    fn configured_password_wins_over_credential_store() {
        let tmp = TempDir::new().expect("tmp");
        let mut store = ConfigStore::default();
        with_tmp_data_dir(&mut store, &tmp);
        let mut db = store.database();
        db.password = Some("inline".to_string());
        store.merge([(keys::GDAX_FEED_URL_KWARGS, db.to_value())]);

        let secrets = MemoryCredentialStore::new();
        secrets.set_secret("GDAX_FEED_URL_KWARGS", "gdaxer", "stored").expect("set");
        let resolved = store.database_with_password(&secrets).expect("db");
        assert_eq!(resolved.password.as_deref(), Some("inline"));
    }
}
