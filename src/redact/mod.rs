//! Secret masking for display

use crate::config::keys::is_secret_key;
use crate::config::{ConfigStore, ConfigValue};
use std::collections::BTreeMap;

pub const REDACTED: &str = "[REDACTED_SECRET]";

/// Mask `value` if `key` names a secret. Nested maps are walked so the
/// database `password` field is masked too. Nulls stay null so it remains
/// visible which secrets are missing.
pub fn redact_value(key: &str, value: &ConfigValue) -> ConfigValue {
    match value {
        ConfigValue::Null => ConfigValue::Null,
        ConfigValue::Map(map) => ConfigValue::Map(
            map.iter().map(|(k, v)| (k.clone(), redact_value(k, v))).collect(),
        ),
        _ if is_secret_key(key) => ConfigValue::from(REDACTED),
        other => other.clone(),
    }
}

/// All entries of `store`, with secrets masked.
pub fn redacted_entries(store: &ConfigStore) -> BTreeMap<String, ConfigValue> {
    store.iter().map(|(k, v)| (k.to_string(), redact_value(k, v))).collect()
}
