//! Enumerated configuration keys and the environment variables that seed them.

/// Suffix marking a directory-valued key. Merge provisions every such entry.
pub const DIRECTORY_SUFFIX: &str = "DIRECTORY";

pub const COINBASE_KEY: &str = "COINBASE_KEY";
pub const COINBASE_SECRET: &str = "COINBASE_SECRET";
pub const DATA_DIRECTORY: &str = "DATA_DIRECTORY";
pub const GDAX_KEY: &str = "GDAX_KEY";
pub const GDAX_PASSPHRASE: &str = "GDAX_PASSPHRASE";
pub const GDAX_SECRET: &str = "GDAX_SECRET";
/// Same address as [`STOCKLOOK_EMAIL`]; both are read from `STOCKLOOK_EMAIL`.
pub const GMAIL_EMAIL: &str = "GMAIL_EMAIL";
/// Not read from the environment.
pub const LOG_LEVEL: &str = "LOG_LEVEL";
pub const POLONIEX_KEY: &str = "POLONIEX_KEY";
pub const POLONIEX_SECRET: &str = "POLONIEX_SECRET";
/// Not read from the environment.
pub const PYTZ_TIMEZONE: &str = "PYTZ_TIMEZONE";
pub const STOCKLOOK_EMAIL: &str = "STOCKLOOK_EMAIL";
pub const STOCKLOOK_NOTIFY_ADDRESS: &str = "STOCKLOOK_NOTIFY_ADDRESS";
pub const TWITTER_APP_KEY: &str = "STOCKLOOK_TWITTER_APP_KEY";
pub const TWITTER_APP_SECRET: &str = "STOCKLOOK_TWITTER_APP_SECRET";
pub const TWITTER_CLIENT_KEY: &str = "STOCKLOOK_TWITTER_CLIENT_KEY";
pub const TWITTER_CLIENT_SECRET: &str = "STOCKLOOK_TWITTER_CLIENT_SECRET";
/// Composite entry describing the feed database connection.
pub const GDAX_FEED_URL_KWARGS: &str = "GDAX_FEED_URL_KWARGS";

/// How a key gets its initial value and how it is displayed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyKind {
    /// Identifier such as an API key or e-mail address, read from the environment.
    Credential,
    /// API secret or passphrase, read from the environment and masked on display.
    Secret,
    /// Static default, optionally overridden from the environment.
    Setting,
    /// Nested mapping built from static defaults.
    Composite,
}

#[derive(Debug, Clone, Copy)]
pub struct KeySpec {
    pub key: &'static str,
    pub env_var: Option<&'static str>,
    pub kind: KeyKind,
}

const fn credential(key: &'static str, env_var: &'static str) -> KeySpec {
    KeySpec { key, env_var: Some(env_var), kind: KeyKind::Credential }
}

const fn secret(key: &'static str) -> KeySpec {
    KeySpec { key, env_var: Some(key), kind: KeyKind::Secret }
}

/// Every key present in a freshly initialized store, in key order.
pub const KNOWN_KEYS: &[KeySpec] = &[
    credential(COINBASE_KEY, COINBASE_KEY),
    secret(COINBASE_SECRET),
    KeySpec { key: DATA_DIRECTORY, env_var: Some(DATA_DIRECTORY), kind: KeyKind::Setting },
    KeySpec { key: GDAX_FEED_URL_KWARGS, env_var: None, kind: KeyKind::Composite },
    credential(GDAX_KEY, GDAX_KEY),
    secret(GDAX_PASSPHRASE),
    secret(GDAX_SECRET),
    credential(GMAIL_EMAIL, STOCKLOOK_EMAIL),
    KeySpec { key: LOG_LEVEL, env_var: None, kind: KeyKind::Setting },
    credential(POLONIEX_KEY, POLONIEX_KEY),
    secret(POLONIEX_SECRET),
    KeySpec { key: PYTZ_TIMEZONE, env_var: None, kind: KeyKind::Setting },
    credential(STOCKLOOK_EMAIL, STOCKLOOK_EMAIL),
    credential(STOCKLOOK_NOTIFY_ADDRESS, STOCKLOOK_NOTIFY_ADDRESS),
    credential(TWITTER_APP_KEY, TWITTER_APP_KEY),
    secret(TWITTER_APP_SECRET),
    credential(TWITTER_CLIENT_KEY, TWITTER_CLIENT_KEY),
    secret(TWITTER_CLIENT_SECRET),
];

pub fn spec_for(key: &str) -> Option<&'static KeySpec> {
    KNOWN_KEYS.iter().find(|spec| spec.key == key)
}

/// Keys whose values come from the environment with a null fallback.
pub fn credential_keys() -> impl Iterator<Item = &'static KeySpec> {
    KNOWN_KEYS.iter().filter(|spec| matches!(spec.kind, KeyKind::Credential | KeyKind::Secret))
}

pub fn is_directory_key(key: &str) -> bool {
    key.ends_with(DIRECTORY_SUFFIX)
}

/// Secrets are masked when displayed. Unknown keys are judged by name so that
/// injected entries like `KRAKEN_SECRET` are masked too.
pub fn is_secret_key(key: &str) -> bool {
    match spec_for(key) {
        Some(spec) => spec.kind == KeyKind::Secret,
        None => {
            let upper = key.to_ascii_uppercase();
            ["SECRET", "PASSPHRASE", "PASSWORD", "TOKEN"].iter().any(|m| upper.contains(m))
        }
    }
}
