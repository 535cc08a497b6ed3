//! Shared CLI utilities.

use anyhow::{bail, Context, Result};
use clap::Args;
use std::path::PathBuf;
use stocklook_config::config::keys::LOG_LEVEL;
use stocklook_config::config::{load_overrides, ConfigStore, ConfigValue};
use stocklook_config::logging;
use tracing::level_filters::LevelFilter;

/// Where overrides come from, shared by `show` and `get`.
#[derive(Args)]
pub struct SourceArgs {
    /// Override file (TOML or YAML). Defaults to stocklook.{toml,yaml,yml} in the current directory
    #[arg(short, long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Override a single entry; repeatable. VALUE parses as integer, `null`, or string.
    /// LOG_LEVEL values are checked like --log-level
    #[arg(short, long = "set", value_name = "KEY=VALUE")]
    pub set: Vec<String>,
}

/// Parse a `KEY=VALUE` assignment.
pub fn parse_assignment(raw: &str) -> Result<(String, ConfigValue)> {
    let Some((key, value)) = raw.split_once('=') else {
        bail!("Invalid override '{}': expected KEY=VALUE", raw);
    };
    let key = key.trim();
    if key.is_empty() {
        bail!("Invalid override '{}': empty key", raw);
    }
    Ok((key.to_string(), ConfigValue::parse_literal(value)))
}

pub fn parse_log_level(raw: &str) -> Result<LevelFilter> {
    match logging::parse_level(&ConfigValue::parse_literal(raw)) {
        Some(level) => Ok(level),
        None => bail!("Invalid log level '{}'", raw),
    }
}

/// Reject a `LOG_LEVEL` override the logger cannot apply. Null is allowed
/// and selects the default level.
pub fn validate_log_level(value: &ConfigValue) -> Result<()> {
    if value.is_null() || logging::parse_level(value).is_some() {
        return Ok(());
    }
    bail!("Invalid log level '{}'", value)
}

/// Environment, then override file, then `--set` pairs, then `--log-level`.
pub fn build_store(sources: &SourceArgs, log_level: Option<&str>) -> Result<ConfigStore> {
    let mut store = ConfigStore::from_env();

    let cwd = std::env::current_dir().context("Failed to resolve current directory")?;
    let mut overrides =
        load_overrides(&cwd, sources.config.as_deref()).context("Failed to load override file")?;

    for raw in &sources.set {
        let (key, value) = parse_assignment(raw)?;
        overrides.insert(key, value);
    }
    if let Some(level) = log_level {
        overrides.insert(LOG_LEVEL.to_string(), ConfigValue::parse_literal(level));
    }
    if let Some(level) = overrides.get(LOG_LEVEL) {
        validate_log_level(level)?;
    }

    store.merge(overrides);
    Ok(store)
}
