//! Override file loading

use super::error::{ConfigError, Result};
use super::value::ConfigValue;
use figment::providers::{Format, Toml, Yaml};
use figment::Figment;
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

pub type Overrides = BTreeMap<String, ConfigValue>;

/// Optional table that scopes the overrides when the file is shared with
/// other tools.
pub const SECTION: &str = "stocklook";

const CANDIDATES: [&str; 6] = [
    "stocklook.toml",
    ".stocklook.toml",
    "stocklook.yaml",
    ".stocklook.yaml",
    "stocklook.yml",
    ".stocklook.yml",
];

/// Load overrides from `config_path`, or from the first candidate file found
/// in `search_root`.
///
/// Errors in an explicitly named file are returned. An auto-discovered file
/// that fails to parse is logged and treated as empty.
pub fn load_overrides(search_root: &Path, config_path: Option<&Path>) -> Result<Overrides> {
    let explicit = config_path.is_some();

    let discovered = match config_path {
        Some(path) => Some(path.to_path_buf()),
        None => discover_config(search_root),
    };

    let Some(config_file) = discovered else {
        return Ok(Overrides::new());
    };

    match read_overrides(&config_file) {
        Ok(overrides) => {
            tracing::debug!("Loaded {} overrides from {}", overrides.len(), config_file.display());
            Ok(overrides)
        }
        Err(e) if explicit => Err(e),
        Err(e) => {
            tracing::warn!("Ignoring auto-discovered config {}: {}", config_file.display(), e);
            Ok(Overrides::new())
        }
    }
}

fn read_overrides(config_file: &Path) -> Result<Overrides> {
    let content = fs::read_to_string(config_file)
        .map_err(|source| ConfigError::Read { path: config_file.to_path_buf(), source })?;

    if content.trim().is_empty() {
        return Ok(Overrides::new());
    }

    let ext = config_file.extension().and_then(|e| e.to_str()).unwrap_or("").to_ascii_lowercase();
    let figment = match ext.as_str() {
        "toml" => Figment::from(Toml::string(&content)),
        "yaml" | "yml" => Figment::from(Yaml::string(&content)),
        other => {
            return Err(ConfigError::UnsupportedFormat {
                path: config_file.to_path_buf(),
                extension: other.to_string(),
            })
        }
    };

    let figment = if figment.contains(SECTION) { figment.focus(SECTION) } else { figment };

    figment
        .extract::<Overrides>()
        .map_err(|source| ConfigError::Parse { path: config_file.to_path_buf(), source: Box::new(source) })
}

fn discover_config(search_root: &Path) -> Option<PathBuf> {
    CANDIDATES.iter().map(|candidate| search_root.join(candidate)).find(|path| path.is_file())
}
