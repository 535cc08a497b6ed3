//! Keys command implementation

use anyhow::Result;
use stocklook_config::config::keys::{KeyKind, KNOWN_KEYS};

pub fn run() -> Result<()> {
    let width = KNOWN_KEYS.iter().map(|spec| spec.key.len()).max().unwrap_or(0);
    for spec in KNOWN_KEYS {
        let kind = match spec.kind {
            KeyKind::Credential => "credential",
            KeyKind::Secret => "secret",
            KeyKind::Setting => "setting",
            KeyKind::Composite => "composite",
        };
        println!("{:<width$}  {:<10}  {}", spec.key, kind, spec.env_var.unwrap_or("-"));
    }
    Ok(())
}
