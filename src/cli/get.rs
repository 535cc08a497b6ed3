//! Get command implementation

use anyhow::{Context, Result};
use clap::Args;
use stocklook_config::config::ConfigValue;
use stocklook_config::redact::redact_value;

use super::utils::{build_store, SourceArgs};

#[derive(Args)]
pub struct GetArgs {
    /// Configuration key, e.g. GDAX_KEY
    #[arg(value_name = "KEY")]
    pub key: String,

    #[command(flatten)]
    pub sources: SourceArgs,

    /// Print the value even if it is a secret
    #[arg(long)]
    pub reveal: bool,
}

pub fn run(args: GetArgs, log_level: Option<&str>) -> Result<()> {
    let store = build_store(&args.sources, log_level)?;

    let value = store.get(&args.key);
    let value = if args.reveal { value.clone() } else { redact_value(&args.key, value) };

    match &value {
        ConfigValue::Map(_) => {
            println!("{}", serde_json::to_string_pretty(&value).context("Failed to render JSON")?)
        }
        other => println!("{}", other),
    }
    Ok(())
}
