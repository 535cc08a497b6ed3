//! Show command implementation

use anyhow::{Context, Result};
use clap::{Args, ValueEnum};
use stocklook_config::redact::redacted_entries;

use super::utils::{build_store, SourceArgs};

#[derive(Clone, Copy, ValueEnum)]
pub enum OutputFormat {
    Json,
    Yaml,
}

#[derive(Args)]
pub struct ShowArgs {
    #[command(flatten)]
    pub sources: SourceArgs,

    /// Output format
    #[arg(short, long, value_enum, default_value = "json")]
    pub format: OutputFormat,

    /// Print secrets instead of masking them
    #[arg(long)]
    pub reveal: bool,
}

pub fn run(args: ShowArgs, log_level: Option<&str>) -> Result<()> {
    let store = build_store(&args.sources, log_level)?;

    let entries = if args.reveal { store.entries().clone() } else { redacted_entries(&store) };

    let rendered = match args.format {
        OutputFormat::Json => {
            serde_json::to_string_pretty(&entries).context("Failed to render JSON")?
        }
        OutputFormat::Yaml => serde_yaml::to_string(&entries).context("Failed to render YAML")?,
    };
    println!("{}", rendered.trim_end());
    Ok(())
}
