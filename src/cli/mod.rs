//! Command-line interface for stocklook-config
//!
//! Provides `show`, `get` and `keys` subcommands over the effective configuration.

use anyhow::Result;
use clap::{Parser, Subcommand};
use stocklook_config::logging;

mod get;
mod keys;
mod show;
mod utils;

/// Inspect and override stocklook configuration
#[derive(Parser)]
#[command(name = "stocklook-config")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Log level (name or number); overrides LOG_LEVEL from every other source
    #[arg(long, global = true, value_name = "LEVEL")]
    log_level: Option<String>,
}

#[derive(Subcommand)]
enum Commands {
    /// Print every configuration entry
    Show(show::ShowArgs),

    /// Print a single configuration entry
    Get(get::GetArgs),

    /// List the known keys and the environment variables they read
    Keys,
}

pub fn run() -> Result<()> {
    let cli = Cli::parse();

    let initial = match cli.log_level.as_deref() {
        Some(raw) => utils::parse_log_level(raw)?,
        None => logging::DEFAULT_LOG_LEVEL,
    };
    logging::apply_level(initial);

    let log_level = cli.log_level.as_deref();
    match cli.command {
        Commands::Show(args) => show::run(args, log_level),
        Commands::Get(args) => get::run(args, log_level),
        Commands::Keys => keys::run(),
    }
}
