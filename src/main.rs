//! stocklook-config: inspect and override stocklook configuration

use anyhow::Result;

mod cli;

fn main() -> Result<()> {
    cli::run()
}
