//! textanchor command-line entry point

use clap::Parser;
use textanchor_cli::Cli;

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    cli.execute()
}
