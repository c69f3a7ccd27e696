//! CLI command implementations

use crate::config::Settings;
use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

pub mod generate_config;
pub mod highlight;
pub mod locate;
pub mod stitch;

/// Locate text fragments, stitch batch segments and render highlights
#[derive(Debug, Parser)]
#[command(name = "textanchor", version, about, long_about = None)]
pub struct Cli {
    /// Configuration file (TOML)
    #[arg(short, long, value_name = "FILE", global = true, env = "TEXTANCHOR_CONFIG")]
    pub config: Option<PathBuf>,

    /// Suppress progress output and logging
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Increase verbosity
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Command to run
    #[command(subcommand)]
    pub command: Commands,
}

/// Available CLI commands
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Find where a text fragment sits inside a document
    Locate(locate::LocateArgs),

    /// Merge overlapping segments into one document
    Stitch(stitch::StitchArgs),

    /// Insert span markers into a markup tree
    Highlight(highlight::HighlightArgs),

    /// Print a commented configuration file with every default
    GenerateConfig(generate_config::GenerateConfigArgs),
}

impl Cli {
    /// Run the selected command
    pub fn execute(&self) -> Result<()> {
        self.init_logging();
        log::debug!("Arguments: {:?}", self);

        match &self.command {
            Commands::GenerateConfig(args) => args.execute(),
            Commands::Locate(args) => args.execute(&self.settings()?),
            Commands::Stitch(args) => args.execute(&self.settings()?, self.quiet),
            Commands::Highlight(args) => args.execute(&self.settings()?),
        }
    }

    fn settings(&self) -> Result<Settings> {
        let settings = Settings::load(self.config.as_deref())?;
        if let Some(path) = &self.config {
            log::info!("Loaded configuration from {}", path.display());
        }
        Ok(settings)
    }

    /// Initialize logging based on verbosity level
    fn init_logging(&self) {
        if self.quiet {
            return;
        }

        let log_level = match self.verbose {
            0 => "warn",
            1 => "info",
            2 => "debug",
            _ => "trace",
        };

        // A second initialization in the same process keeps the first logger
        let _ = env_logger::Builder::from_env(
            env_logger::Env::default().default_filter_or(log_level),
        )
        .try_init();
    }
}
