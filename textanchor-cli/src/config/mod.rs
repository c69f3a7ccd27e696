//! Configuration module
//!
//! One TOML file carries both the library tables (`[locator]`, `[stitcher]`,
//! `[marker]`) and the CLI-only `[output]` table.

use crate::error::CliError;
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use textanchor_api::Config;

/// CLI configuration structure
#[derive(Debug, Deserialize, Serialize, Default, PartialEq)]
pub struct CliConfig {
    /// Output configuration
    #[serde(default)]
    pub output: OutputConfig,
}

/// Output-related configuration
#[derive(Debug, Deserialize, Serialize, PartialEq)]
#[serde(default)]
pub struct OutputConfig {
    /// Pretty print JSON output
    pub pretty_json: bool,

    /// Print a seam summary to stderr after stitching
    pub stitch_report: bool,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            pretty_json: true,
            stitch_report: false,
        }
    }
}

/// Library and CLI settings loaded from one file
#[derive(Debug, Default)]
pub struct Settings {
    /// Library configuration
    pub library: Config,
    /// CLI configuration
    pub cli: CliConfig,
}

impl Settings {
    /// Load settings from a TOML file, or defaults when no file is given
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let Some(path) = path else {
            return Ok(Self::default());
        };

        let source = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;
        Self::from_toml_str(&source)
            .with_context(|| format!("Invalid config file: {}", path.display()))
    }

    /// Parse settings from TOML text
    pub fn from_toml_str(source: &str) -> Result<Self> {
        let cli: CliConfig =
            toml::from_str(source).map_err(|e| CliError::ConfigError(e.to_string()))?;
        let library = Config::from_toml_str(source).map_err(CliError::from)?;
        Ok(Self { library, cli })
    }
}
