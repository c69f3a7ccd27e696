//! File reading utilities

use crate::error::CliError;
use anyhow::{Context, Result};
use serde::de::DeserializeOwned;
use std::fs;
use std::path::Path;

/// File reader with UTF-8 validation
pub struct FileReader;

impl FileReader {
    /// Read a file as UTF-8 text
    pub fn read_text(path: &Path) -> Result<String> {
        if !path.exists() {
            return Err(CliError::FileNotFound(path.display().to_string()).into());
        }
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read file: {}", path.display()))?;

        Ok(content)
    }

    /// Read a text fragment, dropping trailing line breaks left by editors
    pub fn read_fragment(path: &Path) -> Result<String> {
        let content = Self::read_text(path)?;
        Ok(content.trim_end_matches(['\n', '\r']).to_string())
    }

    /// Read and deserialize a JSON file
    pub fn read_json<T: DeserializeOwned>(path: &Path) -> Result<T> {
        let content = Self::read_text(path)?;
        let value = serde_json::from_str(&content).map_err(|e| {
            CliError::InvalidInput(format!("{}: {e}", path.display()))
        })?;
        Ok(value)
    }
}
