//! Highlight command implementation

use crate::config::Settings;
use crate::error::CliError;
use crate::input::FileReader;
use crate::output::{formatter, open_writer, OutputFormat};
use anyhow::Result;
use clap::Args;
use serde::Deserialize;
use std::path::PathBuf;
use textanchor_api::{
    BlockDTO, HighlightDocumentOutput, Node, SpanOutcomeDTO, SpanRangeDTO, SpanStatusDTO, TextAnchor,
};

/// Arguments for the highlight command
#[derive(Debug, Args)]
pub struct HighlightArgs {
    /// JSON markup tree: one node, or an array of positioned blocks
    #[arg(long, value_name = "FILE")]
    pub tree: PathBuf,

    /// JSON array of span ranges
    #[arg(long, value_name = "FILE")]
    pub ranges: PathBuf,

    /// Output format
    #[arg(short, long, value_enum, default_value = "json")]
    pub format: OutputFormat,

    /// Output file (default: stdout)
    #[arg(short, long, value_name = "FILE")]
    pub output: Option<PathBuf>,
}

/// Accepted tree layouts
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum TreeInput {
    /// Blocks with document offsets
    Blocks(Vec<BlockDTO>),
    /// A single block with block-local offsets
    Single(Node),
}

impl HighlightArgs {
    /// Execute the highlight command
    pub fn execute(&self, settings: &Settings) -> Result<()> {
        let tree: TreeInput = FileReader::read_json(&self.tree)?;
        let ranges: Vec<SpanRangeDTO> = FileReader::read_json(&self.ranges)?;
        let anchor = TextAnchor::with_config(settings.library.clone()).map_err(CliError::from)?;

        let output = match tree {
            TreeInput::Blocks(blocks) => {
                log::info!("Marking {} ranges over {} blocks", ranges.len(), blocks.len());
                anchor
                    .highlight_document(&blocks, &ranges)
                    .map_err(CliError::from)?
            }
            TreeInput::Single(root) => {
                log::info!("Marking {} ranges in one block", ranges.len());
                let marked = anchor.highlight(&root, &ranges).map_err(CliError::from)?;
                HighlightDocumentOutput {
                    blocks: vec![marked.root],
                    outcomes: marked.outcomes,
                }
            }
        };

        let skipped = output.outcomes.iter().filter(|o| !is_applied(o)).count();
        if skipped > 0 {
            log::warn!("{skipped} range placements were skipped");
        }

        let writer = open_writer(self.output.as_deref())?;
        let mut out = formatter(self.format, writer, settings.cli.output.pretty_json);
        out.format_highlight(&output)?;
        out.finish()
    }
}

fn is_applied(outcome: &SpanOutcomeDTO) -> bool {
    matches!(outcome.status, SpanStatusDTO::Applied { .. })
}
