//! Stitch command implementation

use crate::config::Settings;
use crate::error::CliError;
use crate::input::{resolve_patterns, FileReader};
use crate::output::{formatter, open_writer, OutputFormat};
use crate::progress::ProgressReporter;
use anyhow::Result;
use clap::Args;
use std::path::PathBuf;
use textanchor_api::{OverlapMethod, StitchOutput, TextAnchor};

/// Arguments for the stitch command
#[derive(Debug, Args)]
pub struct StitchArgs {
    /// Segment files or patterns (supports glob), in document order
    #[arg(short, long, value_name = "FILE/PATTERN", required = true)]
    pub input: Vec<String>,

    /// Output file (default: stdout)
    #[arg(short, long, value_name = "FILE")]
    pub output: Option<PathBuf>,

    /// Output format
    #[arg(short, long, value_enum, default_value = "text")]
    pub format: OutputFormat,

    /// Print one line per seam to stderr
    #[arg(long)]
    pub report: bool,
}

impl StitchArgs {
    /// Execute the stitch command
    pub fn execute(&self, settings: &Settings, quiet: bool) -> Result<()> {
        let files = resolve_patterns(&self.input)?;
        log::info!("Stitching {} segments", files.len());

        let mut progress = ProgressReporter::new(quiet);
        progress.init_segments(files.len() as u64)?;

        let mut segments = Vec::with_capacity(files.len());
        for path in &files {
            segments.push(FileReader::read_text(path)?);
            progress.segment_loaded(&path.display().to_string());
        }

        progress.set_stage("Stitching");
        let anchor = TextAnchor::with_config(settings.library.clone()).map_err(CliError::from)?;
        let stitched = anchor.stitch_all(&segments);
        progress.finish(format!("Stitched {} segments", segments.len()));

        if self.report || settings.cli.output.stitch_report {
            for line in seam_report(&stitched) {
                eprintln!("{line}");
            }
        }

        let writer = open_writer(self.output.as_deref())?;
        let mut out = formatter(self.format, writer, settings.cli.output.pretty_json);
        out.format_stitched(&stitched)?;
        out.finish()
    }
}

/// One human-readable line per seam
fn seam_report(output: &StitchOutput) -> Vec<String> {
    output
        .overlaps
        .iter()
        .enumerate()
        .map(|(i, overlap)| match overlap.method {
            OverlapMethod::None => format!("seam {}: no overlap, separator inserted", i + 1),
            method => format!(
                "seam {}: {:?} overlap, {} chars removed (window {}), confidence {:.2}",
                i + 1,
                method,
                overlap.overlap_length,
                overlap.window_length,
                overlap.confidence
            ),
        })
        .collect()
}
