//! Output formatting module

use anyhow::{Context, Result};
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::Path;
use textanchor_api::{HighlightDocumentOutput, MatchCandidateDTO, StitchOutput};

/// Trait for output formatters
pub trait OutputFormatter {
    /// Format a located match and the text it covers
    fn format_match(&mut self, candidate: &MatchCandidateDTO, matched: &str) -> Result<()>;

    /// Format a stitched document
    fn format_stitched(&mut self, output: &StitchOutput) -> Result<()>;

    /// Format highlighted blocks
    fn format_highlight(&mut self, output: &HighlightDocumentOutput) -> Result<()>;

    /// Finalize output
    fn finish(&mut self) -> Result<()>;
}

/// Supported output formats
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    /// Plain text
    Text,
    /// JSON with camelCase fields
    Json,
    /// HTML fragments
    Html,
}

/// Open the output file, or stdout when no path is given
pub fn open_writer(path: Option<&Path>) -> Result<Box<dyn Write>> {
    match path {
        Some(path) => {
            let file = File::create(path)
                .with_context(|| format!("Failed to create output file: {}", path.display()))?;
            Ok(Box::new(BufWriter::new(file)))
        }
        None => Ok(Box::new(io::stdout().lock())),
    }
}

/// Build the formatter for `format`
pub fn formatter<W: Write + 'static>(
    format: OutputFormat,
    writer: W,
    pretty_json: bool,
) -> Box<dyn OutputFormatter> {
    match format {
        OutputFormat::Text => Box::new(TextFormatter::new(writer)),
        OutputFormat::Json => Box::new(JsonFormatter::new(writer, pretty_json)),
        OutputFormat::Html => Box::new(HtmlFormatter::new(writer)),
    }
}

pub mod html;
pub mod json;
pub mod text;

pub use html::HtmlFormatter;
pub use json::JsonFormatter;
pub use text::TextFormatter;
