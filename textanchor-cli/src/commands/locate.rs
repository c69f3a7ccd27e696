//! Locate command implementation

use crate::config::Settings;
use crate::error::CliError;
use crate::input::FileReader;
use crate::output::{formatter, open_writer, OutputFormat};
use anyhow::Result;
use clap::Args;
use std::path::PathBuf;
use textanchor_api::{ChunkBoundaryDTO, LocateMode, LocateQuery, TextAnchor};

/// Arguments for the locate command
#[derive(Debug, Args)]
pub struct LocateArgs {
    /// File holding the text to find
    #[arg(long, value_name = "FILE")]
    pub needle_file: PathBuf,

    /// File holding the document to search
    #[arg(long, value_name = "FILE")]
    pub haystack: PathBuf,

    /// Position of the chunk in its sequence
    #[arg(long, value_name = "N", requires = "total_chunks")]
    pub chunk_index: Option<usize>,

    /// Number of chunks in the sequence
    #[arg(long, value_name = "T", requires = "chunk_index")]
    pub total_chunks: Option<usize>,

    /// Text expected right before the fragment
    #[arg(long, value_name = "TEXT")]
    pub before: Option<String>,

    /// Text expected right after the fragment
    #[arg(long, value_name = "TEXT")]
    pub after: Option<String>,

    /// JSON chunk boundary table of the document
    #[arg(long, value_name = "FILE", requires = "hint")]
    pub boundaries: Option<PathBuf>,

    /// Chunk the fragment probably belongs to
    #[arg(long, value_name = "N", requires = "boundaries")]
    pub hint: Option<usize>,

    /// Locator preset
    #[arg(short, long, value_enum, default_value = "chunk")]
    pub mode: Mode,

    /// Output format
    #[arg(short, long, value_enum, default_value = "text")]
    pub format: OutputFormat,

    /// Output file (default: stdout)
    #[arg(short, long, value_name = "FILE")]
    pub output: Option<PathBuf>,
}

/// Locator presets
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum Mode {
    /// Place an extracted chunk in its source document
    Chunk,
    /// Recover a recorded annotation in a re-extracted document
    Annotation,
}

impl From<Mode> for LocateMode {
    fn from(mode: Mode) -> Self {
        match mode {
            Mode::Chunk => LocateMode::Chunk,
            Mode::Annotation => LocateMode::Annotation,
        }
    }
}

impl LocateArgs {
    /// Execute the locate command
    pub fn execute(&self, settings: &Settings) -> Result<()> {
        let needle = FileReader::read_fragment(&self.needle_file)?;
        let haystack = FileReader::read_text(&self.haystack)?;
        log::info!(
            "Locating {} chars in {} chars",
            needle.chars().count(),
            haystack.chars().count()
        );

        let query = self.query(needle, haystack)?;
        let anchor = TextAnchor::with_config(settings.library.clone()).map_err(CliError::from)?;
        let candidate = anchor.locate(&query).map_err(CliError::from)?;

        let matched: String = query
            .haystack
            .chars()
            .skip(candidate.start_offset)
            .take(candidate.end_offset - candidate.start_offset)
            .collect();

        let writer = open_writer(self.output.as_deref())?;
        let mut out = formatter(self.format, writer, settings.cli.output.pretty_json);
        out.format_match(&candidate, &matched)?;
        out.finish()
    }

    fn query(&self, needle: String, haystack: String) -> Result<LocateQuery> {
        let mut query = LocateQuery::new(needle, haystack)
            .with_context(self.before.clone(), self.after.clone())
            .with_mode(self.mode.into());

        if let (Some(index), Some(total)) = (self.chunk_index, self.total_chunks) {
            query = query.with_position(index, total);
        }

        if let (Some(path), Some(hint)) = (&self.boundaries, self.hint) {
            let boundaries: Vec<ChunkBoundaryDTO> = FileReader::read_json(path)?;
            log::debug!("Loaded {} chunk boundaries", boundaries.len());
            query = query.with_chunk_hint(hint, boundaries);
        }

        Ok(query)
    }
}
