//! Plain text output formatter

use super::OutputFormatter;
use anyhow::Result;
use std::io::Write;
use textanchor_api::{HighlightDocumentOutput, MatchCandidateDTO, SpanStatusDTO, StitchOutput};

/// Plain text formatter
pub struct TextFormatter<W: Write> {
    writer: W,
}

impl<W: Write> TextFormatter<W> {
    /// Create a new text formatter
    pub fn new(writer: W) -> Self {
        Self { writer }
    }
}

impl<W: Write> OutputFormatter for TextFormatter<W> {
    fn format_match(&mut self, candidate: &MatchCandidateDTO, matched: &str) -> Result<()> {
        writeln!(
            self.writer,
            "{} {}..{} confidence={:.3}",
            candidate.method, candidate.start_offset, candidate.end_offset, candidate.confidence
        )?;
        writeln!(self.writer, "{matched}")?;
        Ok(())
    }

    fn format_stitched(&mut self, output: &StitchOutput) -> Result<()> {
        writeln!(self.writer, "{}", output.text)?;
        Ok(())
    }

    fn format_highlight(&mut self, output: &HighlightDocumentOutput) -> Result<()> {
        for outcome in &output.outcomes {
            match &outcome.status {
                SpanStatusDTO::Applied {
                    start_offset,
                    end_offset,
                    strategy,
                    fragments,
                } => writeln!(
                    self.writer,
                    "{} applied {start_offset}..{end_offset} via {strategy:?} ({fragments} fragments)",
                    outcome.id
                )?,
                SpanStatusDTO::Skipped { reason } => {
                    writeln!(self.writer, "{} skipped: {reason}", outcome.id)?
                }
            }
        }
        Ok(())
    }

    fn finish(&mut self) -> Result<()> {
        self.writer.flush()?;
        Ok(())
    }
}
