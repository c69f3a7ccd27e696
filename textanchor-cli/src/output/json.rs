//! JSON output formatter

use super::OutputFormatter;
use anyhow::Result;
use serde::Serialize;
use std::io::Write;
use textanchor_api::{HighlightDocumentOutput, MatchCandidateDTO, StitchOutput};

/// JSON formatter - buffers one document and writes it on finish
pub struct JsonFormatter<W: Write> {
    writer: W,
    pretty: bool,
    document: Option<serde_json::Value>,
}

/// Match record for JSON output
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct MatchData<'a> {
    #[serde(flatten)]
    candidate: &'a MatchCandidateDTO,
    matched_text: &'a str,
}

impl<W: Write> JsonFormatter<W> {
    /// Create a new JSON formatter
    pub fn new(writer: W, pretty: bool) -> Self {
        Self {
            writer,
            pretty,
            document: None,
        }
    }

    fn store<T: Serialize>(&mut self, value: &T) -> Result<()> {
        self.document = Some(serde_json::to_value(value)?);
        Ok(())
    }
}

impl<W: Write> OutputFormatter for JsonFormatter<W> {
    fn format_match(&mut self, candidate: &MatchCandidateDTO, matched: &str) -> Result<()> {
        self.store(&MatchData {
            candidate,
            matched_text: matched,
        })
    }

    fn format_stitched(&mut self, output: &StitchOutput) -> Result<()> {
        self.store(output)
    }

    fn format_highlight(&mut self, output: &HighlightDocumentOutput) -> Result<()> {
        self.store(output)
    }

    fn finish(&mut self) -> Result<()> {
        if let Some(document) = self.document.take() {
            if self.pretty {
                serde_json::to_writer_pretty(&mut self.writer, &document)?;
            } else {
                serde_json::to_writer(&mut self.writer, &document)?;
            }
            writeln!(self.writer)?;
        }
        self.writer.flush()?;
        Ok(())
    }
}
