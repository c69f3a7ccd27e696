//! HTML output formatter

use super::OutputFormatter;
use anyhow::Result;
use std::io::Write;
use textanchor_api::{HighlightDocumentOutput, MatchCandidateDTO, Node, StitchOutput};

/// HTML formatter - renders fragments with escaped text
pub struct HtmlFormatter<W: Write> {
    writer: W,
}

impl<W: Write> HtmlFormatter<W> {
    /// Create a new HTML formatter
    pub fn new(writer: W) -> Self {
        Self { writer }
    }
}

impl<W: Write> OutputFormatter for HtmlFormatter<W> {
    fn format_match(&mut self, candidate: &MatchCandidateDTO, matched: &str) -> Result<()> {
        let mut mark = Node::element("mark", vec![Node::text(matched)]);
        if let Node::Element(element) = &mut mark {
            element
                .attrs
                .push(("data-method".to_string(), candidate.method.to_string()));
        }
        writeln!(self.writer, "{}", mark.to_html())?;
        Ok(())
    }

    fn format_stitched(&mut self, output: &StitchOutput) -> Result<()> {
        let pre = Node::element("pre", vec![Node::text(output.text.as_str())]);
        writeln!(self.writer, "{}", pre.to_html())?;
        Ok(())
    }

    fn format_highlight(&mut self, output: &HighlightDocumentOutput) -> Result<()> {
        for block in &output.blocks {
            writeln!(self.writer, "{}", block.to_html())?;
        }
        Ok(())
    }

    fn finish(&mut self) -> Result<()> {
        self.writer.flush()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_blocks_render_one_per_line() {
        let mut out = Vec::new();
        let mut formatter = HtmlFormatter::new(&mut out);
        let output = HighlightDocumentOutput {
            blocks: vec![
                Node::element("p", vec![Node::text("a < b")]),
                Node::element("p", vec![Node::text("c")]),
            ],
            outcomes: Vec::new(),
        };
        formatter.format_highlight(&output).unwrap();

        assert_eq!(
            String::from_utf8(out).unwrap(),
            "<p>a &lt; b</p>\n<p>c</p>\n"
        );
    }
}
