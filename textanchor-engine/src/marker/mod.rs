//! Span marker
//!
//! Renders located ranges into a markup tree. Each range is resolved
//! against the block's flattened text (literal text first, explicit
//! offsets otherwise), then every marker is applied in a single rebuild of
//! the tree. A range that cannot be placed is skipped for that block and
//! reported, never guessed.

mod rebuild;
mod resolve;

pub use resolve::ResolveStrategy;

use crate::{
    config::MarkerConfig,
    error::{EngineError, Result},
    markup::MarkupNode,
};
use rebuild::{flatten, rebuild, PlacedSpan};
use serde::{Deserialize, Serialize};
use std::cmp::Reverse;
use textanchor_core::{char_len, OffsetRange};
use tracing::debug;

/// A range to mark, in document char offsets
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SpanRange {
    /// Caller identifier, echoed on every marker fragment
    pub id: String,
    /// Start offset
    pub start_offset: usize,
    /// End offset (exclusive)
    pub end_offset: usize,
    /// Category, echoed on every marker fragment
    pub category: String,
    /// Text recorded when the range was created
    #[serde(default)]
    pub literal_text: Option<String>,
}

impl SpanRange {
    /// Range identified by offsets only
    pub fn new(
        id: impl Into<String>,
        start_offset: usize,
        end_offset: usize,
        category: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            start_offset,
            end_offset,
            category: category.into(),
            literal_text: None,
        }
    }

    /// Attach the recorded literal text
    pub fn with_literal(mut self, literal: impl Into<String>) -> Self {
        self.literal_text = Some(literal.into());
        self
    }

    /// Reject ranges missing identity or with inverted offsets
    pub fn validate(&self) -> Result<()> {
        let invalid = |reason: &str| EngineError::InvalidRange {
            id: self.id.clone(),
            reason: reason.to_string(),
        };
        if self.id.is_empty() {
            return Err(invalid("id must not be empty"));
        }
        if self.category.is_empty() {
            return Err(invalid("category must not be empty"));
        }
        if self.end_offset < self.start_offset {
            return Err(invalid("end offset lies before start offset"));
        }
        Ok(())
    }

    fn literal(&self) -> Option<&str> {
        self.literal_text
            .as_deref()
            .filter(|text| !text.trim().is_empty())
    }

    fn has_offsets(&self) -> bool {
        self.end_offset > self.start_offset
    }
}

/// What happened to one range in one block
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum SpanStatus {
    /// Markers were inserted
    Applied {
        /// Block-local start offset
        start_offset: usize,
        /// Block-local end offset
        end_offset: usize,
        /// How the range was placed
        strategy: ResolveStrategy,
        /// Marker elements emitted
        fragments: usize,
    },
    /// The range was left out
    Skipped {
        /// Why it was left out
        reason: String,
    },
}

/// Audit record for one range
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SpanOutcome {
    /// Range identifier
    pub id: String,
    /// Result
    #[serde(flatten)]
    pub status: SpanStatus,
}

impl SpanOutcome {
    fn skipped(id: &str, reason: impl Into<String>) -> Self {
        let reason = reason.into();
        debug!(id, reason = %reason, "span range skipped");
        Self {
            id: id.to_string(),
            status: SpanStatus::Skipped { reason },
        }
    }

    /// Whether markers were inserted
    pub fn is_applied(&self) -> bool {
        matches!(self.status, SpanStatus::Applied { .. })
    }
}

/// A marked block
#[derive(Debug, Clone, PartialEq)]
pub struct MarkedBlock<N> {
    /// Rebuilt tree
    pub root: N,
    /// One outcome per attempted range, in input order
    pub outcomes: Vec<SpanOutcome>,
}

/// One block of a document and where its text starts
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Block<N> {
    /// Document offset of the block's first char
    pub start_offset: usize,
    /// Block tree
    pub node: N,
}

/// A marked document
#[derive(Debug, Clone, PartialEq)]
pub struct MarkedDocument<N> {
    /// Rebuilt blocks, in input order
    pub blocks: Vec<N>,
    /// Outcomes for every block attempt, then for ranges no block took
    pub outcomes: Vec<SpanOutcome>,
}

/// A range prepared for one block
struct LocalRange<'r> {
    range: &'r SpanRange,
    local: Option<OffsetRange>,
    /// Explicit offsets reach past the block's start and end
    clipped: (bool, bool),
}

/// Inserts marker elements for span ranges
#[derive(Debug, Clone, Default)]
pub struct SpanMarker {
    config: MarkerConfig,
}

impl SpanMarker {
    /// Create a marker
    pub fn new(config: MarkerConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    /// Active configuration
    pub fn config(&self) -> &MarkerConfig {
        &self.config
    }

    /// Mark ranges inside one block; offsets are block-local
    pub fn mark<N: MarkupNode>(&self, root: &N, ranges: &[SpanRange]) -> Result<MarkedBlock<N>> {
        check_root(root)?;
        validate_ranges(ranges)?;

        let text = flatten(root);
        let len = char_len(&text);
        let local: Vec<LocalRange<'_>> = ranges
            .iter()
            .map(|range| LocalRange {
                range,
                local: range.has_offsets().then(|| {
                    let start = range.start_offset.min(len);
                    OffsetRange::new(start, range.end_offset.min(len))
                }),
                clipped: (false, range.end_offset > len),
            })
            .collect();

        Ok(self.mark_block(root, &text, &local))
    }

    /// Mark ranges across blocks; offsets are document offsets
    ///
    /// A range is attempted only in blocks its offsets intersect. Ranges
    /// with literal text but no usable offsets are attempted in every block.
    pub fn mark_document<N: MarkupNode>(
        &self,
        blocks: &[Block<N>],
        ranges: &[SpanRange],
    ) -> Result<MarkedDocument<N>> {
        validate_ranges(ranges)?;
        for block in blocks {
            check_root(&block.node)?;
        }

        let mut attempted = vec![false; ranges.len()];
        let mut marked = Vec::with_capacity(blocks.len());
        let mut outcomes = Vec::new();

        for block in blocks {
            let text = flatten(&block.node);
            let len = char_len(&text);
            let block_end = block.start_offset + len;

            let mut local = Vec::new();
            for (index, range) in ranges.iter().enumerate() {
                let entry = if range.has_offsets() {
                    let intersects =
                        range.start_offset < block_end && range.end_offset > block.start_offset;
                    intersects.then(|| LocalRange {
                        range,
                        local: Some(OffsetRange::new(
                            range.start_offset.saturating_sub(block.start_offset),
                            (range.end_offset - block.start_offset).min(len),
                        )),
                        clipped: (
                            range.start_offset < block.start_offset,
                            range.end_offset > block_end,
                        ),
                    })
                } else {
                    range.literal().map(|_| LocalRange {
                        range,
                        local: None,
                        clipped: (false, false),
                    })
                };
                if let Some(entry) = entry {
                    attempted[index] = true;
                    local.push(entry);
                }
            }

            let result = self.mark_block(&block.node, &text, &local);
            marked.push(result.root);
            outcomes.extend(result.outcomes);
        }

        for (range, _) in ranges.iter().zip(&attempted).filter(|(_, done)| !**done) {
            outcomes.push(SpanOutcome::skipped(&range.id, "no block intersects range"));
        }

        Ok(MarkedDocument {
            blocks: marked,
            outcomes,
        })
    }

    fn mark_block<N: MarkupNode>(
        &self,
        root: &N,
        text: &str,
        ranges: &[LocalRange<'_>],
    ) -> MarkedBlock<N> {
        let mut outcomes = Vec::with_capacity(ranges.len());
        // (outcome index, span, strategy)
        let mut placed: Vec<(usize, PlacedSpan<'_>, ResolveStrategy)> = Vec::new();

        for entry in ranges {
            let range = entry.range;
            let resolved = match range.literal() {
                Some(literal) => resolve::resolve(text, literal, entry.local, &self.config)
                    .map(|(local, strategy)| (local, strategy, (false, false)))
                    .ok_or("literal text not found in block"),
                None => entry
                    .local
                    .filter(|local| !local.is_empty())
                    .map(|local| (local, ResolveStrategy::Offsets, entry.clipped))
                    .ok_or("range is empty within block"),
            };

            match resolved {
                Ok((local, strategy, (open_start, open_end))) => {
                    placed.push((
                        outcomes.len(),
                        PlacedSpan {
                            id: &range.id,
                            category: &range.category,
                            range: local,
                            open_start,
                            open_end,
                        },
                        strategy,
                    ));
                    // Filled in once fragments are known
                    outcomes.push(SpanOutcome {
                        id: range.id.clone(),
                        status: SpanStatus::Skipped {
                            reason: String::new(),
                        },
                    });
                }
                Err(reason) => outcomes.push(SpanOutcome::skipped(&range.id, reason)),
            }
        }

        if placed.is_empty() {
            return MarkedBlock {
                root: root.clone(),
                outcomes,
            };
        }

        placed.sort_by_key(|(order, span, _)| {
            (span.range.start, Reverse(span.range.end), *order)
        });
        let spans: Vec<PlacedSpan<'_>> = placed.iter().map(|(_, span, _)| span.clone()).collect();
        let rebuilt = rebuild(root, &spans, &self.config.tag);

        for ((order, span, strategy), fragments) in placed.iter().zip(rebuilt.fragments) {
            debug!(
                id = span.id,
                start = span.range.start,
                end = span.range.end,
                ?strategy,
                "span range applied"
            );
            outcomes[*order].status = SpanStatus::Applied {
                start_offset: span.range.start,
                end_offset: span.range.end,
                strategy: *strategy,
                fragments,
            };
        }

        MarkedBlock {
            root: rebuilt.root,
            outcomes,
        }
    }
}

fn check_root<N: MarkupNode>(root: &N) -> Result<()> {
    if root.is_text() {
        return Err(EngineError::invalid_input(
            "markup root must be an element, not a text node",
        ));
    }
    Ok(())
}

fn validate_ranges(ranges: &[SpanRange]) -> Result<()> {
    ranges.iter().try_for_each(SpanRange::validate)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::markup::Node;

    fn paragraph(text: &str) -> Node {
        Node::element("p", vec![Node::text(text)])
    }

    #[test]
    fn test_literal_range_applied() {
        let root = paragraph("The quick brown fox jumps.");
        let range = SpanRange::new("h1", 0, 0, "quote").with_literal("brown fox");
        let result = SpanMarker::default().mark(&root, &[range]).unwrap();

        assert_eq!(
            result.root.to_html(),
            "<p>The quick <mark data-span-id=\"h1\" data-category=\"quote\" \
             data-span-first=\"true\" data-span-last=\"true\">brown fox</mark> jumps.</p>"
        );
        assert_eq!(
            result.outcomes[0].status,
            SpanStatus::Applied {
                start_offset: 10,
                end_offset: 19,
                strategy: ResolveStrategy::Exact,
                fragments: 1,
            }
        );
    }

    #[test]
    fn test_missing_literal_leaves_block_unchanged() {
        let root = paragraph("Nothing relevant lives in this paragraph.");
        let range = SpanRange::new("h1", 0, 0, "quote").with_literal("zebra crossing ahead");
        let result = SpanMarker::default().mark(&root, &[range]).unwrap();

        assert_eq!(result.root, root);
        assert!(!result.outcomes[0].is_applied());
    }

    #[test]
    fn test_offsets_are_clamped() {
        let root = paragraph("short");
        let range = SpanRange::new("r", 2, 50, "note");
        let result = SpanMarker::default().mark(&root, &[range]).unwrap();
        assert!(matches!(
            result.outcomes[0].status,
            SpanStatus::Applied {
                start_offset: 2,
                end_offset: 5,
                strategy: ResolveStrategy::Offsets,
                ..
            }
        ));

        let past_end = SpanRange::new("r", 10, 50, "note");
        let result = SpanMarker::default().mark(&root, &[past_end]).unwrap();
        assert!(!result.outcomes[0].is_applied());
        assert_eq!(result.root, root);
    }

    #[test]
    fn test_contract_violations() {
        let root = paragraph("text");
        let marker = SpanMarker::default();

        let err = marker
            .mark(&root, &[SpanRange::new("", 0, 1, "note")])
            .unwrap_err();
        assert!(matches!(err, EngineError::InvalidRange { .. }));

        let err = marker
            .mark(&root, &[SpanRange::new("a", 0, 1, "")])
            .unwrap_err();
        assert!(matches!(err, EngineError::InvalidRange { .. }));

        let err = marker
            .mark(&root, &[SpanRange::new("a", 3, 1, "note")])
            .unwrap_err();
        assert!(matches!(err, EngineError::InvalidRange { .. }));

        let err = marker.mark(&Node::text("bare"), &[]).unwrap_err();
        assert!(matches!(err, EngineError::InvalidInput { .. }));
    }

    #[test]
    fn test_mark_document_targets_blocks() {
        let blocks = vec![
            Block {
                start_offset: 0,
                node: paragraph("First block text."),
            },
            Block {
                start_offset: 17,
                node: paragraph("Second block text."),
            },
        ];
        let ranges = vec![
            SpanRange::new("spans", 12, 23, "note"),
            SpanRange::new("lit", 0, 0, "quote").with_literal("Second block"),
            SpanRange::new("nowhere", 500, 510, "note"),
        ];
        let result = SpanMarker::default().mark_document(&blocks, &ranges).unwrap();

        assert_eq!(result.blocks[0].flatten_text(), "First block text.");
        assert!(result.blocks[0].to_html().contains(">text.</mark>"));
        assert!(result.blocks[1].to_html().contains(">Second</mark>"));

        let applied: Vec<&str> = result
            .outcomes
            .iter()
            .filter(|o| o.is_applied())
            .map(|o| o.id.as_str())
            .collect();
        assert_eq!(applied, vec!["spans", "spans", "lit"]);
        let last = result.outcomes.last().unwrap();
        assert_eq!(last.id, "nowhere");
        assert!(!last.is_applied());
    }

    #[test]
    fn test_outcome_json_shape() {
        let outcome = SpanOutcome {
            id: "a".into(),
            status: SpanStatus::Skipped {
                reason: "why".into(),
            },
        };
        let json = serde_json::to_value(&outcome).unwrap();
        assert_eq!(json["id"], "a");
        assert_eq!(json["status"], "skipped");
        assert_eq!(json["reason"], "why");
    }
}
