//! Data Transfer Objects for API
//!
//! Every DTO serializes with camelCase field names and char offsets.

use serde::{Deserialize, Serialize};
use textanchor_engine::{
    Block, ChunkBoundary, MatchCandidate, MatchMethod, Node, OverlapMethod, OverlapResult,
    ResolveStrategy, SpanOutcome, SpanRange, SpanStatus, StitchedDocument,
};

/// Which locator preset a query runs with
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LocateMode {
    /// Place an extracted chunk inside its source document
    #[default]
    Chunk,
    /// Recover a recorded annotation in a re-extracted document
    Annotation,
}

/// A serializable locate request
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct LocateQuery {
    /// Text to place
    pub needle: String,
    /// Text to search
    pub haystack: String,
    /// Position of the chunk in its sequence
    pub chunk_index: Option<usize>,
    /// Number of chunks in the sequence
    pub total_chunks: Option<usize>,
    /// Text expected right before the needle
    pub context_before: Option<String>,
    /// Text expected right after the needle
    pub context_after: Option<String>,
    /// Chunk index the needle probably belongs to
    pub hint_index: Option<usize>,
    /// Chunk boundary table of the haystack
    pub boundaries: Vec<ChunkBoundaryDTO>,
    /// Locator preset
    pub mode: LocateMode,
}

impl LocateQuery {
    /// Create a query without hints
    pub fn new(needle: impl Into<String>, haystack: impl Into<String>) -> Self {
        Self {
            needle: needle.into(),
            haystack: haystack.into(),
            ..Self::default()
        }
    }

    /// Attach the chunk position
    pub fn with_position(mut self, index: usize, total: usize) -> Self {
        self.chunk_index = Some(index);
        self.total_chunks = Some(total);
        self
    }

    /// Attach anchor context
    pub fn with_context(mut self, before: Option<String>, after: Option<String>) -> Self {
        self.context_before = before;
        self.context_after = after;
        self
    }

    /// Attach a chunk boundary table and hint
    pub fn with_chunk_hint(mut self, hint: usize, boundaries: Vec<ChunkBoundaryDTO>) -> Self {
        self.hint_index = Some(hint);
        self.boundaries = boundaries;
        self
    }

    /// Select the locator preset
    pub fn with_mode(mut self, mode: LocateMode) -> Self {
        self.mode = mode;
        self
    }
}

/// Chunk boundary in char offsets
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChunkBoundaryDTO {
    /// Chunk index
    pub index: usize,
    /// First char of the chunk
    pub start_offset: usize,
    /// One past the last char of the chunk
    pub end_offset: usize,
}

impl From<ChunkBoundaryDTO> for ChunkBoundary {
    fn from(dto: ChunkBoundaryDTO) -> Self {
        ChunkBoundary::new(dto.index, dto.start_offset, dto.end_offset)
    }
}

/// Located position of a needle
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MatchCandidateDTO {
    /// Start char offset
    pub start_offset: usize,
    /// End char offset (exclusive)
    pub end_offset: usize,
    /// Confidence in [0, 1]
    pub confidence: f64,
    /// Tier that produced the match
    pub method: MatchMethod,
    /// Words preceding the match
    pub context_before: String,
    /// Words following the match
    pub context_after: String,
}

impl From<MatchCandidate> for MatchCandidateDTO {
    fn from(candidate: MatchCandidate) -> Self {
        Self {
            start_offset: candidate.start_offset,
            end_offset: candidate.end_offset,
            confidence: candidate.confidence,
            method: candidate.method,
            context_before: candidate.context_before,
            context_after: candidate.context_after,
        }
    }
}

/// Seam between two stitched segments
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OverlapResultDTO {
    /// Overlap window start in the first segment
    pub overlap_start_in_a: usize,
    /// Overlap window start in the second segment
    pub overlap_start_in_b: usize,
    /// Chars removed by deduplication
    pub overlap_length: usize,
    /// Length of the compared windows
    pub window_length: usize,
    /// Confidence in [0, 1]
    pub confidence: f64,
    /// How the overlap was established
    pub method: OverlapMethod,
}

impl From<OverlapResult> for OverlapResultDTO {
    fn from(result: OverlapResult) -> Self {
        Self {
            overlap_start_in_a: result.overlap_start_in_a,
            overlap_start_in_b: result.overlap_start_in_b,
            overlap_length: result.overlap_length,
            window_length: result.window_length,
            confidence: result.confidence,
            method: result.method,
        }
    }
}

/// Stitched text with one overlap per seam
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StitchOutput {
    /// Merged text
    pub text: String,
    /// Seams in segment order
    pub overlaps: Vec<OverlapResultDTO>,
}

impl From<StitchedDocument> for StitchOutput {
    fn from(doc: StitchedDocument) -> Self {
        Self {
            text: doc.text,
            overlaps: doc.overlaps.into_iter().map(Into::into).collect(),
        }
    }
}

/// A range to highlight
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SpanRangeDTO {
    /// Range identifier
    pub id: String,
    /// Start char offset
    #[serde(default)]
    pub start_offset: usize,
    /// End char offset (exclusive)
    #[serde(default)]
    pub end_offset: usize,
    /// Category written to the marker
    pub category: String,
    /// Text the range covered when it was recorded
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub literal_text: Option<String>,
}

impl From<SpanRangeDTO> for SpanRange {
    fn from(dto: SpanRangeDTO) -> Self {
        let range = SpanRange::new(dto.id, dto.start_offset, dto.end_offset, dto.category);
        match dto.literal_text {
            Some(literal) => range.with_literal(literal),
            None => range,
        }
    }
}

/// What happened to one range
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(
    tag = "status",
    rename_all = "snake_case",
    rename_all_fields = "camelCase"
)]
pub enum SpanStatusDTO {
    /// Markers were inserted
    Applied {
        /// Block-local start offset
        start_offset: usize,
        /// Block-local end offset
        end_offset: usize,
        /// Resolution step that placed the range
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
pub struct SpanOutcomeDTO {
    /// Range identifier
    pub id: String,
    /// Result
    #[serde(flatten)]
    pub status: SpanStatusDTO,
}

impl From<SpanOutcome> for SpanOutcomeDTO {
    fn from(outcome: SpanOutcome) -> Self {
        let status = match outcome.status {
            SpanStatus::Applied {
                start_offset,
                end_offset,
                strategy,
                fragments,
            } => SpanStatusDTO::Applied {
                start_offset,
                end_offset,
                strategy,
                fragments,
            },
            SpanStatus::Skipped { reason } => SpanStatusDTO::Skipped { reason },
        };
        Self {
            id: outcome.id,
            status,
        }
    }
}

/// A markup block positioned in its document
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BlockDTO {
    /// Document char offset of the block's first char
    pub start_offset: usize,
    /// Block tree
    pub node: Node,
}

impl From<BlockDTO> for Block<Node> {
    fn from(dto: BlockDTO) -> Self {
        Block {
            start_offset: dto.start_offset,
            node: dto.node,
        }
    }
}

/// Marked block with its audit records
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HighlightOutput {
    /// Rebuilt tree
    pub root: Node,
    /// One record per range
    pub outcomes: Vec<SpanOutcomeDTO>,
}

/// Marked document with its audit records
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HighlightDocumentOutput {
    /// Rebuilt blocks in input order
    pub blocks: Vec<Node>,
    /// Records for every attempted range and block
    pub outcomes: Vec<SpanOutcomeDTO>,
}
