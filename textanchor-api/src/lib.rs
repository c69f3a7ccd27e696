//! Public API for textanchor
//!
//! This crate provides a stable interface for placing text fragments inside
//! documents, stitching batch-processed segments and rendering highlights,
//! hiding the engine's internal types behind serializable DTOs.

#![warn(missing_docs)]

pub mod config;
pub mod dto;
pub mod error;

use error::Result;
use textanchor_engine::{
    BatchStitcher, Block, ChunkBoundary, LocateRequest, Locator, LocatorConfig, SpanMarker,
    SpanRange,
};
use tracing::debug;

// Re-export key types
pub use config::{Config, ConfigBuilder};
pub use dto::{
    BlockDTO, ChunkBoundaryDTO, HighlightDocumentOutput, HighlightOutput, LocateMode,
    LocateQuery, MatchCandidateDTO, OverlapResultDTO, SpanOutcomeDTO, SpanRangeDTO,
    SpanStatusDTO, StitchOutput,
};
pub use error::ApiError;
pub use textanchor_engine::{Element, MatchMethod, Node, OverlapMethod, ResolveStrategy};

/// Main entry point for relocation, stitching and highlighting
#[derive(Debug)]
pub struct TextAnchor {
    chunks: Locator,
    annotations: Locator,
    stitcher: BatchStitcher,
    marker: SpanMarker,
    config: Config,
}

impl TextAnchor {
    /// Create with the default configuration
    pub fn new() -> Result<Self> {
        Self::with_config(Config::default())
    }

    /// Create with a custom configuration
    ///
    /// Annotation recovery uses the configured locator with its trigram
    /// threshold lowered to the recovery preset when it is stricter.
    pub fn with_config(config: Config) -> Result<Self> {
        let chunk_config = config.locator().clone();
        let recovery_threshold = LocatorConfig::annotation_recovery().trigram_threshold;
        let annotation_config = LocatorConfig {
            trigram_threshold: chunk_config.trigram_threshold.min(recovery_threshold),
            ..chunk_config.clone()
        };

        Ok(Self {
            chunks: Locator::new(chunk_config)?,
            annotations: Locator::new(annotation_config)?,
            stitcher: BatchStitcher::new(config.stitcher().clone())?,
            marker: SpanMarker::new(config.marker().clone())?,
            config,
        })
    }

    /// Get the current configuration
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Run a serializable locate query
    pub fn locate(&self, query: &LocateQuery) -> Result<MatchCandidateDTO> {
        let mut request = LocateRequest::new(&query.needle, &query.haystack);

        match (query.chunk_index, query.total_chunks) {
            (Some(index), Some(total)) => request = request.with_position(index, total),
            (None, None) => {}
            _ => {
                return Err(ApiError::Query(
                    "chunkIndex and totalChunks must be given together".to_string(),
                ))
            }
        }

        request = request.with_context(
            query.context_before.as_deref(),
            query.context_after.as_deref(),
        );

        let boundaries: Vec<ChunkBoundary> =
            query.boundaries.iter().copied().map(Into::into).collect();
        match (query.hint_index, boundaries.is_empty()) {
            (Some(hint), false) => request = request.with_chunk_hint(hint, &boundaries),
            (None, true) => {}
            _ => {
                return Err(ApiError::Query(
                    "hintIndex and boundaries must be given together".to_string(),
                ))
            }
        }

        let locator = match query.mode {
            LocateMode::Chunk => &self.chunks,
            LocateMode::Annotation => &self.annotations,
        };
        let candidate = locator.locate(request)?;
        debug!(
            mode = ?query.mode,
            method = %candidate.method,
            confidence = candidate.confidence,
            "query located"
        );
        Ok(candidate.into())
    }

    /// Place an extracted chunk inside its source document
    pub fn locate_chunk(
        &self,
        chunk: &str,
        document: &str,
        index: usize,
        total: usize,
    ) -> Result<MatchCandidateDTO> {
        let request = LocateRequest::new(chunk, document).with_position(index, total);
        Ok(self.chunks.locate(request)?.into())
    }

    /// Recover a recorded annotation in a re-extracted document
    pub fn recover_annotation(
        &self,
        text: &str,
        document: &str,
        before: Option<&str>,
        after: Option<&str>,
    ) -> Result<MatchCandidateDTO> {
        let request = LocateRequest::new(text, document).with_context(before, after);
        Ok(self.annotations.locate(request)?.into())
    }

    /// Stitch two adjacent segments
    pub fn stitch(&self, a: &str, b: &str) -> StitchOutput {
        self.stitcher.stitch(a, b).into()
    }

    /// Stitch an ordered list of segments
    pub fn stitch_all<S: AsRef<str>>(&self, segments: &[S]) -> StitchOutput {
        self.stitcher.stitch_all(segments).into()
    }

    /// Highlight ranges inside one block; offsets are block-local
    pub fn highlight(&self, root: &Node, ranges: &[SpanRangeDTO]) -> Result<HighlightOutput> {
        let ranges: Vec<SpanRange> = ranges.iter().cloned().map(Into::into).collect();
        let marked = self.marker.mark(root, &ranges)?;
        Ok(HighlightOutput {
            root: marked.root,
            outcomes: marked.outcomes.into_iter().map(Into::into).collect(),
        })
    }

    /// Highlight ranges across blocks; offsets are document offsets
    pub fn highlight_document(
        &self,
        blocks: &[BlockDTO],
        ranges: &[SpanRangeDTO],
    ) -> Result<HighlightDocumentOutput> {
        let blocks: Vec<Block<Node>> = blocks.iter().cloned().map(Into::into).collect();
        let ranges: Vec<SpanRange> = ranges.iter().cloned().map(Into::into).collect();
        let marked = self.marker.mark_document(&blocks, &ranges)?;
        Ok(HighlightDocumentOutput {
            blocks: marked.blocks,
            outcomes: marked.outcomes.into_iter().map(Into::into).collect(),
        })
    }
}

// Convenience functions

/// Place a chunk with the default configuration
pub fn locate_chunk(
    chunk: &str,
    document: &str,
    index: usize,
    total: usize,
) -> Result<MatchCandidateDTO> {
    TextAnchor::new()?.locate_chunk(chunk, document, index, total)
}

/// Stitch segments with the default configuration
pub fn stitch_segments<S: AsRef<str>>(segments: &[S]) -> Result<StitchOutput> {
    Ok(TextAnchor::new()?.stitch_all(segments))
}
