//! Chunk boundary tables and chunk positions

use crate::error::{EngineError, Result};
use serde::{Deserialize, Serialize};
use textanchor_core::OffsetRange;

/// One entry of an ordered chunk boundary table, in char offsets
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChunkBoundary {
    /// Chunk index
    pub index: usize,
    /// Start offset in the haystack
    pub start_offset: usize,
    /// End offset (exclusive) in the haystack
    pub end_offset: usize,
}

impl ChunkBoundary {
    /// Create a boundary
    pub fn new(index: usize, start_offset: usize, end_offset: usize) -> Self {
        Self {
            index,
            start_offset,
            end_offset,
        }
    }

    /// Length in chars
    pub fn len(&self) -> usize {
        self.end_offset.saturating_sub(self.start_offset)
    }

    /// Whether the chunk covers nothing
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Where a chunk sits in its extraction sequence
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChunkPosition {
    /// Zero-based chunk index
    pub index: usize,
    /// Number of chunks in the sequence
    pub total: usize,
}

impl ChunkPosition {
    /// Create a position
    pub fn new(index: usize, total: usize) -> Self {
        Self { index, total }
    }

    /// Reject positions that cannot exist
    pub fn validate(&self) -> Result<()> {
        if self.total == 0 {
            return Err(EngineError::invalid_input("total chunks must be positive"));
        }
        if self.index >= self.total {
            return Err(EngineError::invalid_input(format!(
                "chunk index {} out of range for {} chunks",
                self.index, self.total
            )));
        }
        Ok(())
    }

    /// Fraction of the sequence preceding this chunk, in `[0, 1]`
    pub fn relative(&self) -> f64 {
        if self.total <= 1 {
            0.0
        } else {
            self.index as f64 / (self.total - 1) as f64
        }
    }
}

/// Check every boundary in a table
pub fn validate_boundaries(boundaries: &[ChunkBoundary]) -> Result<()> {
    match boundaries.iter().find(|b| b.end_offset < b.start_offset) {
        Some(bad) => Err(EngineError::InvalidChunkBoundary { index: bad.index }),
        None => Ok(()),
    }
}

/// Search window spanning the chunks within `radius` of `hint`
///
/// Returns `None` when `hint` is not in the table. The window is clamped to
/// `limit` chars.
pub fn neighborhood(
    boundaries: &[ChunkBoundary],
    hint: usize,
    radius: usize,
    limit: usize,
) -> Option<OffsetRange> {
    if !boundaries.iter().any(|b| b.index == hint) {
        return None;
    }

    let low = hint.saturating_sub(radius);
    let high = hint.saturating_add(radius);
    let (start, end) = boundaries
        .iter()
        .filter(|b| b.index >= low && b.index <= high)
        .fold((usize::MAX, 0usize), |(start, end), b| {
            (start.min(b.start_offset), end.max(b.end_offset))
        });

    let start = start.min(limit);
    let end = end.min(limit);
    (start < end).then(|| OffsetRange::new(start, end))
}
