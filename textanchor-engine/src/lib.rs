//! Orchestration for fuzzy text relocation
//!
//! This crate composes the pure primitives of `textanchor-core` into the
//! three engine components:
//!
//! - [`Locator`]: places a chunk or a recorded annotation inside a text body
//!   through an ordered cascade of increasingly approximate tiers.
//! - [`BatchStitcher`]: merges overlapping windows of a batch-processed
//!   document into one stream.
//! - [`SpanMarker`]: renders located ranges into a markup tree without
//!   breaking existing structure.
//!
//! Every operation is synchronous and pure over its inputs.

#![warn(missing_docs)]

pub mod candidate;
pub mod chunker;
pub mod config;
pub mod error;
pub mod locator;
pub mod marker;
pub mod markup;
pub mod stitcher;

// Re-export key types
pub use candidate::{MatchCandidate, MatchMethod};
pub use chunker::{ChunkBoundary, ChunkPosition};
pub use config::{EngineConfig, LocatorConfig, MarkerConfig, StitchConfig};
pub use error::{EngineError, Result};
pub use locator::{LocateRequest, Locator, Tier, TierMatch};
pub use marker::{
    Block, MarkedBlock, MarkedDocument, ResolveStrategy, SpanMarker, SpanOutcome, SpanRange,
    SpanStatus,
};
pub use markup::{Element, Marker, MarkupNode, Node};
pub use stitcher::{BatchStitcher, OverlapMethod, OverlapResult, StitchedDocument};

// Re-export from core for convenience
pub use textanchor_core::{normalize_aggressive, normalize_paragraphs, normalize_whitespace};
