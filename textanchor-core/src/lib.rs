//! Pure text primitives for fuzzy text relocation
//!
//! This crate holds the deterministic building blocks shared by every
//! matching strategy in the engine:
//!
//! - **Normalization**: whitespace collapse, quote/dash unification and the
//!   position mapping that carries a match found in normalized text back to
//!   the original text.
//! - **Similarity**: trigram-set Jaccard, Levenshtein similarity and a
//!   bounded semi-global alignment.
//! - **Char offsets**: every offset is a `char` index, never a byte index.
//!
//! The crate has no third-party dependencies and performs no I/O.

#![warn(missing_docs)]

pub mod error;
pub mod normalize;
pub mod similarity;
pub mod text;

pub use error::{CoreError, Result};
pub use normalize::{
    fold_case, fold_equivalents, map_normalized_position_to_original, normalize_aggressive,
    normalize_compact, normalize_paragraphs, normalize_whitespace, Normalization, OffsetRange,
};
pub use similarity::{
    best_alignment, edit_similarity, jaccard, levenshtein, trigrams, Alignment, TrigramSet,
};
pub use text::{char_len, find_chars, find_str, slice_chars};
