//! Match candidates produced by the locator

use serde::{Deserialize, Serialize};
use std::fmt;

/// Tier that produced a match
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchMethod {
    /// Literal or whitespace-normalized substring
    Exact,
    /// Bounded alignment next to anchor context
    ContextGuided,
    /// Bounded alignment inside neighboring chunks
    ChunkBounded,
    /// Unbounded trigram scan
    Fuzzy,
    /// Proportional position estimate
    Approximate,
}

impl MatchMethod {
    /// Stable lowercase name
    pub fn as_str(&self) -> &'static str {
        match self {
            MatchMethod::Exact => "exact",
            MatchMethod::ContextGuided => "context_guided",
            MatchMethod::ChunkBounded => "chunk_bounded",
            MatchMethod::Fuzzy => "fuzzy",
            MatchMethod::Approximate => "approximate",
        }
    }
}

impl fmt::Display for MatchMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Where a needle was placed in a haystack, and how sure the locator is
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatchCandidate {
    /// Start char offset
    pub start_offset: usize,
    /// End char offset (exclusive)
    pub end_offset: usize,
    /// Confidence in `[0, 1]`
    pub confidence: f64,
    /// Tier that produced the match
    pub method: MatchMethod,
    /// A few words preceding the match
    pub context_before: String,
    /// A few words following the match
    pub context_after: String,
}

impl MatchCandidate {
    /// Length of the matched span in chars
    pub fn len(&self) -> usize {
        self.end_offset - self.start_offset
    }

    /// Whether the span is empty
    pub fn is_empty(&self) -> bool {
        self.start_offset == self.end_offset
    }
}

/// Up to `words` whole words on each side of `[start, end)`
///
/// Only `window` chars on each side are inspected, so a word cut by the
/// window edge is kept in its truncated form.
pub(crate) fn surrounding_words(
    chars: &[char],
    start: usize,
    end: usize,
    window: usize,
    words: usize,
) -> (String, String) {
    let before: String = chars[start.saturating_sub(window)..start].iter().collect();
    let after_end = end.saturating_add(window).min(chars.len());
    let after: String = chars[end..after_end].iter().collect();

    let before_words: Vec<&str> = before.split_whitespace().collect();
    let skip = before_words.len().saturating_sub(words);
    let context_before = before_words[skip..].join(" ");

    let context_after = after
        .split_whitespace()
        .take(words)
        .collect::<Vec<_>>()
        .join(" ");

    (context_before, context_after)
}
