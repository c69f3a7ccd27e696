//! Exact tier: literal, then whitespace-normalized substring search

use crate::{
    candidate::MatchMethod,
    config::LocatorConfig,
    locator::{Search, Tier, TierMatch},
};
use textanchor_core::{
    char_len, find_str, map_normalized_position_to_original, normalize_whitespace, Normalization,
    OffsetRange,
};

/// Literal substring search with a whitespace-insensitive second pass
#[derive(Debug, Clone, Copy, Default)]
pub struct ExactTier;

impl Tier for ExactTier {
    fn method(&self) -> MatchMethod {
        MatchMethod::Exact
    }

    fn attempt(&self, search: &Search<'_>, _config: &LocatorConfig) -> Option<TierMatch> {
        find_exact(search.haystack.text(), search.haystack.whitespace(), search.needle.text())
            .map(|range| TierMatch::new(range.start, range.end, 1.0))
    }
}

/// First occurrence of `needle`, literally or after whitespace collapse
///
/// `haystack_ws` must be `normalize_whitespace(haystack)`.
pub(crate) fn find_exact(haystack: &str, haystack_ws: &str, needle: &str) -> Option<OffsetRange> {
    if needle.is_empty() {
        return None;
    }
    if let Some(start) = find_str(haystack, needle) {
        return Some(OffsetRange::new(start, start + char_len(needle)));
    }

    let needle_ws = normalize_whitespace(needle);
    if needle_ws.is_empty() {
        return None;
    }
    let norm_start = find_str(haystack_ws, &needle_ws)?;
    map_normalized_position_to_original(
        haystack,
        norm_start,
        char_len(&needle_ws),
        Normalization::Whitespace,
    )
}
