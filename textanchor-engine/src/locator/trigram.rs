//! Unbounded trigram tier, the last resort before estimating

use crate::{
    candidate::MatchMethod,
    config::LocatorConfig,
    locator::{Search, Tier, TierMatch},
};
use textanchor_core::{
    map_normalized_position_to_original, trigrams, Normalization, OffsetRange, TrigramSet,
};

/// Sliding trigram Jaccard scan over normalized, case-folded text
#[derive(Debug, Clone, Copy, Default)]
pub struct TrigramTier;

impl Tier for TrigramTier {
    fn method(&self) -> MatchMethod {
        MatchMethod::Fuzzy
    }

    fn attempt(&self, search: &Search<'_>, config: &LocatorConfig) -> Option<TierMatch> {
        let needle = search.needle.folded();
        let haystack = search.haystack.folded();
        let window = scan(needle, haystack, config)?;
        if window.similarity < config.trigram_threshold {
            return None;
        }

        let range = map_normalized_position_to_original(
            search.haystack.text(),
            window.start,
            needle.len(),
            Normalization::Aggressive,
        )?;
        Some(TierMatch::new(
            range.start,
            range.end,
            window.similarity * config.fuzzy_penalty,
        ))
    }
}

/// Best trigram window found by [`scan`], in the scanned text's coordinates
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) struct Window {
    pub start: usize,
    pub similarity: f64,
}

/// Slide a needle-sized window over `haystack` and keep the best Jaccard
///
/// The stride is `stride_percent` of the needle length and doubles once
/// after `stride_doubling_after` windows. The best coarse window is then
/// refined with step 1 within one stride on either side. Needles shorter
/// than 3 chars have no trigrams and never match.
pub(crate) fn scan(needle: &[char], haystack: &[char], config: &LocatorConfig) -> Option<Window> {
    let m = needle.len();
    if m < 3 || m > haystack.len() {
        return None;
    }

    let target = trigrams(needle);
    let score = |start: usize| jaccard_at(&target, haystack, start, m);
    let last = haystack.len() - m;
    let base_stride = ((m as f64 * config.stride_percent) as usize).max(1);

    let mut stride = base_stride;
    let mut best = Window {
        start: 0,
        similarity: score(0),
    };
    let mut scanned = 1usize;
    let mut pos = 0usize;

    while best.similarity <= config.early_exit && pos < last {
        pos = (pos + stride).min(last);
        let similarity = score(pos);
        if similarity > best.similarity {
            best = Window {
                start: pos,
                similarity,
            };
        }
        scanned += 1;
        if scanned == config.stride_doubling_after {
            stride *= 2;
        }
    }

    if best.similarity <= config.early_exit && stride > 1 {
        let from = best.start.saturating_sub(stride);
        let to = (best.start + stride).min(last);
        for start in from..=to {
            let similarity = score(start);
            if similarity > best.similarity {
                best = Window { start, similarity };
            }
        }
    }

    Some(best)
}

fn jaccard_at(target: &TrigramSet, haystack: &[char], start: usize, len: usize) -> f64 {
    target.jaccard(&trigrams(&haystack[start..start + len]))
}

/// Trigram scan of a raw string inside another, mapped back to `haystack`
pub(crate) fn locate_fuzzy(
    needle: &[char],
    haystack_folded: &[char],
    haystack: &str,
    config: &LocatorConfig,
) -> Option<OffsetRange> {
    let window = scan(needle, haystack_folded, config)?;
    if window.similarity < config.trigram_threshold {
        return None;
    }
    map_normalized_position_to_original(
        haystack,
        window.start,
        needle.len(),
        Normalization::Aggressive,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::locator::LocateRequest;

    fn chars(s: &str) -> Vec<char> {
        s.chars().collect()
    }

    #[test]
    fn test_scan_finds_exact_window() {
        let haystack = chars("lorem ipsum dolor sit amet consectetur adipiscing elit");
        let needle = chars("dolor sit amet");
        let window = scan(&needle, &haystack, &LocatorConfig::default()).unwrap();
        assert_eq!(window.start, 12);
        assert_eq!(window.similarity, 1.0);
    }

    #[test]
    fn test_scan_short_needle_skipped() {
        let haystack = chars("abcdef");
        assert!(scan(&chars("ab"), &haystack, &LocatorConfig::default()).is_none());
    }

    #[test]
    fn test_tier_applies_penalty_and_maps_back() {
        let haystack = "Intro text.  The \u{201c}Quick\u{201d} brown fox jumped over the lazy dog! Outro.";
        let needle = "the \"quick\" brown fox jumps over the lazy dog";
        let search = Search::new(LocateRequest::new(needle, haystack));
        let found = TrigramTier
            .attempt(&search, &LocatorConfig::default())
            .unwrap();

        assert!(found.confidence <= 0.9);
        assert!(found.confidence >= 0.75 * 0.9);
        let matched: String = haystack
            .chars()
            .skip(found.range.start)
            .take(found.range.len())
            .collect();
        assert!(matched.contains("brown fox jumped"));
    }

    #[test]
    fn test_tier_rejects_unrelated_text() {
        let search = Search::new(LocateRequest::new(
            "completely unrelated sentence",
            "the quick brown fox jumps over the lazy dog again and again",
        ));
        assert!(TrigramTier
            .attempt(&search, &LocatorConfig::default())
            .is_none());
    }
}
