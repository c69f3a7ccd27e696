//! Context-guided tier: bounded alignment next to a located anchor

use crate::{
    candidate::MatchMethod,
    config::LocatorConfig,
    locator::{exact::find_exact, trigram::locate_fuzzy, Prepared, Search, Tier, TierMatch},
};
use textanchor_core::{best_alignment, fold_case, normalize_aggressive, OffsetRange};
use tracing::trace;

/// Uses `before`/`after` context strings to narrow the search
#[derive(Debug, Clone, Copy, Default)]
pub struct ContextGuidedTier;

impl Tier for ContextGuidedTier {
    fn method(&self) -> MatchMethod {
        MatchMethod::ContextGuided
    }

    fn attempt(&self, search: &Search<'_>, config: &LocatorConfig) -> Option<TierMatch> {
        let context = search.request.context;
        let m = search.needle.len();

        let expected_start = context
            .before
            .and_then(|before| find_anchor(&search.haystack, before, config))
            .map(|anchor| anchor.end)
            .or_else(|| {
                context
                    .after
                    .and_then(|after| find_anchor(&search.haystack, after, config))
                    .map(|anchor| anchor.start.saturating_sub(m))
            })?;
        trace!(expected_start, "anchor context located");

        let margin = ((config.context_region_factor - 1.0) / 2.0 * m as f64).ceil() as usize;
        let region = OffsetRange::new(
            expected_start.saturating_sub(margin),
            (expected_start + m + margin).min(search.haystack.len()),
        );
        bounded_match(search, region, config).map(|hit| {
            TierMatch::new(
                hit.range.start,
                hit.range.end,
                hit.confidence * config.context_penalty,
            )
        })
    }
}

/// Exact, whitespace-insensitive, then trigram search for an anchor string
fn find_anchor(
    haystack: &Prepared<'_>,
    anchor: &str,
    config: &LocatorConfig,
) -> Option<OffsetRange> {
    find_exact(haystack.text(), haystack.whitespace(), anchor).or_else(|| {
        let folded: Vec<char> = fold_case(&normalize_aggressive(anchor)).chars().collect();
        locate_fuzzy(&folded, haystack.folded(), haystack.text(), config)
    })
}

/// Edit-distance alignment of the needle inside `region`
///
/// Shared with the chunk-bounded tier. Both sides are compared through the
/// length-preserving fold, so alignment offsets are haystack offsets. The
/// returned confidence carries no penalty.
pub(crate) fn bounded_match(
    search: &Search<'_>,
    region: OffsetRange,
    config: &LocatorConfig,
) -> Option<TierMatch> {
    if region.is_empty() {
        return None;
    }

    let needle = search.needle.equivalents();
    let haystack = &search.haystack.equivalents()[region.start..region.end];
    let max_span = (needle.len() as f64 * config.bounded_span_factor).ceil() as usize;

    let alignment = best_alignment(needle, haystack, max_span, config.early_exit)?;
    if alignment.similarity < config.bounded_threshold {
        return None;
    }
    Some(TierMatch::new(
        region.start + alignment.start,
        region.start + alignment.end,
        alignment.similarity,
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::locator::LocateRequest;

    const HAYSTACK: &str = "Chapter one begins here. The committee reviewed the \
        anual budgett in detail before voting. Chapter two follows.";

    #[test]
    fn test_before_anchor_guides_search() {
        let request = LocateRequest::new("The committee reviewed the annual budget", HAYSTACK)
            .with_context(Some("Chapter one begins here."), None);
        let search = Search::new(request);
        let found = ContextGuidedTier
            .attempt(&search, &LocatorConfig::default())
            .unwrap();

        let matched: String = HAYSTACK
            .chars()
            .skip(found.range.start)
            .take(found.range.len())
            .collect();
        assert_eq!(found.range.start, 25);
        assert_eq!(matched, "The committee reviewed the anual budget");
        assert!(found.confidence >= 0.75 * 0.95);
        assert!(found.confidence < 0.95);
    }

    #[test]
    fn test_after_anchor_guides_search() {
        let request = LocateRequest::new("in detail before voting.", HAYSTACK)
            .with_context(None, Some("Chapter two follows."));
        let search = Search::new(request);
        let found = ContextGuidedTier
            .attempt(&search, &LocatorConfig::default())
            .unwrap();

        let matched: String = HAYSTACK
            .chars()
            .skip(found.range.start)
            .take(found.range.len())
            .collect();
        assert_eq!(matched, "in detail before voting.");
    }

    #[test]
    fn test_missing_context_falls_through() {
        let search = Search::new(LocateRequest::new("budget", HAYSTACK));
        assert!(ContextGuidedTier
            .attempt(&search, &LocatorConfig::default())
            .is_none());
    }
}
