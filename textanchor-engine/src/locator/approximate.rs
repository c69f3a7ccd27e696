//! Approximate tier: proportional position estimate

use crate::{
    candidate::MatchMethod,
    config::LocatorConfig,
    locator::{Search, Tier, TierMatch},
};

/// Estimates the position from the chunk's place in its sequence
#[derive(Debug, Clone, Copy, Default)]
pub struct ApproximateTier;

impl ApproximateTier {
    /// Always-successful estimate with `min_confidence`
    ///
    /// Without a chunk position, or with a single chunk, the estimate is 0.
    pub fn estimate(&self, search: &Search<'_>, config: &LocatorConfig) -> TierMatch {
        let n = search.haystack.len();
        let m = search.needle.len();
        let room = n.saturating_sub(m);

        let relative = search
            .request
            .position
            .map_or(0.0, |position| position.relative());
        let start = ((relative * room as f64).round() as usize).min(room);
        let end = (start + m).min(n);

        TierMatch::new(start, end, config.min_confidence)
    }
}

impl Tier for ApproximateTier {
    fn method(&self) -> MatchMethod {
        MatchMethod::Approximate
    }

    fn attempt(&self, search: &Search<'_>, config: &LocatorConfig) -> Option<TierMatch> {
        Some(self.estimate(search, config))
    }
}
