//! Chunk-bounded tier: alignment restricted to neighboring chunks

use crate::{
    candidate::MatchMethod,
    chunker::neighborhood,
    config::LocatorConfig,
    locator::{context::bounded_match, Search, Tier, TierMatch},
};
use tracing::trace;

/// Searches only the chunks around the hinted chunk
#[derive(Debug, Clone, Copy, Default)]
pub struct ChunkBoundedTier;

impl Tier for ChunkBoundedTier {
    fn method(&self) -> MatchMethod {
        MatchMethod::ChunkBounded
    }

    fn attempt(&self, search: &Search<'_>, config: &LocatorConfig) -> Option<TierMatch> {
        let hint = search.request.chunk_hint?;
        let Some(region) = neighborhood(
            hint.boundaries,
            hint.index,
            config.chunk_radius,
            search.haystack.len(),
        ) else {
            trace!(hint = hint.index, "chunk hint not in boundary table");
            return None;
        };
        bounded_match(search, region, config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{chunker::ChunkBoundary, locator::LocateRequest};

    fn document() -> (String, Vec<ChunkBoundary>) {
        let paragraphs = [
            "Opening remarks about the quarterly results were brief.",
            "Revenue grew in every region except the northern one.",
            "Costs were contained through careful supplier negotiation.",
            "The board approved a dividend increase for shareholders.",
            "Closing remarks thanked the staff for their dedication.",
        ];
        let mut text = String::new();
        let mut table = Vec::new();
        for (index, p) in paragraphs.iter().enumerate() {
            let start = text.chars().count();
            text.push_str(p);
            text.push(' ');
            table.push(ChunkBoundary::new(index, start, text.chars().count()));
        }
        (text, table)
    }

    #[test]
    fn test_match_inside_neighborhood() {
        let (text, table) = document();
        let needle = "Costs were contianed through carefull supplier negotiation.";
        let search = Search::new(LocateRequest::new(needle, &text).with_chunk_hint(2, &table));
        let found = ChunkBoundedTier
            .attempt(&search, &LocatorConfig::default())
            .unwrap();

        let matched: String = text
            .chars()
            .skip(found.range.start)
            .take(found.range.len())
            .collect();
        assert_eq!(found.range.start, table[2].start_offset);
        assert_eq!(matched, "Costs were contained through careful supplier negotiation.");
        assert!(found.confidence >= 0.75);
        assert!(found.confidence < 1.0);
    }

    #[test]
    fn test_unknown_hint_skips_tier() {
        let (text, table) = document();
        let search = Search::new(
            LocateRequest::new("Costs were contained", &text).with_chunk_hint(99, &table),
        );
        assert!(ChunkBoundedTier
            .attempt(&search, &LocatorConfig::default())
            .is_none());
    }

    #[test]
    fn test_no_hint_skips_tier() {
        let (text, _) = document();
        let search = Search::new(LocateRequest::new("Costs were contained", &text));
        assert!(ChunkBoundedTier
            .attempt(&search, &LocatorConfig::default())
            .is_none());
    }
}
