//! Multi-tier text locator
//!
//! A needle is placed in a haystack by folding over an ordered list of
//! tiers. Each tier either qualifies with a [`TierMatch`] or falls through;
//! the approximate tier always succeeds structurally, so `locate` never
//! reports "not found".

pub mod approximate;
pub mod bounded;
pub mod context;
pub mod exact;
pub mod trigram;

pub use approximate::ApproximateTier;
pub use bounded::ChunkBoundedTier;
pub use context::ContextGuidedTier;
pub use exact::ExactTier;
pub use trigram::TrigramTier;

use crate::{
    candidate::{surrounding_words, MatchCandidate, MatchMethod},
    chunker::{validate_boundaries, ChunkBoundary, ChunkPosition},
    config::LocatorConfig,
    error::Result,
};
use std::sync::OnceLock;
use textanchor_core::{
    fold_case, fold_equivalents, normalize_aggressive, normalize_whitespace, OffsetRange,
};
use tracing::{debug, trace};

/// Text surrounding the needle where it was originally recorded
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct AnchorContext<'a> {
    /// Text immediately before the needle
    pub before: Option<&'a str>,
    /// Text immediately after the needle
    pub after: Option<&'a str>,
}

/// Hinted chunk together with the boundary table it indexes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChunkHint<'a> {
    /// Index of the chunk the needle probably came from
    pub index: usize,
    /// Ordered chunk boundary table of the haystack
    pub boundaries: &'a [ChunkBoundary],
}

/// Everything known about one placement request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LocateRequest<'a> {
    /// Text to place
    pub needle: &'a str,
    /// Text to search
    pub haystack: &'a str,
    /// Position of the needle's chunk in its sequence
    pub position: Option<ChunkPosition>,
    /// Anchor context strings
    pub context: AnchorContext<'a>,
    /// Chunk hint for bounded search
    pub chunk_hint: Option<ChunkHint<'a>>,
}

impl<'a> LocateRequest<'a> {
    /// Request with no hints
    pub fn new(needle: &'a str, haystack: &'a str) -> Self {
        Self {
            needle,
            haystack,
            position: None,
            context: AnchorContext::default(),
            chunk_hint: None,
        }
    }

    /// Attach the chunk's position in its sequence
    pub fn with_position(mut self, index: usize, total: usize) -> Self {
        self.position = Some(ChunkPosition::new(index, total));
        self
    }

    /// Attach anchor context; empty strings count as absent
    pub fn with_context(mut self, before: Option<&'a str>, after: Option<&'a str>) -> Self {
        self.context = AnchorContext {
            before: before.filter(|s| !s.trim().is_empty()),
            after: after.filter(|s| !s.trim().is_empty()),
        };
        self
    }

    /// Attach a chunk hint
    pub fn with_chunk_hint(mut self, index: usize, boundaries: &'a [ChunkBoundary]) -> Self {
        self.chunk_hint = Some(ChunkHint { index, boundaries });
        self
    }

    fn validate(&self) -> Result<()> {
        if let Some(position) = &self.position {
            position.validate()?;
        }
        if let Some(hint) = &self.chunk_hint {
            validate_boundaries(hint.boundaries)?;
        }
        Ok(())
    }
}

/// A text with lazily computed normalized views
///
/// Tiers only pay for the views they use.
#[derive(Debug)]
pub struct Prepared<'a> {
    text: &'a str,
    chars: Vec<char>,
    whitespace: OnceLock<String>,
    folded: OnceLock<Vec<char>>,
    equivalents: OnceLock<Vec<char>>,
}

impl<'a> Prepared<'a> {
    /// Wrap `text`
    pub fn new(text: &'a str) -> Self {
        Self {
            text,
            chars: text.chars().collect(),
            whitespace: OnceLock::new(),
            folded: OnceLock::new(),
            equivalents: OnceLock::new(),
        }
    }

    /// Original text
    pub fn text(&self) -> &'a str {
        self.text
    }

    /// Original chars
    pub fn chars(&self) -> &[char] {
        &self.chars
    }

    /// Length in chars
    pub fn len(&self) -> usize {
        self.chars.len()
    }

    /// Whether the text is empty
    pub fn is_empty(&self) -> bool {
        self.chars.is_empty()
    }

    /// Whitespace-normalized text
    pub fn whitespace(&self) -> &str {
        self.whitespace.get_or_init(|| normalize_whitespace(self.text))
    }

    /// Aggressive-normalized, case-folded chars
    pub fn folded(&self) -> &[char] {
        self.folded
            .get_or_init(|| fold_case(&normalize_aggressive(self.text)).chars().collect())
    }

    /// Length-preserving fold, offsets match [`Prepared::chars`]
    pub fn equivalents(&self) -> &[char] {
        self.equivalents.get_or_init(|| fold_equivalents(self.text))
    }
}

/// A request with its needle and haystack prepared
#[derive(Debug)]
pub struct Search<'a> {
    /// The original request
    pub request: LocateRequest<'a>,
    /// Prepared needle
    pub needle: Prepared<'a>,
    /// Prepared haystack
    pub haystack: Prepared<'a>,
}

impl<'a> Search<'a> {
    /// Prepare a request
    pub fn new(request: LocateRequest<'a>) -> Self {
        Self {
            needle: Prepared::new(request.needle),
            haystack: Prepared::new(request.haystack),
            request,
        }
    }
}

/// A qualifying tier result
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TierMatch {
    /// Matched range in haystack chars
    pub range: OffsetRange,
    /// Confidence after any tier penalty
    pub confidence: f64,
}

impl TierMatch {
    /// Create a tier match
    pub fn new(start: usize, end: usize, confidence: f64) -> Self {
        Self {
            range: OffsetRange::new(start, end),
            confidence,
        }
    }
}

/// One strategy of the cascade
pub trait Tier: Send + Sync {
    /// Method reported when this tier qualifies
    fn method(&self) -> MatchMethod;

    /// Try to place the needle; `None` falls through to the next tier
    fn attempt(&self, search: &Search<'_>, config: &LocatorConfig) -> Option<TierMatch>;
}

/// Locator running the tier cascade
pub struct Locator {
    config: LocatorConfig,
    tiers: Vec<Box<dyn Tier>>,
    fallback: ApproximateTier,
}

impl Locator {
    /// Create a locator with the standard cascade
    pub fn new(config: LocatorConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            config,
            tiers: vec![
                Box::new(ExactTier),
                Box::new(ContextGuidedTier),
                Box::new(ChunkBoundedTier),
                Box::new(TrigramTier),
            ],
            fallback: ApproximateTier,
        })
    }

    /// Active configuration
    pub fn config(&self) -> &LocatorConfig {
        &self.config
    }

    /// Place a needle in a haystack
    ///
    /// Fails only when the request itself is malformed.
    pub fn locate(&self, request: LocateRequest<'_>) -> Result<MatchCandidate> {
        request.validate()?;
        let search = Search::new(request);

        let searchable = !search.needle.is_empty() && search.needle.len() <= search.haystack.len();
        let found = if searchable {
            self.tiers.iter().find_map(|tier| {
                let attempt = tier.attempt(&search, &self.config);
                if attempt.is_none() {
                    trace!(method = %tier.method(), "tier did not qualify");
                }
                attempt.map(|m| (tier.method(), m))
            })
        } else {
            None
        };

        let (method, found) = match found {
            Some(hit) => hit,
            None => {
                let estimate = self.fallback.estimate(&search, &self.config);
                (self.fallback.method(), estimate)
            }
        };

        debug!(
            method = %method,
            start = found.range.start,
            end = found.range.end,
            confidence = found.confidence,
            "located needle"
        );

        let (context_before, context_after) = surrounding_words(
            search.haystack.chars(),
            found.range.start,
            found.range.end,
            self.config.context_window_chars,
            self.config.context_words,
        );

        Ok(MatchCandidate {
            start_offset: found.range.start,
            end_offset: found.range.end,
            confidence: found.confidence.clamp(0.0, 1.0),
            method,
            context_before,
            context_after,
        })
    }
}

impl std::fmt::Debug for Locator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Locator")
            .field("config", &self.config)
            .field(
                "tiers",
                &self.tiers.iter().map(|t| t.method()).collect::<Vec<_>>(),
            )
            .finish()
    }
}
