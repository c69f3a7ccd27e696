//! Configuration types for the engine
//!
//! Every threshold is an explicit, immutable value handed to the component
//! that uses it. `Default` gives the documented defaults.

use crate::error::{EngineError, Result};
use serde::{Deserialize, Serialize};

/// Locator cascade configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LocatorConfig {
    /// Minimum trigram Jaccard similarity for the unbounded fuzzy tier
    pub trigram_threshold: f64,
    /// Confidence reported by the approximate tier
    pub min_confidence: f64,
    /// Trigram window stride as a fraction of the needle length
    pub stride_percent: f64,
    /// Chars inspected on each side of a match when extracting context
    pub context_window_chars: usize,
    /// Words of context kept on each side of a match
    pub context_words: usize,
    /// Minimum edit similarity for the context-guided and chunk-bounded tiers
    pub bounded_threshold: f64,
    /// Multiplier applied to context-guided confidence
    pub context_penalty: f64,
    /// Multiplier applied to unbounded fuzzy confidence
    pub fuzzy_penalty: f64,
    /// Any similarity above this stops a scan early
    pub early_exit: f64,
    /// Trigram windows scanned before the stride is doubled
    pub stride_doubling_after: usize,
    /// Chunks on each side of the hinted chunk included in the search window
    pub chunk_radius: usize,
    /// Context-guided search region as a multiple of the needle length
    pub context_region_factor: f64,
    /// Longest aligned span as a multiple of the needle length
    pub bounded_span_factor: f64,
}

impl Default for LocatorConfig {
    fn default() -> Self {
        Self {
            trigram_threshold: 0.75,
            min_confidence: 0.3,
            stride_percent: 0.10,
            context_window_chars: 100,
            context_words: 5,
            bounded_threshold: 0.75,
            context_penalty: 0.95,
            fuzzy_penalty: 0.9,
            early_exit: 0.95,
            stride_doubling_after: 100,
            chunk_radius: 2,
            context_region_factor: 1.3,
            bounded_span_factor: 1.2,
        }
    }
}

impl LocatorConfig {
    /// Preset for placing freshly extracted chunks
    pub fn chunk_placement() -> Self {
        Self::default()
    }

    /// Preset for recovering previously recorded annotations
    pub fn annotation_recovery() -> Self {
        Self {
            trigram_threshold: 0.65,
            ..Self::default()
        }
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<()> {
        check_unit("locator.trigram_threshold", self.trigram_threshold)?;
        check_unit("locator.min_confidence", self.min_confidence)?;
        check_unit("locator.bounded_threshold", self.bounded_threshold)?;
        check_unit("locator.context_penalty", self.context_penalty)?;
        check_unit("locator.fuzzy_penalty", self.fuzzy_penalty)?;
        check_unit("locator.early_exit", self.early_exit)?;

        if !(self.stride_percent > 0.0 && self.stride_percent <= 1.0) {
            return Err(EngineError::ConfigError(
                "locator.stride_percent must be in (0, 1]".into(),
            ));
        }
        if self.context_region_factor < 1.0 || self.bounded_span_factor < 1.0 {
            return Err(EngineError::ConfigError(
                "locator region and span factors must be at least 1.0".into(),
            ));
        }
        Ok(())
    }
}

/// Batch stitching configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StitchConfig {
    /// Shortest overlap considered
    pub min_overlap_length: usize,
    /// Fraction of each segment searched for the overlap
    pub max_overlap_percent: f64,
    /// Minimum trigram similarity for a fuzzy overlap
    pub overlap_threshold: f64,
    /// Inserted between segments when no overlap is found
    pub separator: String,
    /// Decrement between candidate lengths in the fuzzy tier
    pub fuzzy_length_step: usize,
    /// Window slide step in the fuzzy tier
    pub fuzzy_slide_step: usize,
    /// How far each fuzzy window may slide away from its anchor
    pub max_fuzzy_shift: usize,
    /// Longest window compared in the fuzzy tier
    pub max_fuzzy_length: usize,
    /// Any similarity above this stops the fuzzy scan
    pub early_exit: f64,
}

impl Default for StitchConfig {
    fn default() -> Self {
        Self {
            min_overlap_length: 20,
            max_overlap_percent: 0.8,
            overlap_threshold: 0.80,
            separator: "\n\n---\n\n".to_string(),
            fuzzy_length_step: 20,
            fuzzy_slide_step: 10,
            max_fuzzy_shift: 200,
            max_fuzzy_length: 2_000,
            early_exit: 0.95,
        }
    }
}

impl StitchConfig {
    /// Validate the configuration
    pub fn validate(&self) -> Result<()> {
        check_unit("stitcher.max_overlap_percent", self.max_overlap_percent)?;
        check_unit("stitcher.overlap_threshold", self.overlap_threshold)?;
        check_unit("stitcher.early_exit", self.early_exit)?;

        if self.min_overlap_length == 0 {
            return Err(EngineError::ConfigError(
                "stitcher.min_overlap_length must be greater than 0".into(),
            ));
        }
        if self.fuzzy_length_step == 0 || self.fuzzy_slide_step == 0 {
            return Err(EngineError::ConfigError(
                "stitcher fuzzy steps must be greater than 0".into(),
            ));
        }
        Ok(())
    }
}

/// Span marker configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MarkerConfig {
    /// Tag of generated marker elements
    pub tag: String,
    /// Fuzzy threshold for short needles
    pub fuzzy_short_threshold: f64,
    /// Fuzzy threshold for long needles
    pub fuzzy_long_threshold: f64,
    /// Needles at least this long use the long threshold
    pub long_needle_chars: usize,
    /// Needles longer than this skip the fuzzy step
    pub fuzzy_max_needle: usize,
    /// Words matched at each end of a literal by the last-resort anchor step
    pub leading_words: usize,
}

impl Default for MarkerConfig {
    fn default() -> Self {
        Self {
            tag: "mark".to_string(),
            fuzzy_short_threshold: 0.90,
            fuzzy_long_threshold: 0.85,
            long_needle_chars: 100,
            fuzzy_max_needle: 1_000,
            leading_words: 10,
        }
    }
}

impl MarkerConfig {
    /// Validate the configuration
    pub fn validate(&self) -> Result<()> {
        check_unit("marker.fuzzy_short_threshold", self.fuzzy_short_threshold)?;
        check_unit("marker.fuzzy_long_threshold", self.fuzzy_long_threshold)?;

        if self.tag.is_empty() || !self.tag.chars().all(|c| c.is_ascii_alphanumeric() || c == '-')
        {
            return Err(EngineError::ConfigError(format!(
                "marker.tag '{}' is not a valid element name",
                self.tag
            )));
        }
        if self.leading_words == 0 {
            return Err(EngineError::ConfigError(
                "marker.leading_words must be greater than 0".into(),
            ));
        }
        Ok(())
    }
}

/// Engine configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Locator settings
    pub locator: LocatorConfig,
    /// Stitcher settings
    pub stitcher: StitchConfig,
    /// Span marker settings
    pub marker: MarkerConfig,
}

impl EngineConfig {
    /// Configuration tuned for recovering annotations
    pub fn annotation_recovery() -> Self {
        Self {
            locator: LocatorConfig::annotation_recovery(),
            ..Self::default()
        }
    }

    /// Validate every section
    pub fn validate(&self) -> Result<()> {
        self.locator.validate()?;
        self.stitcher.validate()?;
        self.marker.validate()
    }
}

fn check_unit(name: &str, value: f64) -> Result<()> {
    if (0.0..=1.0).contains(&value) {
        Ok(())
    } else {
        Err(EngineError::ConfigError(format!(
            "{name} must be within [0, 1], got {value}"
        )))
    }
}
