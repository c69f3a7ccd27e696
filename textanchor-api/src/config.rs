//! High-level configuration API

use crate::error::{ApiError, Result};
use std::path::Path;
use textanchor_engine::{EngineConfig, LocatorConfig, MarkerConfig, StitchConfig};

/// High-level configuration for relocation, stitching and marking
///
/// Loadable from TOML with optional `[locator]`, `[stitcher]` and `[marker]`
/// tables; missing keys keep their defaults.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Config {
    inner: EngineConfig,
}

impl Config {
    /// Configuration for placing extracted chunks (the default)
    pub fn chunk_placement() -> Self {
        Self::default()
    }

    /// Configuration for recovering recorded annotations
    pub fn annotation_recovery() -> Self {
        Self {
            inner: EngineConfig::annotation_recovery(),
        }
    }

    /// Create a builder
    pub fn builder() -> ConfigBuilder {
        ConfigBuilder::default()
    }

    /// Parse and validate a TOML document
    pub fn from_toml_str(source: &str) -> Result<Self> {
        let inner: EngineConfig = toml::from_str(source)?;
        inner.validate()?;
        Ok(Self { inner })
    }

    /// Read a TOML configuration file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let source = std::fs::read_to_string(path).map_err(|e| {
            ApiError::Config(format!("failed to read {}: {e}", path.display()))
        })?;
        Self::from_toml_str(&source)
    }

    /// Locator settings
    pub fn locator(&self) -> &LocatorConfig {
        &self.inner.locator
    }

    /// Stitcher settings
    pub fn stitcher(&self) -> &StitchConfig {
        &self.inner.stitcher
    }

    /// Span marker settings
    pub fn marker(&self) -> &MarkerConfig {
        &self.inner.marker
    }

    /// The full engine configuration
    pub fn engine(&self) -> &EngineConfig {
        &self.inner
    }
}

impl From<EngineConfig> for Config {
    fn from(inner: EngineConfig) -> Self {
        Self { inner }
    }
}

/// Configuration builder
#[derive(Debug, Default)]
pub struct ConfigBuilder {
    config: Config,
}

impl ConfigBuilder {
    /// Start from an existing configuration
    pub fn from_config(config: Config) -> Self {
        Self { config }
    }

    /// Use the annotation recovery preset for the locator
    pub fn annotation_recovery(mut self) -> Self {
        self.config.inner.locator = LocatorConfig::annotation_recovery();
        self
    }

    /// Minimum Jaccard similarity for the trigram tier
    pub fn trigram_threshold(mut self, threshold: f64) -> Self {
        self.config.inner.locator.trigram_threshold = threshold;
        self
    }

    /// Confidence reported by the approximate tier
    pub fn min_confidence(mut self, confidence: f64) -> Self {
        self.config.inner.locator.min_confidence = confidence;
        self
    }

    /// Trigram stride as a fraction of the needle length
    pub fn stride_percent(mut self, percent: f64) -> Self {
        self.config.inner.locator.stride_percent = percent;
        self
    }

    /// Characters inspected on each side for context words
    pub fn context_window_chars(mut self, chars: usize) -> Self {
        self.config.inner.locator.context_window_chars = chars;
        self
    }

    /// Shortest overlap the stitcher accepts
    pub fn min_overlap_length(mut self, length: usize) -> Self {
        self.config.inner.stitcher.min_overlap_length = length;
        self
    }

    /// Share of each segment searched for an overlap
    pub fn max_overlap_percent(mut self, percent: f64) -> Self {
        self.config.inner.stitcher.max_overlap_percent = percent;
        self
    }

    /// Minimum similarity for a fuzzy overlap
    pub fn overlap_threshold(mut self, threshold: f64) -> Self {
        self.config.inner.stitcher.overlap_threshold = threshold;
        self
    }

    /// Text inserted between segments without an overlap
    pub fn separator(mut self, separator: impl Into<String>) -> Self {
        self.config.inner.stitcher.separator = separator.into();
        self
    }

    /// Element name used for span markers
    pub fn marker_tag(mut self, tag: impl Into<String>) -> Self {
        self.config.inner.marker.tag = tag.into();
        self
    }

    /// Build and validate the configuration
    pub fn build(self) -> Result<Config> {
        self.config.inner.validate()?;
        Ok(self.config)
    }
}
