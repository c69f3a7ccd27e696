//! Batch stitching
//!
//! Documents too large to process at once are split into overlapping
//! windows. The stitcher removes the duplicated region at each seam so the
//! segments read as one stream, and falls back to an explicit separator
//! when no trustworthy overlap exists.

use crate::{config::StitchConfig, error::Result};
use serde::{Deserialize, Serialize};
use textanchor_core::{normalize_paragraphs, trigrams, TrigramSet};
use tracing::{debug, trace};

/// How an overlap was established
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OverlapMethod {
    /// A's tail equals B's head
    Exact,
    /// Trigram similarity between sliding windows
    Fuzzy,
    /// Segments joined with the separator
    None,
}

/// Where two segments were joined
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct OverlapResult {
    /// Start of the overlap window in A
    pub overlap_start_in_a: usize,
    /// Start of the overlap window in B
    pub overlap_start_in_b: usize,
    /// Chars removed by deduplication
    pub overlap_length: usize,
    /// Length of the compared windows
    pub window_length: usize,
    /// Confidence in `[0, 1]`
    pub confidence: f64,
    /// How the overlap was found
    pub method: OverlapMethod,
}

impl OverlapResult {
    fn none(len_a: usize) -> Self {
        Self {
            overlap_start_in_a: len_a,
            overlap_start_in_b: 0,
            overlap_length: 0,
            window_length: 0,
            confidence: 0.0,
            method: OverlapMethod::None,
        }
    }

    /// Whether any content was deduplicated
    pub fn is_found(&self) -> bool {
        self.method != OverlapMethod::None
    }
}

/// Result of stitching a sequence of segments
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StitchedDocument {
    /// Assembled text
    pub text: String,
    /// One entry per seam, in order
    pub overlaps: Vec<OverlapResult>,
}

/// Merges adjacent overlapping segments
#[derive(Debug, Clone, Default)]
pub struct BatchStitcher {
    config: StitchConfig,
}

impl BatchStitcher {
    /// Create a stitcher
    pub fn new(config: StitchConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    /// Active configuration
    pub fn config(&self) -> &StitchConfig {
        &self.config
    }

    /// Find where the tail of `a` overlaps the head of `b`
    ///
    /// Offsets refer to the texts exactly as given; no normalization is
    /// applied here.
    pub fn find_overlap(&self, a: &str, b: &str) -> OverlapResult {
        let a: Vec<char> = a.chars().collect();
        let b: Vec<char> = b.chars().collect();
        self.overlap_chars(&a, &b)
    }

    /// Paragraph-normalize both segments and join them
    pub fn stitch(&self, a: &str, b: &str) -> StitchedDocument {
        let a = normalize_paragraphs(a);
        let b = normalize_paragraphs(b);
        let (text, overlap) = self.join(&a, &b);
        StitchedDocument {
            text,
            overlaps: vec![overlap],
        }
    }

    /// Stitch an ordered list of segments
    ///
    /// Blank segments (after normalization) are skipped and produce no seam.
    pub fn stitch_all<S: AsRef<str>>(&self, segments: &[S]) -> StitchedDocument {
        let mut normalized = segments
            .iter()
            .map(|s| normalize_paragraphs(s.as_ref()))
            .filter(|s| !s.trim().is_empty());

        let Some(first) = normalized.next() else {
            return StitchedDocument {
                text: String::new(),
                overlaps: Vec::new(),
            };
        };

        let (text, overlaps) = normalized.fold((first, Vec::new()), |(acc, mut overlaps), next| {
            let (text, overlap) = self.join(&acc, &next);
            overlaps.push(overlap);
            (text, overlaps)
        });

        StitchedDocument { text, overlaps }
    }

    fn join(&self, a: &str, b: &str) -> (String, OverlapResult) {
        let a_chars: Vec<char> = a.chars().collect();
        let b_chars: Vec<char> = b.chars().collect();

        if a_chars.is_empty() || b_chars.is_empty() {
            let mut text = String::with_capacity(a.len() + b.len());
            text.push_str(a);
            text.push_str(b);
            return (text, OverlapResult::none(a_chars.len()));
        }

        let overlap = self.overlap_chars(&a_chars, &b_chars);
        if !overlap.is_found() {
            debug!(
                len_a = a_chars.len(),
                len_b = b_chars.len(),
                "no overlap, joining with separator"
            );
            let mut text = String::with_capacity(a.len() + self.config.separator.len() + b.len());
            text.push_str(a);
            text.push_str(&self.config.separator);
            text.push_str(b);
            return (text, overlap);
        }

        debug!(
            method = ?overlap.method,
            overlap_length = overlap.overlap_length,
            confidence = overlap.confidence,
            "overlap found"
        );
        let keep_a = overlap.overlap_start_in_a + overlap.window_length;
        let skip_b = overlap.overlap_start_in_b + overlap.window_length;
        let text: String = a_chars[..keep_a]
            .iter()
            .chain(b_chars[skip_b..].iter())
            .collect();
        (text, overlap)
    }

    fn overlap_chars(&self, a: &[char], b: &[char]) -> OverlapResult {
        let a_region = (a.len() as f64 * self.config.max_overlap_percent) as usize;
        let b_region = (b.len() as f64 * self.config.max_overlap_percent) as usize;
        let longest = a_region.min(b_region);

        if longest < self.config.min_overlap_length {
            trace!(longest, "segments too short for an overlap");
            return OverlapResult::none(a.len());
        }

        self.exact_overlap(a, b, longest)
            .or_else(|| self.fuzzy_overlap(a, b, a_region, b_region, longest))
            .unwrap_or_else(|| OverlapResult::none(a.len()))
    }

    fn exact_overlap(&self, a: &[char], b: &[char], longest: usize) -> Option<OverlapResult> {
        (self.config.min_overlap_length..=longest)
            .rev()
            .find(|&len| a[a.len() - len..] == b[..len])
            .map(|len| OverlapResult {
                overlap_start_in_a: a.len() - len,
                overlap_start_in_b: 0,
                overlap_length: len,
                window_length: len,
                confidence: 1.0,
                method: OverlapMethod::Exact,
            })
    }

    /// Longest window length whose best window pair clears the threshold
    ///
    /// Worst case, when no overlap exists, compares every length against
    /// every pair of slid windows. An A window is skipped without building
    /// the B windows when too few of its trigrams occur anywhere in B's
    /// searched prefix to reach the threshold.
    fn fuzzy_overlap(
        &self,
        a: &[char],
        b: &[char],
        a_region: usize,
        b_region: usize,
        longest: usize,
    ) -> Option<OverlapResult> {
        let config = &self.config;
        let mut len = longest.min(config.max_fuzzy_length);
        let b_reach = trigrams(&b[..b_region.min(len + config.max_fuzzy_shift)]);

        while len >= config.min_overlap_length {
            // B windows depend only on the length, so build them at most once
            let mut b_windows: Option<Vec<(usize, TrigramSet)>> = None;

            let mut best: Option<(usize, usize, f64)> = None;
            'scan: for a_shift in (0..=config.max_fuzzy_shift).step_by(config.fuzzy_slide_step) {
                if a_shift + len > a_region {
                    break;
                }
                let a_start = a.len() - len - a_shift;
                let a_set = trigrams(&a[a_start..a_start + len]);
                if a_set.containment(&b_reach) < config.overlap_threshold {
                    continue;
                }

                let windows = b_windows.get_or_insert_with(|| {
                    (0..=config.max_fuzzy_shift)
                        .step_by(config.fuzzy_slide_step)
                        .take_while(|&shift| shift + len <= b_region)
                        .map(|shift| (shift, trigrams(&b[shift..shift + len])))
                        .collect()
                });
                for (b_start, b_set) in windows.iter() {
                    let similarity = a_set.jaccard(b_set);
                    if best.map_or(true, |(_, _, s)| similarity > s) {
                        best = Some((a_start, *b_start, similarity));
                        if similarity > config.early_exit {
                            break 'scan;
                        }
                    }
                }
            }

            if let Some((a_start, b_start, similarity)) = best {
                if similarity >= config.overlap_threshold {
                    return Some(OverlapResult {
                        overlap_start_in_a: a_start,
                        overlap_start_in_b: b_start,
                        overlap_length: a.len() - a_start + b_start,
                        window_length: len,
                        confidence: similarity,
                        method: OverlapMethod::Fuzzy,
                    });
                }
            }

            if len < config.min_overlap_length + config.fuzzy_length_step {
                break;
            }
            len -= config.fuzzy_length_step;
        }

        None
    }
}
