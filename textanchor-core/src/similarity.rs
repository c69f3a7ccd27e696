//! Similarity scoring primitives
//!
//! All functions work on `&[char]` so callers can slice windows by char
//! offset without re-walking UTF-8.

use std::collections::HashSet;

/// Set of all length-3 char windows of a text
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TrigramSet {
    grams: HashSet<[char; 3]>,
}

impl TrigramSet {
    /// Build the set for `chars`; shorter than 3 chars yields an empty set
    pub fn from_chars(chars: &[char]) -> Self {
        let grams = chars.windows(3).map(|w| [w[0], w[1], w[2]]).collect();
        Self { grams }
    }

    /// Number of distinct trigrams
    pub fn len(&self) -> usize {
        self.grams.len()
    }

    /// Whether the set is empty
    pub fn is_empty(&self) -> bool {
        self.grams.is_empty()
    }

    /// Jaccard similarity against another set
    pub fn jaccard(&self, other: &TrigramSet) -> f64 {
        match (self.is_empty(), other.is_empty()) {
            (true, true) => return 1.0,
            (true, false) | (false, true) => return 0.0,
            _ => {}
        }

        let (small, large) = if self.len() <= other.len() {
            (&self.grams, &other.grams)
        } else {
            (&other.grams, &self.grams)
        };
        let intersection = small.iter().filter(|g| large.contains(*g)).count();
        let union = self.len() + other.len() - intersection;
        intersection as f64 / union as f64
    }

    /// Share of this set's trigrams found in `other`; 1.0 when this set is empty
    ///
    /// Bounds the Jaccard similarity against any subset of `other` from above.
    pub fn containment(&self, other: &TrigramSet) -> f64 {
        if self.is_empty() {
            return 1.0;
        }
        let shared = self.grams.iter().filter(|g| other.grams.contains(*g)).count();
        shared as f64 / self.len() as f64
    }
}

/// Trigram set of `chars`
pub fn trigrams(chars: &[char]) -> TrigramSet {
    TrigramSet::from_chars(chars)
}

/// `|a ∩ b| / |a ∪ b|`; 1.0 when both are empty, 0.0 when exactly one is
pub fn jaccard(a: &TrigramSet, b: &TrigramSet) -> f64 {
    a.jaccard(b)
}

/// Levenshtein distance over chars
pub fn levenshtein(a: &[char], b: &[char]) -> usize {
    if a.is_empty() {
        return b.len();
    }
    if b.is_empty() {
        return a.len();
    }

    let mut prev: Vec<usize> = (0..=b.len()).collect();
    let mut cur = vec![0usize; b.len() + 1];

    for (i, &ca) in a.iter().enumerate() {
        cur[0] = i + 1;
        for (j, &cb) in b.iter().enumerate() {
            let substitution = prev[j] + usize::from(ca != cb);
            let deletion = prev[j + 1] + 1;
            let insertion = cur[j] + 1;
            cur[j + 1] = substitution.min(deletion).min(insertion);
        }
        std::mem::swap(&mut prev, &mut cur);
    }

    prev[b.len()]
}

/// `1 - levenshtein(a, b) / max(len(a), len(b))`
pub fn edit_similarity(a: &[char], b: &[char]) -> f64 {
    let longest = a.len().max(b.len());
    if longest == 0 {
        return 1.0;
    }
    1.0 - levenshtein(a, b) as f64 / longest as f64
}

/// Best placement of a needle inside a region
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Alignment {
    /// Start of the aligned span within the region
    pub start: usize,
    /// End (exclusive) of the aligned span within the region
    pub end: usize,
    /// Edit distance between the needle and the span
    pub distance: usize,
    /// `1 - distance / max(needle_len, span_len)`
    pub similarity: f64,
}

/// Semi-global edit-distance alignment of `needle` against `region`
///
/// Equivalent to sliding the needle over every start position of the region
/// with step 1 and every span length, keeping the span with the highest
/// edit similarity. Spans longer than `max_span` are ignored. Once a span
/// scores above `early_exit`, scanning continues only while the following
/// columns keep improving, so a near-complete prefix never cuts the match
/// short of the needle's last chars.
///
/// Runs in `O(needle × region)` time and `O(needle)` memory.
pub fn best_alignment(
    needle: &[char],
    region: &[char],
    max_span: usize,
    early_exit: f64,
) -> Option<Alignment> {
    let m = needle.len();
    if m == 0 || region.is_empty() {
        return None;
    }

    // Column j holds distances of needle prefixes against spans ending at j.
    // The start pointer travels with each cell so the span can be recovered.
    let mut prev_dist: Vec<usize> = (0..=m).collect();
    let mut prev_start = vec![0usize; m + 1];
    let mut cur_dist = vec![0usize; m + 1];
    let mut cur_start = vec![0usize; m + 1];

    let mut best: Option<Alignment> = None;
    let mut settling = false;

    for (j, &rc) in region.iter().enumerate() {
        let col = j + 1;
        cur_dist[0] = 0;
        cur_start[0] = col;

        for i in 1..=m {
            let substitution = prev_dist[i - 1] + usize::from(needle[i - 1] != rc);
            let deletion = cur_dist[i - 1] + 1;
            let insertion = prev_dist[i] + 1;

            if substitution <= deletion && substitution <= insertion {
                cur_dist[i] = substitution;
                cur_start[i] = prev_start[i - 1];
            } else if deletion <= insertion {
                cur_dist[i] = deletion;
                cur_start[i] = cur_start[i - 1];
            } else {
                cur_dist[i] = insertion;
                cur_start[i] = prev_start[i];
            }
        }

        let start = cur_start[m];
        let span = col - start;
        let mut improved = false;
        if span > 0 && span <= max_span {
            let distance = cur_dist[m];
            let similarity = 1.0 - distance as f64 / m.max(span) as f64;
            if best.map_or(true, |b| similarity > b.similarity) {
                best = Some(Alignment {
                    start,
                    end: col,
                    distance,
                    similarity,
                });
                improved = true;
                if distance == 0 {
                    break;
                }
                settling |= similarity > early_exit;
            }
        }
        if settling && !improved {
            break;
        }

        std::mem::swap(&mut prev_dist, &mut cur_dist);
        std::mem::swap(&mut prev_start, &mut cur_start);
    }

    best
}
