//! Text canonicalization and normalized-to-original position mapping
//!
//! All approximate matching runs on normalized text, but callers need
//! offsets into the text they handed in. Every normalization here is a
//! per-character fold (drop, substitute, or collapse into a single space),
//! which is what makes [`map_normalized_position_to_original`] a single
//! linear walk.

/// Placeholder every quote-like code point is folded to
pub const QUOTE_PLACEHOLDER: char = '"';

/// Soft hyphen, removed entirely by aggressive normalization
pub const SOFT_HYPHEN: char = '\u{00AD}';

/// Which canonicalization to apply
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Normalization {
    /// Collapse whitespace runs to one space and trim
    Whitespace,
    /// Whitespace plus quote/dash unification and soft-hyphen removal
    Aggressive,
    /// Remove every whitespace character
    Compact,
}

/// What a single source character becomes after normalization
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Fold {
    Drop,
    Space,
    Char(char),
}

impl Normalization {
    fn fold(self, ch: char) -> Fold {
        match self {
            Normalization::Whitespace => {
                if ch.is_whitespace() {
                    Fold::Space
                } else {
                    Fold::Char(ch)
                }
            }
            Normalization::Aggressive => {
                if ch == SOFT_HYPHEN {
                    Fold::Drop
                } else if ch.is_whitespace() {
                    Fold::Space
                } else if is_quote(ch) {
                    Fold::Char(QUOTE_PLACEHOLDER)
                } else if is_dash(ch) {
                    Fold::Char('-')
                } else {
                    Fold::Char(ch)
                }
            }
            Normalization::Compact => {
                if ch.is_whitespace() {
                    Fold::Drop
                } else {
                    Fold::Char(ch)
                }
            }
        }
    }

    /// Apply this normalization to `text`
    pub fn apply(self, text: &str) -> String {
        let mut out = String::with_capacity(text.len());
        let mut pending_space = false;

        for ch in text.chars() {
            match self.fold(ch) {
                Fold::Drop => {}
                // Leading whitespace never emits; trailing whitespace is left pending
                Fold::Space => pending_space = !out.is_empty(),
                Fold::Char(c) => {
                    if pending_space {
                        out.push(' ');
                        pending_space = false;
                    }
                    out.push(c);
                }
            }
        }

        out
    }
}

/// Straight, curly, low-9, reversed, backtick and acute quotes (single and double)
fn is_quote(ch: char) -> bool {
    matches!(
        ch,
        '"' | '\'' | '`' | '\u{00B4}' | '\u{2018}'..='\u{201F}'
    )
}

/// Hyphen, non-breaking hyphen, figure dash, en/em dash, horizontal bar, minus
fn is_dash(ch: char) -> bool {
    matches!(ch, '\u{2010}'..='\u{2015}' | '\u{2212}')
}

/// Collapse whitespace runs to one space and trim
pub fn normalize_whitespace(text: &str) -> String {
    Normalization::Whitespace.apply(text)
}

/// Unify quotes and dashes, strip soft hyphens, then collapse whitespace
///
/// Idempotent: `normalize_aggressive(normalize_aggressive(x)) == normalize_aggressive(x)`.
pub fn normalize_aggressive(text: &str) -> String {
    Normalization::Aggressive.apply(text)
}

/// Remove every whitespace character
pub fn normalize_compact(text: &str) -> String {
    Normalization::Compact.apply(text)
}

/// Lowercase one char for one char so offsets stay aligned
pub fn fold_case(text: &str) -> String {
    text.chars()
        .map(|ch| ch.to_lowercase().next().unwrap_or(ch))
        .collect()
}

/// Length-preserving fold of case, whitespace, quotes and dashes
///
/// Unlike [`normalize_aggressive`], nothing is dropped or collapsed, so char
/// offsets in the result are valid offsets into `text`.
pub fn fold_equivalents(text: &str) -> Vec<char> {
    text.chars()
        .map(|ch| {
            if ch.is_whitespace() {
                ' '
            } else if is_quote(ch) {
                QUOTE_PLACEHOLDER
            } else if is_dash(ch) {
                '-'
            } else {
                ch.to_lowercase().next().unwrap_or(ch)
            }
        })
        .collect()
}

/// Paragraph-preserving normalization used before stitching batches
///
/// - `\r\n` and lone `\r` become `\n`
/// - horizontal whitespace runs collapse to one space
/// - trailing whitespace is trimmed on every line
/// - three or more consecutive newlines collapse to exactly two
pub fn normalize_paragraphs(text: &str) -> String {
    let unified = text.replace("\r\n", "\n").replace('\r', "\n");

    let mut lines = Vec::new();
    for line in unified.split('\n') {
        let mut collapsed = String::with_capacity(line.len());
        let mut in_run = false;
        for ch in line.chars() {
            if ch.is_whitespace() {
                if !in_run {
                    collapsed.push(' ');
                    in_run = true;
                }
            } else {
                collapsed.push(ch);
                in_run = false;
            }
        }
        lines.push(collapsed.trim_end().to_string());
    }
    let joined = lines.join("\n");

    let mut out = String::with_capacity(joined.len());
    let mut newlines = 0usize;
    for ch in joined.chars() {
        if ch == '\n' {
            newlines += 1;
            if newlines > 2 {
                continue;
            }
        } else {
            newlines = 0;
        }
        out.push(ch);
    }
    out
}

/// A `[start, end)` range of char offsets
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OffsetRange {
    /// Inclusive start
    pub start: usize,
    /// Exclusive end
    pub end: usize,
}

impl OffsetRange {
    /// Create a range
    pub fn new(start: usize, end: usize) -> Self {
        Self { start, end }
    }

    /// Length in chars
    pub fn len(&self) -> usize {
        self.end.saturating_sub(self.start)
    }

    /// Whether the range covers nothing
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Map a range found in normalized text back to the original text
///
/// Walks `original` once, replaying `normalization` character by character
/// while advancing a virtual cursor into the normalized text. `start` is
/// recorded the first time the cursor reaches `norm_start`, `end` the first
/// time it reaches `norm_start + norm_len`. A collapsed whitespace run maps
/// to its first character.
///
/// Returns `None` when the normalized range lies past the end of the text.
pub fn map_normalized_position_to_original(
    original: &str,
    norm_start: usize,
    norm_len: usize,
    normalization: Normalization,
) -> Option<OffsetRange> {
    let norm_end = norm_start + norm_len;
    let mut cursor = 0usize;
    let mut start: Option<usize> = None;
    let mut end: Option<usize> = None;
    let mut pending_space: Option<usize> = None;
    let mut emitted_any = false;
    let mut total = 0usize;

    for (idx, ch) in original.chars().enumerate() {
        total = idx + 1;
        match normalization.fold(ch) {
            Fold::Drop => {}
            Fold::Space => {
                if emitted_any && pending_space.is_none() {
                    pending_space = Some(idx);
                }
            }
            Fold::Char(_) => {
                if let Some(space_at) = pending_space.take() {
                    if start.is_none() && cursor == norm_start {
                        start = Some(space_at);
                    }
                    cursor += 1;
                    if start.is_some() && end.is_none() && cursor == norm_end {
                        end = Some(space_at + 1);
                    }
                }
                if end.is_none() {
                    if start.is_none() && cursor == norm_start {
                        start = Some(idx);
                    }
                    cursor += 1;
                    if start.is_some() && end.is_none() && cursor == norm_end {
                        end = Some(idx + 1);
                    }
                }
                emitted_any = true;
            }
        }
        if end.is_some() {
            break;
        }
    }

    if norm_len == 0 {
        if start.is_none() && cursor == norm_start {
            start = Some(total);
        }
        return start.map(|s| OffsetRange::new(s, s));
    }

    match (start, end) {
        (Some(s), Some(e)) => Some(OffsetRange::new(s, e)),
        _ => None,
    }
}
