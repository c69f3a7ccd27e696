//! Literal-text resolution cascade for span ranges

use crate::config::MarkerConfig;
use regex::{Regex, RegexBuilder};
use serde::{Deserialize, Serialize};
use textanchor_core::{
    char_len, edit_similarity, find_str, fold_case, map_normalized_position_to_original,
    normalize_aggressive, Normalization, OffsetRange,
};

/// Which step placed a span range
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ResolveStrategy {
    /// Literal substring
    Exact,
    /// Substring ignoring case
    CaseInsensitive,
    /// Substring after whitespace collapse
    Whitespace,
    /// Substring after quote, dash and case folding
    Aggressive,
    /// Sliding edit-similarity window
    Fuzzy,
    /// Substring with all whitespace removed
    Compact,
    /// Regexes over the leading and trailing words
    LeadingWords,
    /// Caller-supplied offsets
    Offsets,
}

/// Find `literal` in `text`, returning char offsets snapped to word edges
///
/// `hint` is a local range the caller believes holds the literal; it is
/// honored only when it matches exactly.
pub(crate) fn resolve(
    text: &str,
    literal: &str,
    hint: Option<OffsetRange>,
    config: &MarkerConfig,
) -> Option<(OffsetRange, ResolveStrategy)> {
    if literal.trim().is_empty() || text.is_empty() {
        return None;
    }

    let chars: Vec<char> = text.chars().collect();
    let (range, strategy) = at_hint(&chars, literal, hint)
        .map(|range| (range, ResolveStrategy::Exact))
        .or_else(|| exact(text, literal).map(|r| (r, ResolveStrategy::Exact)))
        .or_else(|| {
            case_insensitive(text, literal).map(|r| (r, ResolveStrategy::CaseInsensitive))
        })
        .or_else(|| {
            normalized(text, literal, Normalization::Whitespace)
                .map(|r| (r, ResolveStrategy::Whitespace))
        })
        .or_else(|| aggressive(text, literal).map(|r| (r, ResolveStrategy::Aggressive)))
        .or_else(|| fuzzy(text, literal, config).map(|r| (r, ResolveStrategy::Fuzzy)))
        .or_else(|| {
            normalized(text, literal, Normalization::Compact).map(|r| (r, ResolveStrategy::Compact))
        })
        .or_else(|| {
            leading_words(text, literal, config).map(|r| (r, ResolveStrategy::LeadingWords))
        })?;

    let snapped = snap_to_words(&chars, range);
    (!snapped.is_empty()).then_some((snapped, strategy))
}

fn at_hint(chars: &[char], literal: &str, hint: Option<OffsetRange>) -> Option<OffsetRange> {
    let hint = hint?;
    if hint.end > chars.len() || hint.is_empty() {
        return None;
    }
    chars[hint.start..hint.end]
        .iter()
        .copied()
        .eq(literal.chars())
        .then_some(hint)
}

fn exact(text: &str, literal: &str) -> Option<OffsetRange> {
    find_str(text, literal).map(|start| OffsetRange::new(start, start + char_len(literal)))
}

fn case_insensitive(text: &str, literal: &str) -> Option<OffsetRange> {
    // fold_case keeps one char per char, so offsets carry over
    exact(&fold_case(text), &fold_case(literal))
}

fn normalized(text: &str, literal: &str, normalization: Normalization) -> Option<OffsetRange> {
    let needle = normalization.apply(literal);
    if needle.is_empty() {
        return None;
    }
    let start = find_str(&normalization.apply(text), &needle)?;
    map_normalized_position_to_original(text, start, char_len(&needle), normalization)
}

fn aggressive(text: &str, literal: &str) -> Option<OffsetRange> {
    let needle = fold_case(&normalize_aggressive(literal));
    if needle.is_empty() {
        return None;
    }
    let start = find_str(&fold_case(&normalize_aggressive(text)), &needle)?;
    map_normalized_position_to_original(text, start, char_len(&needle), Normalization::Aggressive)
}

fn fuzzy(text: &str, literal: &str, config: &MarkerConfig) -> Option<OffsetRange> {
    let needle: Vec<char> = fold_case(&normalize_aggressive(literal)).chars().collect();
    let haystack: Vec<char> = fold_case(&normalize_aggressive(text)).chars().collect();
    let m = needle.len();
    if m == 0 || m > config.fuzzy_max_needle || m > haystack.len() {
        return None;
    }

    let threshold = if m < config.long_needle_chars {
        config.fuzzy_short_threshold
    } else {
        config.fuzzy_long_threshold
    };
    let step = (m / 20).clamp(5, 10);
    let last = haystack.len() - m;

    let mut best: Option<(usize, f64)> = None;
    let mut pos = 0usize;
    loop {
        let similarity = edit_similarity(&needle, &haystack[pos..pos + m]);
        if best.map_or(true, |(_, s)| similarity > s) {
            best = Some((pos, similarity));
        }
        if pos == last || similarity >= 1.0 {
            break;
        }
        pos = (pos + step).min(last);
    }

    let (start, similarity) = best?;
    if similarity < threshold {
        return None;
    }
    map_normalized_position_to_original(text, start, m, Normalization::Aggressive)
}

/// Leading words locate the start; trailing words, when they follow closely
/// enough, locate the end. Otherwise the end is estimated from the length.
fn leading_words(text: &str, literal: &str, config: &MarkerConfig) -> Option<OffsetRange> {
    let words: Vec<&str> = literal.split_whitespace().collect();
    let found = words_pattern(words.iter().copied().take(config.leading_words))?.find(text)?;

    let start = char_len(&text[..found.start()]);
    let literal_len = char_len(literal);
    let reach = start + literal_len + literal_len / 2;
    let tail = &words[words.len().saturating_sub(config.leading_words)..];
    let end = words_pattern(tail.iter().copied())
        .and_then(|pattern| pattern.find_at(text, found.start()))
        .map(|hit| char_len(&text[..hit.end()]))
        .filter(|&end| end <= reach)
        .unwrap_or_else(|| (start + literal_len).min(char_len(text)));
    Some(OffsetRange::new(start, end))
}

/// Case-insensitive regex matching `words` separated by any whitespace
fn words_pattern<'a>(words: impl Iterator<Item = &'a str>) -> Option<Regex> {
    let escaped: Vec<String> = words.map(regex::escape).collect();
    if escaped.is_empty() {
        return None;
    }
    RegexBuilder::new(&escaped.join(r"\s+"))
        .case_insensitive(true)
        .build()
        .ok()
}

/// Grow a range outward so it never starts or ends inside a word
pub(crate) fn snap_to_words(chars: &[char], range: OffsetRange) -> OffsetRange {
    let mut start = range.start.min(chars.len());
    let mut end = range.end.min(chars.len()).max(start);

    while start > 0
        && start < chars.len()
        && chars[start - 1].is_alphanumeric()
        && chars[start].is_alphanumeric()
    {
        start -= 1;
    }
    while end > 0
        && end < chars.len()
        && chars[end - 1].is_alphanumeric()
        && chars[end].is_alphanumeric()
    {
        end += 1;
    }

    OffsetRange::new(start, end)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn run(text: &str, literal: &str) -> Option<(String, ResolveStrategy)> {
        resolve(text, literal, None, &MarkerConfig::default()).map(|(range, strategy)| {
            let found: String = text
                .chars()
                .skip(range.start)
                .take(range.len())
                .collect();
            (found, strategy)
        })
    }

    #[test]
    fn test_exact_then_case_insensitive() {
        assert_eq!(
            run("The Quick brown fox", "Quick brown"),
            Some(("Quick brown".into(), ResolveStrategy::Exact))
        );
        assert_eq!(
            run("The Quick brown fox", "quick BROWN"),
            Some(("Quick brown".into(), ResolveStrategy::CaseInsensitive))
        );
    }

    #[test]
    fn test_whitespace_and_aggressive() {
        assert_eq!(
            run("spread\n  across   lines", "spread across lines"),
            Some(("spread\n  across   lines".into(), ResolveStrategy::Whitespace))
        );
        assert_eq!(
            run("He said \u{201c}Stop\u{201d} \u{2014} twice.", "he said \"stop\" - twice"),
            Some((
                "He said \u{201c}Stop\u{201d} \u{2014} twice".into(),
                ResolveStrategy::Aggressive
            ))
        );
    }

    #[test]
    fn test_fuzzy_step() {
        let text = "Before this. The committee reviewed the annual budget carefully. After.";
        let (found, strategy) = run(text, "The comittee reviewed the anual budget carefully").unwrap();
        assert_eq!(strategy, ResolveStrategy::Fuzzy);
        assert!(found.contains("committee reviewed the annual budget"));
    }

    #[test]
    fn test_compact_step() {
        assert_eq!(
            run("hyphen- ated word", "hyphen-ated word"),
            Some(("hyphen- ated word".into(), ResolveStrategy::Compact))
        );
    }

    const LEAD: &str = "The finance committee met on Tuesday morning to review the";
    const TAIL: &str = "before the board approved the final budget for next year.";

    #[test]
    fn test_leading_words_end_at_trailing_words() {
        let text = format!(
            "Preface line. {LEAD} figures and nobody objected {TAIL} \
             Unrelated words follow here for a while."
        );
        let literal = format!(
            "{LEAD} auditors raised several separate concerns about the inventory counts \
             and the timing of supplier rebates {TAIL}"
        );
        assert_eq!(
            run(&text, &literal),
            Some((
                format!("{LEAD} figures and nobody objected {TAIL}"),
                ResolveStrategy::LeadingWords
            ))
        );
    }

    #[test]
    fn test_leading_words_without_trailing_words_use_length() {
        let text = format!(
            "{LEAD} figures. Then everyone left the room quietly and went home early today."
        );
        let literal = format!("{LEAD} quarterly revenue and costs with zero dispute xyz");
        let (found, strategy) = run(&text, &literal).unwrap();
        assert_eq!(strategy, ResolveStrategy::LeadingWords);
        assert!(found.starts_with(LEAD));
        assert_eq!(found.chars().count(), literal.chars().count());
    }

    #[test]
    fn test_snap_expands_partial_words() {
        let chars: Vec<char> = "an example sentence".chars().collect();
        let snapped = snap_to_words(&chars, OffsetRange::new(5, 13));
        assert_eq!(snapped, OffsetRange::new(3, 19));
    }

    #[test]
    fn test_hint_selects_later_occurrence() {
        let text = "word one, word two";
        let (range, strategy) = resolve(
            text,
            "word",
            Some(OffsetRange::new(10, 14)),
            &MarkerConfig::default(),
        )
        .unwrap();
        assert_eq!(range, OffsetRange::new(10, 14));
        assert_eq!(strategy, ResolveStrategy::Exact);
    }

    #[test]
    fn test_absent_literal_is_none() {
        assert_eq!(run("nothing related here at all", "zebra crossing"), None);
        assert_eq!(run("some text", "   "), None);
    }
}
