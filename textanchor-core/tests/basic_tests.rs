//! Basic tests for textanchor-core

use textanchor_core::*;

#[test]
fn test_normalization_apply_matches_functions() {
    let text = " \u{201c}Hello\u{201d}\u{2014}world \n\n again\u{00AD} ";
    assert_eq!(Normalization::Whitespace.apply(text), normalize_whitespace(text));
    assert_eq!(Normalization::Aggressive.apply(text), normalize_aggressive(text));
    assert_eq!(Normalization::Compact.apply(text), normalize_compact(text));
    assert_eq!(normalize_aggressive(text), "\"Hello\"-world again");
}

#[test]
fn test_round_trip_through_aggressive_mapping() {
    let original = "He said \u{2018}it\u{2019}s  fine\u{2019} \u{2013} then left.";
    let normalized = normalize_aggressive(original);
    let needle = normalize_aggressive("'it's fine' - then");

    let norm_start = find_str(&normalized, &needle).unwrap();
    let range = map_normalized_position_to_original(
        original,
        norm_start,
        char_len(&needle),
        Normalization::Aggressive,
    )
    .unwrap();

    assert_eq!(
        slice_chars(original, range.start, range.end).unwrap(),
        "\u{2018}it\u{2019}s  fine\u{2019} \u{2013} then"
    );
}

#[test]
fn test_trigram_similarity_orders_by_closeness() {
    let base: Vec<char> = "the quick brown fox jumps".chars().collect();
    let close: Vec<char> = "the quick brown fox leaps".chars().collect();
    let far: Vec<char> = "completely unrelated words".chars().collect();

    let base_set = trigrams(&base);
    assert!(jaccard(&base_set, &trigrams(&close)) > jaccard(&base_set, &trigrams(&far)));
}

#[test]
fn test_edit_similarity_symmetry() {
    let a: Vec<char> = "annotation".chars().collect();
    let b: Vec<char> = "anotation".chars().collect();
    assert_eq!(edit_similarity(&a, &b), edit_similarity(&b, &a));
    assert_eq!(levenshtein(&a, &b), 1);
}

#[test]
fn test_core_error_display() {
    let err = slice_chars("abc", 0, 10).unwrap_err();
    assert_eq!(err.to_string(), "offset 10 out of range for text of 3 chars");
    let _: &dyn std::error::Error = &err;
}
