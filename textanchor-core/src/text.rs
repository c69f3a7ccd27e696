//! Char-offset helpers
//!
//! Rust strings are indexed by byte, while every offset this workspace
//! exchanges is a `char` index. These helpers keep the conversion in one
//! place.

use crate::error::{CoreError, Result};

/// Number of chars in `text`
pub fn char_len(text: &str) -> usize {
    text.chars().count()
}

/// Slice `text` by char offsets `[start, end)`
pub fn slice_chars(text: &str, start: usize, end: usize) -> Result<&str> {
    if end < start {
        return Err(CoreError::InvertedRange { start, end });
    }

    let byte_start = byte_offset(text, start)?;
    let byte_end = byte_offset(text, end)?;
    Ok(&text[byte_start..byte_end])
}

/// First occurrence of `needle` in `haystack`, as a char offset
pub fn find_str(haystack: &str, needle: &str) -> Option<usize> {
    haystack
        .find(needle)
        .map(|byte_pos| haystack[..byte_pos].chars().count())
}

/// First occurrence of `needle` in `haystack` over char slices
pub fn find_chars(haystack: &[char], needle: &[char]) -> Option<usize> {
    if needle.is_empty() {
        return Some(0);
    }
    if needle.len() > haystack.len() {
        return None;
    }
    haystack.windows(needle.len()).position(|w| w == needle)
}

fn byte_offset(text: &str, char_offset: usize) -> Result<usize> {
    if char_offset == 0 {
        return Ok(0);
    }

    match text.char_indices().nth(char_offset) {
        Some((byte, _)) => Ok(byte),
        None => {
            let len = char_len(text);
            if char_offset == len {
                Ok(text.len())
            } else {
                Err(CoreError::OffsetOutOfRange {
                    offset: char_offset,
                    len,
                })
            }
        }
    }
}
