//! Utility functions and helpers.

pub mod http;

use unicode_segmentation::UnicodeSegmentation;

/// Collapse whitespace runs (including newlines) into single spaces.
pub fn normalize_ws(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Grapheme-bounded prefix of a body, for error context.
pub fn snippet(text: &str, max_graphemes: usize) -> String {
    let mut graphemes = text.trim().graphemes(true);
    let head: String = graphemes.by_ref().take(max_graphemes).collect();
    if graphemes.next().is_some() {
        format!("{head}...")
    } else {
        head
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_ws() {
        assert_eq!(normalize_ws("  a \r\n b\t c  "), "a b c");
        assert_eq!(normalize_ws(""), "");
    }

    #[test]
    fn test_snippet_short_text_unchanged() {
        assert_eq!(snippet("hello", 10), "hello");
    }

    #[test]
    fn test_snippet_truncates_long_text() {
        assert_eq!(snippet("abcdefgh", 4), "abcd...");
    }

    #[test]
    fn test_snippet_respects_grapheme_boundaries() {
        // Combining marks must not be split from their base character
        let text = "gü̈nü̈"; // multi-codepoint graphemes
        let cut = snippet(text, 2);
        assert!(cut.starts_with("gü̈"));
    }
}
