//! Text cleanup applied once at the content boundary.
//!
//! Collapses whitespace runs, drops blank values, and folds text for the
//! case-insensitive keyword tests the classifier runs.

use regex::Regex;
use std::sync::LazyLock;
use unicode_normalization::UnicodeNormalization;

/// Regex to collapse runs of horizontal whitespace into one space.
static WHITESPACE_COLLAPSE_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[ \t\u{00A0}]+").unwrap());

/// Fold text for keyword matching: NFKC normalization, then lowercase.
///
/// NFKC maps compatibility forms (full-width letters, ligatures) onto their
/// plain equivalents so "ＡＧＥＮＤＡ" still matches "agenda".
pub fn fold(text: &str) -> String {
    text.nfkc().collect::<String>().to_lowercase()
}

/// Clean a single text value.
///
/// Normalizes line endings, collapses whitespace within each line and trims
/// the result. Returns `None` when nothing but whitespace remains.
pub fn clean_text(text: &str) -> Option<String> {
    let text = text.replace("\r\n", "\n").replace('\r', "\n");

    let cleaned = text
        .lines()
        .map(|line| WHITESPACE_COLLAPSE_REGEX.replace_all(line, " ").trim().to_string())
        .collect::<Vec<_>>()
        .join("\n");
    let cleaned = cleaned.trim();

    if cleaned.is_empty() {
        None
    } else {
        Some(cleaned.to_string())
    }
}

/// Clean an optional text value.
pub fn clean_optional(text: Option<&str>) -> Option<String> {
    text.and_then(clean_text)
}

/// Clean every item of a list, dropping blank items.
pub fn clean_list(items: &[String]) -> Vec<String> {
    items.iter().filter_map(|item| clean_text(item)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fold_lowercases() {
        assert_eq!(fold("Weekly AGENDA"), "weekly agenda");
    }

    #[test]
    fn test_fold_full_width() {
        assert_eq!(fold("ＡＧＥＮＤＡ"), "agenda");
    }

    #[test]
    fn test_clean_text_collapses_whitespace() {
        assert_eq!(clean_text("  Hello \t  world  "), Some("Hello world".to_string()));
    }

    #[test]
    fn test_clean_text_preserves_line_breaks() {
        assert_eq!(
            clean_text("Line one  \r\n  Line two"),
            Some("Line one\nLine two".to_string())
        );
    }

    #[test]
    fn test_clean_text_blank_is_none() {
        assert_eq!(clean_text(""), None);
        assert_eq!(clean_text(" \n\t "), None);
    }

    #[test]
    fn test_clean_list_drops_blank_items() {
        let items = vec!["A".to_string(), "  ".to_string(), " B ".to_string()];
        assert_eq!(clean_list(&items), vec!["A", "B"]);
    }
}
