//! Utility functions for string processing.

use std::collections::BTreeSet;

/// Word boundary detection: checks if character is a word separator.
#[inline]
fn is_word_boundary(c: char) -> bool {
    !c.is_alphanumeric()
}

/// Split text into its distinct case-folded words.
///
/// A word is a maximal run of alphanumeric characters. Lowercasing happens
/// before splitting, so characters whose lowercase form expands (e.g. `İ`)
/// still land inside a single word.
///
/// - "Senior Software Engineer" → {"engineer", "senior", "software"}
/// - "C++ / C# dev" → {"c", "dev"}
/// - "node.js, Node.JS" → {"js", "node"}
pub fn tokenize(text: &str) -> BTreeSet<String> {
    text.to_lowercase()
        .split(is_word_boundary)
        .filter(|word| !word.is_empty())
        .map(str::to_string)
        .collect()
}

/// Normalize a categorical value: trim, lowercase, collapse inner whitespace.
///
/// Idempotent: `normalize_category(&normalize_category(x)) == normalize_category(x)`.
pub fn normalize_category(value: &str) -> String {
    value
        .to_lowercase()
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
}

/// Case-fold a query pattern. Unlike tokenization nothing is split or
/// stripped: a pattern containing a separator can't match any single token.
#[inline]
pub fn fold_pattern(pattern: &str) -> String {
    pattern.to_lowercase()
}
