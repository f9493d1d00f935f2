//! Text normalization.
//!
//! Turns raw text into the lowercase word tokens that get counted.

/// Normalize one whitespace-delimited token.
///
/// Strips leading and trailing characters that are not letters or digits,
/// then lowercases what is left. Inner punctuation is kept, so `"don't"`
/// stays `"don't"`. Returns `None` when nothing is left.
pub fn normalize_word(token: &str) -> Option<String> {
    let trimmed = token.trim_matches(|c: char| !c.is_alphanumeric());
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_lowercase())
    }
}

/// Split text on whitespace and normalize every token, in source order.
///
/// Tokens that normalize to nothing are dropped.
pub fn words(text: &str) -> impl Iterator<Item = String> + '_ {
    text.split_whitespace().filter_map(normalize_word)
}
