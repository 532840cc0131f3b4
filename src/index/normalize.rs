//! Text normalization for boolean-index keys.

/// Lowercase `text` and drop every character outside `[a-z0-9]` and whitespace.
///
/// Accented letters are removed rather than transliterated, so `Café` becomes `caf`.
pub fn normalize(text: &str) -> String {
    text.to_lowercase()
        .chars()
        .filter(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c.is_whitespace())
        .collect()
}

/// Normalized tokens of `text`, in order, duplicates included.
pub fn tokenize(text: &str) -> Vec<String> {
    normalize(text)
        .split_whitespace()
        .map(str::to_string)
        .collect()
}
