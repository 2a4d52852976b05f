//! Comparison form for quote and page text.
//!
//! Every whitespace character is deleted outright rather than collapsed, so
//! a sentence that the PDF text layer wrapped across lines (or split between
//! two text runs) still matches the same sentence quoted on one line. The
//! result is lowercased. Normalized text is only ever compared, never shown.

/// Deletes all whitespace and lowercases.
///
/// Idempotent: `normalize(&normalize(s)) == normalize(s)`.
pub fn normalize(text: &str) -> String {
    text.chars()
        .filter(|c| !is_strippable(*c))
        .flat_map(char::to_lowercase)
        .collect()
}

// PDF text layers emit U+FEFF between runs; it is not Unicode White_Space.
fn is_strippable(c: char) -> bool {
    c.is_whitespace() || c == '\u{feff}'
}
