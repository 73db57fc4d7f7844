//! Text folding for accent- and case-insensitive comparison.

use unicode_normalization::UnicodeNormalization;

/// Lowercase, decompose (NFD) and drop combining diacritical marks.
///
/// `"Insulína"` and `"INSULINA"` both fold to `"insulina"`. Decomposed
/// letters are not recomposed, so `"ñ"` folds to `"n"`.
pub fn normalize(text: &str) -> String {
    text.to_lowercase()
        .nfd()
        .filter(|c| !is_combining_diacritic(*c))
        .collect()
}

/// [`normalize`] for optional fields; absent text folds to the empty string.
pub fn normalize_opt(text: Option<&str>) -> String {
    text.map(normalize).unwrap_or_default()
}

/// Combining Diacritical Marks block.
fn is_combining_diacritic(c: char) -> bool {
    ('\u{0300}'..='\u{036F}').contains(&c)
}
