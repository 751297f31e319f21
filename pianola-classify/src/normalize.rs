//! Text normalization for accent-insensitive keyword matching.

use unicode_normalization::UnicodeNormalization;
use unicode_normalization::char::is_combining_mark;

/// Fold text to lowercase ASCII: NFKD decomposition, then drop combining
/// marks and any remaining non-ASCII characters.
///
/// "Étude" and "etude" normalize to the same string, so matching is
/// accent-insensitive.
pub fn fold_ascii(text: &str) -> String {
    text.nfkd()
        .filter(|c| !is_combining_mark(*c) && c.is_ascii())
        .collect::<String>()
        .to_lowercase()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_strips_diacritics() {
        assert_eq!(fold_ascii("Étude"), "etude");
        assert_eq!(fold_ascii("Années de pèlerinage"), "annees de pelerinage");
        assert_eq!(fold_ascii("Träumerei"), "traumerei");
    }

    #[test]
    fn test_lowercases() {
        assert_eq!(fold_ascii("SYMPHONY No. 5"), "symphony no. 5");
    }

    #[test]
    fn test_drops_non_ascii_entirely() {
        // Characters with no ASCII decomposition vanish rather than erroring.
        assert_eq!(fold_ascii("ピアノ piano"), " piano");
    }

    #[test]
    fn test_empty_and_plain_ascii_unchanged() {
        assert_eq!(fold_ascii(""), "");
        assert_eq!(fold_ascii("plain text"), "plain text");
    }
}
