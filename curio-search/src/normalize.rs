//! Text normalization shared by every scorer and filter.

use unicode_normalization::UnicodeNormalization;
use unicode_normalization::char::is_combining_mark;

/// Canonicalize text for comparison.
///
/// Lower-cases, decomposes accented characters and drops their combining
/// marks, then removes everything that is not a lowercase ASCII letter,
/// an ASCII digit or whitespace. Idempotent.
///
/// # Examples
/// ```
/// use curio_search::normalize::normalize;
///
/// assert_eq!(normalize("Pokémon: Diamond & Pearl!"), "pokemon diamond  pearl");
/// ```
pub fn normalize(text: &str) -> String {
    text.to_lowercase()
        .nfd()
        .filter(|c| !is_combining_mark(*c))
        .filter(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c.is_whitespace())
        .collect()
}

/// Normalize and collapse whitespace runs to single spaces.
///
/// Used for free-text queries and for the titles they are matched
/// against, so stray or doubled spaces never decide a match.
pub fn normalize_compact(text: &str) -> String {
    normalize(text)
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_strips_diacritics_and_case() {
        assert_eq!(normalize("Shingeki no Kyojin"), "shingeki no kyojin");
        assert_eq!(normalize("Café Ñoño"), "cafe nono");
        assert_eq!(normalize("ÀÉÎÕÜ"), "aeiou");
    }

    #[test]
    fn test_strips_punctuation_and_symbols() {
        assert_eq!(normalize("Re:Zero − Starting Life"), "rezero  starting life");
        assert_eq!(normalize("Steins;Gate 0"), "steinsgate 0");
        assert_eq!(normalize("進撃の巨人"), "");
    }

    #[test]
    fn test_empty_input() {
        assert_eq!(normalize(""), "");
        assert_eq!(normalize_compact("   "), "");
    }

    #[test]
    fn test_idempotent_on_samples() {
        for sample in ["Ébène  İstanbul", "ǅemal", "ﬁnal ½", "Tab\tSeparated"] {
            let once = normalize(sample);
            assert_eq!(normalize(&once), once, "not idempotent for {sample:?}");
        }
    }

    #[test]
    fn test_normalize_compact_collapses_whitespace() {
        assert_eq!(normalize_compact("  Naruto   Shippuden "), "naruto shippuden");
        assert_eq!(normalize_compact("Re:Zero − Starting Life"), "rezero starting life");
    }
}
