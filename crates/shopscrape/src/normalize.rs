//! Text cleanup for scraped fragments.

use regex::Regex;
use std::sync::OnceLock;

/// Noise removed from prices, categories and weights.
///
/// `Â£` is the pound sign read through the wrong charset; the storefront
/// serves both forms depending on the client.
const NOISE_PATTERN: &str = r"(?i)Categories:|,|Pokemon|kg|Â£|£";

fn noise() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(NOISE_PATTERN).expect("noise regex is valid"))
}

/// Strip noise tokens, trim, and collapse runs of spaces.
///
/// Token removal repeats until nothing matches, so a token spliced together
/// by an earlier removal (`"PokPokemonemon"`) is removed too. The result is
/// therefore a fixed point: `normalize(&normalize(s)) == normalize(s)`.
pub fn normalize(text: &str) -> String {
    let re = noise();
    let mut cleaned = re.replace_all(text, "").into_owned();
    while re.is_match(&cleaned) {
        cleaned = re.replace_all(&cleaned, "").into_owned();
    }
    squeeze_spaces(cleaned.trim())
}

/// Collapse every run of `' '` into one. Other whitespace is kept.
fn squeeze_spaces(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut prev_space = false;
    for c in text.chars() {
        if c == ' ' {
            if !prev_space {
                out.push(c);
            }
            prev_space = true;
        } else {
            out.push(c);
            prev_space = false;
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use proptest::test_runner::TestCaseError;

    const SAMPLES: &[&str] = &[
        "",
        "   ",
        "£63.00",
        "Â£63.00",
        "Categories: Pokemon, Seed",
        "CATEGORIES: pokemon, Seed, Grass",
        "6.9 kg",
        "6.9 KG",
        "  lots   of    spaces  ",
        "PokPokemonemon",
        "k,g",
        "CategoriesCategories::",
        "tab\tand\nnewline , kept",
        "1,000,000",
    ];

    fn has_noise(s: &str) -> bool {
        let lower = s.to_lowercase();
        ["categories:", ",", "pokemon", "kg", "£"]
            .iter()
            .any(|t| lower.contains(t))
    }

    #[test]
    fn test_price_symbol_removed() {
        assert_eq!(normalize("£63.00"), "63.00");
        assert_eq!(normalize("Â£63.00"), "63.00");
    }

    #[test]
    fn test_categories_prefix_removed() {
        assert_eq!(normalize("Categories: Pokemon, Seed"), "Seed");
        assert_eq!(normalize("Categories: Pokemon, Lizard, Fire"), "Lizard Fire");
    }

    #[test]
    fn test_weight_unit_removed() {
        assert_eq!(normalize("6.9 kg"), "6.9");
        assert_eq!(normalize("100 KG"), "100");
    }

    #[test]
    fn test_empty_input() {
        assert_eq!(normalize(""), "");
        assert_eq!(normalize("   "), "");
    }

    #[test]
    fn test_spliced_tokens_removed() {
        assert_eq!(normalize("PokPokemonemon"), "");
        assert_eq!(normalize("k,g"), "");
        assert_eq!(normalize("CategoriesCategories::"), "");
    }

    #[test]
    fn test_only_spaces_are_squeezed() {
        assert_eq!(normalize("a \t b"), "a \t b");
        assert_eq!(normalize("a    b"), "a b");
    }

    #[test]
    fn test_output_is_clean() {
        for sample in SAMPLES {
            let out = normalize(sample);
            assert!(!has_noise(&out), "noise left in {out:?} from {sample:?}");
            assert!(!out.contains("  "), "double space in {out:?}");
            assert_eq!(out, out.trim(), "untrimmed {out:?}");
        }
    }

    #[test]
    fn test_idempotent() {
        for sample in SAMPLES {
            let once = normalize(sample);
            assert_eq!(normalize(&once), once, "not idempotent for {sample:?}");
        }
    }

    /// Pieces of the noise tokens plus the separators found around them.
    const FRAGMENTS: &[&str] = &[
        "Pok", "emon", "Pokemon", "Categories", ":", "k", "g", "K", "G", "Â", "£", ",", " ",
        "  ", "Seed", "6.9",
    ];

    fn fragment_soup() -> impl Strategy<Value = String> {
        let piece = prop_oneof![
            3 => prop::sample::select(FRAGMENTS).prop_map(String::from),
            1 => any::<char>().prop_map(String::from),
        ];
        prop::collection::vec(piece, 0..32).prop_map(|pieces| pieces.concat())
    }

    fn assert_clean(input: &str) -> std::result::Result<(), TestCaseError> {
        let out = normalize(input);
        prop_assert!(!has_noise(&out), "noise left in {:?} from {:?}", out, input);
        prop_assert!(!out.contains("  "), "double space in {:?}", out);
        prop_assert_eq!(out.as_str(), out.trim());
        prop_assert_eq!(normalize(&out), out.clone());
        Ok(())
    }

    proptest! {
        #[test]
        fn test_spliced_fragments_normalize_clean(input in fragment_soup()) {
            assert_clean(&input)?;
        }

        #[test]
        fn test_arbitrary_text_normalizes_clean(input in any::<String>()) {
            assert_clean(&input)?;
        }
    }
}
