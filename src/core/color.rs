use crate::core::text::text_similarity;

/// Similarity granted when two colors belong to the same base family.
pub const SAME_FAMILY_SIMILARITY: f64 = 0.8;

/// Base color families and their recognized naming variants. A const slice
/// rather than a map so family lookup order is fixed: the first family a
/// color appears in wins.
const COLOR_FAMILIES: &[(&str, &[&str])] = &[
    ("blue", &["navy", "royal", "sky", "denim", "cobalt"]),
    ("red", &["crimson", "scarlet", "burgundy", "maroon", "cherry"]),
    ("green", &["olive", "emerald", "forest", "sage", "mint"]),
    ("black", &["charcoal", "onyx", "jet", "ebony"]),
    ("white", &["ivory", "cream", "eggshell", "off-white"]),
    ("brown", &["tan", "beige", "khaki", "chocolate", "camel"]),
    ("gray", &["grey", "silver", "slate", "ash"]),
    ("pink", &["rose", "blush", "fuchsia", "salmon"]),
    ("purple", &["violet", "lavender", "lilac", "plum"]),
];

/// Find the first base family containing the given (lowercased) color.
/// The base color counts as a member of its own family.
fn base_family(color: &str) -> Option<&'static str> {
    COLOR_FAMILIES
        .iter()
        .find(|(base, variants)| *base == color || variants.contains(&color))
        .map(|(base, _)| *base)
}

/// Compute a similarity score (0-1) between two color labels.
///
/// Colors in the same base family ("navy" and "blue") score a fixed 0.8;
/// anything else falls back to plain text similarity on the raw strings.
pub fn color_similarity(a: &str, b: &str) -> f64 {
    let a_lower = a.to_lowercase();
    let b_lower = b.to_lowercase();

    if let (Some(family_a), Some(family_b)) = (base_family(&a_lower), base_family(&b_lower)) {
        if family_a == family_b {
            return SAME_FAMILY_SIMILARITY;
        }
    }

    text_similarity(a, b)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_same_family_is_symmetric() {
        assert_eq!(color_similarity("navy", "blue"), SAME_FAMILY_SIMILARITY);
        assert_eq!(color_similarity("blue", "navy"), SAME_FAMILY_SIMILARITY);
    }

    #[test]
    fn test_variant_to_variant() {
        assert_eq!(color_similarity("navy", "cobalt"), SAME_FAMILY_SIMILARITY);
        assert_eq!(color_similarity("grey", "silver"), SAME_FAMILY_SIMILARITY);
    }

    #[test]
    fn test_case_insensitive_lookup() {
        assert_eq!(color_similarity("Navy", "BLUE"), SAME_FAMILY_SIMILARITY);
    }

    #[test]
    fn test_cross_family_falls_back_to_text() {
        // "red" vs "blue" share no family and no characters in position
        assert_eq!(color_similarity("red", "blue"), 0.0);
    }

    #[test]
    fn test_unknown_colors_fall_back_to_text() {
        // Neither is in the table; identical text still scores 1.0
        assert_eq!(color_similarity("teal", "teal"), 1.0);
        assert_eq!(color_similarity("teal", "turquoise"), text_similarity("teal", "turquoise"));
    }

    #[test]
    fn test_base_family_lookup() {
        assert_eq!(base_family("denim"), Some("blue"));
        assert_eq!(base_family("khaki"), Some("brown"));
        assert_eq!(base_family("teal"), None);
    }
}
