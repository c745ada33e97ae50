use crate::core::{color::color_similarity, text::text_similarity};
use crate::models::{CatalogItem, MatchWeights, Size, WardrobeItem};

// Thresholds shared by the scorer and the reason explainer. Both sides read
// from here so the reasons can never disagree with the score.
pub const NAME_STRONG_SIMILARITY: f64 = 0.8;
pub const NAME_PARTIAL_SIMILARITY: f64 = 0.6;
pub const BRAND_PARTIAL_THRESHOLD: f64 = 0.7;
pub const COLOR_SIMILAR_THRESHOLD: f64 = 0.7;
pub const MATERIAL_PARTIAL_THRESHOLD: f64 = 0.8;

// Reduced weights applied when an attribute is close but not exact,
// each capped below its exact-match weight.
pub const BRAND_PARTIAL_WEIGHT: f64 = 0.15;
pub const COLOR_PARTIAL_WEIGHT: f64 = 0.10;
pub const MATERIAL_PARTIAL_WEIGHT: f64 = 0.08;

/// Candidates below this score are never suggested.
pub const MIN_MATCH_SCORE: f64 = 0.6;

/// Suggestions returned per wardrobe item query.
pub const MAX_SUGGESTIONS: usize = 5;

/// Catalog descriptions longer than this are called out as detailed.
const DETAILED_DESCRIPTION_LEN: usize = 50;

/// Outcome of comparing one attribute pair: the weight earned and the
/// weight that was attainable. Attributes missing on either side return
/// `None` and contribute to neither side of the normalization.
#[derive(Debug, Clone, Copy)]
pub struct AttributeScore {
    pub earned: f64,
    pub weight: f64,
}

#[inline]
fn eq_ignore_case(a: &str, b: &str) -> bool {
    a.to_lowercase() == b.to_lowercase()
}

/// Category requires an exact case-insensitive match; no partial credit.
fn category_score(wardrobe: &WardrobeItem, catalog: &CatalogItem, weights: &MatchWeights) -> AttributeScore {
    let earned = if eq_ignore_case(&wardrobe.category, &catalog.category) {
        weights.category
    } else {
        0.0
    };
    AttributeScore { earned, weight: weights.category }
}

/// Name is scored proportionally to text similarity.
fn name_score(wardrobe: &WardrobeItem, catalog: &CatalogItem, weights: &MatchWeights) -> AttributeScore {
    AttributeScore {
        earned: text_similarity(&wardrobe.name, &catalog.name) * weights.name,
        weight: weights.name,
    }
}

/// Brand: full weight on an exact match, reduced partial credit when the
/// names are merely close.
fn brand_score(
    wardrobe: &WardrobeItem,
    catalog: &CatalogItem,
    weights: &MatchWeights,
) -> Option<AttributeScore> {
    let a = wardrobe.brand.as_deref()?;
    let b = catalog.brand.as_deref()?;

    let earned = if eq_ignore_case(a, b) {
        weights.brand
    } else {
        let similarity = text_similarity(a, b);
        if similarity > BRAND_PARTIAL_THRESHOLD {
            similarity * BRAND_PARTIAL_WEIGHT
        } else {
            0.0
        }
    };

    Some(AttributeScore { earned, weight: weights.brand })
}

/// Color: exact match earns full weight, otherwise family-aware color
/// similarity at reduced weight.
fn color_score(
    wardrobe: &WardrobeItem,
    catalog: &CatalogItem,
    weights: &MatchWeights,
) -> Option<AttributeScore> {
    let a = wardrobe.color.as_deref()?;
    let b = catalog.color.as_deref()?;

    let earned = if eq_ignore_case(a, b) {
        weights.color
    } else {
        color_similarity(a, b) * COLOR_PARTIAL_WEIGHT
    };

    Some(AttributeScore { earned, weight: weights.color })
}

/// Material: exact match earns full weight, near matches earn reduced
/// partial credit.
fn material_score(
    wardrobe: &WardrobeItem,
    catalog: &CatalogItem,
    weights: &MatchWeights,
) -> Option<AttributeScore> {
    let a = wardrobe.material.as_deref()?;
    let b = catalog.material.as_deref()?;

    let earned = if eq_ignore_case(a, b) {
        weights.material
    } else {
        let similarity = text_similarity(a, b);
        if similarity > MATERIAL_PARTIAL_THRESHOLD {
            similarity * MATERIAL_PARTIAL_WEIGHT
        } else {
            0.0
        }
    };

    Some(AttributeScore { earned, weight: weights.material })
}

/// Whether the catalog listing covers the wardrobe item's size.
fn size_available(wardrobe: &WardrobeItem, catalog: &CatalogItem) -> bool {
    match (&wardrobe.size, &catalog.size) {
        (Some(size), Some(offered)) => offered.offers(size),
        _ => false,
    }
}

/// Calculate a normalized match score (0-1) for a wardrobe/catalog pair.
///
/// Only attributes present on both sides contribute to the denominator, so
/// missing fields lower confidence rather than count as failures. Size
/// availability is a flat tie-breaker bonus added to the numerator only; it
/// can push the ratio past 1.0, which the final clamp caps.
pub fn match_score(wardrobe: &WardrobeItem, catalog: &CatalogItem, weights: &MatchWeights) -> f64 {
    let attributes = [
        Some(category_score(wardrobe, catalog, weights)),
        Some(name_score(wardrobe, catalog, weights)),
        brand_score(wardrobe, catalog, weights),
        color_score(wardrobe, catalog, weights),
        material_score(wardrobe, catalog, weights),
    ];

    let mut earned = 0.0;
    let mut max_possible = 0.0;
    for attribute in attributes.into_iter().flatten() {
        earned += attribute.earned;
        max_possible += attribute.weight;
    }

    if size_available(wardrobe, catalog) {
        earned += weights.size_bonus;
    }

    if max_possible > 0.0 {
        (earned / max_possible).min(1.0)
    } else {
        0.0
    }
}

/// Derive the human-readable reasons a pair matched.
///
/// Uses the same thresholds as the scorer. Photo and description nudges at
/// the end are presentation-only and never feed the numeric score.
pub fn match_reasons(wardrobe: &WardrobeItem, catalog: &CatalogItem) -> Vec<String> {
    let mut reasons = Vec::new();

    if eq_ignore_case(&wardrobe.category, &catalog.category) {
        reasons.push("Same category".to_string());
    }

    let name_similarity = text_similarity(&wardrobe.name, &catalog.name);
    if name_similarity >= NAME_STRONG_SIMILARITY {
        reasons.push("Very similar name".to_string());
    } else if name_similarity > NAME_PARTIAL_SIMILARITY {
        reasons.push("Similar name".to_string());
    }

    if let (Some(a), Some(b)) = (wardrobe.brand.as_deref(), catalog.brand.as_deref()) {
        if eq_ignore_case(a, b) {
            reasons.push("Same brand".to_string());
        }
    }

    if let (Some(a), Some(b)) = (wardrobe.color.as_deref(), catalog.color.as_deref()) {
        if eq_ignore_case(a, b) {
            reasons.push("Same color".to_string());
        } else if color_similarity(a, b) > COLOR_SIMILAR_THRESHOLD {
            reasons.push("Similar color".to_string());
        }
    }

    if let (Some(a), Some(b)) = (wardrobe.material.as_deref(), catalog.material.as_deref()) {
        if eq_ignore_case(a, b) {
            reasons.push("Same material".to_string());
        }
    }

    if size_available(wardrobe, catalog) {
        let reason = match catalog.size {
            Some(Size::Many(_)) => "Size available",
            _ => "Same size",
        };
        reasons.push(reason.to_string());
    }

    if !catalog.image_file_ids.is_empty() {
        reasons.push("Has photos".to_string());
    }
    if catalog
        .description
        .as_deref()
        .is_some_and(|d| d.len() > DETAILED_DESCRIPTION_LEN)
    {
        reasons.push("Detailed description".to_string());
    }

    reasons
}

#[cfg(test)]
mod tests {
    use super::*;

    fn wardrobe_item() -> WardrobeItem {
        WardrobeItem {
            item_id: "w1".to_string(),
            user_id: "user1".to_string(),
            category: "bottoms".to_string(),
            name: "Blue Denim Jeans".to_string(),
            brand: Some("Levi's".to_string()),
            color: Some("blue".to_string()),
            material: Some("denim".to_string()),
            size: Some("32".to_string()),
            created_at: None,
        }
    }

    fn catalog_item() -> CatalogItem {
        CatalogItem {
            item_id: "c1".to_string(),
            merchant_id: "merchant1".to_string(),
            category: "bottoms".to_string(),
            name: "Vintage Blue Denim Jeans".to_string(),
            brand: Some("Levi's".to_string()),
            color: Some("navy".to_string()),
            material: Some("denim".to_string()),
            size: Some(Size::Many(vec![
                "30".to_string(),
                "32".to_string(),
                "34".to_string(),
            ])),
            image_file_ids: vec![],
            description: None,
            created_at: None,
        }
    }

    #[test]
    fn test_vintage_jeans_scenario() {
        let weights = MatchWeights::default();
        let score = match_score(&wardrobe_item(), &catalog_item(), &weights);

        // category 0.30 + name 0.25*0.8 + brand 0.20 + color 0.8*0.10
        // + material 0.10 + size bonus 0.05, over a full 1.00 denominator
        let expected = 0.30 + 0.20 + 0.20 + 0.08 + 0.10 + 0.05;
        assert!((score - expected).abs() < 1e-9, "score was {}", score);
    }

    #[test]
    fn test_vintage_jeans_reasons() {
        let reasons = match_reasons(&wardrobe_item(), &catalog_item());
        assert_eq!(
            reasons,
            vec![
                "Same category",
                "Very similar name",
                "Same brand",
                "Similar color",
                "Same material",
                "Size available",
            ]
        );
    }

    #[test]
    fn test_identical_pair_clamps_at_one() {
        let wardrobe = wardrobe_item();
        let mut catalog = catalog_item();
        catalog.name = wardrobe.name.clone();
        catalog.color = wardrobe.color.clone();

        // All five attributes exact plus the size bonus: 1.05 raw, clamped
        let score = match_score(&wardrobe, &catalog, &MatchWeights::default());
        assert_eq!(score, 1.0);
    }

    #[test]
    fn test_fully_disjoint_pair_scores_zero() {
        let wardrobe = WardrobeItem {
            item_id: "w2".to_string(),
            user_id: "user1".to_string(),
            category: "tops".to_string(),
            name: "Red Wool Sweater".to_string(),
            brand: Some("Zara".to_string()),
            color: Some("red".to_string()),
            material: Some("wool".to_string()),
            size: Some("M".to_string()),
            created_at: None,
        };
        let catalog = CatalogItem {
            item_id: "c2".to_string(),
            merchant_id: "merchant1".to_string(),
            category: "shoes".to_string(),
            name: "Canvas Sneaker".to_string(),
            brand: Some("Nike".to_string()),
            color: Some("black".to_string()),
            material: Some("canvas".to_string()),
            size: Some(Size::Many(vec!["42".to_string()])),
            image_file_ids: vec![],
            description: None,
            created_at: None,
        };

        assert_eq!(match_score(&wardrobe, &catalog, &MatchWeights::default()), 0.0);
    }

    #[test]
    fn test_missing_attributes_skip_denominator() {
        let mut wardrobe = wardrobe_item();
        wardrobe.brand = None;
        wardrobe.color = None;
        wardrobe.material = None;
        wardrobe.size = None;

        let mut catalog = catalog_item();
        catalog.name = wardrobe.name.clone();

        // Only category (0.30) and name (0.25) are comparable, both exact
        let score = match_score(&wardrobe, &catalog, &MatchWeights::default());
        assert_eq!(score, 1.0);
    }

    #[test]
    fn test_category_only_match_stays_below_threshold() {
        let wardrobe = WardrobeItem {
            item_id: "w3".to_string(),
            user_id: "user1".to_string(),
            category: "bottoms".to_string(),
            name: "Red Wool Sweater".to_string(),
            brand: None,
            color: None,
            material: None,
            size: None,
            created_at: None,
        };
        let mut catalog = catalog_item();
        catalog.name = "Canvas Sneaker".to_string();
        catalog.brand = None;
        catalog.color = None;
        catalog.material = None;
        catalog.size = None;

        // 0.30 of a 0.55 denominator
        let score = match_score(&wardrobe, &catalog, &MatchWeights::default());
        assert!((score - 0.30 / 0.55).abs() < 1e-9);
        assert!(score < MIN_MATCH_SCORE);
    }

    #[test]
    fn test_presentation_reasons_do_not_affect_score() {
        let wardrobe = wardrobe_item();
        let mut catalog = catalog_item();
        let plain_score = match_score(&wardrobe, &catalog, &MatchWeights::default());

        catalog.image_file_ids = vec!["photo1".to_string()];
        catalog.description = Some("A ".repeat(40));

        assert_eq!(match_score(&wardrobe, &catalog, &MatchWeights::default()), plain_score);

        let reasons = match_reasons(&wardrobe, &catalog);
        assert!(reasons.contains(&"Has photos".to_string()));
        assert!(reasons.contains(&"Detailed description".to_string()));
    }

    #[test]
    fn test_scalar_size_reports_same_size() {
        let wardrobe = wardrobe_item();
        let mut catalog = catalog_item();
        catalog.size = Some(Size::Single("32".to_string()));

        let reasons = match_reasons(&wardrobe, &catalog);
        assert!(reasons.contains(&"Same size".to_string()));
        assert!(!reasons.contains(&"Size available".to_string()));
    }

    #[test]
    fn test_brand_partial_credit() {
        let mut wardrobe = wardrobe_item();
        let mut catalog = catalog_item();
        wardrobe.brand = Some("Levis".to_string());
        catalog.brand = Some("Levis Strauss".to_string());

        // Containment similarity 0.8 clears the 0.7 bar for partial credit
        let score = brand_score(&wardrobe, &catalog, &MatchWeights::default()).unwrap();
        assert!((score.earned - 0.8 * BRAND_PARTIAL_WEIGHT).abs() < 1e-9);
        assert_eq!(score.weight, 0.20);
    }
}
