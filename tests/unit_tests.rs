// Unit tests for the Dresser matching core

use dresser_match::core::{
    color::color_similarity,
    matcher::Matcher,
    scoring::{match_reasons, match_score, MAX_SUGGESTIONS, MIN_MATCH_SCORE},
    text::text_similarity,
};
use dresser_match::models::{CatalogItem, MatchWeights, Size, WardrobeItem};

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

fn catalog_item(id: &str) -> CatalogItem {
    CatalogItem {
        item_id: id.to_string(),
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
fn test_text_similarity_reflexive() {
    for s in ["jeans", "Leather Jacket", "Levi's 501", "x"] {
        assert_eq!(text_similarity(s, s), 1.0, "not reflexive for {:?}", s);
    }
}

#[test]
fn test_text_similarity_empty_strings() {
    assert_eq!(text_similarity("", ""), 1.0);

    let score = text_similarity("blue", "");
    assert!(score < 1.0);
    // Deterministic on repeat
    assert_eq!(score, text_similarity("blue", ""));
}

#[test]
fn test_color_similarity_family_symmetry() {
    assert!(color_similarity("navy", "blue") >= 0.8);
    assert!(color_similarity("blue", "navy") >= 0.8);
}

#[test]
fn test_identical_pair_reaches_exact_ceiling() {
    let wardrobe = wardrobe_item();
    let mut catalog = catalog_item("c1");
    catalog.name = wardrobe.name.clone();
    catalog.color = wardrobe.color.clone();

    // Raw score is 1.05 (all weights plus the uncapped size bonus) over a
    // 1.00 denominator; the clamp makes the ceiling exactly 1.0
    assert_eq!(match_score(&wardrobe, &catalog, &MatchWeights::default()), 1.0);
}

#[test]
fn test_disjoint_pair_scores_zero() {
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
fn test_vintage_jeans_scenario_score_and_reasons() {
    let wardrobe = wardrobe_item();
    let catalog = catalog_item("c1");
    let score = match_score(&wardrobe, &catalog, &MatchWeights::default());

    // category 0.30 exact, name 0.25 x 0.8 containment, brand 0.20 exact,
    // color family similarity 0.8 x 0.10 partial weight, material 0.10
    // exact, size bonus 0.05; denominator 1.00
    let expected = 0.30 + 0.20 + 0.20 + 0.08 + 0.10 + 0.05;
    assert!((score - expected).abs() < 1e-9, "score was {}", score);
    assert!(score >= MIN_MATCH_SCORE);

    let reasons = match_reasons(&wardrobe, &catalog);
    for expected_reason in [
        "Same category",
        "Very similar name",
        "Same brand",
        "Similar color",
        "Same material",
        "Size available",
    ] {
        assert!(
            reasons.contains(&expected_reason.to_string()),
            "missing reason {:?} in {:?}",
            expected_reason,
            reasons
        );
    }
}

#[test]
fn test_category_only_pair_excluded_by_threshold() {
    let wardrobe = WardrobeItem {
        item_id: "w3".to_string(),
        user_id: "user1".to_string(),
        category: "bottoms".to_string(),
        name: "Red Wool Sweater".to_string(),
        brand: Some("Zara".to_string()),
        color: Some("red".to_string()),
        material: Some("wool".to_string()),
        size: Some("M".to_string()),
        created_at: None,
    };
    let catalog = CatalogItem {
        item_id: "c3".to_string(),
        merchant_id: "merchant1".to_string(),
        category: "bottoms".to_string(),
        name: "Canvas Sneaker".to_string(),
        brand: Some("Nike".to_string()),
        color: Some("black".to_string()),
        material: Some("canvas".to_string()),
        size: Some(Size::Many(vec!["42".to_string()])),
        image_file_ids: vec![],
        description: None,
        created_at: None,
    };

    // Only the category weight is earned against the full denominator
    let score = match_score(&wardrobe, &catalog, &MatchWeights::default());
    assert!((score - 0.30).abs() < 1e-9, "score was {}", score);
    assert!(score < MIN_MATCH_SCORE);

    let result = Matcher::new().find_matches(&wardrobe, vec![catalog]);
    assert!(result.matches.is_empty());
}

#[test]
fn test_find_matches_bounds_and_threshold() {
    let matcher = Matcher::new();
    let wardrobe = wardrobe_item();

    let catalog: Vec<CatalogItem> = (0..50)
        .map(|i| catalog_item(&format!("c{}", i)))
        .collect();

    let result = matcher.find_matches(&wardrobe, catalog);

    assert!(result.matches.len() <= MAX_SUGGESTIONS);
    assert!(result.matches.iter().all(|m| m.match_score >= MIN_MATCH_SCORE));
    assert_eq!(result.total_candidates, 50);
}

#[test]
fn test_find_matches_sorted_descending() {
    let matcher = Matcher::new();
    let wardrobe = wardrobe_item();

    let mut exact = catalog_item("exact");
    exact.name = wardrobe.name.clone();
    exact.color = wardrobe.color.clone();

    let mut weaker = catalog_item("weaker");
    weaker.material = None;

    let result = matcher.find_matches(&wardrobe, vec![weaker, catalog_item("partial"), exact]);

    for pair in result.matches.windows(2) {
        assert!(pair[0].match_score >= pair[1].match_score);
    }
    assert_eq!(result.matches[0].item_id, "exact");
}
