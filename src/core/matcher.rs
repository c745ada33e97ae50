use crate::core::scoring::{match_reasons, match_score, MAX_SUGGESTIONS, MIN_MATCH_SCORE};
use crate::models::{CatalogItem, MatchWeights, SuggestedMatch, WardrobeItem};

/// Result of one catalog scan
#[derive(Debug)]
pub struct MatchResult {
    pub matches: Vec<SuggestedMatch>,
    pub total_candidates: usize,
}

/// Scores a wardrobe item against a merchant catalog and selects the
/// suggestions worth showing.
///
/// # Pipeline
/// 1. Score every catalog item against the wardrobe item
/// 2. Drop candidates below the minimum score
/// 3. Stable-sort descending by score (ties keep catalog order)
/// 4. Truncate to the suggestion cap
#[derive(Debug, Clone, Default)]
pub struct Matcher {
    weights: MatchWeights,
}

impl Matcher {
    /// Weights, threshold, and suggestion cap are fixed policy, so there is
    /// nothing to configure here.
    pub fn new() -> Self {
        Self {
            weights: MatchWeights::default(),
        }
    }

    /// Find catalog matches for a wardrobe item.
    ///
    /// Runs one full scan of the provided catalog slice; when the catalog is
    /// paged upstream, call this once per page and merge with [`Matcher::rank`].
    pub fn find_matches(&self, item: &WardrobeItem, catalog: Vec<CatalogItem>) -> MatchResult {
        let total_candidates = catalog.len();

        let matches: Vec<SuggestedMatch> = catalog
            .into_iter()
            .filter_map(|candidate| {
                let score = match_score(item, &candidate, &self.weights);
                if score < MIN_MATCH_SCORE {
                    return None;
                }

                let reasons = match_reasons(item, &candidate);
                Some(SuggestedMatch {
                    item_id: candidate.item_id,
                    merchant_id: candidate.merchant_id,
                    category: candidate.category,
                    name: candidate.name,
                    brand: candidate.brand,
                    color: candidate.color,
                    material: candidate.material,
                    size: candidate.size,
                    image_file_ids: candidate.image_file_ids,
                    description: candidate.description,
                    match_score: score,
                    match_reasons: reasons,
                })
            })
            .collect();

        MatchResult {
            matches: Self::rank(matches),
            total_candidates,
        }
    }

    /// Sort suggestions descending by score and truncate to the cap.
    ///
    /// `sort_by` is stable, so equal scores keep their insertion order. Also
    /// used to merge per-page results back into one bounded list.
    pub fn rank(mut matches: Vec<SuggestedMatch>) -> Vec<SuggestedMatch> {
        matches.sort_by(|a, b| {
            b.match_score
                .partial_cmp(&a.match_score)
                .unwrap_or(std::cmp::Ordering::Equal)
        });
        matches.truncate(MAX_SUGGESTIONS);
        matches
    }
}
