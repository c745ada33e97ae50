use serde::{Deserialize, Serialize};
use validator::Validate;

/// Request to find catalog matches for a wardrobe item
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct FindMatchesRequest {
    #[validate(length(min = 1))]
    #[serde(alias = "user_item_id", rename = "userItemId")]
    pub user_item_id: String,
}

/// Request to persist a suggested match
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct PersistMatchRequest {
    #[validate(length(min = 1))]
    #[serde(alias = "user_id", rename = "userId")]
    pub user_id: String,
    #[validate(length(min = 1))]
    #[serde(alias = "user_item_id", rename = "userItemId")]
    pub user_item_id: String,
    #[validate(length(min = 1))]
    #[serde(alias = "merchant_item_id", rename = "merchantItemId")]
    pub merchant_item_id: String,
    #[validate(range(min = 0.0, max = 1.0))]
    #[serde(alias = "match_score", rename = "matchScore")]
    pub match_score: f64,
    #[serde(alias = "match_reasons", rename = "matchReasons", default)]
    pub match_reasons: Vec<String>,
}

/// Request to transition a match's lifecycle status
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct UpdateMatchStatusRequest {
    #[validate(length(min = 1))]
    #[serde(alias = "match_id", rename = "matchId")]
    pub match_id: String,
    #[validate(length(min = 1))]
    pub status: String,
}
