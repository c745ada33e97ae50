use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Garment owned and cataloged by an end user
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WardrobeItem {
    #[serde(rename = "itemId", alias = "item_id")]
    pub item_id: String,
    #[serde(rename = "userId", alias = "user_id")]
    pub user_id: String,
    pub category: String,
    pub name: String,
    #[serde(default)]
    pub brand: Option<String>,
    #[serde(default)]
    pub color: Option<String>,
    #[serde(default)]
    pub material: Option<String>,
    #[serde(default)]
    pub size: Option<String>,
    #[serde(default)]
    pub created_at: Option<chrono::DateTime<chrono::Utc>>,
}

/// Garment listed for sale by a merchant
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CatalogItem {
    #[serde(rename = "itemId", alias = "item_id")]
    pub item_id: String,
    #[serde(rename = "merchantId", alias = "merchant_id")]
    pub merchant_id: String,
    pub category: String,
    pub name: String,
    #[serde(default)]
    pub brand: Option<String>,
    #[serde(default)]
    pub color: Option<String>,
    #[serde(default)]
    pub material: Option<String>,
    #[serde(default)]
    pub size: Option<Size>,
    #[serde(rename = "imageFileIds", alias = "image_file_ids", default)]
    pub image_file_ids: Vec<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub created_at: Option<chrono::DateTime<chrono::Utc>>,
}

/// Size field as it appears in item records: a single size for wardrobe
/// items, a list of offered sizes for catalog listings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(untagged)]
pub enum Size {
    Single(String),
    Many(Vec<String>),
}

impl Size {
    /// Normalize to a uniform list of offered sizes.
    pub fn as_list(&self) -> Vec<&str> {
        match self {
            Size::Single(s) => vec![s.as_str()],
            Size::Many(sizes) => sizes.iter().map(String::as_str).collect(),
        }
    }

    /// Whether this size field covers the given size.
    pub fn offers(&self, size: &str) -> bool {
        self.as_list().iter().any(|s| s.eq_ignore_ascii_case(size))
    }
}

/// Lifecycle status of a persisted match
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MatchStatus {
    Suggested,
    Accepted,
    Rejected,
}

impl MatchStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            MatchStatus::Suggested => "suggested",
            MatchStatus::Accepted => "accepted",
            MatchStatus::Rejected => "rejected",
        }
    }
}

impl fmt::Display for MatchStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for MatchStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "suggested" => Ok(MatchStatus::Suggested),
            "accepted" => Ok(MatchStatus::Accepted),
            "rejected" => Ok(MatchStatus::Rejected),
            other => Err(format!("unknown match status: {}", other)),
        }
    }
}

/// Persisted wardrobe-to-catalog match. The score is a snapshot taken at
/// creation time and is not re-synced when either item changes.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ItemMatch {
    pub id: uuid::Uuid,
    #[serde(rename = "userId")]
    pub user_id: String,
    #[serde(rename = "userItemId")]
    pub user_item_id: String,
    #[serde(rename = "merchantItemId")]
    pub merchant_item_id: String,
    #[serde(rename = "matchScore")]
    pub match_score: f64,
    #[serde(rename = "matchReasons")]
    pub match_reasons: Vec<String>,
    pub status: MatchStatus,
    #[serde(rename = "createdAt")]
    pub created_at: chrono::DateTime<chrono::Utc>,
    #[serde(rename = "updatedAt")]
    pub updated_at: chrono::DateTime<chrono::Utc>,
}

/// Scored suggestion returned to the UI
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SuggestedMatch {
    #[serde(rename = "itemId")]
    pub item_id: String,
    #[serde(rename = "merchantId")]
    pub merchant_id: String,
    pub category: String,
    pub name: String,
    pub brand: Option<String>,
    pub color: Option<String>,
    pub material: Option<String>,
    pub size: Option<Size>,
    #[serde(rename = "imageFileIds")]
    pub image_file_ids: Vec<String>,
    pub description: Option<String>,
    #[serde(rename = "matchScore")]
    pub match_score: f64,
    #[serde(rename = "matchReasons")]
    pub match_reasons: Vec<String>,
}

/// Per-attribute scoring weights
#[derive(Debug, Clone, Copy)]
pub struct MatchWeights {
    pub category: f64,
    pub name: f64,
    pub brand: f64,
    pub color: f64,
    pub material: f64,
    pub size_bonus: f64,
}

impl Default for MatchWeights {
    fn default() -> Self {
        Self {
            category: 0.30,
            name: 0.25,
            brand: 0.20,
            color: 0.15,
            material: 0.10,
            size_bonus: 0.05,
        }
    }
}
