//! Dresser Match - wardrobe-to-catalog item matching service
//!
//! This library provides the scoring and ranking core that suggests
//! merchant catalog items matching a user's wardrobe items: fuzzy text and
//! color similarity, a weighted attribute matcher, and a bounded ranker.

pub mod config;
pub mod core;
pub mod models;
pub mod routes;
pub mod services;

// Re-export commonly used types
pub use crate::core::{color_similarity, match_reasons, match_score, text_similarity, Matcher};
pub use crate::models::{
    CatalogItem, FindMatchesRequest, FindMatchesResponse, ItemMatch, MatchStatus, MatchWeights,
    Size, SuggestedMatch, WardrobeItem,
};
