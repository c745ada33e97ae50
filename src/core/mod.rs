// Core algorithm exports
pub mod color;
pub mod matcher;
pub mod scoring;
pub mod text;

pub use color::color_similarity;
pub use matcher::{MatchResult, Matcher};
pub use scoring::{match_reasons, match_score, MAX_SUGGESTIONS, MIN_MATCH_SCORE};
pub use text::text_similarity;
