// Model exports
pub mod domain;
pub mod requests;
pub mod responses;

pub use domain::{
    CatalogItem, ItemMatch, MatchStatus, MatchWeights, Size, SuggestedMatch, WardrobeItem,
};
pub use requests::{FindMatchesRequest, PersistMatchRequest, UpdateMatchStatusRequest};
pub use responses::{ErrorResponse, FindMatchesResponse, HealthResponse, MatchResponse};
