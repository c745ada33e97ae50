use crate::core::Matcher;
use crate::models::{
    CatalogItem, ErrorResponse, FindMatchesRequest, FindMatchesResponse, HealthResponse,
    MatchResponse, MatchStatus, PersistMatchRequest, SuggestedMatch, UpdateMatchStatusRequest,
};
use crate::services::{CacheKey, CacheManager, MatchStore, SupabaseClient, SupabaseError};
use actix_web::{web, HttpResponse, Responder};
use std::sync::Arc;
use validator::Validate;

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    pub supabase: Arc<SupabaseClient>,
    pub cache: Arc<CacheManager>,
    pub store: Arc<MatchStore>,
    pub matcher: Matcher,
    pub catalog_page_size: usize,
}

/// Configure all match-related routes
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.route("/health", web::get().to(health_check))
        .route("/matches/find", web::post().to(find_matches))
        .route("/matches", web::post().to(persist_match))
        .route("/matches/status", web::post().to(update_match_status))
        .route("/matches/persisted", web::get().to(get_persisted_matches));
}

/// Health check endpoint
async fn health_check(state: web::Data<AppState>) -> impl Responder {
    let pg_healthy = state.store.health_check().await.unwrap_or(false);

    let status = if pg_healthy { "healthy" } else { "degraded" };

    HttpResponse::Ok().json(HealthResponse {
        status: status.to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        timestamp: chrono::Utc::now(),
    })
}

/// Fetch one catalog page, via cache when possible.
async fn catalog_page(
    state: &AppState,
    limit: usize,
    offset: usize,
) -> Result<Vec<CatalogItem>, SupabaseError> {
    let cache_key = CacheKey::catalog_page(limit, offset);

    if let Ok(page) = state.cache.get::<Vec<CatalogItem>>(&cache_key).await {
        return Ok(page);
    }

    let page = state.supabase.list_catalog_items(limit, offset).await?;

    if let Err(e) = state.cache.set(&cache_key, &page).await {
        tracing::warn!("Failed to cache catalog page {}: {}", cache_key, e);
    }

    Ok(page)
}

/// Find matches endpoint
///
/// POST /api/v1/matches/find
///
/// Request body:
/// ```json
/// {
///   "userItemId": "string"
/// }
/// ```
async fn find_matches(
    state: web::Data<AppState>,
    req: web::Json<FindMatchesRequest>,
) -> impl Responder {
    if let Err(errors) = req.validate() {
        tracing::info!("Validation failed for find_matches request: {:?}", errors);
        return HttpResponse::BadRequest().json(ErrorResponse {
            error: "Validation failed".to_string(),
            message: errors.to_string(),
            status_code: 400,
        });
    }

    let user_item_id = &req.user_item_id;

    tracing::info!("Finding matches for wardrobe item: {}", user_item_id);

    let wardrobe_item = match state.supabase.get_wardrobe_item(user_item_id).await {
        Ok(item) => item,
        Err(SupabaseError::NotFound(msg)) => {
            return HttpResponse::NotFound().json(ErrorResponse {
                error: "Wardrobe item not found".to_string(),
                message: msg,
                status_code: 404,
            });
        }
        Err(e) => {
            tracing::error!("Failed to fetch wardrobe item {}: {}", user_item_id, e);
            return HttpResponse::InternalServerError().json(ErrorResponse {
                error: "Failed to fetch wardrobe item".to_string(),
                message: e.to_string(),
                status_code: 500,
            });
        }
    };

    // Page through the catalog; the matcher runs once per page and the
    // per-page winners are merged and re-ranked at the end.
    let page_size = state.catalog_page_size;
    let mut offset = 0;
    let mut total_candidates = 0;
    let mut suggestions: Vec<SuggestedMatch> = Vec::new();

    loop {
        let page = match catalog_page(state.get_ref(), page_size, offset).await {
            Ok(page) => page,
            Err(e) => {
                tracing::error!("Failed to fetch catalog page at offset {}: {}", offset, e);
                return HttpResponse::InternalServerError().json(ErrorResponse {
                    error: "Failed to fetch catalog".to_string(),
                    message: e.to_string(),
                    status_code: 500,
                });
            }
        };

        let page_len = page.len();
        let result = state.matcher.find_matches(&wardrobe_item, page);
        total_candidates += result.total_candidates;
        suggestions.extend(result.matches);

        if page_len < page_size {
            break;
        }
        offset += page_size;
    }

    let matches = Matcher::rank(suggestions);

    tracing::info!(
        "Returning {} matches for wardrobe item {} (from {} candidates)",
        matches.len(),
        user_item_id,
        total_candidates
    );

    HttpResponse::Ok().json(FindMatchesResponse {
        matches,
        total_candidates,
    })
}

/// Persist match endpoint
///
/// POST /api/v1/matches
///
/// Request body:
/// ```json
/// {
///   "userId": "string",
///   "userItemId": "string",
///   "merchantItemId": "string",
///   "matchScore": 0.97,
///   "matchReasons": ["Same category"]
/// }
/// ```
async fn persist_match(
    state: web::Data<AppState>,
    req: web::Json<PersistMatchRequest>,
) -> impl Responder {
    if let Err(errors) = req.validate() {
        return HttpResponse::BadRequest().json(ErrorResponse {
            error: "Validation failed".to_string(),
            message: errors.to_string(),
            status_code: 400,
        });
    }

    let result = state
        .store
        .insert_match(
            &req.user_id,
            &req.user_item_id,
            &req.merchant_item_id,
            req.match_score,
            &req.match_reasons,
        )
        .await;

    match result {
        Ok(record) => {
            // Persisted match listings for this item are now stale
            let cache_key = CacheKey::matches(&req.user_item_id);
            if let Err(e) = state.cache.delete(&cache_key).await {
                tracing::warn!("Failed to invalidate cache: {}", e);
            }

            HttpResponse::Ok().json(MatchResponse {
                success: true,
                record,
            })
        }
        Err(e) => {
            tracing::error!("Failed to persist match: {}", e);
            HttpResponse::InternalServerError().json(ErrorResponse {
                error: "Failed to persist match".to_string(),
                message: e.to_string(),
                status_code: 500,
            })
        }
    }
}

/// Update match status endpoint
///
/// POST /api/v1/matches/status
///
/// Request body:
/// ```json
/// {
///   "matchId": "uuid",
///   "status": "suggested|accepted|rejected"
/// }
/// ```
async fn update_match_status(
    state: web::Data<AppState>,
    req: web::Json<UpdateMatchStatusRequest>,
) -> impl Responder {
    if let Err(errors) = req.validate() {
        return HttpResponse::BadRequest().json(ErrorResponse {
            error: "Validation failed".to_string(),
            message: errors.to_string(),
            status_code: 400,
        });
    }

    let match_id = match req.match_id.parse::<uuid::Uuid>() {
        Ok(id) => id,
        Err(_) => {
            return HttpResponse::BadRequest().json(ErrorResponse {
                error: "Invalid match ID".to_string(),
                message: "matchId must be a UUID".to_string(),
                status_code: 400,
            });
        }
    };

    let status = match req.status.parse::<MatchStatus>() {
        Ok(status) => status,
        Err(_) => {
            return HttpResponse::BadRequest().json(ErrorResponse {
                error: "Invalid status".to_string(),
                message: "Status must be one of: suggested, accepted, rejected".to_string(),
                status_code: 400,
            });
        }
    };

    match state.store.update_status(match_id, status).await {
        Ok(record) => {
            let cache_key = CacheKey::matches(&record.user_item_id);
            if let Err(e) = state.cache.delete(&cache_key).await {
                tracing::warn!("Failed to invalidate cache: {}", e);
            }

            HttpResponse::Ok().json(MatchResponse {
                success: true,
                record,
            })
        }
        Err(crate::services::StoreError::NotFound(msg)) => {
            HttpResponse::NotFound().json(ErrorResponse {
                error: "Match not found".to_string(),
                message: msg,
                status_code: 404,
            })
        }
        Err(e) => {
            tracing::error!("Failed to update match {}: {}", match_id, e);
            HttpResponse::InternalServerError().json(ErrorResponse {
                error: "Failed to update match".to_string(),
                message: e.to_string(),
                status_code: 500,
            })
        }
    }
}

/// Get persisted matches for a wardrobe item
///
/// GET /api/v1/matches/persisted?userItemId={id}
async fn get_persisted_matches(
    state: web::Data<AppState>,
    query: web::Query<std::collections::HashMap<String, String>>,
) -> impl Responder {
    let user_item_id = match query.get("userItemId") {
        Some(id) => id,
        None => {
            return HttpResponse::BadRequest().json(ErrorResponse {
                error: "Missing userItemId parameter".to_string(),
                message: "userItemId query parameter is required".to_string(),
                status_code: 400,
            });
        }
    };

    match state.store.get_matches_for_item(user_item_id).await {
        Ok(matches) => {
            let count = matches.len();
            HttpResponse::Ok().json(serde_json::json!({
                "userItemId": user_item_id,
                "matches": matches,
                "count": count,
            }))
        }
        Err(e) => {
            tracing::error!("Failed to fetch matches for {}: {}", user_item_id, e);
            HttpResponse::InternalServerError().json(ErrorResponse {
                error: "Failed to fetch matches".to_string(),
                message: e.to_string(),
                status_code: 500,
            })
        }
    }
}
