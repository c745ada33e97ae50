use crate::models::{CatalogItem, WardrobeItem};
use reqwest::Client;
use serde_json::Value;
use std::time::Duration;
use thiserror::Error;

/// Errors that can occur when interacting with Supabase
#[derive(Debug, Error)]
pub enum SupabaseError {
    #[error("HTTP request failed: {0}")]
    RequestError(#[from] reqwest::Error),

    #[error("API returned error: {0}")]
    ApiError(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Unauthorized: invalid API key")]
    Unauthorized,

    #[error("Invalid response format: {0}")]
    InvalidResponse(String),
}

/// Supabase REST client
///
/// Handles all communication with the Supabase backend including:
/// - Fetching a user's wardrobe item
/// - Paging through the merchant catalog
pub struct SupabaseClient {
    base_url: String,
    api_key: String,
    client: Client,
    tables: SupabaseTables,
}

/// Table names in Supabase
#[derive(Debug, Clone)]
pub struct SupabaseTables {
    pub wardrobe_items: String,
    pub catalog_items: String,
}

impl SupabaseClient {
    /// Create a new Supabase client
    pub fn new(base_url: String, api_key: String, tables: SupabaseTables) -> Self {
        let client = Client::builder()
            .timeout(Duration::from_secs(30))
            .build()
            .expect("Failed to create HTTP client");

        Self {
            base_url,
            api_key,
            client,
            tables,
        }
    }

    fn table_url(&self, table: &str) -> String {
        format!("{}/rest/v1/{}", self.base_url.trim_end_matches('/'), table)
    }

    /// Fetch a single wardrobe item by its ID
    pub async fn get_wardrobe_item(&self, item_id: &str) -> Result<WardrobeItem, SupabaseError> {
        let url = format!(
            "{}?select=*&item_id=eq.{}&limit=1",
            self.table_url(&self.tables.wardrobe_items),
            urlencoding::encode(item_id)
        );

        tracing::debug!("Fetching wardrobe item: {}", item_id);

        let response = self
            .client
            .get(&url)
            .header("apikey", &self.api_key)
            .header("Authorization", format!("Bearer {}", self.api_key))
            .send()
            .await?;

        if response.status() == reqwest::StatusCode::UNAUTHORIZED {
            return Err(SupabaseError::Unauthorized);
        }
        if !response.status().is_success() {
            let status = response.status();
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "Unable to read body".to_string());
            tracing::error!("Failed to fetch wardrobe item {}: {} - {}", item_id, status, body);
            return Err(SupabaseError::ApiError(format!(
                "Failed to fetch wardrobe item: {}",
                status
            )));
        }

        let json: Value = response.json().await?;

        let rows = json
            .as_array()
            .ok_or_else(|| SupabaseError::InvalidResponse("Expected a row array".into()))?;

        let row = rows
            .first()
            .ok_or_else(|| SupabaseError::NotFound(format!("Wardrobe item {} not found", item_id)))?;

        serde_json::from_value(row.clone())
            .map_err(|e| SupabaseError::InvalidResponse(format!("Failed to parse wardrobe item: {}", e)))
    }

    /// Fetch one page of the merchant catalog.
    ///
    /// Ordered by item ID so pages are stable across requests. Rows that
    /// fail to parse are skipped rather than failing the whole page.
    pub async fn list_catalog_items(
        &self,
        limit: usize,
        offset: usize,
    ) -> Result<Vec<CatalogItem>, SupabaseError> {
        let url = format!(
            "{}?select=*&order=item_id.asc&limit={}&offset={}",
            self.table_url(&self.tables.catalog_items),
            limit,
            offset
        );

        let response = self
            .client
            .get(&url)
            .header("apikey", &self.api_key)
            .header("Authorization", format!("Bearer {}", self.api_key))
            .send()
            .await?;

        if response.status() == reqwest::StatusCode::UNAUTHORIZED {
            return Err(SupabaseError::Unauthorized);
        }
        if !response.status().is_success() {
            return Err(SupabaseError::ApiError(format!(
                "Failed to list catalog items: {}",
                response.status()
            )));
        }

        let json: Value = response.json().await?;

        let rows = json
            .as_array()
            .ok_or_else(|| SupabaseError::InvalidResponse("Expected a row array".into()))?;

        let items: Vec<CatalogItem> = rows
            .iter()
            .filter_map(|row| serde_json::from_value(row.clone()).ok())
            .collect();

        if items.len() < rows.len() {
            tracing::warn!(
                "Skipped {} unparseable catalog rows (offset {})",
                rows.len() - items.len(),
                offset
            );
        }

        tracing::debug!("Fetched {} catalog items at offset {}", items.len(), offset);

        Ok(items)
    }
}
