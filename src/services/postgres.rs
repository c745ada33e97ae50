use crate::models::{ItemMatch, MatchStatus};
use sqlx::postgres::{PgPoolOptions, PgRow};
use sqlx::{PgPool, Row};
use std::time::Duration;
use thiserror::Error;
use uuid::Uuid;

/// Errors that can occur when interacting with the match store
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Connection pool error: {0}")]
    PoolError(#[from] deadpool_postgres::PoolError),

    #[error("SQLx error: {0}")]
    SqlxError(#[from] sqlx::Error),

    #[error("Migration error: {0}")]
    MigrateError(#[from] sqlx::migrate::MigrateError),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

/// PostgreSQL-backed Match Persistence Gateway
///
/// Owns the `item_matches` table: suggested matches are written here when a
/// user acts on a suggestion, and later transition to accepted or rejected.
/// Each write is a single atomic row, so a failed insert leaves no partial
/// state.
pub struct MatchStore {
    pool: PgPool,
}

impl MatchStore {
    /// Create a new match store from a connection string
    pub async fn new(
        database_url: &str,
        max_connections: u32,
        min_connections: u32,
    ) -> Result<Self, StoreError> {
        let pool = PgPoolOptions::new()
            .max_connections(max_connections)
            .min_connections(min_connections)
            .acquire_timeout(Duration::from_secs(5))
            .idle_timeout(Duration::from_secs(600))
            .test_before_acquire(true)
            .connect(database_url)
            .await?;

        // Run migrations on startup
        sqlx::migrate!("./migrations").run(&pool).await?;

        Ok(Self { pool })
    }

    /// Create a new match store from settings
    pub async fn from_settings(
        url: &str,
        max_connections: Option<u32>,
        min_connections: Option<u32>,
    ) -> Result<Self, StoreError> {
        tracing::info!("Connecting to PostgreSQL match store");

        Self::new(
            url,
            max_connections.unwrap_or(10),
            min_connections.unwrap_or(1),
        )
        .await
    }

    /// Persist a suggested match.
    ///
    /// Uses INSERT ... ON CONFLICT so re-suggesting the same pair refreshes
    /// the score snapshot instead of failing; the row id is generated by
    /// the database.
    pub async fn insert_match(
        &self,
        user_id: &str,
        user_item_id: &str,
        merchant_item_id: &str,
        match_score: f64,
        match_reasons: &[String],
    ) -> Result<ItemMatch, StoreError> {
        if !(0.0..=1.0).contains(&match_score) {
            return Err(StoreError::InvalidInput(format!(
                "match score out of range: {}",
                match_score
            )));
        }

        let query = r#"
            INSERT INTO item_matches
                (user_id, user_item_id, merchant_item_id, match_score, match_reasons, status)
            VALUES ($1, $2, $3, $4, $5, 'suggested')
            ON CONFLICT (user_item_id, merchant_item_id)
            DO UPDATE SET
                match_score = EXCLUDED.match_score,
                match_reasons = EXCLUDED.match_reasons,
                status = EXCLUDED.status,
                updated_at = NOW()
            RETURNING id, user_id, user_item_id, merchant_item_id,
                      match_score, match_reasons, status, created_at, updated_at
        "#;

        let row = sqlx::query(query)
            .bind(user_id)
            .bind(user_item_id)
            .bind(merchant_item_id)
            .bind(match_score)
            .bind(match_reasons)
            .fetch_one(&self.pool)
            .await?;

        tracing::debug!(
            "Persisted match: {} -> {} (score {:.2})",
            user_item_id,
            merchant_item_id,
            match_score
        );

        match_from_row(&row)
    }

    /// Transition a match's lifecycle status
    pub async fn update_status(
        &self,
        match_id: Uuid,
        status: MatchStatus,
    ) -> Result<ItemMatch, StoreError> {
        let query = r#"
            UPDATE item_matches
            SET status = $2, updated_at = NOW()
            WHERE id = $1
            RETURNING id, user_id, user_item_id, merchant_item_id,
                      match_score, match_reasons, status, created_at, updated_at
        "#;

        let row = sqlx::query(query)
            .bind(match_id)
            .bind(status.as_str())
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| StoreError::NotFound(format!("Match {} not found", match_id)))?;

        tracing::debug!("Match {} -> {}", match_id, status);

        match_from_row(&row)
    }

    /// Get all persisted matches for a wardrobe item, highest score first
    pub async fn get_matches_for_item(
        &self,
        user_item_id: &str,
    ) -> Result<Vec<ItemMatch>, StoreError> {
        let query = r#"
            SELECT id, user_id, user_item_id, merchant_item_id,
                   match_score, match_reasons, status, created_at, updated_at
            FROM item_matches
            WHERE user_item_id = $1
            ORDER BY match_score DESC
        "#;

        let rows = sqlx::query(query)
            .bind(user_item_id)
            .fetch_all(&self.pool)
            .await?;

        rows.iter().map(match_from_row).collect()
    }

    /// Remove all matches for a wardrobe item (e.g. when the item is deleted)
    pub async fn clear_matches_for_item(&self, user_item_id: &str) -> Result<u64, StoreError> {
        let query = r#"
            DELETE FROM item_matches
            WHERE user_item_id = $1
        "#;

        let result = sqlx::query(query)
            .bind(user_item_id)
            .execute(&self.pool)
            .await?;

        tracing::info!(
            "Cleared {} matches for wardrobe item {}",
            result.rows_affected(),
            user_item_id
        );

        Ok(result.rows_affected())
    }

    /// Health check for the database connection
    pub async fn health_check(&self) -> Result<bool, StoreError> {
        sqlx::query("SELECT 1")
            .fetch_one(&self.pool)
            .await
            .map(|_| true)
            .map_err(Into::into)
    }
}

fn match_from_row(row: &PgRow) -> Result<ItemMatch, StoreError> {
    let status: String = row.get("status");
    let status = status
        .parse::<MatchStatus>()
        .map_err(StoreError::InvalidInput)?;

    Ok(ItemMatch {
        id: row.get("id"),
        user_id: row.get("user_id"),
        user_item_id: row.get("user_item_id"),
        merchant_item_id: row.get("merchant_item_id"),
        match_score: row.get("match_score"),
        match_reasons: row.get("match_reasons"),
        status,
        created_at: row.get("created_at"),
        updated_at: row.get("updated_at"),
    })
}
