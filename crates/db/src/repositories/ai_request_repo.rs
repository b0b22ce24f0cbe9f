//! Repository for the `ai_requests` table.
//!
//! Requests are claimed by the dispatcher with `FOR UPDATE SKIP LOCKED` so
//! the claim stays safe if more than one dispatcher instance ever runs.

use jejum_core::types::DbId;
use sqlx::PgPool;

use crate::models::ai_request::{
    AiRequest, CreateAiRequest, STATUS_COMPLETED, STATUS_ERROR, STATUS_PENDING, STATUS_PROCESSING,
};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, user_id, kind, status, input, output, error_message, \
                        created_at, updated_at";

/// Maximum page size for request listing.
const MAX_LIMIT: i64 = 100;

/// Default page size for request listing.
const DEFAULT_LIMIT: i64 = 20;

/// Provides CRUD operations for AI requests.
pub struct AiRequestRepo;

impl AiRequestRepo {
    /// Enqueue a new pending request, returning the created row.
    pub async fn create(pool: &PgPool, input: &CreateAiRequest) -> Result<AiRequest, sqlx::Error> {
        let query = format!(
            "INSERT INTO ai_requests (user_id, kind, status, input)
             VALUES ($1, $2, $3, $4)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, AiRequest>(&query)
            .bind(input.user_id)
            .bind(input.kind)
            .bind(STATUS_PENDING)
            .bind(&input.input)
            .fetch_one(pool)
            .await
    }

    /// Find a request by ID, scoped to its owner.
    pub async fn find_by_id(
        pool: &PgPool,
        user_id: DbId,
        id: DbId,
    ) -> Result<Option<AiRequest>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM ai_requests WHERE id = $1 AND user_id = $2");
        sqlx::query_as::<_, AiRequest>(&query)
            .bind(id)
            .bind(user_id)
            .fetch_optional(pool)
            .await
    }

    /// List a user's requests newest first, optionally filtered by kind.
    pub async fn list(
        pool: &PgPool,
        user_id: DbId,
        kind: Option<&str>,
        limit: Option<i64>,
    ) -> Result<Vec<AiRequest>, sqlx::Error> {
        let limit = limit.unwrap_or(DEFAULT_LIMIT).clamp(1, MAX_LIMIT);
        let query = format!(
            "SELECT {COLUMNS} FROM ai_requests
             WHERE user_id = $1 AND ($2::text IS NULL OR kind = $2)
             ORDER BY created_at DESC
             LIMIT $3"
        );
        sqlx::query_as::<_, AiRequest>(&query)
            .bind(user_id)
            .bind(kind)
            .bind(limit)
            .fetch_all(pool)
            .await
    }

    /// Atomically claim the oldest pending request and mark it processing.
    ///
    /// Uses `SELECT FOR UPDATE SKIP LOCKED` to prevent double-dispatch
    /// when multiple dispatcher instances are running.
    pub async fn claim_next_pending(pool: &PgPool) -> Result<Option<AiRequest>, sqlx::Error> {
        let query = format!(
            "UPDATE ai_requests \
             SET status = $1 \
             WHERE id = ( \
                 SELECT id FROM ai_requests \
                 WHERE status = $2 \
                 ORDER BY created_at ASC \
                 LIMIT 1 \
                 FOR UPDATE SKIP LOCKED \
             ) \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, AiRequest>(&query)
            .bind(STATUS_PROCESSING)
            .bind(STATUS_PENDING)
            .fetch_optional(pool)
            .await
    }

    /// Mark a processing request completed with its output document.
    pub async fn mark_completed(
        pool: &PgPool,
        id: DbId,
        output: &serde_json::Value,
    ) -> Result<Option<AiRequest>, sqlx::Error> {
        let query = format!(
            "UPDATE ai_requests
             SET status = $2, output = $3, error_message = NULL
             WHERE id = $1 AND status = $4
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, AiRequest>(&query)
            .bind(id)
            .bind(STATUS_COMPLETED)
            .bind(output)
            .bind(STATUS_PROCESSING)
            .fetch_optional(pool)
            .await
    }

    /// Mark a processing request failed with a human-readable message.
    pub async fn mark_error(
        pool: &PgPool,
        id: DbId,
        error_message: &str,
    ) -> Result<Option<AiRequest>, sqlx::Error> {
        let query = format!(
            "UPDATE ai_requests
             SET status = $2, error_message = $3
             WHERE id = $1 AND status = $4
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, AiRequest>(&query)
            .bind(id)
            .bind(STATUS_ERROR)
            .bind(error_message)
            .bind(STATUS_PROCESSING)
            .fetch_optional(pool)
            .await
    }

    /// Count a user's requests of one kind created today (UTC midnight cutoff).
    ///
    /// Backs the daily meal plan limit.
    pub async fn count_today(
        pool: &PgPool,
        user_id: DbId,
        kind: &str,
    ) -> Result<i64, sqlx::Error> {
        let row: (i64,) = sqlx::query_as(
            "SELECT COUNT(*) FROM ai_requests
             WHERE user_id = $1 AND kind = $2
               AND created_at >= date_trunc('day', NOW())",
        )
        .bind(user_id)
        .bind(kind)
        .fetch_one(pool)
        .await?;
        Ok(row.0)
    }
}
