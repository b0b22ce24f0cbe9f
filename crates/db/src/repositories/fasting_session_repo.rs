//! Repository for the `fasting_sessions` table.
//!
//! At most one active session per user is enforced by the partial unique
//! index `uq_fasting_sessions_active`; the API layer additionally checks
//! before insert so the common case surfaces as a clean conflict.

use jejum_core::types::{DbId, Timestamp};
use sqlx::PgPool;

use crate::models::fasting_session::{
    CreateFastingSession, FastingSession, STATUS_ACTIVE, STATUS_COMPLETED,
};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, user_id, start_time, end_time, status, \
                        goal_duration_hours, actual_duration_minutes, notes, \
                        created_at, updated_at";

/// Maximum page size for history listing.
const MAX_LIMIT: i64 = 100;

/// Default page size for history listing. Matches the week view most
/// clients render first.
const DEFAULT_LIMIT: i64 = 7;

/// Provides CRUD operations for fasting sessions.
pub struct FastingSessionRepo;

impl FastingSessionRepo {
    /// Insert a new active session, returning the created row.
    ///
    /// Fails with a unique violation on `uq_fasting_sessions_active` if the
    /// user already has an active fast.
    pub async fn create(
        pool: &PgPool,
        input: &CreateFastingSession,
    ) -> Result<FastingSession, sqlx::Error> {
        let query = format!(
            "INSERT INTO fasting_sessions (user_id, start_time, status, goal_duration_hours)
             VALUES ($1, $2, $3, $4)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, FastingSession>(&query)
            .bind(input.user_id)
            .bind(input.start_time)
            .bind(STATUS_ACTIVE)
            .bind(input.goal_duration_hours)
            .fetch_one(pool)
            .await
    }

    /// Find a session by ID, scoped to its owner.
    pub async fn find_by_id(
        pool: &PgPool,
        user_id: DbId,
        id: DbId,
    ) -> Result<Option<FastingSession>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM fasting_sessions WHERE id = $1 AND user_id = $2");
        sqlx::query_as::<_, FastingSession>(&query)
            .bind(id)
            .bind(user_id)
            .fetch_optional(pool)
            .await
    }

    /// Find the user's active session, if any.
    pub async fn find_active(
        pool: &PgPool,
        user_id: DbId,
    ) -> Result<Option<FastingSession>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM fasting_sessions
             WHERE user_id = $1 AND status = $2"
        );
        sqlx::query_as::<_, FastingSession>(&query)
            .bind(user_id)
            .bind(STATUS_ACTIVE)
            .fetch_optional(pool)
            .await
    }

    /// Complete an active session: set the end time, duration, and status.
    ///
    /// Returns `None` if the session does not exist, belongs to another
    /// user, or is already completed.
    pub async fn complete(
        pool: &PgPool,
        user_id: DbId,
        id: DbId,
        end_time: Timestamp,
        actual_duration_minutes: i32,
        notes: Option<&str>,
    ) -> Result<Option<FastingSession>, sqlx::Error> {
        let query = format!(
            "UPDATE fasting_sessions
             SET end_time = $3, actual_duration_minutes = $4, notes = $5, status = $6
             WHERE id = $1 AND user_id = $2 AND status = $7
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, FastingSession>(&query)
            .bind(id)
            .bind(user_id)
            .bind(end_time)
            .bind(actual_duration_minutes)
            .bind(notes)
            .bind(STATUS_COMPLETED)
            .bind(STATUS_ACTIVE)
            .fetch_optional(pool)
            .await
    }

    /// List completed sessions newest first, paginated.
    pub async fn list_completed(
        pool: &PgPool,
        user_id: DbId,
        limit: Option<i64>,
        offset: Option<i64>,
    ) -> Result<Vec<FastingSession>, sqlx::Error> {
        let limit = limit.unwrap_or(DEFAULT_LIMIT).clamp(1, MAX_LIMIT);
        let offset = offset.unwrap_or(0).max(0);
        let query = format!(
            "SELECT {COLUMNS} FROM fasting_sessions
             WHERE user_id = $1 AND status = $2
             ORDER BY end_time DESC
             LIMIT $3 OFFSET $4"
        );
        sqlx::query_as::<_, FastingSession>(&query)
            .bind(user_id)
            .bind(STATUS_COMPLETED)
            .bind(limit)
            .bind(offset)
            .fetch_all(pool)
            .await
    }

    /// List completed sessions that ended on or after `since`, newest first.
    ///
    /// Backing query for the challenge and score engines: both only look at
    /// bounded windows, so the cutoff keeps result sets small.
    pub async fn list_completed_since(
        pool: &PgPool,
        user_id: DbId,
        since: Timestamp,
    ) -> Result<Vec<FastingSession>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM fasting_sessions
             WHERE user_id = $1 AND status = $2 AND end_time >= $3
             ORDER BY end_time DESC"
        );
        sqlx::query_as::<_, FastingSession>(&query)
            .bind(user_id)
            .bind(STATUS_COMPLETED)
            .bind(since)
            .fetch_all(pool)
            .await
    }
}
