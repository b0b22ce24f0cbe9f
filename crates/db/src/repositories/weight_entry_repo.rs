//! Repository for the `weight_entries` table.

use jejum_core::types::DbId;
use sqlx::PgPool;

use crate::models::weight_entry::{CreateWeightEntry, WeightEntry};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, user_id, weight, date, unit, created_at";

/// Maximum page size for history listing.
const MAX_LIMIT: i64 = 365;

/// Default page size for history listing.
const DEFAULT_LIMIT: i64 = 90;

/// Provides create/list operations for weight entries. Entries are
/// immutable; there is no update or delete.
pub struct WeightEntryRepo;

impl WeightEntryRepo {
    /// Insert a new weight entry, returning the created row.
    pub async fn create(
        pool: &PgPool,
        input: &CreateWeightEntry,
    ) -> Result<WeightEntry, sqlx::Error> {
        let query = format!(
            "INSERT INTO weight_entries (user_id, weight, date, unit)
             VALUES ($1, $2, $3, $4)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, WeightEntry>(&query)
            .bind(input.user_id)
            .bind(input.weight)
            .bind(input.date)
            .bind(&input.unit)
            .fetch_one(pool)
            .await
    }

    /// List the user's most recent entries, returned in ascending date
    /// order so clients can chart them directly.
    pub async fn list(
        pool: &PgPool,
        user_id: DbId,
        limit: Option<i64>,
    ) -> Result<Vec<WeightEntry>, sqlx::Error> {
        let limit = limit.unwrap_or(DEFAULT_LIMIT).clamp(1, MAX_LIMIT);
        // Inner query picks the newest N, outer flips them for charting.
        let query = format!(
            "SELECT {COLUMNS} FROM (
                 SELECT {COLUMNS} FROM weight_entries
                 WHERE user_id = $1
                 ORDER BY date DESC
                 LIMIT $2
             ) recent
             ORDER BY date ASC"
        );
        sqlx::query_as::<_, WeightEntry>(&query)
            .bind(user_id)
            .bind(limit)
            .fetch_all(pool)
            .await
    }
}
