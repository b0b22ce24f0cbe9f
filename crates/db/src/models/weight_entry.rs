//! Weight entry model and DTOs.

use jejum_core::types::{DbId, Timestamp};
use serde::Serialize;
use sqlx::FromRow;

/// Full weight entry row from the `weight_entries` table.
///
/// Entries are immutable: there is no update path, only create and list.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct WeightEntry {
    pub id: DbId,
    pub user_id: DbId,
    pub weight: f64,
    /// Measurement time. Distinct from `created_at` so backfilled
    /// entries chart at the right position.
    pub date: Timestamp,
    /// "kg" or "lbs" when the client supplied one.
    pub unit: Option<String>,
    pub created_at: Timestamp,
}

/// DTO for recording a weight measurement.
#[derive(Debug)]
pub struct CreateWeightEntry {
    pub user_id: DbId,
    pub weight: f64,
    pub date: Timestamp,
    pub unit: Option<String>,
}
