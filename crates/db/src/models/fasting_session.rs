//! Fasting session model and DTOs.

use jejum_core::fasting::CompletedFast;
use jejum_core::types::{DbId, Timestamp};
use serde::Serialize;
use sqlx::FromRow;

/// Status values for `fasting_sessions.status`.
pub const STATUS_ACTIVE: &str = "active";
pub const STATUS_COMPLETED: &str = "completed";

/// Full fasting session row from the `fasting_sessions` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct FastingSession {
    pub id: DbId,
    pub user_id: DbId,
    pub start_time: Timestamp,
    pub end_time: Option<Timestamp>,
    /// "active" or "completed".
    pub status: String,
    pub goal_duration_hours: Option<f64>,
    pub actual_duration_minutes: Option<i32>,
    pub notes: Option<String>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl FastingSession {
    /// Project this row into the value type the pure engines consume.
    pub fn to_completed_fast(&self) -> CompletedFast {
        CompletedFast {
            end_time: self.end_time,
            goal_duration_hours: self.goal_duration_hours,
            actual_duration_minutes: self.actual_duration_minutes,
        }
    }
}

/// DTO for starting a new fast.
#[derive(Debug)]
pub struct CreateFastingSession {
    pub user_id: DbId,
    pub start_time: Timestamp,
    pub goal_duration_hours: Option<f64>,
}
