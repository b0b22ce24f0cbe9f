//! AI request model and DTOs.
//!
//! Both AI features share one `ai_requests` table, discriminated by `kind`.
//! A request moves through `pending -> processing -> completed | error`;
//! there is no retry, a failed request stays in `error` with its message.

use jejum_core::types::{DbId, Timestamp};
use serde::Serialize;
use sqlx::FromRow;

/// Discriminator values for `ai_requests.kind`.
pub const KIND_FASTING_SUGGESTION: &str = "fasting_suggestion";
pub const KIND_MEAL_PLAN: &str = "meal_plan";

/// Status values for `ai_requests.status`.
pub const STATUS_PENDING: &str = "pending";
pub const STATUS_PROCESSING: &str = "processing";
pub const STATUS_COMPLETED: &str = "completed";
pub const STATUS_ERROR: &str = "error";

/// Full AI request row from the `ai_requests` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct AiRequest {
    pub id: DbId,
    pub user_id: DbId,
    /// "fasting_suggestion" or "meal_plan".
    pub kind: String,
    /// "pending", "processing", "completed", or "error".
    pub status: String,
    /// Validated input snapshot taken when the request was created.
    pub input: serde_json::Value,
    /// Model output, set only when `status = completed`.
    pub output: Option<serde_json::Value>,
    /// Human-readable failure reason, set only when `status = error`.
    pub error_message: Option<String>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for enqueueing a new AI request.
#[derive(Debug)]
pub struct CreateAiRequest {
    pub user_id: DbId,
    pub kind: &'static str,
    pub input: serde_json::Value,
}
