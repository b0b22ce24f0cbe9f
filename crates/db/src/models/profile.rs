//! User profile model and DTOs.
//!
//! One row per user, created lazily on first login. The AI lifestyle
//! profile and meal preferences are stored as JSONB documents whose shapes
//! are owned by `jejum_core::profile`.

use jejum_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// Full profile row from the `user_profiles` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct UserProfile {
    pub id: DbId,
    pub user_id: DbId,
    /// Default goal applied when a fast is started without an explicit goal.
    pub fasting_goal_hours: Option<f64>,
    /// Serialized [`jejum_core::profile::AiProfile`], if the user filled it in.
    pub ai_profile: Option<serde_json::Value>,
    /// Serialized [`jejum_core::profile::MealPreferences`].
    pub meal_preferences: Option<serde_json::Value>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for updating a profile. All fields are optional; only present fields
/// are applied.
#[derive(Debug, Default, Deserialize)]
pub struct UpdateProfile {
    pub fasting_goal_hours: Option<f64>,
    pub ai_profile: Option<serde_json::Value>,
    pub meal_preferences: Option<serde_json::Value>,
}
