//! Repository for the `user_profiles` table.

use jejum_core::types::DbId;
use sqlx::PgPool;

use crate::models::profile::{UpdateProfile, UserProfile};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, user_id, fasting_goal_hours, ai_profile, \
                        meal_preferences, created_at, updated_at";

/// Provides operations for user profiles (one row per user).
pub struct ProfileRepo;

impl ProfileRepo {
    /// Insert an empty profile row for a user if none exists yet, returning
    /// the row either way. Called after signup and login so downstream code
    /// can rely on the profile existing.
    pub async fn ensure_exists(pool: &PgPool, user_id: DbId) -> Result<UserProfile, sqlx::Error> {
        let query = format!(
            "INSERT INTO user_profiles (user_id)
             VALUES ($1)
             ON CONFLICT (user_id) DO UPDATE SET user_id = EXCLUDED.user_id
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, UserProfile>(&query)
            .bind(user_id)
            .fetch_one(pool)
            .await
    }

    /// Find a user's profile.
    pub async fn find_by_user(
        pool: &PgPool,
        user_id: DbId,
    ) -> Result<Option<UserProfile>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM user_profiles WHERE user_id = $1");
        sqlx::query_as::<_, UserProfile>(&query)
            .bind(user_id)
            .fetch_optional(pool)
            .await
    }

    /// Update a profile. Only non-`None` fields in `input` are applied.
    ///
    /// Returns `None` if the user has no profile row.
    pub async fn update(
        pool: &PgPool,
        user_id: DbId,
        input: &UpdateProfile,
    ) -> Result<Option<UserProfile>, sqlx::Error> {
        let query = format!(
            "UPDATE user_profiles SET
                fasting_goal_hours = COALESCE($2, fasting_goal_hours),
                ai_profile = COALESCE($3, ai_profile),
                meal_preferences = COALESCE($4, meal_preferences)
             WHERE user_id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, UserProfile>(&query)
            .bind(user_id)
            .bind(input.fasting_goal_hours)
            .bind(&input.ai_profile)
            .bind(&input.meal_preferences)
            .fetch_optional(pool)
            .await
    }

    /// Clear the stored fasting goal. Returns `true` if the row was updated.
    pub async fn clear_fasting_goal(pool: &PgPool, user_id: DbId) -> Result<bool, sqlx::Error> {
        let result =
            sqlx::query("UPDATE user_profiles SET fasting_goal_hours = NULL WHERE user_id = $1")
                .bind(user_id)
                .execute(pool)
                .await?;
        Ok(result.rows_affected() > 0)
    }
}
