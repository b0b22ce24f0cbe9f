//! Handlers for the `/profile` resource.
//!
//! The profile row is provisioned on signup/login; `GET` returns 404 only
//! for tokens minted outside that flow. Besides the whole-document partial
//! update, each stored section has its own endpoint mirroring how clients
//! edit them (goal picker, AI profile form, meal preference form).

use axum::extract::State;
use axum::Json;
use jejum_core::error::CoreError;
use jejum_core::fasting::validate_goal_hours;
use jejum_core::profile::{
    validate_ai_profile, validate_meal_preferences, AiProfile, MealPreferences,
};
use jejum_db::models::profile::{UpdateProfile, UserProfile};
use jejum_db::repositories::ProfileRepo;
use serde::Deserialize;

use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::response::DataResponse;
use crate::state::AppState;

/// Request body for `PUT /profile/fasting-goal`. A `null` goal clears the
/// stored default.
#[derive(Debug, Deserialize)]
pub struct FastingGoalRequest {
    pub fasting_goal_hours: Option<f64>,
}

/// GET /api/v1/profile
pub async fn get(
    State(state): State<AppState>,
    auth_user: AuthUser,
) -> AppResult<Json<DataResponse<UserProfile>>> {
    let profile = find_profile(&state, &auth_user).await?;
    Ok(Json(DataResponse { data: profile }))
}

/// PUT /api/v1/profile
///
/// Partial update: only fields present in the body are applied.
pub async fn update(
    State(state): State<AppState>,
    auth_user: AuthUser,
    Json(input): Json<UpdateProfile>,
) -> AppResult<Json<DataResponse<UserProfile>>> {
    if let Some(goal) = input.fasting_goal_hours {
        validate_goal_hours(goal)?;
    }
    if let Some(ai_profile) = &input.ai_profile {
        validate_ai_profile(&parse_section::<AiProfile>(ai_profile, "AI profile")?)?;
    }
    if let Some(prefs) = &input.meal_preferences {
        validate_meal_preferences(&parse_section::<MealPreferences>(prefs, "meal preferences")?)?;
    }

    let profile = ProfileRepo::update(&state.pool, auth_user.user_id, &input)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "profile",
            id: auth_user.user_id,
        }))?;
    Ok(Json(DataResponse { data: profile }))
}

/// PUT /api/v1/profile/fasting-goal
pub async fn update_fasting_goal(
    State(state): State<AppState>,
    auth_user: AuthUser,
    Json(input): Json<FastingGoalRequest>,
) -> AppResult<Json<DataResponse<UserProfile>>> {
    match input.fasting_goal_hours {
        Some(goal) => {
            validate_goal_hours(goal)?;
            let profile = ProfileRepo::update(
                &state.pool,
                auth_user.user_id,
                &UpdateProfile {
                    fasting_goal_hours: Some(goal),
                    ..Default::default()
                },
            )
            .await?
            .ok_or(AppError::Core(CoreError::NotFound {
                entity: "profile",
                id: auth_user.user_id,
            }))?;
            Ok(Json(DataResponse { data: profile }))
        }
        None => {
            if !ProfileRepo::clear_fasting_goal(&state.pool, auth_user.user_id).await? {
                return Err(AppError::Core(CoreError::NotFound {
                    entity: "profile",
                    id: auth_user.user_id,
                }));
            }
            let profile = find_profile(&state, &auth_user).await?;
            Ok(Json(DataResponse { data: profile }))
        }
    }
}

/// PUT /api/v1/profile/ai-profile
pub async fn update_ai_profile(
    State(state): State<AppState>,
    auth_user: AuthUser,
    Json(input): Json<AiProfile>,
) -> AppResult<Json<DataResponse<UserProfile>>> {
    validate_ai_profile(&input)?;

    let document = serde_json::to_value(&input)
        .map_err(|e| AppError::InternalError(format!("Profile serialization error: {e}")))?;
    let profile = ProfileRepo::update(
        &state.pool,
        auth_user.user_id,
        &UpdateProfile {
            ai_profile: Some(document),
            ..Default::default()
        },
    )
    .await?
    .ok_or(AppError::Core(CoreError::NotFound {
        entity: "profile",
        id: auth_user.user_id,
    }))?;
    Ok(Json(DataResponse { data: profile }))
}

/// PUT /api/v1/profile/meal-preferences
pub async fn update_meal_preferences(
    State(state): State<AppState>,
    auth_user: AuthUser,
    Json(input): Json<MealPreferences>,
) -> AppResult<Json<DataResponse<UserProfile>>> {
    validate_meal_preferences(&input)?;

    let document = serde_json::to_value(&input)
        .map_err(|e| AppError::InternalError(format!("Preference serialization error: {e}")))?;
    let profile = ProfileRepo::update(
        &state.pool,
        auth_user.user_id,
        &UpdateProfile {
            meal_preferences: Some(document),
            ..Default::default()
        },
    )
    .await?
    .ok_or(AppError::Core(CoreError::NotFound {
        entity: "profile",
        id: auth_user.user_id,
    }))?;
    Ok(Json(DataResponse { data: profile }))
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

async fn find_profile(state: &AppState, auth_user: &AuthUser) -> AppResult<UserProfile> {
    ProfileRepo::find_by_user(&state.pool, auth_user.user_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "profile",
            id: auth_user.user_id,
        }))
}

/// Deserialize a stored JSONB section into its typed shape for validation.
fn parse_section<T: serde::de::DeserializeOwned>(
    value: &serde_json::Value,
    name: &str,
) -> Result<T, AppError> {
    serde_json::from_value(value.clone())
        .map_err(|e| AppError::Core(CoreError::Validation(format!("Invalid {name}: {e}"))))
}
