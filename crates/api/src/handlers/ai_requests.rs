//! Handlers for the `/ai` resource.
//!
//! Both endpoints only enqueue: they validate input, snapshot it onto a
//! pending `ai_requests` row, and publish `ai_request.created` for the
//! dispatcher. Clients follow progress over the WebSocket or by polling
//! `GET /ai/requests/{id}`.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use jejum_ai::schema::{GenerateMealPlanInput, DEFAULT_PLAN_DAYS, MEAL_PLAN_DAILY_LIMIT};
use jejum_core::error::CoreError;
use jejum_core::profile::{
    validate_ai_profile, validate_meal_preferences, AiProfile, MealPreferences,
};
use jejum_core::types::DbId;
use jejum_db::models::ai_request::{
    AiRequest, CreateAiRequest, KIND_FASTING_SUGGESTION, KIND_MEAL_PLAN,
};
use jejum_db::repositories::{AiRequestRepo, ProfileRepo};
use jejum_events::bus::AI_REQUEST_CREATED;
use jejum_events::DomainEvent;
use serde::Deserialize;

use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::response::DataResponse;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Request types
// ---------------------------------------------------------------------------

/// Request body for `POST /ai/suggestions`.
///
/// Either a complete profile inline, or an empty body to use the one stored
/// on the user's profile. A partial profile is rejected rather than merged;
/// merging two half-profiles produces suggestions nobody asked for.
#[derive(Debug, Default, Deserialize)]
pub struct SuggestionRequest {
    pub age: Option<i32>,
    pub gender: Option<String>,
    pub activity_level: Option<String>,
    pub sleep_schedule: Option<String>,
    pub daily_routine: Option<String>,
    pub fasting_experience: Option<String>,
}

impl SuggestionRequest {
    fn is_empty(&self) -> bool {
        self.age.is_none()
            && self.gender.is_none()
            && self.activity_level.is_none()
            && self.sleep_schedule.is_none()
            && self.daily_routine.is_none()
            && self.fasting_experience.is_none()
    }

    /// Assemble an [`AiProfile`] from an inline body, requiring every field.
    fn into_profile(self) -> Result<AiProfile, AppError> {
        let missing = || {
            AppError::Core(CoreError::Validation(
                "Incomplete AI profile in request body".into(),
            ))
        };
        Ok(AiProfile {
            age: self.age.ok_or_else(missing)?,
            gender: self.gender.ok_or_else(missing)?,
            activity_level: self.activity_level.ok_or_else(missing)?,
            sleep_schedule: self.sleep_schedule.ok_or_else(missing)?,
            daily_routine: self.daily_routine.ok_or_else(missing)?,
            fasting_experience: self.fasting_experience.ok_or_else(missing)?,
        })
    }
}

/// Request body for `POST /ai/meal-plans`.
///
/// Preference fields fall back to the stored meal preferences when none are
/// given inline; `number_of_days` always defaults independently.
#[derive(Debug, Default, Deserialize)]
pub struct MealPlanRequest {
    pub diet_type: Option<String>,
    pub food_intolerances: Option<String>,
    pub calorie_goal: Option<i32>,
    pub number_of_days: Option<u8>,
}

impl MealPlanRequest {
    fn has_preferences(&self) -> bool {
        self.diet_type.is_some() || self.food_intolerances.is_some() || self.calorie_goal.is_some()
    }
}

/// Query parameters for `GET /ai/requests`.
#[derive(Debug, Deserialize)]
pub struct ListQuery {
    /// Optional kind filter: "fasting_suggestion" or "meal_plan".
    pub kind: Option<String>,
    pub limit: Option<i64>,
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// POST /api/v1/ai/suggestions
///
/// Enqueue a fasting time suggestion request. Returns the pending row.
pub async fn create_suggestion(
    State(state): State<AppState>,
    auth_user: AuthUser,
    Json(input): Json<SuggestionRequest>,
) -> AppResult<(StatusCode, Json<DataResponse<AiRequest>>)> {
    let profile = if input.is_empty() {
        load_stored_ai_profile(&state, auth_user.user_id).await?
    } else {
        input.into_profile()?
    };
    validate_ai_profile(&profile)?;

    let document = serde_json::to_value(&profile)
        .map_err(|e| AppError::InternalError(format!("Input serialization error: {e}")))?;
    let request = enqueue(&state, auth_user.user_id, KIND_FASTING_SUGGESTION, document).await?;
    Ok((StatusCode::CREATED, Json(DataResponse { data: request })))
}

/// POST /api/v1/ai/meal-plans
///
/// Enqueue a meal plan request, subject to a daily limit per user.
pub async fn create_meal_plan(
    State(state): State<AppState>,
    auth_user: AuthUser,
    Json(input): Json<MealPlanRequest>,
) -> AppResult<(StatusCode, Json<DataResponse<AiRequest>>)> {
    let preferences = if input.has_preferences() {
        MealPreferences {
            diet_type: input.diet_type,
            food_intolerances: input.food_intolerances,
            calorie_goal: input.calorie_goal,
        }
    } else {
        load_stored_meal_preferences(&state, auth_user.user_id).await?
    };
    validate_meal_preferences(&preferences)?;

    let plan_input = GenerateMealPlanInput {
        diet_type: preferences.diet_type,
        food_intolerances: preferences.food_intolerances,
        calorie_goal: preferences.calorie_goal,
        number_of_days: input.number_of_days.unwrap_or(DEFAULT_PLAN_DAYS),
    };
    plan_input.validate()?;

    let today = AiRequestRepo::count_today(&state.pool, auth_user.user_id, KIND_MEAL_PLAN).await?;
    if today >= MEAL_PLAN_DAILY_LIMIT {
        return Err(AppError::Core(CoreError::Validation(
            "Daily meal plan limit reached. Try again tomorrow.".into(),
        )));
    }

    let document = serde_json::to_value(&plan_input)
        .map_err(|e| AppError::InternalError(format!("Input serialization error: {e}")))?;
    let request = enqueue(&state, auth_user.user_id, KIND_MEAL_PLAN, document).await?;
    Ok((StatusCode::CREATED, Json(DataResponse { data: request })))
}

/// GET /api/v1/ai/requests?kind=&limit=
///
/// The user's AI requests, newest first. Rows with a kind this build does
/// not recognize are skipped rather than failing the whole listing.
pub async fn list(
    State(state): State<AppState>,
    auth_user: AuthUser,
    Query(query): Query<ListQuery>,
) -> AppResult<Json<DataResponse<Vec<AiRequest>>>> {
    if let Some(kind) = query.kind.as_deref() {
        if !is_known_kind(kind) {
            return Err(AppError::Core(CoreError::Validation(format!(
                "Unknown request kind '{kind}'"
            ))));
        }
    }

    let rows = AiRequestRepo::list(
        &state.pool,
        auth_user.user_id,
        query.kind.as_deref(),
        query.limit,
    )
    .await?;

    let requests: Vec<AiRequest> = rows
        .into_iter()
        .filter(|row| {
            let known = is_known_kind(&row.kind);
            if !known {
                tracing::warn!(id = row.id, kind = %row.kind, "Skipping AI request with unknown kind");
            }
            known
        })
        .collect();

    Ok(Json(DataResponse { data: requests }))
}

/// GET /api/v1/ai/requests/{id}
pub async fn get(
    State(state): State<AppState>,
    auth_user: AuthUser,
    Path(id): Path<DbId>,
) -> AppResult<Json<DataResponse<AiRequest>>> {
    let request = AiRequestRepo::find_by_id(&state.pool, auth_user.user_id, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "AI request",
            id,
        }))?;
    Ok(Json(DataResponse { data: request }))
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn is_known_kind(kind: &str) -> bool {
    kind == KIND_FASTING_SUGGESTION || kind == KIND_MEAL_PLAN
}

/// Insert the pending row and announce it to the dispatcher.
async fn enqueue(
    state: &AppState,
    user_id: DbId,
    kind: &'static str,
    input: serde_json::Value,
) -> AppResult<AiRequest> {
    let request = AiRequestRepo::create(
        &state.pool,
        &CreateAiRequest {
            user_id,
            kind,
            input,
        },
    )
    .await?;

    let payload = serde_json::to_value(&request)
        .map_err(|e| AppError::InternalError(format!("Request serialization error: {e}")))?;
    state.event_bus.publish(
        DomainEvent::new(AI_REQUEST_CREATED)
            .with_entity("ai_request", request.id)
            .with_user(user_id)
            .with_payload(payload),
    );

    Ok(request)
}

async fn load_stored_ai_profile(state: &AppState, user_id: DbId) -> AppResult<AiProfile> {
    let stored = ProfileRepo::find_by_user(&state.pool, user_id)
        .await?
        .and_then(|p| p.ai_profile)
        .ok_or_else(|| {
            AppError::Core(CoreError::Validation(
                "No AI profile provided and none stored. Complete your AI profile first.".into(),
            ))
        })?;
    serde_json::from_value(stored)
        .map_err(|e| AppError::InternalError(format!("Stored AI profile is corrupt: {e}")))
}

async fn load_stored_meal_preferences(
    state: &AppState,
    user_id: DbId,
) -> AppResult<MealPreferences> {
    let stored = ProfileRepo::find_by_user(&state.pool, user_id)
        .await?
        .and_then(|p| p.meal_preferences)
        .ok_or_else(|| {
            AppError::Core(CoreError::Validation(
                "No meal preferences provided and none stored. Set your meal preferences first."
                    .into(),
            ))
        })?;
    serde_json::from_value(stored)
        .map_err(|e| AppError::InternalError(format!("Stored meal preferences are corrupt: {e}")))
}
