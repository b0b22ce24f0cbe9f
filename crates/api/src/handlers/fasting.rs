//! Handlers for the `/fasting` resource: the active-fast lifecycle plus
//! the read models computed by the challenge and score engines.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use chrono::{Duration, Utc};
use jejum_core::challenges::{compute_weekly_challenges, WeeklyChallengeSummary};
use jejum_core::error::CoreError;
use jejum_core::fasting::{actual_duration_minutes, validate_goal_hours};
use jejum_core::score::{compute_score, ScoreSummary};
use jejum_core::types::DbId;
use jejum_db::models::fasting_session::{CreateFastingSession, FastingSession, STATUS_COMPLETED};
use jejum_db::repositories::{FastingSessionRepo, ProfileRepo};
use jejum_events::bus::{FAST_COMPLETED, FAST_STARTED};
use jejum_events::DomainEvent;
use serde::Deserialize;

use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::response::DataResponse;
use crate::state::AppState;

/// Days of history fetched for the weekly challenge window. One extra day
/// over the 7-day window absorbs timezone drift at the edges.
const CHALLENGE_FETCH_DAYS: i64 = 8;

/// Days of history fetched for the score window (30-day window + 1).
const SCORE_FETCH_DAYS: i64 = 31;

// ---------------------------------------------------------------------------
// Request types
// ---------------------------------------------------------------------------

/// Request body for `POST /fasting/start`.
#[derive(Debug, Default, Deserialize)]
pub struct StartFastRequest {
    /// Target duration. Falls back to the profile's stored goal when absent.
    pub goal_duration_hours: Option<f64>,
}

/// Request body for `POST /fasting/{id}/end`.
#[derive(Debug, Default, Deserialize)]
pub struct EndFastRequest {
    pub notes: Option<String>,
}

/// Query parameters for `GET /fasting/history`.
#[derive(Debug, Deserialize)]
pub struct HistoryQuery {
    pub limit: Option<i64>,
}

// ---------------------------------------------------------------------------
// Lifecycle handlers
// ---------------------------------------------------------------------------

/// POST /api/v1/fasting/start
///
/// Start a new fast. Fails with 409 if the user already has an active one.
pub async fn start(
    State(state): State<AppState>,
    auth_user: AuthUser,
    Json(input): Json<StartFastRequest>,
) -> AppResult<(StatusCode, Json<DataResponse<FastingSession>>)> {
    let goal_duration_hours = match input.goal_duration_hours {
        Some(goal) => {
            validate_goal_hours(goal)?;
            Some(goal)
        }
        None => ProfileRepo::find_by_user(&state.pool, auth_user.user_id)
            .await?
            .and_then(|p| p.fasting_goal_hours),
    };

    // Pre-check for the common case; the partial unique index still
    // backstops concurrent starts (the violation maps to 409).
    if FastingSessionRepo::find_active(&state.pool, auth_user.user_id)
        .await?
        .is_some()
    {
        return Err(AppError::Core(CoreError::Conflict(
            "A fast is already active".into(),
        )));
    }

    let session = FastingSessionRepo::create(
        &state.pool,
        &CreateFastingSession {
            user_id: auth_user.user_id,
            start_time: Utc::now(),
            goal_duration_hours,
        },
    )
    .await?;

    state.event_bus.publish(
        DomainEvent::new(FAST_STARTED)
            .with_entity("fasting_session", session.id)
            .with_user(auth_user.user_id),
    );

    Ok((StatusCode::CREATED, Json(DataResponse { data: session })))
}

/// POST /api/v1/fasting/{id}/end
///
/// Complete an active fast with the computed duration and optional notes.
pub async fn end(
    State(state): State<AppState>,
    auth_user: AuthUser,
    Path(id): Path<DbId>,
    Json(input): Json<EndFastRequest>,
) -> AppResult<Json<DataResponse<FastingSession>>> {
    let session = FastingSessionRepo::find_by_id(&state.pool, auth_user.user_id, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "fasting session",
            id,
        }))?;

    if session.status == STATUS_COMPLETED {
        return Err(AppError::Core(CoreError::Conflict(
            "Fast is already completed".into(),
        )));
    }

    let end_time = Utc::now();
    let duration = actual_duration_minutes(session.start_time, end_time)?;
    let notes = input
        .notes
        .as_deref()
        .map(str::trim)
        .filter(|n| !n.is_empty());

    let completed = FastingSessionRepo::complete(
        &state.pool,
        auth_user.user_id,
        id,
        end_time,
        duration,
        notes,
    )
    .await?
    // A concurrent completion raced us between the read and the update.
    .ok_or_else(|| AppError::Core(CoreError::Conflict("Fast is already completed".into())))?;

    state.event_bus.publish(
        DomainEvent::new(FAST_COMPLETED)
            .with_entity("fasting_session", completed.id)
            .with_user(auth_user.user_id)
            .with_payload(serde_json::json!({
                "actual_duration_minutes": completed.actual_duration_minutes,
            })),
    );

    Ok(Json(DataResponse { data: completed }))
}

/// GET /api/v1/fasting/active
///
/// Return the active fast, or `data: null` when none is running.
pub async fn active(
    State(state): State<AppState>,
    auth_user: AuthUser,
) -> AppResult<Json<DataResponse<Option<FastingSession>>>> {
    let session = FastingSessionRepo::find_active(&state.pool, auth_user.user_id).await?;
    Ok(Json(DataResponse { data: session }))
}

/// GET /api/v1/fasting/history?limit=
///
/// Completed fasts, most recent first.
pub async fn history(
    State(state): State<AppState>,
    auth_user: AuthUser,
    Query(query): Query<HistoryQuery>,
) -> AppResult<Json<DataResponse<Vec<FastingSession>>>> {
    let sessions =
        FastingSessionRepo::list_completed(&state.pool, auth_user.user_id, query.limit, None)
            .await?;
    Ok(Json(DataResponse { data: sessions }))
}

// ---------------------------------------------------------------------------
// Engine read models
// ---------------------------------------------------------------------------

/// GET /api/v1/fasting/challenges
///
/// Evaluate the static weekly challenge table against the last 7 days.
pub async fn challenges(
    State(state): State<AppState>,
    auth_user: AuthUser,
) -> AppResult<Json<DataResponse<WeeklyChallengeSummary>>> {
    let now = Utc::now();
    let since = now - Duration::days(CHALLENGE_FETCH_DAYS);
    let history = fetch_completed_fasts(&state, auth_user.user_id, since).await?;
    let summary = compute_weekly_challenges(&history, now.date_naive());
    Ok(Json(DataResponse { data: summary }))
}

/// GET /api/v1/fasting/score
///
/// Compute the fasting score, or return `data: null` when the user has no
/// completed fasts in the scoring window.
pub async fn score(
    State(state): State<AppState>,
    auth_user: AuthUser,
) -> AppResult<Json<DataResponse<Option<ScoreSummary>>>> {
    let now = Utc::now();
    let since = now - Duration::days(SCORE_FETCH_DAYS);
    let history = fetch_completed_fasts(&state, auth_user.user_id, since).await?;
    let summary = compute_score(&history, now);

    // No data beats a floor score: clients render an empty state instead
    // of a misleading 2/10.
    let data = (summary.fasts_last_30_days > 0).then_some(summary);
    Ok(Json(DataResponse { data }))
}

/// Fetch completed sessions since a cutoff and project them into the value
/// type the pure engines consume.
async fn fetch_completed_fasts(
    state: &AppState,
    user_id: DbId,
    since: chrono::DateTime<Utc>,
) -> AppResult<Vec<jejum_core::fasting::CompletedFast>> {
    let rows = FastingSessionRepo::list_completed_since(&state.pool, user_id, since).await?;
    Ok(rows.iter().map(FastingSession::to_completed_fast).collect())
}
