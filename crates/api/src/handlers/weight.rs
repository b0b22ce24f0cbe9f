//! Handlers for the `/weight` resource.

use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::Json;
use chrono::Utc;
use jejum_core::error::CoreError;
use jejum_core::fasting::validate_weight;
use jejum_core::types::Timestamp;
use jejum_db::models::weight_entry::{CreateWeightEntry, WeightEntry};
use jejum_db::repositories::WeightEntryRepo;
use jejum_events::bus::WEIGHT_RECORDED;
use jejum_events::DomainEvent;
use serde::Deserialize;

use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::response::DataResponse;
use crate::state::AppState;

/// Accepted values for the optional `unit` field.
const VALID_UNITS: [&str; 2] = ["kg", "lbs"];

/// Request body for `POST /weight`.
#[derive(Debug, Deserialize)]
pub struct CreateWeightRequest {
    pub weight: f64,
    /// Measurement time; defaults to now for live entries, set explicitly
    /// when backfilling.
    pub date: Option<Timestamp>,
    pub unit: Option<String>,
}

/// Query parameters for `GET /weight/history`.
#[derive(Debug, Deserialize)]
pub struct HistoryQuery {
    pub limit: Option<i64>,
}

/// POST /api/v1/weight
///
/// Record a weight measurement. Entries are immutable once created.
pub async fn create(
    State(state): State<AppState>,
    auth_user: AuthUser,
    Json(input): Json<CreateWeightRequest>,
) -> AppResult<(StatusCode, Json<DataResponse<WeightEntry>>)> {
    validate_weight(input.weight)?;

    if let Some(unit) = input.unit.as_deref() {
        if !VALID_UNITS.contains(&unit) {
            return Err(AppError::Core(CoreError::Validation(
                "Unit must be 'kg' or 'lbs'".into(),
            )));
        }
    }

    let entry = WeightEntryRepo::create(
        &state.pool,
        &CreateWeightEntry {
            user_id: auth_user.user_id,
            weight: input.weight,
            date: input.date.unwrap_or_else(Utc::now),
            unit: input.unit,
        },
    )
    .await?;

    state.event_bus.publish(
        DomainEvent::new(WEIGHT_RECORDED)
            .with_entity("weight_entry", entry.id)
            .with_user(auth_user.user_id),
    );

    Ok((StatusCode::CREATED, Json(DataResponse { data: entry })))
}

/// GET /api/v1/weight/history?limit=
///
/// The most recent entries in ascending date order, ready for charting.
pub async fn history(
    State(state): State<AppState>,
    auth_user: AuthUser,
    Query(query): Query<HistoryQuery>,
) -> AppResult<Json<DataResponse<Vec<WeightEntry>>>> {
    let entries = WeightEntryRepo::list(&state.pool, auth_user.user_id, query.limit).await?;
    Ok(Json(DataResponse { data: entries }))
}
