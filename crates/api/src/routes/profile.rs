//! Route definitions for the `/profile` resource.

use axum::routing::{get, put};
use axum::Router;

use crate::handlers::profile;
use crate::state::AppState;

/// Routes mounted at `/profile`.
///
/// ```text
/// GET /                    -> get profile
/// PUT /                    -> partial update
/// PUT /fasting-goal        -> set or clear default goal
/// PUT /ai-profile          -> replace AI profile
/// PUT /meal-preferences    -> replace meal preferences
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(profile::get).put(profile::update))
        .route("/fasting-goal", put(profile::update_fasting_goal))
        .route("/ai-profile", put(profile::update_ai_profile))
        .route("/meal-preferences", put(profile::update_meal_preferences))
}
