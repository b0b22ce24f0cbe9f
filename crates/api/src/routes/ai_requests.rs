//! Route definitions for the `/ai` resource.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::ai_requests;
use crate::state::AppState;

/// Routes mounted at `/ai`.
///
/// ```text
/// POST /suggestions     -> enqueue fasting time suggestion
/// POST /meal-plans      -> enqueue meal plan (daily limit applies)
/// GET  /requests        -> list AI requests, newest first
/// GET  /requests/{id}   -> get one AI request
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/suggestions", post(ai_requests::create_suggestion))
        .route("/meal-plans", post(ai_requests::create_meal_plan))
        .route("/requests", get(ai_requests::list))
        .route("/requests/{id}", get(ai_requests::get))
}
