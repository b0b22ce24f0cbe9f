pub mod ai_requests;
pub mod auth;
pub mod fasting;
pub mod health;
pub mod profile;
pub mod weight;

use axum::routing::get;
use axum::Router;

use crate::state::AppState;
use crate::ws;

/// Build the `/api/v1` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /ws                              WebSocket (token query param)
///
/// /auth/signup                     signup (public)
/// /auth/login                      login (public)
/// /auth/refresh                    refresh (public)
/// /auth/logout                     logout (requires auth)
/// /auth/me                         current user (requires auth)
///
/// /fasting/start                   start a fast (POST)
/// /fasting/{id}/end                end a fast (POST)
/// /fasting/active                  active fast or null (GET)
/// /fasting/history                 completed fasts, newest first (GET)
/// /fasting/challenges              weekly challenge status (GET)
/// /fasting/score                   fasting score or null (GET)
///
/// /weight                          record a weight entry (POST)
/// /weight/history                  entries in ascending date order (GET)
///
/// /profile                         get, partial update (GET, PUT)
/// /profile/fasting-goal            set or clear default goal (PUT)
/// /profile/ai-profile              replace AI profile (PUT)
/// /profile/meal-preferences        replace meal preferences (PUT)
///
/// /ai/suggestions                  enqueue fasting suggestion (POST)
/// /ai/meal-plans                   enqueue meal plan (POST)
/// /ai/requests                     list AI requests, newest first (GET)
/// /ai/requests/{id}                get one AI request (GET)
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        // WebSocket endpoint for live updates.
        .route("/ws", get(ws::ws_handler))
        // Authentication and account routes.
        .nest("/auth", auth::router())
        // Fasting lifecycle plus challenge and score read models.
        .nest("/fasting", fasting::router())
        // Weight tracking.
        .nest("/weight", weight::router())
        // User profile and its stored sections.
        .nest("/profile", profile::router())
        // AI request queueing and inspection.
        .nest("/ai", ai_requests::router())
}
