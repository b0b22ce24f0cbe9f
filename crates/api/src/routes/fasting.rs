//! Route definitions for the `/fasting` resource.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::fasting;
use crate::state::AppState;

/// Routes mounted at `/fasting`.
///
/// ```text
/// POST /start       -> start a fast
/// POST /{id}/end    -> end a fast
/// GET  /active      -> active fast or null
/// GET  /history     -> completed fasts, newest first
/// GET  /challenges  -> weekly challenge status
/// GET  /score       -> fasting score or null
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/start", post(fasting::start))
        .route("/{id}/end", post(fasting::end))
        .route("/active", get(fasting::active))
        .route("/history", get(fasting::history))
        .route("/challenges", get(fasting::challenges))
        .route("/score", get(fasting::score))
}
