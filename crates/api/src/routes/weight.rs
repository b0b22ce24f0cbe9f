//! Route definitions for the `/weight` resource.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::weight;
use crate::state::AppState;

/// Routes mounted at `/weight`.
///
/// ```text
/// POST /          -> record a weight entry
/// GET  /history   -> entries in ascending date order
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", post(weight::create))
        .route("/history", get(weight::history))
}
