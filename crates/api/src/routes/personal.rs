//! Route definitions for the `/personal` resource.

use axum::routing::get;
use axum::Router;

use crate::handlers::personal;
use crate::state::AppState;

/// Routes mounted at `/personal`.
///
/// ```text
/// GET /  -> get_personal_info
/// PUT /  -> update_personal_info
/// ```
pub fn router() -> Router<AppState> {
    Router::new().route(
        "/",
        get(personal::get_personal_info).put(personal::update_personal_info),
    )
}
