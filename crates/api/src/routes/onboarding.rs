//! Route definitions for the `/onboarding` resource.

use axum::routing::{get, put};
use axum::Router;

use crate::handlers::onboarding;
use crate::state::AppState;

/// Routes mounted at `/onboarding`.
///
/// ```text
/// GET  /application               -> get_application
/// POST /application               -> create_or_replace_application
/// GET  /application/status        -> get_application_status
/// PUT  /application/{id}/status   -> update_application_status (HR only)
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route(
            "/application",
            get(onboarding::get_application).post(onboarding::create_or_replace_application),
        )
        .route("/application/status", get(onboarding::get_application_status))
        .route(
            "/application/{id}/status",
            put(onboarding::update_application_status),
        )
}
