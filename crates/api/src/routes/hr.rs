//! Route definitions for the `/hr` resource.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::hr;
use crate::state::AppState;

/// Routes mounted at `/hr` (all HR only, enforced per handler).
///
/// ```text
/// POST /generate-token  -> generate_token
/// GET  /token-history   -> token_history
/// GET  /                -> list_applications (?status= filter)
/// POST /{id}/approve    -> approve_application
/// POST /{id}/reject     -> reject_application
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/generate-token", post(hr::generate_token))
        .route("/token-history", get(hr::token_history))
        .route("/", get(hr::list_applications))
        .route("/{id}/approve", post(hr::approve_application))
        .route("/{id}/reject", post(hr::reject_application))
}
