//! Route definitions for the `/visa` resource.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::visa;
use crate::state::AppState;

/// Routes mounted at `/visa`.
///
/// ```text
/// GET  /                  -> get_status
/// POST /upload            -> upload_document (multipart)
/// POST /hr/{id}/approve   -> approve_document (HR only)
/// POST /hr/{id}/reject    -> reject_document (HR only)
/// POST /hr/{id}/remind    -> send_reminder (HR only)
/// GET  /hr/in-progress    -> list_in_progress (HR only)
/// GET  /hr/all            -> list_all (HR only)
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(visa::get_status))
        .route("/upload", post(visa::upload_document))
        .route("/hr/{id}/approve", post(visa::approve_document))
        .route("/hr/{id}/reject", post(visa::reject_document))
        .route("/hr/{id}/remind", post(visa::send_reminder))
        .route("/hr/in-progress", get(visa::list_in_progress))
        .route("/hr/all", get(visa::list_all))
}
