//! Route definitions for the `/files` resource.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::files;
use crate::state::AppState;

/// Routes mounted at `/files`.
///
/// ```text
/// POST /upload                -> upload_file (multipart)
/// GET  /download/{filename}   -> download_file
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/upload", post(files::upload_file))
        .route("/download/{filename}", get(files::download_file))
}
