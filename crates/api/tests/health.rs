//! HTTP-level tests for the health endpoint.

mod common;

use axum::http::StatusCode;
use common::{body_json, get};

/// GET /health returns 200 with the service status and version.
#[tokio::test]
async fn test_health_check() {
    let app = common::build_test_app();

    let response = get(app, "/health").await;
    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    assert_eq!(json["status"], "ok");
    assert!(json["version"].is_string());
}

/// Unknown paths return 404.
#[tokio::test]
async fn test_unknown_path_is_404() {
    let app = common::build_test_app();

    let response = get(app, "/api/nope").await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}
