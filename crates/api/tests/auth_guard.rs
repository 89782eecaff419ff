//! HTTP-level tests for authentication and role enforcement.
//!
//! These exercise the extractor chain (bearer parsing, JWT validation,
//! RBAC) and handler-side input validation; none of them reach the
//! database.

mod common;

use axum::http::StatusCode;
use common::{body_json, get, get_auth, post_json_auth, test_token};
use onboard_core::roles::{ROLE_EMPLOYEE, ROLE_HR};

/// A protected route without an Authorization header returns 401.
#[tokio::test]
async fn test_missing_token_is_unauthorized() {
    let app = common::build_test_app();

    let response = get(app, "/api/visa").await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    let json = body_json(response).await;
    assert_eq!(json["code"], "UNAUTHORIZED");
    assert!(json["message"].is_string());
}

/// A malformed Authorization header returns 401.
#[tokio::test]
async fn test_malformed_bearer_is_unauthorized() {
    let app = common::build_test_app();

    let response = get_auth(app, "/api/visa", "").await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

/// A garbage token returns 401.
#[tokio::test]
async fn test_invalid_token_is_unauthorized() {
    let app = common::build_test_app();

    let response = get_auth(app, "/api/auth/me", "not-a-jwt").await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

/// An employee token on an HR-only route returns 403.
#[tokio::test]
async fn test_employee_on_hr_route_is_forbidden() {
    let app = common::build_test_app();
    let token = test_token(7, ROLE_EMPLOYEE);

    let response = get_auth(app, "/api/hr/token-history", &token).await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);

    let json = body_json(response).await;
    assert_eq!(json["code"], "FORBIDDEN");
}

/// An employee token on the HR visa review routes returns 403.
#[tokio::test]
async fn test_employee_cannot_review_visa_documents() {
    let app = common::build_test_app();
    let token = test_token(7, ROLE_EMPLOYEE);

    let response = post_json_auth(
        app,
        "/api/visa/hr/1/approve",
        &token,
        serde_json::json!({}),
    )
    .await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);
}

/// HR token generation rejects an invalid email before anything else runs.
#[tokio::test]
async fn test_generate_token_validates_email() {
    let app = common::build_test_app();
    let token = test_token(1, ROLE_HR);

    let response = post_json_auth(
        app,
        "/api/hr/generate-token",
        &token,
        serde_json::json!({ "email": "not-an-email", "name": "Ada" }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let json = body_json(response).await;
    assert_eq!(json["code"], "VALIDATION_ERROR");
}

/// Rejecting a visa document without feedback fails validation up front.
#[tokio::test]
async fn test_visa_reject_requires_feedback() {
    let app = common::build_test_app();
    let token = test_token(1, ROLE_HR);

    let response = post_json_auth(
        app,
        "/api/visa/hr/1/reject",
        &token,
        serde_json::json!({ "feedback": "  " }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let json = body_json(response).await;
    assert_eq!(json["code"], "VALIDATION_ERROR");
}

/// The blob-store seam serves presigned URLs for authenticated users.
#[tokio::test]
async fn test_download_uses_blob_store() {
    let app = common::build_test_app();
    let token = test_token(7, ROLE_EMPLOYEE);

    let response = get_auth(app, "/api/files/download/receipt.pdf", &token).await;
    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    assert_eq!(json["url"], "stub://bucket/receipt.pdf?presigned");
}
