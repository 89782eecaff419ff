pub mod auth;
pub mod files;
pub mod health;
pub mod hr;
pub mod onboarding;
pub mod personal;
pub mod visa;

use axum::Router;

use crate::state::AppState;

/// Build the `/api` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /auth/register                          token redemption + account creation (public)
/// /auth/login                             login (public)
/// /auth/me                                current user (requires auth)
///
/// /onboarding/application                 get, create/replace (requires auth)
/// /onboarding/application/status          own status (requires auth)
/// /onboarding/application/{id}/status     review decision (PUT, HR only)
///
/// /personal                               get, update personal info (requires auth)
///
/// /hr/generate-token                      issue registration token (HR only)
/// /hr/token-history                       issued-token history (HR only)
/// /hr                                     list applications (HR only)
/// /hr/{id}/approve                        approve application (HR only)
/// /hr/{id}/reject                         reject application (HR only)
///
/// /visa                                   own workflow status (requires auth)
/// /visa/upload                            submit document, multipart (requires auth)
/// /visa/hr/{id}/approve                   approve latest document (HR only)
/// /visa/hr/{id}/reject                    reject latest document (HR only)
/// /visa/hr/{id}/remind                    email reminder to employee (HR only)
/// /visa/hr/in-progress                    applications needing attention (HR only)
/// /visa/hr/all                            all applications (HR only)
///
/// /files/upload                           upload to blob storage (requires auth)
/// /files/download/{filename}              presigned download URL (requires auth)
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .nest("/auth", auth::router())
        .nest("/onboarding", onboarding::router())
        .nest("/personal", personal::router())
        .nest("/hr", hr::router())
        .nest("/visa", visa::router())
        .nest("/files", files::router())
}
