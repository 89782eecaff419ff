//! Handlers for the `/onboarding` resource.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use onboard_core::error::CoreError;
use onboard_core::onboarding::{
    self, STATUS_APPROVED, STATUS_PENDING, STATUS_REJECTED,
};
use onboard_core::types::DbId;
use onboard_db::models::onboarding::{
    ApplicationWithDocuments, CreateOnboardingApplication, OnboardingApplication,
};
use onboard_db::repositories::OnboardingRepo;
use serde::{Deserialize, Serialize};

use crate::error::{AppError, AppResult};
use crate::handlers::hr::{approve_onboarding_application, reject_onboarding_application};
use crate::middleware::auth::AuthUser;
use crate::middleware::rbac::RequireHr;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Request / response types
// ---------------------------------------------------------------------------

/// Response body for `GET /onboarding/application/status`.
#[derive(Debug, Serialize)]
pub struct ApplicationStatusResponse {
    pub status: String,
}

/// Request body for `PUT /onboarding/application/{id}/status`.
#[derive(Debug, Deserialize)]
pub struct UpdateStatusRequest {
    pub status: String,
    pub rejection_feedback: Option<String>,
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// GET /api/onboarding/application
///
/// Fetch the authenticated employee's application with its documents.
pub async fn get_application(
    State(state): State<AppState>,
    auth: AuthUser,
) -> AppResult<Json<ApplicationWithDocuments>> {
    let application = find_own_application(&state, auth.user_id).await?;
    let documents = OnboardingRepo::list_documents(&state.pool, application.id).await?;
    Ok(Json(ApplicationWithDocuments {
        application,
        documents,
    }))
}

/// GET /api/onboarding/application/status
pub async fn get_application_status(
    State(state): State<AppState>,
    auth: AuthUser,
) -> AppResult<Json<ApplicationStatusResponse>> {
    let application = find_own_application(&state, auth.user_id).await?;
    Ok(Json(ApplicationStatusResponse {
        status: application.status,
    }))
}

/// POST /api/onboarding/application
///
/// Create the employee's application, or replace a previously reviewed one.
/// A second submission while one is pending is refused; a replace keeps the
/// record identity and applies the configured status policy.
pub async fn create_or_replace_application(
    State(state): State<AppState>,
    auth: AuthUser,
    Json(input): Json<CreateOnboardingApplication>,
) -> AppResult<(StatusCode, Json<ApplicationWithDocuments>)> {
    validate_application_input(&input).map_err(AppError::Core)?;

    let existing = OnboardingRepo::find_by_user(&state.pool, auth.user_id).await?;

    let (status_code, application) = match existing {
        None => {
            let created = OnboardingRepo::create(&state.pool, auth.user_id, &input).await?;
            tracing::info!(user_id = auth.user_id, "Onboarding application submitted");
            (StatusCode::CREATED, created)
        }
        Some(existing) if existing.status == STATUS_PENDING => {
            return Err(AppError::Core(CoreError::Conflict(
                "Application already exists".into(),
            )));
        }
        Some(existing) => {
            let new_status = state
                .config
                .resubmit_policy
                .status_after_resubmit(&existing.status)
                .to_string();
            let replaced =
                OnboardingRepo::replace(&state.pool, existing.id, &input, &new_status).await?;
            tracing::info!(
                user_id = auth.user_id,
                application_id = existing.id,
                "Onboarding application resubmitted"
            );
            (StatusCode::OK, replaced)
        }
    };

    let documents = OnboardingRepo::list_documents(&state.pool, application.id).await?;
    Ok((
        status_code,
        Json(ApplicationWithDocuments {
            application,
            documents,
        }),
    ))
}

/// PUT /api/onboarding/application/{id}/status
///
/// HR review decision expressed as a direct status write. Approvals run the
/// same F1 visa bridge as `POST /hr/{id}/approve`; rejections require
/// feedback.
pub async fn update_application_status(
    RequireHr(_user): RequireHr,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateStatusRequest>,
) -> AppResult<Json<OnboardingApplication>> {
    onboarding::validate_status(&input.status).map_err(AppError::Core)?;

    let application = match input.status.as_str() {
        STATUS_APPROVED => approve_onboarding_application(&state, id).await?,
        STATUS_REJECTED => {
            let feedback = input.rejection_feedback.as_deref().unwrap_or("");
            reject_onboarding_application(&state, id, feedback).await?
        }
        _ => OnboardingRepo::set_status(&state.pool, id, STATUS_PENDING, None)
            .await?
            .ok_or(AppError::Core(CoreError::NotFound {
                entity: "OnboardingApplication",
                id,
            }))?,
    };

    Ok(Json(application))
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Fetch the caller's application or 404.
async fn find_own_application(
    state: &AppState,
    user_id: DbId,
) -> Result<OnboardingApplication, AppError> {
    OnboardingRepo::find_by_user(&state.pool, user_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "OnboardingApplication",
            id: user_id,
        }))
}

/// Validate the enumerated fields of a submitted application.
fn validate_application_input(input: &CreateOnboardingApplication) -> Result<(), CoreError> {
    onboarding::validate_gender(&input.gender)?;
    onboarding::validate_citizenship_type(&input.citizenship_type)?;
    if let Some(work_auth) = &input.work_authorization_type {
        onboarding::validate_work_auth_type(work_auth)?;
    }
    for doc in &input.documents {
        onboarding::validate_document_type(&doc.doc_type)?;
    }
    Ok(())
}
