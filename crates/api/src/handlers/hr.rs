//! Handlers for the `/hr` resource: registration token issuance and
//! onboarding application review.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use chrono::Utc;
use onboard_core::error::CoreError;
use onboard_core::onboarding::{
    self, DOC_TYPE_OPT_RECEIPT, STATUS_APPROVED, STATUS_REJECTED, WORK_AUTH_F1,
};
use onboard_core::registration::expiry_from;
use onboard_core::types::DbId;
use onboard_core::visa::VisaStep;
use onboard_db::models::onboarding::{ApplicationWithDocuments, OnboardingApplication};
use onboard_db::models::registration_token::{CreateRegistrationToken, RegistrationToken};
use onboard_db::models::visa::CreateVisaDocument;
use onboard_db::repositories::{OnboardingRepo, RegistrationTokenRepo, VisaRepo};
use serde::Deserialize;
use uuid::Uuid;
use validator::Validate;

use crate::error::{AppError, AppResult};
use crate::middleware::rbac::RequireHr;
use crate::response::MessageResponse;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Request types
// ---------------------------------------------------------------------------

/// Request body for `POST /hr/generate-token`.
#[derive(Debug, Deserialize, Validate)]
pub struct GenerateTokenRequest {
    #[validate(email(message = "A valid email address is required"))]
    pub email: String,
    #[validate(length(min = 1, message = "Name is required"))]
    pub name: String,
}

/// Query parameters for `GET /hr`.
#[derive(Debug, Deserialize)]
pub struct ListApplicationsQuery {
    pub status: Option<String>,
}

/// Request body for `POST /hr/{id}/reject`.
#[derive(Debug, Deserialize)]
pub struct RejectApplicationRequest {
    pub feedback: String,
}

// ---------------------------------------------------------------------------
// Registration tokens
// ---------------------------------------------------------------------------

/// POST /api/hr/generate-token
///
/// Issue a three-hour registration token bound to (email, name) and send
/// the invitation email. A failed send surfaces as a 500; the token row
/// remains and HR re-issues manually.
pub async fn generate_token(
    RequireHr(_user): RequireHr,
    State(state): State<AppState>,
    Json(input): Json<GenerateTokenRequest>,
) -> AppResult<(StatusCode, Json<MessageResponse>)> {
    input
        .validate()
        .map_err(|e| AppError::Core(CoreError::Validation(e.to_string())))?;

    let token = Uuid::new_v4().to_string();
    let record = CreateRegistrationToken {
        token: token.clone(),
        email: input.email.clone(),
        name: input.name.clone(),
        expires_at: expiry_from(Utc::now()),
    };
    RegistrationTokenRepo::create(&state.pool, &record).await?;

    let registration_link = format!("{}/register?token={token}", state.config.frontend_url);
    state
        .notifier
        .send_registration_invite(&input.email, &input.name, &registration_link)
        .await?;

    tracing::info!(email = %input.email, "Registration token issued");

    Ok((
        StatusCode::CREATED,
        Json(MessageResponse::new(
            "Registration token generated and email sent successfully",
        )),
    ))
}

/// GET /api/hr/token-history
///
/// List all issued registration tokens, newest first.
pub async fn token_history(
    RequireHr(_user): RequireHr,
    State(state): State<AppState>,
) -> AppResult<Json<Vec<RegistrationToken>>> {
    let tokens = RegistrationTokenRepo::list_all(&state.pool).await?;
    Ok(Json(tokens))
}

// ---------------------------------------------------------------------------
// Application review
// ---------------------------------------------------------------------------

/// GET /api/hr
///
/// List onboarding applications with their documents, optionally filtered
/// by status (`?status=pending`).
pub async fn list_applications(
    RequireHr(_user): RequireHr,
    State(state): State<AppState>,
    Query(query): Query<ListApplicationsQuery>,
) -> AppResult<Json<Vec<ApplicationWithDocuments>>> {
    if let Some(status) = &query.status {
        onboarding::validate_status(status).map_err(AppError::Core)?;
    }

    let applications = OnboardingRepo::list(&state.pool, query.status.as_deref()).await?;

    let mut result = Vec::with_capacity(applications.len());
    for application in applications {
        let documents = OnboardingRepo::list_documents(&state.pool, application.id).await?;
        result.push(ApplicationWithDocuments {
            application,
            documents,
        });
    }
    Ok(Json(result))
}

/// POST /api/hr/{id}/approve
///
/// Approve an onboarding application. F1 applications are bridged into the
/// visa workflow before the status flips.
pub async fn approve_application(
    RequireHr(user): RequireHr,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<OnboardingApplication>> {
    let application = approve_onboarding_application(&state, id).await?;
    tracing::info!(hr_user = user.user_id, application_id = id, "Application approved");
    Ok(Json(application))
}

/// POST /api/hr/{id}/reject
///
/// Reject an onboarding application with mandatory feedback.
pub async fn reject_application(
    RequireHr(user): RequireHr,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<RejectApplicationRequest>,
) -> AppResult<Json<OnboardingApplication>> {
    let application = reject_onboarding_application(&state, id, &input.feedback).await?;
    tracing::info!(hr_user = user.user_id, application_id = id, "Application rejected");
    Ok(Json(application))
}

// ---------------------------------------------------------------------------
// Shared review transitions (also used by the onboarding status endpoint)
// ---------------------------------------------------------------------------

/// Approve an application, seeding the visa workflow for F1 employees.
pub(crate) async fn approve_onboarding_application(
    state: &AppState,
    id: DbId,
) -> Result<OnboardingApplication, AppError> {
    let application = OnboardingRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "OnboardingApplication",
            id,
        }))?;

    // F1 bridge: copy the newest OPT Receipt upload into the visa workflow
    // so the first review step starts out pending.
    if application.work_authorization_type.as_deref() == Some(WORK_AUTH_F1) {
        let receipt = OnboardingRepo::latest_document_of_type(
            &state.pool,
            application.id,
            DOC_TYPE_OPT_RECEIPT,
        )
        .await?
        .ok_or_else(|| {
            AppError::Core(CoreError::Validation(
                "F1 applications require an uploaded OPT Receipt before approval".into(),
            ))
        })?;

        let visa = match VisaRepo::find_by_user(&state.pool, application.user_id).await? {
            Some(visa) => {
                if visa.current_step != VisaStep::OptReceipt.as_str() {
                    VisaRepo::set_current_step(
                        &state.pool,
                        visa.id,
                        VisaStep::OptReceipt.as_str(),
                    )
                    .await?;
                }
                visa
            }
            None => {
                VisaRepo::create(
                    &state.pool,
                    application.user_id,
                    VisaStep::OptReceipt.as_str(),
                )
                .await?
            }
        };

        VisaRepo::append_document(
            &state.pool,
            &CreateVisaDocument {
                visa_application_id: visa.id,
                step: VisaStep::OptReceipt.as_str().to_string(),
                file_url: receipt.file_url,
            },
        )
        .await?;
    }

    let updated = OnboardingRepo::set_status(&state.pool, id, STATUS_APPROVED, None)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "OnboardingApplication",
            id,
        }))?;
    Ok(updated)
}

/// Reject an application with mandatory feedback.
pub(crate) async fn reject_onboarding_application(
    state: &AppState,
    id: DbId,
    feedback: &str,
) -> Result<OnboardingApplication, AppError> {
    onboarding::validate_rejection_feedback(feedback).map_err(AppError::Core)?;

    let updated = OnboardingRepo::set_status(&state.pool, id, STATUS_REJECTED, Some(feedback))
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "OnboardingApplication",
            id,
        }))?;
    Ok(updated)
}
