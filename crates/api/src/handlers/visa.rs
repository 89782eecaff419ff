//! Handlers for the `/visa` resource: employee status/upload and the HR
//! review queue.
//!
//! All transition rules live in [`onboard_core::visa`]; these handlers
//! fetch state, consult the engine, and persist its decisions.

use axum::extract::{Multipart, Path, State};
use axum::Json;
use onboard_core::error::CoreError;
use onboard_core::types::DbId;
use onboard_core::visa::{
    self, DocumentRef, DocumentStatus, LatestDocument, VisaStep,
};
use onboard_db::models::visa::{CreateVisaDocument, VisaCase, VisaDocument};
use onboard_db::repositories::{UserRepo, VisaRepo};
use serde::{Deserialize, Serialize};

use crate::error::{AppError, AppResult};
use crate::handlers::files::read_file_field;
use crate::middleware::auth::AuthUser;
use crate::middleware::rbac::RequireHr;
use crate::response::MessageResponse;
use crate::state::AppState;
use crate::storage::object_key;

// ---------------------------------------------------------------------------
// Request / response types
// ---------------------------------------------------------------------------

/// Response body for `GET /visa`.
#[derive(Debug, Serialize)]
pub struct VisaStatusResponse {
    pub current_step: VisaStep,
    pub documents: Vec<VisaDocument>,
    pub message: String,
}

/// Request body for `POST /visa/hr/{id}/reject`.
#[derive(Debug, Deserialize)]
pub struct RejectDocumentRequest {
    pub feedback: String,
}

// ---------------------------------------------------------------------------
// Employee endpoints
// ---------------------------------------------------------------------------

/// GET /api/visa
///
/// Return the caller's visa workflow state: current step, full document
/// history, and the derived status message.
pub async fn get_status(
    State(state): State<AppState>,
    auth: AuthUser,
) -> AppResult<Json<VisaStatusResponse>> {
    let visa = VisaRepo::find_by_user(&state.pool, auth.user_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "VisaApplication",
            id: auth.user_id,
        }))?;

    let current_step = parse_step(&visa.current_step)?;
    let documents = VisaRepo::list_documents(&state.pool, visa.id).await?;
    let latest = latest_view(documents.last())?;

    let message = visa::status_message(current_step, latest.as_ref());

    Ok(Json(VisaStatusResponse {
        current_step,
        documents,
        message,
    }))
}

/// POST /api/visa/upload
///
/// Submit the document for the caller's current step as a multipart `file`
/// field. The visa application is created lazily on the first upload; a
/// submission while the current step already has a pending document is
/// refused before any bytes reach blob storage.
pub async fn upload_document(
    State(state): State<AppState>,
    auth: AuthUser,
    multipart: Multipart,
) -> AppResult<Json<MessageResponse>> {
    let visa = match VisaRepo::find_by_user(&state.pool, auth.user_id).await? {
        Some(visa) => visa,
        None => {
            VisaRepo::create(&state.pool, auth.user_id, VisaStep::OptReceipt.as_str()).await?
        }
    };
    let current_step = parse_step(&visa.current_step)?;

    let documents = VisaRepo::list_documents(&state.pool, visa.id).await?;
    let refs = documents
        .iter()
        .map(|d| document_ref(d))
        .collect::<Result<Vec<_>, _>>()?;
    visa::ensure_no_pending(current_step, &refs).map_err(AppError::Core)?;

    let (file_name, content_type, bytes) = read_file_field(multipart).await?;
    let key = object_key(&file_name);
    let file_url = state.blob.put_object(&key, bytes, &content_type).await?;

    VisaRepo::append_document(
        &state.pool,
        &CreateVisaDocument {
            visa_application_id: visa.id,
            step: current_step.as_str().to_string(),
            file_url,
        },
    )
    .await?;

    tracing::info!(
        user_id = auth.user_id,
        step = current_step.as_str(),
        "Visa document submitted"
    );

    Ok(Json(MessageResponse::new("Document uploaded successfully")))
}

// ---------------------------------------------------------------------------
// HR endpoints
// ---------------------------------------------------------------------------

/// POST /api/visa/hr/{id}/approve
///
/// Approve the latest pending document and advance the current step.
pub async fn approve_document(
    RequireHr(user): RequireHr,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<MessageResponse>> {
    let visa = find_visa(&state, id).await?;
    let current_step = parse_step(&visa.current_step)?;

    let latest = VisaRepo::latest_document(&state.pool, visa.id).await?;
    let latest_ref = latest.as_ref().map(|d| document_ref(d)).transpose()?;
    visa::ensure_can_approve(latest_ref).map_err(AppError::Core)?;

    let document = latest.ok_or_else(|| {
        AppError::Core(CoreError::Validation("No document to approve".into()))
    })?;
    VisaRepo::review_document(
        &state.pool,
        document.id,
        DocumentStatus::Approved.as_str(),
        "",
    )
    .await?;

    let next_step = visa::step_after_approval(current_step);
    if next_step != current_step {
        VisaRepo::set_current_step(&state.pool, visa.id, next_step.as_str()).await?;
    }

    tracing::info!(
        hr_user = user.user_id,
        visa_id = id,
        step = current_step.as_str(),
        "Visa document approved"
    );

    Ok(Json(MessageResponse::new("Document approved successfully")))
}

/// POST /api/visa/hr/{id}/reject
///
/// Reject the latest pending document with mandatory feedback. The current
/// step does not move; the employee resubmits for the same step.
pub async fn reject_document(
    RequireHr(user): RequireHr,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<RejectDocumentRequest>,
) -> AppResult<Json<MessageResponse>> {
    visa::validate_rejection_feedback(&input.feedback).map_err(AppError::Core)?;

    let visa = find_visa(&state, id).await?;

    let latest = VisaRepo::latest_document(&state.pool, visa.id).await?;
    let latest_ref = latest.as_ref().map(|d| document_ref(d)).transpose()?;
    visa::ensure_can_reject(latest_ref).map_err(AppError::Core)?;

    let document = latest.ok_or_else(|| {
        AppError::Core(CoreError::Validation("No document to reject".into()))
    })?;
    VisaRepo::review_document(
        &state.pool,
        document.id,
        DocumentStatus::Rejected.as_str(),
        &input.feedback,
    )
    .await?;

    tracing::info!(hr_user = user.user_id, visa_id = id, "Visa document rejected");

    Ok(Json(MessageResponse::new("Document rejected successfully")))
}

/// POST /api/visa/hr/{id}/remind
///
/// Email the employee a reminder naming the document awaited from them.
pub async fn send_reminder(
    RequireHr(user): RequireHr,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<MessageResponse>> {
    let visa = find_visa(&state, id).await?;
    let current_step = parse_step(&visa.current_step)?;

    let owner = UserRepo::find_by_id(&state.pool, visa.user_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "User",
            id: visa.user_id,
        }))?;

    state
        .notifier
        .send_visa_reminder(&owner.email, &owner.username, current_step.display_name())
        .await?;

    tracing::info!(hr_user = user.user_id, visa_id = id, "Visa reminder sent");

    Ok(Json(MessageResponse::new("Notification sent successfully")))
}

/// GET /api/visa/hr/in-progress
///
/// List applications still needing HR attention: everything except those
/// fully approved through I-20.
pub async fn list_in_progress(
    RequireHr(_user): RequireHr,
    State(state): State<AppState>,
) -> AppResult<Json<Vec<VisaCase>>> {
    let cases = load_cases(&state).await?;

    let mut in_progress = Vec::new();
    for case in cases {
        let current_step = parse_step(&case.application.current_step)?;
        let latest = latest_view(case.documents.last())?;
        if visa::is_in_progress(current_step, latest.as_ref()) {
            in_progress.push(case);
        }
    }
    Ok(Json(in_progress))
}

/// GET /api/visa/hr/all
///
/// List every visa application with its owner and document history.
pub async fn list_all(
    RequireHr(_user): RequireHr,
    State(state): State<AppState>,
) -> AppResult<Json<Vec<VisaCase>>> {
    let cases = load_cases(&state).await?;
    Ok(Json(cases))
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Fetch a visa application by id or 404.
async fn find_visa(
    state: &AppState,
    id: DbId,
) -> Result<onboard_db::models::visa::VisaApplication, AppError> {
    VisaRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "VisaApplication",
            id,
        }))
}

/// Load all applications with owners and documents for HR listings.
async fn load_cases(state: &AppState) -> Result<Vec<VisaCase>, AppError> {
    let applications = VisaRepo::list_all_with_owner(&state.pool).await?;
    let mut cases = Vec::with_capacity(applications.len());
    for application in applications {
        let documents = VisaRepo::list_documents(&state.pool, application.id).await?;
        cases.push(VisaCase {
            application,
            documents,
        });
    }
    Ok(cases)
}

/// Parse a stored step name; the CHECK constraint makes failure a server bug.
fn parse_step(step: &str) -> Result<VisaStep, AppError> {
    step.parse()
        .map_err(|_| AppError::InternalError(format!("Corrupt visa step '{step}' in database")))
}

/// Parse a stored status name; the CHECK constraint makes failure a server bug.
fn parse_status(status: &str) -> Result<DocumentStatus, AppError> {
    status.parse().map_err(|_| {
        AppError::InternalError(format!("Corrupt document status '{status}' in database"))
    })
}

/// Engine view of a stored document.
fn document_ref(document: &VisaDocument) -> Result<DocumentRef, AppError> {
    Ok(DocumentRef {
        step: parse_step(&document.step)?,
        status: parse_status(&document.status)?,
    })
}

/// Engine view of the latest stored document, feedback included.
fn latest_view(document: Option<&VisaDocument>) -> Result<Option<LatestDocument>, AppError> {
    document
        .map(|d| {
            Ok(LatestDocument {
                step: parse_step(&d.step)?,
                status: parse_status(&d.status)?,
                feedback: d.feedback.clone(),
            })
        })
        .transpose()
}
