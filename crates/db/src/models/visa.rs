//! Visa application entity models and DTOs.

use onboard_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A row from the `visa_applications` table.
///
/// One per employee, created lazily on first document upload. `current_step`
/// holds a [`onboard_core::visa::VisaStep`] wire name and only ever moves
/// forward.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct VisaApplication {
    pub id: DbId,
    pub user_id: DbId,
    pub current_step: String,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// A row from the `visa_documents` table.
///
/// Append-only: rejected documents are retained unchanged for history, and
/// the latest row (by upload order) is the one HR reviews.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct VisaDocument {
    pub id: DbId,
    pub visa_application_id: DbId,
    /// Step the document was uploaded for (wire name, e.g. `"OPT_RECEIPT"`).
    #[serde(rename = "type")]
    pub step: String,
    pub file_url: String,
    /// `"PENDING"`, `"APPROVED"`, or `"REJECTED"`.
    pub status: String,
    pub feedback: String,
    pub uploaded_at: Timestamp,
    pub reviewed_at: Option<Timestamp>,
}

/// DTO for appending a new document to a visa application.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateVisaDocument {
    pub visa_application_id: DbId,
    pub step: String,
    pub file_url: String,
}

/// A visa application joined with its owner for HR listings.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct VisaApplicationWithOwner {
    pub id: DbId,
    pub user_id: DbId,
    pub current_step: String,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
    pub owner_username: String,
    pub owner_email: String,
}

/// An HR listing entry: application, owner, and full document history.
#[derive(Debug, Clone, Serialize)]
pub struct VisaCase {
    #[serde(flatten)]
    pub application: VisaApplicationWithOwner,
    pub documents: Vec<VisaDocument>,
}
