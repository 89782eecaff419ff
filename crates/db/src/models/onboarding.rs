//! Onboarding application entity models and DTOs.

use chrono::NaiveDate;
use onboard_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// Full application row from the `onboarding_applications` table.
///
/// Address and citizenship data are flattened into columns; uploaded
/// document metadata lives in `onboarding_documents` and is attached via
/// [`ApplicationWithDocuments`].
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct OnboardingApplication {
    pub id: DbId,
    pub user_id: DbId,
    /// `"pending"`, `"approved"`, or `"rejected"`.
    pub status: String,
    pub rejection_feedback: Option<String>,
    pub first_name: String,
    pub middle_name: Option<String>,
    pub last_name: String,
    pub preferred_name: Option<String>,
    pub profile_picture: Option<String>,
    pub address_one: String,
    pub address_two: Option<String>,
    pub city: String,
    pub state: String,
    pub zip_code: String,
    pub cell_phone: String,
    pub work_phone: Option<String>,
    pub email: String,
    pub ssn: String,
    pub date_of_birth: NaiveDate,
    pub gender: String,
    pub is_permanent_resident: bool,
    pub citizenship_type: String,
    pub work_authorization_type: Option<String>,
    pub work_authorization_other: Option<String>,
    pub work_authorization_expiration: Option<NaiveDate>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// A row from the `onboarding_documents` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct OnboardingDocument {
    pub id: DbId,
    pub application_id: DbId,
    pub doc_type: String,
    pub file_name: String,
    pub file_url: String,
    pub uploaded_at: Timestamp,
}

/// An application together with its uploaded document metadata.
#[derive(Debug, Clone, Serialize)]
pub struct ApplicationWithDocuments {
    #[serde(flatten)]
    pub application: OnboardingApplication,
    pub documents: Vec<OnboardingDocument>,
}

/// Document metadata submitted alongside an application.
#[derive(Debug, Clone, Deserialize)]
pub struct DocumentInput {
    pub doc_type: String,
    pub file_name: String,
    pub file_url: String,
}

/// DTO for creating or replacing an onboarding application.
///
/// `status`, `rejection_feedback`, and identity (`id`, `user_id`) are never
/// taken from the client; they are controlled by the service.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateOnboardingApplication {
    pub first_name: String,
    pub middle_name: Option<String>,
    pub last_name: String,
    pub preferred_name: Option<String>,
    pub profile_picture: Option<String>,
    pub address_one: String,
    pub address_two: Option<String>,
    pub city: String,
    pub state: String,
    pub zip_code: String,
    pub cell_phone: String,
    pub work_phone: Option<String>,
    pub email: String,
    pub ssn: String,
    pub date_of_birth: NaiveDate,
    pub gender: String,
    pub is_permanent_resident: bool,
    pub citizenship_type: String,
    pub work_authorization_type: Option<String>,
    pub work_authorization_other: Option<String>,
    pub work_authorization_expiration: Option<NaiveDate>,
    #[serde(default)]
    pub documents: Vec<DocumentInput>,
}

/// Typed partial update for the personal-information screen.
///
/// The set of mutable fields is fixed by this struct; only non-`None`
/// fields are applied (COALESCE semantics in the repository).
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdatePersonalInfo {
    pub first_name: Option<String>,
    pub middle_name: Option<String>,
    pub last_name: Option<String>,
    pub preferred_name: Option<String>,
    pub email: Option<String>,
    pub ssn: Option<String>,
    pub date_of_birth: Option<NaiveDate>,
    pub gender: Option<String>,
    pub address_one: Option<String>,
    pub address_two: Option<String>,
    pub city: Option<String>,
    pub state: Option<String>,
    pub zip_code: Option<String>,
    pub cell_phone: Option<String>,
    pub work_phone: Option<String>,
}
