//! Handlers for the `/personal` resource: the personal-information subset
//! of an employee's onboarding application.

use axum::extract::State;
use axum::Json;
use chrono::NaiveDate;
use onboard_core::error::CoreError;
use onboard_core::onboarding;
use onboard_db::models::onboarding::{
    OnboardingApplication, OnboardingDocument, UpdatePersonalInfo,
};
use onboard_db::repositories::OnboardingRepo;
use serde::Serialize;

use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::state::AppState;

/// Personal-information view of an application.
#[derive(Debug, Serialize)]
pub struct PersonalInfoResponse {
    pub first_name: String,
    pub middle_name: Option<String>,
    pub last_name: String,
    pub preferred_name: Option<String>,
    pub profile_picture: Option<String>,
    pub email: String,
    pub ssn: String,
    pub date_of_birth: NaiveDate,
    pub gender: String,
    pub address_one: String,
    pub address_two: Option<String>,
    pub city: String,
    pub state: String,
    pub zip_code: String,
    pub cell_phone: String,
    pub work_phone: Option<String>,
    pub documents: Vec<OnboardingDocument>,
}

impl PersonalInfoResponse {
    fn from_application(
        application: OnboardingApplication,
        documents: Vec<OnboardingDocument>,
    ) -> Self {
        Self {
            first_name: application.first_name,
            middle_name: application.middle_name,
            last_name: application.last_name,
            preferred_name: application.preferred_name,
            profile_picture: application.profile_picture,
            email: application.email,
            ssn: application.ssn,
            date_of_birth: application.date_of_birth,
            gender: application.gender,
            address_one: application.address_one,
            address_two: application.address_two,
            city: application.city,
            state: application.state,
            zip_code: application.zip_code,
            cell_phone: application.cell_phone,
            work_phone: application.work_phone,
            documents,
        }
    }
}

/// GET /api/personal
///
/// Return the personal-information fields of the caller's application.
pub async fn get_personal_info(
    State(state): State<AppState>,
    auth: AuthUser,
) -> AppResult<Json<PersonalInfoResponse>> {
    let application = OnboardingRepo::find_by_user(&state.pool, auth.user_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "OnboardingApplication",
            id: auth.user_id,
        }))?;
    let documents = OnboardingRepo::list_documents(&state.pool, application.id).await?;
    Ok(Json(PersonalInfoResponse::from_application(
        application,
        documents,
    )))
}

/// PUT /api/personal
///
/// Apply a typed partial update. The mutable field set is fixed by
/// [`UpdatePersonalInfo`]; anything else in the body is ignored by
/// deserialization, and absent fields keep their stored values.
pub async fn update_personal_info(
    State(state): State<AppState>,
    auth: AuthUser,
    Json(input): Json<UpdatePersonalInfo>,
) -> AppResult<Json<OnboardingApplication>> {
    if let Some(gender) = &input.gender {
        onboarding::validate_gender(gender).map_err(AppError::Core)?;
    }

    let application = OnboardingRepo::update_personal(&state.pool, auth.user_id, &input)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "OnboardingApplication",
            id: auth.user_id,
        }))?;

    Ok(Json(application))
}
