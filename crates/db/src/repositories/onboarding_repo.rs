//! Repository for the `onboarding_applications` and `onboarding_documents`
//! tables.

use onboard_core::types::DbId;
use sqlx::{PgPool, Postgres, Transaction};

use crate::models::onboarding::{
    CreateOnboardingApplication, DocumentInput, OnboardingApplication, OnboardingDocument,
    UpdatePersonalInfo,
};

/// Column list for onboarding_applications queries.
const APPLICATION_COLUMNS: &str = "id, user_id, status, rejection_feedback, \
    first_name, middle_name, last_name, preferred_name, profile_picture, \
    address_one, address_two, city, state, zip_code, cell_phone, work_phone, \
    email, ssn, date_of_birth, gender, is_permanent_resident, citizenship_type, \
    work_authorization_type, work_authorization_other, work_authorization_expiration, \
    created_at, updated_at";

/// Column list for onboarding_documents queries.
const DOCUMENT_COLUMNS: &str = "id, application_id, doc_type, file_name, file_url, uploaded_at";

/// Provides CRUD operations for onboarding applications.
pub struct OnboardingRepo;

impl OnboardingRepo {
    /// Insert a new application with `status = pending`, together with its
    /// document metadata, in one transaction.
    pub async fn create(
        pool: &PgPool,
        user_id: DbId,
        input: &CreateOnboardingApplication,
    ) -> Result<OnboardingApplication, sqlx::Error> {
        let mut tx = pool.begin().await?;

        let query = format!(
            "INSERT INTO onboarding_applications
                (user_id, first_name, middle_name, last_name, preferred_name,
                 profile_picture, address_one, address_two, city, state, zip_code,
                 cell_phone, work_phone, email, ssn, date_of_birth, gender,
                 is_permanent_resident, citizenship_type, work_authorization_type,
                 work_authorization_other, work_authorization_expiration)
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11,
                     $12, $13, $14, $15, $16, $17, $18, $19, $20, $21, $22)
             RETURNING {APPLICATION_COLUMNS}"
        );
        let application = sqlx::query_as::<_, OnboardingApplication>(&query)
            .bind(user_id)
            .bind(&input.first_name)
            .bind(&input.middle_name)
            .bind(&input.last_name)
            .bind(&input.preferred_name)
            .bind(&input.profile_picture)
            .bind(&input.address_one)
            .bind(&input.address_two)
            .bind(&input.city)
            .bind(&input.state)
            .bind(&input.zip_code)
            .bind(&input.cell_phone)
            .bind(&input.work_phone)
            .bind(&input.email)
            .bind(&input.ssn)
            .bind(input.date_of_birth)
            .bind(&input.gender)
            .bind(input.is_permanent_resident)
            .bind(&input.citizenship_type)
            .bind(&input.work_authorization_type)
            .bind(&input.work_authorization_other)
            .bind(input.work_authorization_expiration)
            .fetch_one(&mut *tx)
            .await?;

        insert_documents(&mut tx, application.id, &input.documents).await?;

        tx.commit().await?;
        Ok(application)
    }

    /// Replace every client-supplied field of an existing application and
    /// set its status to `new_status`, swapping the document metadata
    /// wholesale in the same transaction.
    ///
    /// `id`, `user_id`, and `rejection_feedback` survive the replace; the
    /// caller decides `new_status` via the configured resubmission policy.
    pub async fn replace(
        pool: &PgPool,
        id: DbId,
        input: &CreateOnboardingApplication,
        new_status: &str,
    ) -> Result<OnboardingApplication, sqlx::Error> {
        let mut tx = pool.begin().await?;

        let query = format!(
            "UPDATE onboarding_applications SET
                status = $2,
                first_name = $3, middle_name = $4, last_name = $5,
                preferred_name = $6, profile_picture = $7,
                address_one = $8, address_two = $9, city = $10, state = $11,
                zip_code = $12, cell_phone = $13, work_phone = $14,
                email = $15, ssn = $16, date_of_birth = $17, gender = $18,
                is_permanent_resident = $19, citizenship_type = $20,
                work_authorization_type = $21, work_authorization_other = $22,
                work_authorization_expiration = $23,
                updated_at = NOW()
             WHERE id = $1
             RETURNING {APPLICATION_COLUMNS}"
        );
        let application = sqlx::query_as::<_, OnboardingApplication>(&query)
            .bind(id)
            .bind(new_status)
            .bind(&input.first_name)
            .bind(&input.middle_name)
            .bind(&input.last_name)
            .bind(&input.preferred_name)
            .bind(&input.profile_picture)
            .bind(&input.address_one)
            .bind(&input.address_two)
            .bind(&input.city)
            .bind(&input.state)
            .bind(&input.zip_code)
            .bind(&input.cell_phone)
            .bind(&input.work_phone)
            .bind(&input.email)
            .bind(&input.ssn)
            .bind(input.date_of_birth)
            .bind(&input.gender)
            .bind(input.is_permanent_resident)
            .bind(&input.citizenship_type)
            .bind(&input.work_authorization_type)
            .bind(&input.work_authorization_other)
            .bind(input.work_authorization_expiration)
            .fetch_one(&mut *tx)
            .await?;

        sqlx::query("DELETE FROM onboarding_documents WHERE application_id = $1")
            .bind(id)
            .execute(&mut *tx)
            .await?;
        insert_documents(&mut tx, id, &input.documents).await?;

        tx.commit().await?;
        Ok(application)
    }

    /// Find the application belonging to a user.
    pub async fn find_by_user(
        pool: &PgPool,
        user_id: DbId,
    ) -> Result<Option<OnboardingApplication>, sqlx::Error> {
        let query =
            format!("SELECT {APPLICATION_COLUMNS} FROM onboarding_applications WHERE user_id = $1");
        sqlx::query_as::<_, OnboardingApplication>(&query)
            .bind(user_id)
            .fetch_optional(pool)
            .await
    }

    /// Find an application by its ID.
    pub async fn find_by_id(
        pool: &PgPool,
        id: DbId,
    ) -> Result<Option<OnboardingApplication>, sqlx::Error> {
        let query =
            format!("SELECT {APPLICATION_COLUMNS} FROM onboarding_applications WHERE id = $1");
        sqlx::query_as::<_, OnboardingApplication>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List applications for the HR dashboard, optionally filtered by
    /// status, newest first.
    pub async fn list(
        pool: &PgPool,
        status: Option<&str>,
    ) -> Result<Vec<OnboardingApplication>, sqlx::Error> {
        match status {
            Some(status) => {
                let query = format!(
                    "SELECT {APPLICATION_COLUMNS} FROM onboarding_applications
                     WHERE status = $1
                     ORDER BY created_at DESC"
                );
                sqlx::query_as::<_, OnboardingApplication>(&query)
                    .bind(status)
                    .fetch_all(pool)
                    .await
            }
            None => {
                let query = format!(
                    "SELECT {APPLICATION_COLUMNS} FROM onboarding_applications
                     ORDER BY created_at DESC"
                );
                sqlx::query_as::<_, OnboardingApplication>(&query)
                    .fetch_all(pool)
                    .await
            }
        }
    }

    /// Set the review status, storing or clearing the rejection feedback.
    ///
    /// Returns `None` if no row with the given `id` exists.
    pub async fn set_status(
        pool: &PgPool,
        id: DbId,
        status: &str,
        rejection_feedback: Option<&str>,
    ) -> Result<Option<OnboardingApplication>, sqlx::Error> {
        let query = format!(
            "UPDATE onboarding_applications SET
                status = $2,
                rejection_feedback = $3,
                updated_at = NOW()
             WHERE id = $1
             RETURNING {APPLICATION_COLUMNS}"
        );
        sqlx::query_as::<_, OnboardingApplication>(&query)
            .bind(id)
            .bind(status)
            .bind(rejection_feedback)
            .fetch_optional(pool)
            .await
    }

    /// Apply a typed partial update to the personal-information fields.
    /// Only non-`None` fields in `input` are applied.
    ///
    /// Returns `None` if the user has no application.
    pub async fn update_personal(
        pool: &PgPool,
        user_id: DbId,
        input: &UpdatePersonalInfo,
    ) -> Result<Option<OnboardingApplication>, sqlx::Error> {
        let query = format!(
            "UPDATE onboarding_applications SET
                first_name = COALESCE($2, first_name),
                middle_name = COALESCE($3, middle_name),
                last_name = COALESCE($4, last_name),
                preferred_name = COALESCE($5, preferred_name),
                email = COALESCE($6, email),
                ssn = COALESCE($7, ssn),
                date_of_birth = COALESCE($8, date_of_birth),
                gender = COALESCE($9, gender),
                address_one = COALESCE($10, address_one),
                address_two = COALESCE($11, address_two),
                city = COALESCE($12, city),
                state = COALESCE($13, state),
                zip_code = COALESCE($14, zip_code),
                cell_phone = COALESCE($15, cell_phone),
                work_phone = COALESCE($16, work_phone),
                updated_at = NOW()
             WHERE user_id = $1
             RETURNING {APPLICATION_COLUMNS}"
        );
        sqlx::query_as::<_, OnboardingApplication>(&query)
            .bind(user_id)
            .bind(&input.first_name)
            .bind(&input.middle_name)
            .bind(&input.last_name)
            .bind(&input.preferred_name)
            .bind(&input.email)
            .bind(&input.ssn)
            .bind(input.date_of_birth)
            .bind(&input.gender)
            .bind(&input.address_one)
            .bind(&input.address_two)
            .bind(&input.city)
            .bind(&input.state)
            .bind(&input.zip_code)
            .bind(&input.cell_phone)
            .bind(&input.work_phone)
            .fetch_optional(pool)
            .await
    }

    /// List an application's document metadata in upload order.
    pub async fn list_documents(
        pool: &PgPool,
        application_id: DbId,
    ) -> Result<Vec<OnboardingDocument>, sqlx::Error> {
        let query = format!(
            "SELECT {DOCUMENT_COLUMNS} FROM onboarding_documents
             WHERE application_id = $1
             ORDER BY uploaded_at ASC, id ASC"
        );
        sqlx::query_as::<_, OnboardingDocument>(&query)
            .bind(application_id)
            .fetch_all(pool)
            .await
    }

    /// The most recently uploaded document of a given type, if any.
    ///
    /// Ties on upload time break toward the higher id (later insert).
    pub async fn latest_document_of_type(
        pool: &PgPool,
        application_id: DbId,
        doc_type: &str,
    ) -> Result<Option<OnboardingDocument>, sqlx::Error> {
        let query = format!(
            "SELECT {DOCUMENT_COLUMNS} FROM onboarding_documents
             WHERE application_id = $1 AND doc_type = $2
             ORDER BY uploaded_at DESC, id DESC
             LIMIT 1"
        );
        sqlx::query_as::<_, OnboardingDocument>(&query)
            .bind(application_id)
            .bind(doc_type)
            .fetch_optional(pool)
            .await
    }
}

/// Insert document metadata rows for an application.
async fn insert_documents(
    tx: &mut Transaction<'_, Postgres>,
    application_id: DbId,
    documents: &[DocumentInput],
) -> Result<(), sqlx::Error> {
    for doc in documents {
        sqlx::query(
            "INSERT INTO onboarding_documents (application_id, doc_type, file_name, file_url)
             VALUES ($1, $2, $3, $4)",
        )
        .bind(application_id)
        .bind(&doc.doc_type)
        .bind(&doc.file_name)
        .bind(&doc.file_url)
        .execute(&mut **tx)
        .await?;
    }
    Ok(())
}
