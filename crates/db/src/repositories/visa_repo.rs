//! Repository for the `visa_applications` and `visa_documents` tables.

use onboard_core::types::DbId;
use sqlx::PgPool;

use crate::models::visa::{
    CreateVisaDocument, VisaApplication, VisaApplicationWithOwner, VisaDocument,
};

/// Column list for visa_applications queries.
const APPLICATION_COLUMNS: &str = "id, user_id, current_step, created_at, updated_at";

/// Column list for visa_documents queries.
const DOCUMENT_COLUMNS: &str =
    "id, visa_application_id, step, file_url, status, feedback, uploaded_at, reviewed_at";

/// Join column list for HR listings (application + owner).
const WITH_OWNER_COLUMNS: &str = "v.id, v.user_id, v.current_step, v.created_at, v.updated_at, \
    u.username AS owner_username, u.email AS owner_email";

/// Provides CRUD operations for visa applications and their documents.
pub struct VisaRepo;

impl VisaRepo {
    /// Create a visa application for a user at the given starting step.
    pub async fn create(
        pool: &PgPool,
        user_id: DbId,
        current_step: &str,
    ) -> Result<VisaApplication, sqlx::Error> {
        let query = format!(
            "INSERT INTO visa_applications (user_id, current_step)
             VALUES ($1, $2)
             RETURNING {APPLICATION_COLUMNS}"
        );
        sqlx::query_as::<_, VisaApplication>(&query)
            .bind(user_id)
            .bind(current_step)
            .fetch_one(pool)
            .await
    }

    /// Find the visa application belonging to a user.
    pub async fn find_by_user(
        pool: &PgPool,
        user_id: DbId,
    ) -> Result<Option<VisaApplication>, sqlx::Error> {
        let query = format!("SELECT {APPLICATION_COLUMNS} FROM visa_applications WHERE user_id = $1");
        sqlx::query_as::<_, VisaApplication>(&query)
            .bind(user_id)
            .fetch_optional(pool)
            .await
    }

    /// Find a visa application by its ID.
    pub async fn find_by_id(
        pool: &PgPool,
        id: DbId,
    ) -> Result<Option<VisaApplication>, sqlx::Error> {
        let query = format!("SELECT {APPLICATION_COLUMNS} FROM visa_applications WHERE id = $1");
        sqlx::query_as::<_, VisaApplication>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Move an application to a new current step.
    pub async fn set_current_step(
        pool: &PgPool,
        id: DbId,
        current_step: &str,
    ) -> Result<(), sqlx::Error> {
        sqlx::query(
            "UPDATE visa_applications SET current_step = $2, updated_at = NOW() WHERE id = $1",
        )
        .bind(id)
        .bind(current_step)
        .execute(pool)
        .await?;
        Ok(())
    }

    /// Append a new document with `status = PENDING`, returning the row.
    pub async fn append_document(
        pool: &PgPool,
        input: &CreateVisaDocument,
    ) -> Result<VisaDocument, sqlx::Error> {
        let query = format!(
            "INSERT INTO visa_documents (visa_application_id, step, file_url)
             VALUES ($1, $2, $3)
             RETURNING {DOCUMENT_COLUMNS}"
        );
        sqlx::query_as::<_, VisaDocument>(&query)
            .bind(input.visa_application_id)
            .bind(&input.step)
            .bind(&input.file_url)
            .fetch_one(pool)
            .await
    }

    /// List an application's documents in upload order (oldest first).
    ///
    /// The last element is the document HR reviews.
    pub async fn list_documents(
        pool: &PgPool,
        visa_application_id: DbId,
    ) -> Result<Vec<VisaDocument>, sqlx::Error> {
        let query = format!(
            "SELECT {DOCUMENT_COLUMNS} FROM visa_documents
             WHERE visa_application_id = $1
             ORDER BY uploaded_at ASC, id ASC"
        );
        sqlx::query_as::<_, VisaDocument>(&query)
            .bind(visa_application_id)
            .fetch_all(pool)
            .await
    }

    /// The most recently uploaded document, if any.
    pub async fn latest_document(
        pool: &PgPool,
        visa_application_id: DbId,
    ) -> Result<Option<VisaDocument>, sqlx::Error> {
        let query = format!(
            "SELECT {DOCUMENT_COLUMNS} FROM visa_documents
             WHERE visa_application_id = $1
             ORDER BY uploaded_at DESC, id DESC
             LIMIT 1"
        );
        sqlx::query_as::<_, VisaDocument>(&query)
            .bind(visa_application_id)
            .fetch_optional(pool)
            .await
    }

    /// Record a review decision on a document: new status, feedback, and
    /// the review timestamp. Rejected rows are never touched again.
    pub async fn review_document(
        pool: &PgPool,
        document_id: DbId,
        status: &str,
        feedback: &str,
    ) -> Result<(), sqlx::Error> {
        sqlx::query(
            "UPDATE visa_documents SET status = $2, feedback = $3, reviewed_at = NOW()
             WHERE id = $1",
        )
        .bind(document_id)
        .bind(status)
        .bind(feedback)
        .execute(pool)
        .await?;
        Ok(())
    }

    /// List all visa applications joined with their owners, newest first.
    pub async fn list_all_with_owner(
        pool: &PgPool,
    ) -> Result<Vec<VisaApplicationWithOwner>, sqlx::Error> {
        let query = format!(
            "SELECT {WITH_OWNER_COLUMNS}
             FROM visa_applications v
             JOIN users u ON u.id = v.user_id
             ORDER BY v.created_at DESC"
        );
        sqlx::query_as::<_, VisaApplicationWithOwner>(&query)
            .fetch_all(pool)
            .await
    }
}
