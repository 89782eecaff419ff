//! Repository for the `registration_tokens` table.

use onboard_core::registration::TOKEN_REGISTERED;
use sqlx::PgPool;

use crate::models::registration_token::{CreateRegistrationToken, RegistrationToken};

/// Column list shared across queries.
const COLUMNS: &str = "id, token, email, name, status, expires_at, created_at";

/// Provides CRUD operations for registration tokens.
pub struct RegistrationTokenRepo;

impl RegistrationTokenRepo {
    /// Insert a newly issued token, returning the created row.
    ///
    /// Status starts as `pending`.
    pub async fn create(
        pool: &PgPool,
        input: &CreateRegistrationToken,
    ) -> Result<RegistrationToken, sqlx::Error> {
        let query = format!(
            "INSERT INTO registration_tokens (token, email, name, expires_at)
             VALUES ($1, $2, $3, $4)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, RegistrationToken>(&query)
            .bind(&input.token)
            .bind(&input.email)
            .bind(&input.name)
            .bind(input.expires_at)
            .fetch_one(pool)
            .await
    }

    /// Find a token record by its token string.
    pub async fn find_by_token(
        pool: &PgPool,
        token: &str,
    ) -> Result<Option<RegistrationToken>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM registration_tokens WHERE token = $1");
        sqlx::query_as::<_, RegistrationToken>(&query)
            .bind(token)
            .fetch_optional(pool)
            .await
    }

    /// Flip a pending token to `registered`.
    ///
    /// The `status = 'pending'` guard makes the flip one-way at the row
    /// level; returns `true` if the row was updated.
    pub async fn mark_registered(pool: &PgPool, token: &str) -> Result<bool, sqlx::Error> {
        let result = sqlx::query(
            "UPDATE registration_tokens SET status = $2 WHERE token = $1 AND status = 'pending'",
        )
        .bind(token)
        .bind(TOKEN_REGISTERED)
        .execute(pool)
        .await?;
        Ok(result.rows_affected() > 0)
    }

    /// List all issued tokens, newest first.
    pub async fn list_all(pool: &PgPool) -> Result<Vec<RegistrationToken>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM registration_tokens ORDER BY created_at DESC"
        );
        sqlx::query_as::<_, RegistrationToken>(&query)
            .fetch_all(pool)
            .await
    }
}
