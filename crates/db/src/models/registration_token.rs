//! Registration token entity model and DTOs.

use onboard_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A row from the `registration_tokens` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct RegistrationToken {
    pub id: DbId,
    pub token: String,
    pub email: String,
    pub name: String,
    /// `"pending"` until redeemed, then `"registered"` (one-way).
    pub status: String,
    pub expires_at: Timestamp,
    pub created_at: Timestamp,
}

/// DTO for issuing a new registration token.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateRegistrationToken {
    pub token: String,
    pub email: String,
    pub name: String,
    pub expires_at: Timestamp,
}
