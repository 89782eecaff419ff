//! Shared error taxonomy for the service layer.
//!
//! Services return `Result<T, CoreError>`; the HTTP layer converts each
//! variant to a status code and JSON envelope exactly once, at the request
//! boundary. Nothing in this crate formats HTTP responses.

use crate::types::DbId;

#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    /// A referenced entity does not exist (404).
    #[error("Entity not found: {entity} with id {id}")]
    NotFound { entity: &'static str, id: DbId },

    /// Malformed or missing required input (400).
    #[error("Validation failed: {0}")]
    Validation(String),

    /// A state invariant was violated, e.g. a duplicate pending
    /// application or an outstanding pending document (400).
    #[error("Conflict: {0}")]
    Conflict(String),

    /// Missing, invalid, or expired credential (401).
    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    /// Authenticated but not allowed, e.g. employee on an HR route (403).
    #[error("Forbidden: {0}")]
    Forbidden(String),

    /// Unexpected internal failure; logged, reported as a sanitized 500.
    #[error("Internal error: {0}")]
    Internal(String),
}
