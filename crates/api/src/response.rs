//! Shared response types for API handlers.

use serde::Serialize;

/// Standard `{ "message": ... }` acknowledgement for mutations whose result
/// the client does not need back.
#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub message: &'static str,
}

impl MessageResponse {
    pub fn new(message: &'static str) -> Self {
        Self { message }
    }
}
