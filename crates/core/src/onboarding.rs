//! Onboarding application constants and validation.
//!
//! Applications carry a three-state review status plus flat personal and
//! citizenship data. The accepted enumeration values live here so the API
//! and repository layers validate against a single source.

use crate::error::CoreError;

// ---------------------------------------------------------------------------
// Application status
// ---------------------------------------------------------------------------

/// Application awaiting HR review.
pub const STATUS_PENDING: &str = "pending";

/// Application approved by HR.
pub const STATUS_APPROVED: &str = "approved";

/// Application rejected by HR; feedback is attached.
pub const STATUS_REJECTED: &str = "rejected";

/// All valid application statuses.
pub const VALID_STATUSES: &[&str] = &[STATUS_PENDING, STATUS_APPROVED, STATUS_REJECTED];

/// Validate that a status string is one of the accepted values.
pub fn validate_status(status: &str) -> Result<(), CoreError> {
    validate_known_key(status, VALID_STATUSES, "application status")
}

/// Rejections always carry feedback for the employee.
pub fn validate_rejection_feedback(feedback: &str) -> Result<(), CoreError> {
    if feedback.trim().is_empty() {
        return Err(CoreError::Validation(
            "Feedback is required when rejecting an application".into(),
        ));
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Resubmission policy
// ---------------------------------------------------------------------------

/// What happens to the stored status when an employee replaces a
/// previously reviewed application.
///
/// The historical behavior keeps the existing status (a replaced rejected
/// application stays `rejected` until HR acts again); deployments that want
/// a resubmission to re-enter the review queue configure the reset variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResubmitPolicy {
    /// Preserve the existing status across a replace.
    KeepStatus,
    /// Reset the status to `pending` on every replace.
    ResetToPending,
}

impl ResubmitPolicy {
    /// The status an application holds after its fields are replaced.
    pub fn status_after_resubmit<'a>(self, existing: &'a str) -> &'a str {
        match self {
            ResubmitPolicy::KeepStatus => existing,
            ResubmitPolicy::ResetToPending => STATUS_PENDING,
        }
    }
}

// ---------------------------------------------------------------------------
// Personal / identity enumerations
// ---------------------------------------------------------------------------

/// All valid gender values.
pub const VALID_GENDERS: &[&str] = &["male", "female", "prefer_not_to_say"];

/// All valid citizenship categories.
pub const VALID_CITIZENSHIP_TYPES: &[&str] = &["green_card", "citizen", "work_authorization"];

/// F1 work authorization; approval of an F1 application seeds the visa
/// document workflow.
pub const WORK_AUTH_F1: &str = "F1";

/// All valid work authorization types.
pub const VALID_WORK_AUTH_TYPES: &[&str] = &["H1-B", "H4-EAD", "L1", "J1", WORK_AUTH_F1, "other"];

/// Onboarding document type for the OPT receipt; this is the document the
/// F1 approval bridge copies into the visa workflow.
pub const DOC_TYPE_OPT_RECEIPT: &str = "opt_receipt";

/// All valid onboarding document types.
pub const VALID_DOCUMENT_TYPES: &[&str] = &[
    "driver_license",
    "passport",
    "birth_certificate",
    DOC_TYPE_OPT_RECEIPT,
    "other",
];

/// Validate that a gender value is one of the accepted values.
pub fn validate_gender(gender: &str) -> Result<(), CoreError> {
    validate_known_key(gender, VALID_GENDERS, "gender")
}

/// Validate that a citizenship category is one of the accepted values.
pub fn validate_citizenship_type(kind: &str) -> Result<(), CoreError> {
    validate_known_key(kind, VALID_CITIZENSHIP_TYPES, "citizenship type")
}

/// Validate that a work authorization type is one of the accepted values.
pub fn validate_work_auth_type(kind: &str) -> Result<(), CoreError> {
    validate_known_key(kind, VALID_WORK_AUTH_TYPES, "work authorization type")
}

/// Validate that an onboarding document type is one of the accepted values.
pub fn validate_document_type(kind: &str) -> Result<(), CoreError> {
    validate_known_key(kind, VALID_DOCUMENT_TYPES, "document type")
}

/// Validate that a value is present in a known list, returning a
/// descriptive error if not.
fn validate_known_key(value: &str, valid: &[&str], label: &str) -> Result<(), CoreError> {
    if valid.contains(&value) {
        Ok(())
    } else {
        Err(CoreError::Validation(format!(
            "Invalid {label} '{value}'. Must be one of: {valid:?}"
        )))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn all_statuses_are_valid() {
        for status in VALID_STATUSES {
            assert!(validate_status(status).is_ok());
        }
    }

    #[test]
    fn unknown_status_fails() {
        assert!(validate_status("archived").is_err());
        assert!(validate_status("").is_err());
    }

    #[test]
    fn rejection_feedback_must_be_non_empty() {
        assert!(validate_rejection_feedback("missing SSN card").is_ok());
        assert!(validate_rejection_feedback("  ").is_err());
    }

    #[test]
    fn keep_status_policy_preserves_existing() {
        assert_eq!(
            ResubmitPolicy::KeepStatus.status_after_resubmit(STATUS_REJECTED),
            STATUS_REJECTED
        );
        assert_eq!(
            ResubmitPolicy::KeepStatus.status_after_resubmit(STATUS_APPROVED),
            STATUS_APPROVED
        );
    }

    #[test]
    fn reset_policy_returns_to_pending() {
        assert_eq!(
            ResubmitPolicy::ResetToPending.status_after_resubmit(STATUS_REJECTED),
            STATUS_PENDING
        );
    }

    #[test]
    fn known_enumerations_accept_their_values() {
        for g in VALID_GENDERS {
            assert!(validate_gender(g).is_ok());
        }
        for c in VALID_CITIZENSHIP_TYPES {
            assert!(validate_citizenship_type(c).is_ok());
        }
        for w in VALID_WORK_AUTH_TYPES {
            assert!(validate_work_auth_type(w).is_ok());
        }
        for d in VALID_DOCUMENT_TYPES {
            assert!(validate_document_type(d).is_ok());
        }
    }

    #[test]
    fn unknown_enumeration_values_fail() {
        assert!(validate_gender("unknown").is_err());
        assert!(validate_citizenship_type("resident").is_err());
        assert!(validate_work_auth_type("B2").is_err());
        assert!(validate_document_type("resume").is_err());
    }
}
