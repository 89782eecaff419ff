//! Visa document workflow engine.
//!
//! F1 work-authorization paperwork moves through four ordered steps
//! (OPT Receipt, OPT EAD, I-983, I-20). For each step the employee uploads
//! exactly one document at a time and HR must approve it before the next
//! step unlocks; a rejection keeps the step and requires a resubmission.
//! This module owns the step ordering, the transition preconditions, and
//! the employee-facing status messages. The api and db layers persist what
//! it decides and never bypass it.

use serde::{Deserialize, Serialize};

use crate::error::CoreError;

// ---------------------------------------------------------------------------
// Steps
// ---------------------------------------------------------------------------

/// The four visa document steps, in workflow order.
///
/// `current_step` on a visa application is monotonically non-decreasing: it
/// advances one step per approval and never regresses. [`VisaStep::I20`] is
/// terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum VisaStep {
    #[serde(rename = "OPT_RECEIPT")]
    OptReceipt,
    #[serde(rename = "OPT_EAD")]
    OptEad,
    #[serde(rename = "I_983")]
    I983,
    #[serde(rename = "I_20")]
    I20,
}

impl VisaStep {
    /// All steps in workflow order.
    pub const ORDERED: [VisaStep; 4] = [
        VisaStep::OptReceipt,
        VisaStep::OptEad,
        VisaStep::I983,
        VisaStep::I20,
    ];

    /// Wire/storage name, e.g. `"OPT_RECEIPT"`.
    pub fn as_str(self) -> &'static str {
        match self {
            VisaStep::OptReceipt => "OPT_RECEIPT",
            VisaStep::OptEad => "OPT_EAD",
            VisaStep::I983 => "I_983",
            VisaStep::I20 => "I_20",
        }
    }

    /// Human-readable name, e.g. `"OPT Receipt"`.
    pub fn display_name(self) -> &'static str {
        match self {
            VisaStep::OptReceipt => "OPT Receipt",
            VisaStep::OptEad => "OPT EAD",
            VisaStep::I983 => "I-983",
            VisaStep::I20 => "I-20",
        }
    }

    /// The next step in the fixed order, or `None` for the terminal I-20.
    pub fn next(self) -> Option<VisaStep> {
        match self {
            VisaStep::OptReceipt => Some(VisaStep::OptEad),
            VisaStep::OptEad => Some(VisaStep::I983),
            VisaStep::I983 => Some(VisaStep::I20),
            VisaStep::I20 => None,
        }
    }
}

impl std::str::FromStr for VisaStep {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "OPT_RECEIPT" => Ok(VisaStep::OptReceipt),
            "OPT_EAD" => Ok(VisaStep::OptEad),
            "I_983" => Ok(VisaStep::I983),
            "I_20" => Ok(VisaStep::I20),
            other => Err(CoreError::Validation(format!(
                "Invalid visa step '{other}'. Must be one of: OPT_RECEIPT, OPT_EAD, I_983, I_20"
            ))),
        }
    }
}

// ---------------------------------------------------------------------------
// Document status
// ---------------------------------------------------------------------------

/// Review status of an uploaded document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DocumentStatus {
    #[serde(rename = "PENDING")]
    Pending,
    #[serde(rename = "APPROVED")]
    Approved,
    #[serde(rename = "REJECTED")]
    Rejected,
}

impl DocumentStatus {
    /// Wire/storage name, e.g. `"PENDING"`.
    pub fn as_str(self) -> &'static str {
        match self {
            DocumentStatus::Pending => "PENDING",
            DocumentStatus::Approved => "APPROVED",
            DocumentStatus::Rejected => "REJECTED",
        }
    }
}

impl std::str::FromStr for DocumentStatus {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "PENDING" => Ok(DocumentStatus::Pending),
            "APPROVED" => Ok(DocumentStatus::Approved),
            "REJECTED" => Ok(DocumentStatus::Rejected),
            other => Err(CoreError::Validation(format!(
                "Invalid document status '{other}'. Must be one of: PENDING, APPROVED, REJECTED"
            ))),
        }
    }
}

// ---------------------------------------------------------------------------
// Transition preconditions
// ---------------------------------------------------------------------------

/// Minimal view of a stored document, as the engine needs it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DocumentRef {
    pub step: VisaStep,
    pub status: DocumentStatus,
}

/// Submit gate: at most one document may await review per step.
///
/// Fails with a conflict if any document for `current_step` is still
/// `PENDING`; a resubmission is only allowed once the previous document has
/// been approved or rejected.
pub fn ensure_no_pending(
    current_step: VisaStep,
    documents: &[DocumentRef],
) -> Result<(), CoreError> {
    let has_pending = documents
        .iter()
        .any(|d| d.step == current_step && d.status == DocumentStatus::Pending);
    if has_pending {
        return Err(CoreError::Conflict(
            "Previous document is still pending approval".into(),
        ));
    }
    Ok(())
}

/// Review gate: HR acts only on the most recently uploaded document, and
/// only while it is pending.
fn ensure_latest_pending(latest: Option<DocumentRef>, verb: &str) -> Result<(), CoreError> {
    let doc =
        latest.ok_or_else(|| CoreError::Validation(format!("No document to {verb}")))?;
    if doc.status != DocumentStatus::Pending {
        return Err(CoreError::Validation(format!(
            "Can only {verb} documents with pending status"
        )));
    }
    Ok(())
}

/// Precondition for HR approval of the latest document.
pub fn ensure_can_approve(latest: Option<DocumentRef>) -> Result<(), CoreError> {
    ensure_latest_pending(latest, "approve")
}

/// Precondition for HR rejection of the latest document.
pub fn ensure_can_reject(latest: Option<DocumentRef>) -> Result<(), CoreError> {
    ensure_latest_pending(latest, "reject")
}

/// Rejections always carry feedback for the employee.
pub fn validate_rejection_feedback(feedback: &str) -> Result<(), CoreError> {
    if feedback.trim().is_empty() {
        return Err(CoreError::Validation(
            "Feedback is required when rejecting a document".into(),
        ));
    }
    Ok(())
}

/// The step an application moves to after its latest document is approved.
///
/// I-20 has no successor; the application stays there, which means "all
/// documents approved".
pub fn step_after_approval(current_step: VisaStep) -> VisaStep {
    current_step.next().unwrap_or(current_step)
}

// ---------------------------------------------------------------------------
// Status messages
// ---------------------------------------------------------------------------

/// Upload prompt for a step the employee has not yet submitted.
pub fn next_step_message(step: VisaStep) -> &'static str {
    match step {
        VisaStep::OptReceipt => "Please upload a copy of your OPT RECEIPT",
        VisaStep::OptEad => "Please upload a copy of your OPT EAD",
        VisaStep::I983 => "Please upload a copy of the signed I-983",
        VisaStep::I20 => "Please upload a copy of your I-20",
    }
}

/// Waiting-for-review message for a pending document.
pub fn pending_message(step: VisaStep) -> &'static str {
    match step {
        VisaStep::OptReceipt => "Waiting for HR to approve your OPT Receipt",
        VisaStep::OptEad => "Waiting for HR to approve your OPT EAD",
        VisaStep::I983 => "Waiting for HR to approve and sign your I-983",
        VisaStep::I20 => "Waiting for HR to approve your I-20",
    }
}

/// The latest uploaded document together with its review feedback.
#[derive(Debug, Clone)]
pub struct LatestDocument {
    pub step: VisaStep,
    pub status: DocumentStatus,
    pub feedback: String,
}

impl LatestDocument {
    fn as_ref(&self) -> DocumentRef {
        DocumentRef {
            step: self.step,
            status: self.status,
        }
    }
}

/// Derive the employee-facing status message from the application state.
///
/// Pure function of (current step, latest document): no document yet means
/// an upload prompt for the current step; a pending document means waiting
/// on HR; an approved I-20 means the workflow is complete; an approved
/// earlier document means the next step's upload prompt (the step has
/// already advanced by then); a rejection surfaces the stored feedback
/// verbatim.
pub fn status_message(current_step: VisaStep, latest: Option<&LatestDocument>) -> String {
    let Some(doc) = latest else {
        return next_step_message(current_step).to_string();
    };
    match doc.status {
        DocumentStatus::Pending => pending_message(current_step).to_string(),
        DocumentStatus::Approved => {
            if doc.step == VisaStep::I20 {
                "All documents have been approved.".to_string()
            } else {
                next_step_message(current_step).to_string()
            }
        }
        DocumentStatus::Rejected => doc.feedback.clone(),
    }
}

// ---------------------------------------------------------------------------
// HR dashboard classification
// ---------------------------------------------------------------------------

/// An application is in progress unless it is fully approved through I-20:
/// `current_step` at I-20, at least one document on file, and the latest
/// document an approved I-20. Anything else (never started, mid-sequence,
/// pending or rejected at any step) still needs HR attention.
pub fn is_in_progress(current_step: VisaStep, latest: Option<&LatestDocument>) -> bool {
    match latest {
        Some(doc) => {
            !(current_step == VisaStep::I20
                && doc.step == VisaStep::I20
                && doc.status == DocumentStatus::Approved)
        }
        None => true,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn doc(step: VisaStep, status: DocumentStatus) -> LatestDocument {
        LatestDocument {
            step,
            status,
            feedback: String::new(),
        }
    }

    // -- ordering ----------------------------------------------------------

    #[test]
    fn steps_are_strictly_ordered() {
        assert!(VisaStep::OptReceipt < VisaStep::OptEad);
        assert!(VisaStep::OptEad < VisaStep::I983);
        assert!(VisaStep::I983 < VisaStep::I20);
    }

    #[test]
    fn next_walks_the_fixed_order() {
        assert_eq!(VisaStep::OptReceipt.next(), Some(VisaStep::OptEad));
        assert_eq!(VisaStep::OptEad.next(), Some(VisaStep::I983));
        assert_eq!(VisaStep::I983.next(), Some(VisaStep::I20));
        assert_eq!(VisaStep::I20.next(), None);
    }

    #[test]
    fn approval_never_regresses_the_step() {
        // Walking the whole chain through approvals is monotonic and ends
        // pinned at I-20.
        let mut step = VisaStep::OptReceipt;
        for expected in [VisaStep::OptEad, VisaStep::I983, VisaStep::I20, VisaStep::I20] {
            let advanced = step_after_approval(step);
            assert!(advanced >= step);
            assert_eq!(advanced, expected);
            step = advanced;
        }
    }

    #[test]
    fn wire_names_round_trip() {
        for step in VisaStep::ORDERED {
            assert_eq!(step.as_str().parse::<VisaStep>().unwrap(), step);
        }
        assert!("OPT-RECEIPT".parse::<VisaStep>().is_err());
    }

    // -- submit gate -------------------------------------------------------

    #[test]
    fn submit_blocked_while_current_step_pending() {
        let docs = [DocumentRef {
            step: VisaStep::OptEad,
            status: DocumentStatus::Pending,
        }];
        let err = ensure_no_pending(VisaStep::OptEad, &docs).unwrap_err();
        assert!(matches!(err, CoreError::Conflict(_)));
    }

    #[test]
    fn submit_allowed_after_rejection_or_approval() {
        let rejected = [DocumentRef {
            step: VisaStep::I983,
            status: DocumentStatus::Rejected,
        }];
        assert!(ensure_no_pending(VisaStep::I983, &rejected).is_ok());

        let approved = [DocumentRef {
            step: VisaStep::OptReceipt,
            status: DocumentStatus::Approved,
        }];
        assert!(ensure_no_pending(VisaStep::OptEad, &approved).is_ok());
    }

    #[test]
    fn pending_document_for_an_earlier_step_does_not_block() {
        // Cannot happen under the invariant, but the gate keys on the
        // current step only.
        let docs = [DocumentRef {
            step: VisaStep::OptReceipt,
            status: DocumentStatus::Pending,
        }];
        assert!(ensure_no_pending(VisaStep::OptEad, &docs).is_ok());
    }

    #[test]
    fn submit_allowed_with_no_documents() {
        assert!(ensure_no_pending(VisaStep::OptReceipt, &[]).is_ok());
    }

    // -- review gates ------------------------------------------------------

    #[test]
    fn approve_requires_a_document() {
        let err = ensure_can_approve(None).unwrap_err();
        assert!(err.to_string().contains("No document to approve"));
    }

    #[test]
    fn approve_requires_pending_status() {
        for status in [DocumentStatus::Approved, DocumentStatus::Rejected] {
            let latest = DocumentRef {
                step: VisaStep::OptReceipt,
                status,
            };
            let err = ensure_can_approve(Some(latest)).unwrap_err();
            assert!(err.to_string().contains("pending status"));
        }
    }

    #[test]
    fn reject_requires_pending_status() {
        assert!(ensure_can_reject(None).is_err());
        let latest = DocumentRef {
            step: VisaStep::I20,
            status: DocumentStatus::Pending,
        };
        assert!(ensure_can_reject(Some(latest)).is_ok());
    }

    #[test]
    fn rejection_feedback_must_be_non_empty() {
        assert!(validate_rejection_feedback("missing signature").is_ok());
        assert!(validate_rejection_feedback("").is_err());
        assert!(validate_rejection_feedback("   ").is_err());
    }

    // -- status messages ---------------------------------------------------

    #[test]
    fn no_document_prompts_upload_for_current_step() {
        assert_eq!(
            status_message(VisaStep::OptReceipt, None),
            "Please upload a copy of your OPT RECEIPT"
        );
        assert_eq!(
            status_message(VisaStep::I983, None),
            "Please upload a copy of the signed I-983"
        );
    }

    #[test]
    fn pending_document_reports_waiting_on_hr() {
        let d = doc(VisaStep::OptReceipt, DocumentStatus::Pending);
        assert_eq!(
            status_message(VisaStep::OptReceipt, Some(&d)),
            "Waiting for HR to approve your OPT Receipt"
        );
    }

    #[test]
    fn approved_i20_completes_the_workflow() {
        let d = doc(VisaStep::I20, DocumentStatus::Approved);
        assert_eq!(
            status_message(VisaStep::I20, Some(&d)),
            "All documents have been approved."
        );
    }

    #[test]
    fn approval_prompts_for_the_next_step() {
        // After approving the OPT Receipt the step has advanced to OPT EAD.
        let d = doc(VisaStep::OptReceipt, DocumentStatus::Approved);
        assert_eq!(
            status_message(VisaStep::OptEad, Some(&d)),
            "Please upload a copy of your OPT EAD"
        );
    }

    #[test]
    fn rejection_surfaces_feedback_verbatim() {
        let d = LatestDocument {
            step: VisaStep::I983,
            status: DocumentStatus::Rejected,
            feedback: "missing signature".to_string(),
        };
        assert_eq!(status_message(VisaStep::I983, Some(&d)), "missing signature");
    }

    // -- in-progress classification ----------------------------------------

    #[test]
    fn fully_approved_application_is_not_in_progress() {
        let d = doc(VisaStep::I20, DocumentStatus::Approved);
        assert!(!is_in_progress(VisaStep::I20, Some(&d)));
    }

    #[test]
    fn anything_short_of_approved_i20_is_in_progress() {
        assert!(is_in_progress(VisaStep::OptReceipt, None));

        let pending_i20 = doc(VisaStep::I20, DocumentStatus::Pending);
        assert!(is_in_progress(VisaStep::I20, Some(&pending_i20)));

        let rejected_i20 = doc(VisaStep::I20, DocumentStatus::Rejected);
        assert!(is_in_progress(VisaStep::I20, Some(&rejected_i20)));

        let approved_ead = doc(VisaStep::OptEad, DocumentStatus::Approved);
        assert!(is_in_progress(VisaStep::I983, Some(&approved_ead)));
    }
}
