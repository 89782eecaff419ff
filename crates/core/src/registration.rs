//! Registration token redemption rules.
//!
//! HR issues single-use, time-boxed invitation tokens bound to an email
//! address. Redemption happens once, during account registration, and the
//! pending-to-registered flip is one-way.

use chrono::Duration;

use crate::error::CoreError;
use crate::types::Timestamp;

/// Tokens expire this many hours after issuance.
pub const TOKEN_TTL_HOURS: i64 = 3;

/// Token issued, not yet redeemed.
pub const TOKEN_PENDING: &str = "pending";

/// Token consumed by a completed registration.
pub const TOKEN_REGISTERED: &str = "registered";

/// Why a redemption attempt was refused.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RedemptionError {
    #[error("Invalid registration token")]
    InvalidToken,

    #[error("Registration token has expired")]
    Expired,

    #[error("Registration token has already been used")]
    AlreadyUsed,

    #[error("Email does not match the invited address")]
    EmailMismatch,
}

impl From<RedemptionError> for CoreError {
    fn from(err: RedemptionError) -> Self {
        let msg = err.to_string();
        match err {
            RedemptionError::InvalidToken | RedemptionError::Expired => {
                CoreError::Unauthorized(msg)
            }
            RedemptionError::AlreadyUsed => CoreError::Conflict(msg),
            RedemptionError::EmailMismatch => CoreError::Validation(msg),
        }
    }
}

/// Expiry timestamp for a token issued at `now`.
pub fn expiry_from(now: Timestamp) -> Timestamp {
    now + Duration::hours(TOKEN_TTL_HOURS)
}

/// Check that a stored token may be redeemed by `registering_email` at `now`.
///
/// The token record itself is looked up by the caller; a missing record is
/// [`RedemptionError::InvalidToken`]. Redemption requires the token to be
/// unexpired, still pending, and bound to exactly the registering email.
pub fn validate_redemption(
    status: &str,
    expires_at: Timestamp,
    bound_email: &str,
    registering_email: &str,
    now: Timestamp,
) -> Result<(), RedemptionError> {
    if now > expires_at {
        return Err(RedemptionError::Expired);
    }
    if status == TOKEN_REGISTERED {
        return Err(RedemptionError::AlreadyUsed);
    }
    if bound_email != registering_email {
        return Err(RedemptionError::EmailMismatch);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn now() -> Timestamp {
        Utc::now()
    }

    #[test]
    fn valid_pending_token_redeems() {
        let t = now();
        let result =
            validate_redemption(TOKEN_PENDING, expiry_from(t), "a@corp.com", "a@corp.com", t);
        assert!(result.is_ok());
    }

    #[test]
    fn expired_token_fails() {
        let t = now();
        let expired_at = t - Duration::minutes(1);
        let result = validate_redemption(TOKEN_PENDING, expired_at, "a@corp.com", "a@corp.com", t);
        assert_eq!(result.unwrap_err(), RedemptionError::Expired);
    }

    #[test]
    fn token_valid_through_its_expiry_instant() {
        let t = now();
        let result = validate_redemption(TOKEN_PENDING, t, "a@corp.com", "a@corp.com", t);
        assert!(result.is_ok());
    }

    #[test]
    fn second_redemption_fails_as_already_used() {
        let t = now();
        let result = validate_redemption(
            TOKEN_REGISTERED,
            expiry_from(t),
            "a@corp.com",
            "a@corp.com",
            t,
        );
        assert_eq!(result.unwrap_err(), RedemptionError::AlreadyUsed);
    }

    #[test]
    fn mismatched_email_fails() {
        let t = now();
        let result =
            validate_redemption(TOKEN_PENDING, expiry_from(t), "a@corp.com", "b@corp.com", t);
        assert_eq!(result.unwrap_err(), RedemptionError::EmailMismatch);
    }

    #[test]
    fn ttl_is_three_hours() {
        let t = now();
        assert_eq!(expiry_from(t) - t, Duration::hours(3));
    }

    #[test]
    fn redemption_errors_map_to_core_taxonomy() {
        assert!(matches!(
            CoreError::from(RedemptionError::InvalidToken),
            CoreError::Unauthorized(_)
        ));
        assert!(matches!(
            CoreError::from(RedemptionError::Expired),
            CoreError::Unauthorized(_)
        ));
        assert!(matches!(
            CoreError::from(RedemptionError::AlreadyUsed),
            CoreError::Conflict(_)
        ));
        assert!(matches!(
            CoreError::from(RedemptionError::EmailMismatch),
            CoreError::Validation(_)
        ));
    }
}
