//! User role names.
//!
//! Roles are stored as plain strings on the `users` table and embedded in
//! JWT claims. HR users can additionally review applications and issue
//! registration tokens.

use crate::error::CoreError;

/// HR administrator role.
pub const ROLE_HR: &str = "hr";

/// Regular employee role.
pub const ROLE_EMPLOYEE: &str = "employee";

/// All valid role names.
pub const VALID_ROLES: &[&str] = &[ROLE_HR, ROLE_EMPLOYEE];

/// Validate that a role name is one of the accepted values.
pub fn validate_role(role: &str) -> Result<(), CoreError> {
    if VALID_ROLES.contains(&role) {
        Ok(())
    } else {
        Err(CoreError::Validation(format!(
            "Invalid role '{role}'. Must be one of: {}",
            VALID_ROLES.join(", ")
        )))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn known_roles_are_valid() {
        assert!(validate_role(ROLE_HR).is_ok());
        assert!(validate_role(ROLE_EMPLOYEE).is_ok());
    }

    #[test]
    fn unknown_role_fails() {
        assert!(validate_role("superuser").is_err());
        assert!(validate_role("").is_err());
    }
}
