//! Domain model structs and DTOs.
//!
//! Each submodule contains:
//! - A `FromRow` + `Serialize` entity struct matching the database row
//! - A `Deserialize` create DTO for inserts
//! - Where a resource supports patches, an update DTO with all-`Option` fields

pub mod onboarding;
pub mod registration_token;
pub mod user;
pub mod visa;
