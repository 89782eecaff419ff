//! Domain logic for the onboarding platform.
//!
//! Everything in this crate is pure: no I/O, no database, no clock other
//! than timestamps passed in by callers. The api and db crates depend on
//! these rules and persist their outcomes.

pub mod error;
pub mod onboarding;
pub mod registration;
pub mod roles;
pub mod types;
pub mod visa;
