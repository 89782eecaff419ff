//! Request handlers, one module per resource.

pub mod auth;
pub mod files;
pub mod hr;
pub mod onboarding;
pub mod personal;
pub mod visa;
