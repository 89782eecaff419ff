//! Outbound notification delivery.
//!
//! The [`Notifier`] trait is the seam between the HTTP services and email
//! delivery: handlers call it with domain-level intents (invite an
//! employee, remind about a visa step) and never touch SMTP directly.
//! [`Mailer`] is the `lettre`-backed SMTP implementation;
//! [`NoopNotifier`] stands in when `SMTP_HOST` is not configured.

pub mod email;

pub use email::{EmailConfig, EmailError, Mailer, NoopNotifier, Notifier};
