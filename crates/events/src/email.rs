//! Email notification delivery via SMTP.
//!
//! [`Mailer`] wraps the `lettre` async SMTP transport to send the two
//! notification templates this system needs: registration invitations and
//! visa-step reminders. Configuration is loaded from environment
//! variables; if `SMTP_HOST` is not set, [`EmailConfig::from_env`] returns
//! `None` and callers should fall back to [`NoopNotifier`].

use async_trait::async_trait;

// ---------------------------------------------------------------------------
// Error
// ---------------------------------------------------------------------------

/// Error type for email delivery failures.
#[derive(Debug, thiserror::Error)]
pub enum EmailError {
    /// SMTP transport-level failure (authentication, connection, etc.).
    #[error("SMTP transport error: {0}")]
    Transport(#[from] lettre::transport::smtp::Error),

    /// The recipient or sender address could not be parsed.
    #[error("Email address parse error: {0}")]
    Address(#[from] lettre::address::AddressError),

    /// The MIME message could not be assembled.
    #[error("Email build error: {0}")]
    Build(String),
}

// ---------------------------------------------------------------------------
// Notifier
// ---------------------------------------------------------------------------

/// Outbound notification seam used by the HTTP services.
///
/// A failed send surfaces to the caller immediately; nothing here retries.
#[async_trait]
pub trait Notifier: Send + Sync {
    /// Invite a new employee to register via the tokenized link.
    async fn send_registration_invite(
        &self,
        to_email: &str,
        name: &str,
        registration_link: &str,
    ) -> Result<(), EmailError>;

    /// Remind an employee which visa document is awaited from them.
    async fn send_visa_reminder(
        &self,
        to_email: &str,
        name: &str,
        step_display_name: &str,
    ) -> Result<(), EmailError>;
}

/// No-op notifier used when SMTP is not configured.
pub struct NoopNotifier;

#[async_trait]
impl Notifier for NoopNotifier {
    async fn send_registration_invite(
        &self,
        to_email: &str,
        _name: &str,
        _registration_link: &str,
    ) -> Result<(), EmailError> {
        tracing::warn!(to = to_email, "SMTP not configured; dropping registration invite");
        Ok(())
    }

    async fn send_visa_reminder(
        &self,
        to_email: &str,
        _name: &str,
        _step_display_name: &str,
    ) -> Result<(), EmailError> {
        tracing::warn!(to = to_email, "SMTP not configured; dropping visa reminder");
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// EmailConfig
// ---------------------------------------------------------------------------

/// Default SMTP port (STARTTLS).
const DEFAULT_SMTP_PORT: u16 = 587;

/// Default sender address when `SMTP_FROM` is not set.
const DEFAULT_FROM_ADDRESS: &str = "noreply@onboard.local";

/// Configuration for the SMTP email delivery service.
#[derive(Debug, Clone)]
pub struct EmailConfig {
    /// SMTP server hostname.
    pub smtp_host: String,
    /// SMTP server port (defaults to 587).
    pub smtp_port: u16,
    /// RFC 5322 "From" address.
    pub from_address: String,
    /// Optional SMTP username.
    pub smtp_user: Option<String>,
    /// Optional SMTP password.
    pub smtp_password: Option<String>,
}

impl EmailConfig {
    /// Load configuration from environment variables.
    ///
    /// Returns `None` if `SMTP_HOST` is not set, signalling that email
    /// delivery is not configured and should be skipped.
    ///
    /// | Variable        | Required | Default                  |
    /// |-----------------|----------|--------------------------|
    /// | `SMTP_HOST`     | yes      | —                        |
    /// | `SMTP_PORT`     | no       | `587`                    |
    /// | `SMTP_FROM`     | no       | `noreply@onboard.local`  |
    /// | `SMTP_USER`     | no       | —                        |
    /// | `SMTP_PASSWORD` | no       | —                        |
    pub fn from_env() -> Option<Self> {
        let smtp_host = std::env::var("SMTP_HOST").ok()?;
        Some(Self {
            smtp_host,
            smtp_port: std::env::var("SMTP_PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(DEFAULT_SMTP_PORT),
            from_address: std::env::var("SMTP_FROM")
                .unwrap_or_else(|_| DEFAULT_FROM_ADDRESS.to_string()),
            smtp_user: std::env::var("SMTP_USER").ok(),
            smtp_password: std::env::var("SMTP_PASSWORD").ok(),
        })
    }
}

// ---------------------------------------------------------------------------
// Mailer
// ---------------------------------------------------------------------------

/// Sends notification emails via SMTP.
pub struct Mailer {
    config: EmailConfig,
}

impl Mailer {
    /// Create a new mailer with the given configuration.
    pub fn new(config: EmailConfig) -> Self {
        Self { config }
    }

    /// Assemble and send one HTML email.
    async fn deliver(&self, to_email: &str, subject: &str, html: String) -> Result<(), EmailError> {
        use lettre::{
            message::header::ContentType, transport::smtp::authentication::Credentials,
            AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor,
        };

        let email = Message::builder()
            .from(self.config.from_address.parse()?)
            .to(to_email.parse()?)
            .subject(subject)
            .header(ContentType::TEXT_HTML)
            .body(html)
            .map_err(|e| EmailError::Build(e.to_string()))?;

        let mut transport_builder =
            AsyncSmtpTransport::<Tokio1Executor>::starttls_relay(&self.config.smtp_host)?
                .port(self.config.smtp_port);

        if let (Some(user), Some(pass)) = (&self.config.smtp_user, &self.config.smtp_password) {
            transport_builder =
                transport_builder.credentials(Credentials::new(user.clone(), pass.clone()));
        }

        let mailer = transport_builder.build();
        mailer.send(email).await?;

        tracing::info!(to = to_email, subject, "Notification email sent");
        Ok(())
    }
}

#[async_trait]
impl Notifier for Mailer {
    async fn send_registration_invite(
        &self,
        to_email: &str,
        name: &str,
        registration_link: &str,
    ) -> Result<(), EmailError> {
        self.deliver(
            to_email,
            "Welcome to Our Company - Complete Your Registration",
            registration_invite_body(name, registration_link),
        )
        .await
    }

    async fn send_visa_reminder(
        &self,
        to_email: &str,
        name: &str,
        step_display_name: &str,
    ) -> Result<(), EmailError> {
        self.deliver(
            to_email,
            &format!("Action Required: {step_display_name} Document"),
            visa_reminder_body(name, step_display_name),
        )
        .await
    }
}

// ---------------------------------------------------------------------------
// Templates
// ---------------------------------------------------------------------------

/// HTML body for the registration invitation.
fn registration_invite_body(name: &str, registration_link: &str) -> String {
    format!(
        "<h1>Welcome {name}!</h1>\
         <p>Please click the link below to complete your registration:</p>\
         <a href=\"{registration_link}\">Complete Registration</a>\
         <p>This link will expire in 3 hours.</p>"
    )
}

/// HTML body for the visa document reminder.
fn visa_reminder_body(name: &str, step_display_name: &str) -> String {
    format!(
        "<p>Hi {name},</p>\
         <p>Your next work-authorization document, <b>{step_display_name}</b>, \
         is awaiting your upload. Please submit it from your visa status page.</p>"
    )
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_env_returns_none_without_smtp_host() {
        // Ensure SMTP_HOST is not set in the test environment.
        std::env::remove_var("SMTP_HOST");
        assert!(EmailConfig::from_env().is_none());
    }

    #[test]
    fn invite_body_embeds_name_and_link() {
        let body = registration_invite_body("Ada", "https://app.local/register?token=t-1");
        assert!(body.contains("Welcome Ada!"));
        assert!(body.contains("https://app.local/register?token=t-1"));
        assert!(body.contains("expire in 3 hours"));
    }

    #[test]
    fn reminder_body_names_the_step() {
        let body = visa_reminder_body("Ada", "OPT EAD");
        assert!(body.contains("OPT EAD"));
    }

    #[test]
    fn email_error_display_build() {
        let err = EmailError::Build("missing body".to_string());
        assert_eq!(err.to_string(), "Email build error: missing body");
    }

    #[tokio::test]
    async fn noop_notifier_always_succeeds() {
        let notifier = NoopNotifier;
        assert!(notifier
            .send_registration_invite("a@corp.com", "Ada", "link")
            .await
            .is_ok());
        assert!(notifier
            .send_visa_reminder("a@corp.com", "Ada", "I-983")
            .await
            .is_ok());
    }
}
