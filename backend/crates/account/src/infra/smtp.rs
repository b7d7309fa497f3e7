//! SMTP Mailer
//!
//! Sends plain-text mail through an authenticated relay. Port 465 uses
//! implicit TLS, every other port STARTTLS.

use lettre::message::{Mailbox, header::ContentType};
use lettre::transport::smtp::authentication::Credentials;
use lettre::{AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor};

use crate::domain::ports::{Mailer, OutgoingEmail};
use crate::error::{AccountError, AccountResult};

/// Port that expects TLS from the first byte
pub const IMPLICIT_TLS_PORT: u16 = 465;

/// SMTP relay settings
#[derive(Clone)]
pub struct SmtpConfig {
    pub host: String,
    pub port: u16,
    pub username: String,
    pub password: String,
    /// Sender mailbox, e.g. `Portfolio <me@example.com>`
    pub from: String,
}

impl std::fmt::Debug for SmtpConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SmtpConfig")
            .field("host", &self.host)
            .field("port", &self.port)
            .field("username", &self.username)
            .field("password", &"[REDACTED]")
            .field("from", &self.from)
            .finish()
    }
}

/// lettre-backed mailer
#[derive(Clone)]
pub struct SmtpMailer {
    transport: AsyncSmtpTransport<Tokio1Executor>,
    from: Mailbox,
}

impl SmtpMailer {
    pub fn new(config: &SmtpConfig) -> AccountResult<Self> {
        let from: Mailbox = config
            .from
            .parse()
            .map_err(|e| AccountError::Internal(format!("Invalid sender address: {e}")))?;

        let builder = if config.port == IMPLICIT_TLS_PORT {
            AsyncSmtpTransport::<Tokio1Executor>::relay(&config.host)
        } else {
            AsyncSmtpTransport::<Tokio1Executor>::starttls_relay(&config.host)
        }
        .map_err(|e| AccountError::Internal(format!("Invalid SMTP relay: {e}")))?;

        let transport = builder
            .port(config.port)
            .credentials(Credentials::new(
                config.username.clone(),
                config.password.clone(),
            ))
            .build();

        Ok(Self { transport, from })
    }
}

/// Build the MIME message for `email`
pub fn build_message(from: &Mailbox, email: &OutgoingEmail) -> AccountResult<Message> {
    let to: Mailbox = email
        .to
        .parse()
        .map_err(|e| AccountError::MailDelivery(format!("Invalid recipient: {e}")))?;

    Message::builder()
        .from(from.clone())
        .to(to)
        .subject(email.subject.clone())
        .header(ContentType::TEXT_PLAIN)
        .body(email.body.clone())
        .map_err(|e| AccountError::MailDelivery(e.to_string()))
}

impl Mailer for SmtpMailer {
    async fn send(&self, email: &OutgoingEmail) -> AccountResult<()> {
        let message = build_message(&self.from, email)?;

        self.transport
            .send(message)
            .await
            .map_err(|e| AccountError::MailDelivery(e.to_string()))?;

        tracing::debug!(subject = %email.subject, "Mail sent");
        Ok(())
    }
}
