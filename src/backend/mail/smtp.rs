//! SMTP delivery through lettre

use async_trait::async_trait;
use lettre::{
    message::{header::ContentType, Mailbox},
    transport::smtp::authentication::Credentials,
    AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor,
};

use crate::backend::error::BackendError;
use crate::backend::mail::{Mailer, OutgoingEmail};
use crate::shared::config::SmtpConfig;

/// Delivers email through an authenticated STARTTLS relay
#[derive(Clone)]
pub struct SmtpMailer {
    transport: AsyncSmtpTransport<Tokio1Executor>,
}

impl SmtpMailer {
    pub fn new(config: &SmtpConfig) -> Result<Self, BackendError> {
        let credentials = Credentials::new(config.username.clone(), config.password.clone());
        let transport = AsyncSmtpTransport::<Tokio1Executor>::starttls_relay(&config.host)?
            .port(config.port)
            .credentials(credentials)
            .build();

        Ok(Self { transport })
    }
}

/// Build the lettre message for an outgoing email
pub fn build_message(email: &OutgoingEmail) -> Result<Message, BackendError> {
    let from: Mailbox = email.from.parse()?;
    let to: Mailbox = email.to.parse()?;

    Ok(Message::builder()
        .from(from)
        .to(to)
        .subject(email.subject.as_str())
        .header(ContentType::TEXT_HTML)
        .body(email.html.clone())?)
}

#[async_trait]
impl Mailer for SmtpMailer {
    async fn send(&self, email: OutgoingEmail) -> Result<(), BackendError> {
        let message = build_message(&email)?;
        let response = self.transport.send(message).await?;
        tracing::info!("Email \"{}\" sent to {} ({:?})", email.subject, email.to, response.code());
        Ok(())
    }
}

/// Logs emails instead of sending them
#[derive(Debug, Clone, Copy, Default)]
pub struct LogMailer;

#[async_trait]
impl Mailer for LogMailer {
    async fn send(&self, email: OutgoingEmail) -> Result<(), BackendError> {
        tracing::info!(to = %email.to, subject = %email.subject, "Email not sent (SMTP disabled)");
        tracing::debug!("{}", email.html);
        Ok(())
    }
}
