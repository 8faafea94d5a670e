pub mod smtp;

use std::sync::Arc;

use lettre::transport::stub::AsyncStubTransport;
use lettre::AsyncTransport;

use crate::config::{Config, MailTransportKind, SmtpSettings};

/// Credential bundle for one outbound attempt
#[derive(Debug, Clone)]
pub struct SmtpCredentials {
    pub host: String,
    pub port: u16,
    pub username: String,
    pub password: String,
}

impl SmtpCredentials {
    /// Credentials from configured settings; `None` when the platform has no
    /// username/password configured.
    pub fn from_settings(settings: &SmtpSettings) -> Option<Self> {
        Some(Self {
            host: settings.host.clone(),
            port: settings.port,
            username: settings.username.clone()?,
            password: settings.password.clone()?,
        })
    }
}

/// Plain-text message addressed to every recipient at once
#[derive(Debug, Clone)]
pub struct OutboundMessage {
    pub subject: String,
    pub body: String,
    pub recipients: Vec<String>,
}

#[derive(Debug, thiserror::Error)]
pub enum MailError {
    #[error("Invalid address: {0}")]
    Address(#[from] lettre::address::AddressError),

    #[error("Failed to build message: {0}")]
    Message(#[from] lettre::error::Error),

    #[error("SMTP error: {0}")]
    Smtp(#[from] lettre::transport::smtp::Error),

    #[error("Stub transport error: {0}")]
    Stub(#[from] lettre::transport::stub::Error),
}

/// Mailer abstraction (SMTP in production, stub for local runs and tests)
#[derive(Clone)]
pub enum Mailer {
    Smtp,
    /// Accepts every message and keeps nothing
    Discard,
    /// Shared stub that records messages, for inspection in tests
    Stub(Arc<AsyncStubTransport>),
}

impl Mailer {
    pub fn from_config(config: &Config) -> Self {
        match config.mail_transport {
            MailTransportKind::Smtp => Mailer::Smtp,
            MailTransportKind::Stub => {
                tracing::warn!("MAIL_TRANSPORT=stub, messages are accepted and dropped");
                Mailer::Discard
            }
        }
    }

    /// Perform exactly one transmission attempt
    pub async fn send(
        &self,
        credentials: &SmtpCredentials,
        message: &OutboundMessage,
    ) -> Result<(), MailError> {
        let email = smtp::build_message(&credentials.username, message)?;

        match self {
            Mailer::Smtp => smtp::submit(credentials, email).await,
            Mailer::Discard => {
                AsyncStubTransport::new_ok().send(email).await?;
                Ok(())
            }
            Mailer::Stub(transport) => {
                transport.send(email).await?;
                Ok(())
            }
        }
    }
}
