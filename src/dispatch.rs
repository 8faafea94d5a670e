//! Send path: one transmission attempt, classified and logged.

use serde::Serialize;

use crate::error::{AppError, Result};
use crate::mail::{Mailer, OutboundMessage, SmtpCredentials};
use crate::models::{MailLogEntry, MailStatus};
use crate::store::MailLogRepository;

/// What happened to a send attempt
#[derive(Debug, Clone, Serialize)]
pub struct DispatchReport {
    pub status: MailStatus,
    pub platform: String,
    pub recipients: usize,
    /// Transport error text when the attempt failed
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

#[derive(Clone)]
pub struct Dispatcher {
    mailer: Mailer,
    mail_log: MailLogRepository,
}

impl Dispatcher {
    pub fn new(mailer: Mailer, mail_log: MailLogRepository) -> Self {
        Self { mailer, mail_log }
    }

    /// Send `message` through `credentials` and append exactly one mail log
    /// entry. An empty recipient list is rejected before any attempt and
    /// logs nothing. Transport failures are reported in the returned report
    /// and never surface as `Err`; only store failures do.
    pub async fn send(
        &self,
        credentials: &SmtpCredentials,
        message: OutboundMessage,
    ) -> Result<DispatchReport> {
        if message.recipients.is_empty() {
            return Err(AppError::BadRequest(
                "Please provide at least one recipient email address".to_string(),
            ));
        }

        let platform = credentials.host.as_str();
        let outcome = self.mailer.send(credentials, &message).await;

        let (status, error) = match outcome {
            Ok(()) => {
                tracing::info!(
                    platform = %platform,
                    recipients = message.recipients.len(),
                    "Email sent"
                );
                (MailStatus::Sent, None)
            }
            Err(e) => {
                tracing::warn!(platform = %platform, error = %e, "Email send failed");
                (MailStatus::Failed, Some(e.to_string()))
            }
        };

        let entry: MailLogEntry = self
            .mail_log
            .record(status, platform, message.recipients)
            .await?;

        Ok(DispatchReport {
            status: entry.status,
            platform: entry.platform,
            recipients: entry.recipients.len(),
            error,
        })
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use lettre::transport::stub::AsyncStubTransport;
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::store::Store;

    fn credentials() -> SmtpCredentials {
        SmtpCredentials {
            host: "smtp.gmail.com".to_string(),
            port: 587,
            username: "sender@example.com".to_string(),
            password: "app-password".to_string(),
        }
    }

    fn message(recipients: &[&str]) -> OutboundMessage {
        OutboundMessage {
            subject: "Hello".to_string(),
            body: "Body".to_string(),
            recipients: recipients.iter().map(|r| r.to_string()).collect(),
        }
    }

    fn dispatcher(transport: Arc<AsyncStubTransport>) -> (Dispatcher, MailLogRepository) {
        let log = MailLogRepository::new(Store::memory());
        (Dispatcher::new(Mailer::Stub(transport), log.clone()), log)
    }

    #[tokio::test]
    async fn test_successful_send_logs_one_sent_entry() {
        let transport = Arc::new(AsyncStubTransport::new_ok());
        let (dispatcher, log) = dispatcher(transport.clone());
        let recipients = ["a@example.com", "b@example.com", "a@example.com"];

        let report = dispatcher
            .send(&credentials(), message(&recipients))
            .await
            .unwrap();
        assert_eq!(report.status, MailStatus::Sent);
        assert_eq!(report.recipients, 3);

        let entries = log.entries().await.unwrap();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].status, MailStatus::Sent);
        assert_eq!(entries[0].platform, "smtp.gmail.com");
        assert_eq!(
            entries[0].recipients,
            recipients.iter().map(|r| r.to_string()).collect::<Vec<_>>()
        );

        assert_eq!(transport.messages().await.len(), 1);
    }

    #[tokio::test]
    async fn test_transport_error_logs_one_failed_entry() {
        let (dispatcher, log) = dispatcher(Arc::new(AsyncStubTransport::new_error()));

        let report = dispatcher
            .send(&credentials(), message(&["a@example.com"]))
            .await
            .expect("transport errors must not propagate");
        assert_eq!(report.status, MailStatus::Failed);
        assert!(report.error.is_some());

        let entries = log.entries().await.unwrap();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].status, MailStatus::Failed);
        assert_eq!(entries[0].platform, "smtp.gmail.com");
    }

    #[tokio::test]
    async fn test_unparseable_recipient_counts_as_failed_attempt() {
        let (dispatcher, log) = dispatcher(Arc::new(AsyncStubTransport::new_ok()));

        let report = dispatcher
            .send(&credentials(), message(&["a@example.com", "nonsense"]))
            .await
            .unwrap();
        assert_eq!(report.status, MailStatus::Failed);

        let entries = log.entries().await.unwrap();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].recipients, vec!["a@example.com", "nonsense"]);
    }

    #[tokio::test]
    async fn test_empty_recipients_rejected_without_attempt() {
        let transport = Arc::new(AsyncStubTransport::new_ok());
        let (dispatcher, log) = dispatcher(transport.clone());

        let err = dispatcher
            .send(&credentials(), message(&[]))
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::BadRequest(_)));

        assert!(log.entries().await.unwrap().is_empty());
        assert!(transport.messages().await.is_empty());
    }
}
