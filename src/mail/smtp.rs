use lettre::message::header::ContentType;
use lettre::message::Mailbox;
use lettre::transport::smtp::authentication::Credentials;
use lettre::{AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor};

use super::{MailError, OutboundMessage, SmtpCredentials};

/// Build the message: one To header listing every recipient, plain-text body.
pub fn build_message(from: &str, message: &OutboundMessage) -> Result<Message, MailError> {
    let mut builder = Message::builder()
        .from(from.parse::<Mailbox>()?)
        .subject(message.subject.as_str())
        .header(ContentType::TEXT_PLAIN);

    for recipient in &message.recipients {
        builder = builder.to(recipient.parse::<Mailbox>()?);
    }

    Ok(builder.body(message.body.clone())?)
}

/// Connect with STARTTLS, authenticate, submit and drop the connection.
pub async fn submit(credentials: &SmtpCredentials, email: Message) -> Result<(), MailError> {
    let creds = Credentials::new(credentials.username.clone(), credentials.password.clone());

    let mailer = AsyncSmtpTransport::<Tokio1Executor>::starttls_relay(&credentials.host)?
        .port(credentials.port)
        .credentials(creds)
        .build();

    mailer.send(email).await?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn outbound(recipients: &[&str]) -> OutboundMessage {
        OutboundMessage {
            subject: "Launch".to_string(),
            body: "We are live.".to_string(),
            recipients: recipients.iter().map(|r| r.to_string()).collect(),
        }
    }

    #[test]
    fn test_all_recipients_share_one_to_header() {
        let message = build_message(
            "sender@example.com",
            &outbound(&["a@example.com", "b@example.com"]),
        )
        .unwrap();

        let envelope = message.envelope();
        assert_eq!(envelope.to().len(), 2);

        let raw = String::from_utf8(message.formatted()).unwrap();
        let to_lines: Vec<&str> = raw.lines().filter(|l| l.starts_with("To: ")).collect();
        assert_eq!(to_lines.len(), 1);
        assert!(to_lines[0].contains("a@example.com"));
        assert!(to_lines[0].contains("b@example.com"));
        assert!(raw.contains("Content-Type: text/plain"));
    }

    #[test]
    fn test_malformed_recipient_is_an_error() {
        let result = build_message("sender@example.com", &outbound(&["not an address"]));
        assert!(matches!(result, Err(MailError::Address(_))));
    }
}
