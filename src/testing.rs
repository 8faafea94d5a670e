//! Fixtures shared by unit tests.

use std::sync::Arc;

use lettre::transport::stub::AsyncStubTransport;

use crate::config::{Config, MailTransportKind, SmtpSettings, StoreBackend};
use crate::mail::Mailer;
use crate::state::AppState;
use crate::store::Store;

pub fn test_config() -> Config {
    Config {
        server_host: "localhost".to_string(),
        server_port: 8080,
        store_backend: StoreBackend::Memory,
        redis_url: "redis://localhost".to_string(),
        jwt_secret: "test-secret-key".to_string(),
        jwt_expiry_seconds: 900,
        password_hash_cost: 4,
        mail_transport: MailTransportKind::Stub,
        gmail: SmtpSettings {
            host: "smtp.gmail.com".to_string(),
            port: 587,
            username: Some("sender@example.com".to_string()),
            password: Some("app-password".to_string()),
        },
        outlook: SmtpSettings {
            host: "smtp.office365.com".to_string(),
            port: 587,
            username: None,
            password: None,
        },
    }
}

/// State on the in-memory store with a stub transport answering `transport`
pub fn test_state(transport: Arc<AsyncStubTransport>) -> AppState {
    AppState::new(test_config(), Store::memory(), Mailer::Stub(transport))
}
