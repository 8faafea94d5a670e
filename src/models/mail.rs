use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::config::Platform;

/// Outcome recorded for one send attempt
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MailStatus {
    Sent,
    Failed,
    Spam,
}

impl std::fmt::Display for MailStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            MailStatus::Sent => "sent",
            MailStatus::Failed => "failed",
            MailStatus::Spam => "spam",
        };
        f.write_str(s)
    }
}

/// Immutable mail log record
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MailLogEntry {
    pub status: MailStatus,
    /// SMTP host the attempt went through
    pub platform: String,
    pub timestamp: DateTime<Utc>,
    pub recipients: Vec<String>,
}

#[derive(Debug, Default, Deserialize)]
pub struct MailQuery {
    pub platform: Option<Platform>,
    pub status: Option<MailStatus>,
}

#[derive(Debug, Default, Deserialize)]
pub struct PlatformQuery {
    pub platform: Option<Platform>,
    pub days: Option<u32>,
}

/// Compose form submission
#[derive(Debug, Default, Deserialize)]
pub struct SendMailRequest {
    /// Falls back to the service chosen in the session
    pub platform: Option<Platform>,
    /// Saved template filling in an empty subject or body
    pub template_id: Option<String>,
    #[serde(default)]
    pub subject: String,
    #[serde(default)]
    pub body: String,
    pub group_id: Option<String>,
    /// Comma separated addresses typed by the user
    #[serde(default)]
    pub manual_recipients: String,
    /// File name of an imported contact list
    pub contact_list: Option<String>,
}
