use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Saved subject/body pair. Names are not unique.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Template {
    pub id: String,
    pub name: String,
    pub subject: String,
    pub body: String,
    pub created_at: DateTime<Utc>,
}

impl Template {
    pub fn new(name: String, subject: String, body: String) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            name,
            subject,
            body,
            created_at: Utc::now(),
        }
    }
}

/// Create or update a template
#[derive(Debug, Deserialize)]
pub struct SaveTemplateRequest {
    pub name: String,
    #[serde(default)]
    pub subject: String,
    #[serde(default)]
    pub body: String,
}
