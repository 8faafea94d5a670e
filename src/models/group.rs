use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Named recipient list owned by one user
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Group {
    pub id: String,
    pub name: String,
    pub emails: Vec<String>,
    pub created_by: String,
    pub created_at: DateTime<Utc>,
    pub last_sent: Option<DateTime<Utc>>,
}

impl Group {
    pub fn new(name: String, emails: Vec<String>, created_by: String) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            name,
            emails,
            created_by,
            created_at: Utc::now(),
            last_sent: None,
        }
    }

    /// Key used to enforce name uniqueness within the owner's groups.
    pub fn name_key(name: &str) -> String {
        name.trim().to_lowercase()
    }
}

/// Request to create a group
#[derive(Debug, Deserialize)]
pub struct CreateGroupRequest {
    pub name: String,
    pub emails: Vec<String>,
}

/// Full replacement of a group's name and recipients
pub type UpdateGroupRequest = CreateGroupRequest;

#[derive(Debug, Default, Deserialize)]
pub struct GroupQuery {
    pub search: Option<String>,
}
