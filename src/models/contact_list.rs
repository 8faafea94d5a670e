use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Contacts extracted from one uploaded CSV file, keyed by file name
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContactList {
    pub file_name: String,
    pub emails: Vec<String>,
    pub phone_numbers: Vec<String>,
    pub created_at: DateTime<Utc>,
}

impl ContactList {
    pub fn new(file_name: String, emails: Vec<String>, phone_numbers: Vec<String>) -> Self {
        Self {
            file_name,
            emails,
            phone_numbers,
            created_at: Utc::now(),
        }
    }
}

/// Replacement email list, entered as comma separated text in the UI
#[derive(Debug, Deserialize)]
pub struct UpdateContactListRequest {
    pub emails: String,
}
