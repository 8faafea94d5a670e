//! Builds the recipient list for a send from the compose form inputs.

use crate::models::{ContactList, Group};

/// Split comma separated addresses, trimming whitespace and dropping empty
/// tokens. No format validation is applied.
pub fn split_addresses(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|token| !token.is_empty())
        .map(str::to_string)
        .collect()
}

/// Merge recipients in order: the group's emails, then manual entries, then
/// the contact list's emails. Duplicates are kept.
pub fn resolve(group: Option<&Group>, manual: &str, contacts: Option<&ContactList>) -> Vec<String> {
    let mut recipients = group.map(|g| g.emails.clone()).unwrap_or_default();
    recipients.extend(split_addresses(manual));
    if let Some(list) = contacts {
        recipients.extend(list.emails.iter().cloned());
    }
    recipients
}
