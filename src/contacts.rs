//! CSV contact import.

use crate::error::{AppError, Result};

const EMAIL_COLUMN: &str = "Email";
const PHONE_COLUMN: &str = "Phone";

/// Values pulled from the `Email` and `Phone` columns of an upload
#[derive(Debug, Default, PartialEq)]
pub struct ExtractedContacts {
    pub emails: Vec<String>,
    pub phone_numbers: Vec<String>,
}

/// Read the `Email` and `Phone` columns of a CSV upload. Other columns are
/// ignored and blank cells are dropped. Fails when the file has neither
/// column or yields no values at all.
pub fn extract_contacts(data: &[u8]) -> Result<ExtractedContacts> {
    let mut reader = csv::ReaderBuilder::new()
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(data);

    let headers = reader.headers()?.clone();
    let email_idx = headers.iter().position(|h| h == EMAIL_COLUMN);
    let phone_idx = headers.iter().position(|h| h == PHONE_COLUMN);

    if email_idx.is_none() && phone_idx.is_none() {
        return Err(AppError::BadRequest(
            "CSV must have an Email or Phone column".to_string(),
        ));
    }

    let mut contacts = ExtractedContacts::default();
    for record in reader.records() {
        let record = record?;
        let cell = |idx: Option<usize>| {
            idx.and_then(|i| record.get(i))
                .filter(|v| !v.is_empty())
                .map(str::to_string)
        };

        if let Some(email) = cell(email_idx) {
            contacts.emails.push(email);
        }
        if let Some(phone) = cell(phone_idx) {
            contacts.phone_numbers.push(phone);
        }
    }

    if contacts.emails.is_empty() && contacts.phone_numbers.is_empty() {
        return Err(AppError::BadRequest(
            "No emails or phone numbers found in the uploaded CSV file".to_string(),
        ));
    }

    Ok(contacts)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_extracts_both_columns_and_drops_blanks() {
        let data = b"Name,Email,Phone\nAnn,ann@example.com,555-0101\nBob,,555-0102\nCid, cid@example.com ,\n";
        let contacts = extract_contacts(data).unwrap();

        assert_eq!(
            contacts,
            ExtractedContacts {
                emails: vec!["ann@example.com".to_string(), "cid@example.com".to_string()],
                phone_numbers: vec!["555-0101".to_string(), "555-0102".to_string()],
            }
        );
    }

    #[test]
    fn test_email_only_file() {
        let contacts = extract_contacts(b"Email\na@example.com\nb@example.com\n").unwrap();
        assert_eq!(contacts.emails.len(), 2);
        assert!(contacts.phone_numbers.is_empty());
    }

    #[test]
    fn test_short_rows_are_tolerated() {
        let contacts = extract_contacts(b"Phone,Email\n555-0101\n").unwrap();
        assert_eq!(contacts.phone_numbers, vec!["555-0101".to_string()]);
        assert!(contacts.emails.is_empty());
    }

    #[test]
    fn test_missing_columns_rejected() {
        let err = extract_contacts(b"Name,Company\nAnn,Acme\n").unwrap_err();
        assert!(matches!(err, AppError::BadRequest(_)));
    }

    #[test]
    fn test_no_values_rejected() {
        let err = extract_contacts(b"Email,Phone\n,\n").unwrap_err();
        assert!(matches!(err, AppError::BadRequest(_)));
    }
}
