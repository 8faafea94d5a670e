use crate::error::{AppError, Result};
use crate::models::ContactList;

use super::{decode, decode_all, encode, Store};

const CONTACT_LISTS_KEY: &str = "contact_lists";

/// Repository for imported CSV contact lists, keyed by file name
#[derive(Clone)]
pub struct ContactListRepository {
    store: Store,
}

impl ContactListRepository {
    pub fn new(store: Store) -> Self {
        Self { store }
    }

    /// Store a new import. A file name that was already imported is rejected
    /// and the existing record is left untouched.
    pub async fn create_contact_list(&self, list: &ContactList) -> Result<()> {
        let json = encode(list)?;

        if !self
            .store
            .hash_set_nx(CONTACT_LISTS_KEY, &list.file_name, &json)
            .await?
        {
            return Err(AppError::Conflict(format!(
                "The file '{}' already exists",
                list.file_name
            )));
        }

        tracing::info!(
            file_name = %list.file_name,
            emails = list.emails.len(),
            phone_numbers = list.phone_numbers.len(),
            "Contact list imported"
        );
        Ok(())
    }

    pub async fn get_contact_list(&self, file_name: &str) -> Result<Option<ContactList>> {
        match self.store.hash_get(CONTACT_LISTS_KEY, file_name).await? {
            Some(json) => Ok(Some(decode(&json)?)),
            None => Ok(None),
        }
    }

    /// All imports, oldest first
    pub async fn list_contact_lists(&self) -> Result<Vec<ContactList>> {
        let mut lists: Vec<ContactList> =
            decode_all(self.store.hash_values(CONTACT_LISTS_KEY).await?)?;
        lists.sort_by(|a, b| a.created_at.cmp(&b.created_at));
        Ok(lists)
    }

    /// Replace the stored email list of an import
    pub async fn update_emails(&self, file_name: &str, emails: Vec<String>) -> Result<ContactList> {
        let mut list = self
            .get_contact_list(file_name)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Contact list '{}' not found", file_name)))?;

        list.emails = emails;
        self.store
            .hash_set(CONTACT_LISTS_KEY, file_name, &encode(&list)?)
            .await?;

        tracing::info!(file_name = %file_name, emails = list.emails.len(), "Contact list updated");
        Ok(list)
    }

    /// Delete an import. Deleting a missing file is not an error.
    pub async fn delete_contact_list(&self, file_name: &str) -> Result<bool> {
        let removed = self.store.hash_del(CONTACT_LISTS_KEY, file_name).await?;
        if removed {
            tracing::info!(file_name = %file_name, "Contact list deleted");
        }
        Ok(removed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[tokio::test]
    async fn test_second_upload_with_same_name_is_rejected() {
        let repo = ContactListRepository::new(Store::memory());
        let first = ContactList::new(
            "leads.csv".to_string(),
            vec!["a@example.com".to_string()],
            vec!["555-0100".to_string()],
        );
        repo.create_contact_list(&first).await.unwrap();

        let second = ContactList::new(
            "leads.csv".to_string(),
            vec!["z@example.com".to_string()],
            vec![],
        );
        let err = repo.create_contact_list(&second).await.unwrap_err();
        assert!(matches!(err, AppError::Conflict(_)));

        let stored = repo.get_contact_list("leads.csv").await.unwrap();
        assert_eq!(stored, Some(first));
    }

    #[tokio::test]
    async fn test_update_emails_keeps_phone_numbers() {
        let repo = ContactListRepository::new(Store::memory());
        let list = ContactList::new(
            "leads.csv".to_string(),
            vec!["a@example.com".to_string()],
            vec!["555-0100".to_string()],
        );
        repo.create_contact_list(&list).await.unwrap();

        let updated = repo
            .update_emails("leads.csv", vec!["b@example.com".to_string()])
            .await
            .unwrap();
        assert_eq!(updated.emails, vec!["b@example.com".to_string()]);
        assert_eq!(updated.phone_numbers, vec!["555-0100".to_string()]);
    }

    #[tokio::test]
    async fn test_update_missing_list_propagates() {
        let repo = ContactListRepository::new(Store::memory());
        let err = repo.update_emails("nope.csv", vec![]).await.unwrap_err();
        assert!(matches!(err, AppError::NotFound(_)));
    }

    #[tokio::test]
    async fn test_delete_is_idempotent() {
        let repo = ContactListRepository::new(Store::memory());
        let list = ContactList::new("x.csv".to_string(), vec!["a".to_string()], vec![]);
        repo.create_contact_list(&list).await.unwrap();

        assert!(repo.delete_contact_list("x.csv").await.unwrap());
        assert!(!repo.delete_contact_list("x.csv").await.unwrap());
        assert!(repo.list_contact_lists().await.unwrap().is_empty());
    }
}
