use chrono::{DateTime, Utc};

use crate::error::{AppError, Result};
use crate::models::Group;

use super::{decode, decode_all, encode, Store};

fn groups_key(owner: &str) -> String {
    format!("groups:{}", owner)
}

fn names_key(owner: &str) -> String {
    format!("groups:{}:names", owner)
}

/// Group repository. Groups are scoped to their creator and names are unique
/// (case-insensitively) within that scope.
#[derive(Clone)]
pub struct GroupRepository {
    store: Store,
}

impl GroupRepository {
    pub fn new(store: Store) -> Self {
        Self { store }
    }

    /// Create a group, reserving its name first
    pub async fn create_group(&self, group: &Group) -> Result<()> {
        let names = names_key(&group.created_by);
        let name_key = Group::name_key(&group.name);

        if !self.store.hash_set_nx(&names, &name_key, &group.id).await? {
            return Err(AppError::Conflict(format!(
                "Group name '{}' already exists",
                group.name
            )));
        }

        let json = encode(group)?;
        if let Err(e) = self
            .store
            .hash_set(&groups_key(&group.created_by), &group.id, &json)
            .await
        {
            self.store.hash_del(&names, &name_key).await.ok();
            return Err(e);
        }

        tracing::info!(group_id = %group.id, name = %group.name, "Group created");
        Ok(())
    }

    pub async fn get_group(&self, owner: &str, group_id: &str) -> Result<Option<Group>> {
        match self.store.hash_get(&groups_key(owner), group_id).await? {
            Some(json) => Ok(Some(decode(&json)?)),
            None => Ok(None),
        }
    }

    /// List the owner's groups, oldest first, optionally filtered by a
    /// case-insensitive substring of the name.
    pub async fn list_groups(&self, owner: &str, search: Option<&str>) -> Result<Vec<Group>> {
        let mut groups: Vec<Group> = decode_all(self.store.hash_values(&groups_key(owner)).await?)?;

        if let Some(term) = search.map(str::trim).filter(|t| !t.is_empty()) {
            let term = term.to_lowercase();
            groups.retain(|g| g.name.to_lowercase().contains(&term));
        }

        groups.sort_by(|a, b| a.created_at.cmp(&b.created_at));
        Ok(groups)
    }

    /// Replace a group's name and full recipient list
    pub async fn update_group(
        &self,
        owner: &str,
        group_id: &str,
        name: String,
        emails: Vec<String>,
    ) -> Result<Group> {
        let mut group = self
            .get_group(owner, group_id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Group {} not found", group_id)))?;

        let names = names_key(owner);
        let old_key = Group::name_key(&group.name);
        let new_key = Group::name_key(&name);

        let renamed = old_key != new_key;
        if renamed && !self.store.hash_set_nx(&names, &new_key, group_id).await? {
            return Err(AppError::Conflict(format!(
                "Group name '{}' already exists",
                name
            )));
        }

        group.name = name;
        group.emails = emails;

        // The old name stays reserved until the document carries the new one.
        let written = match encode(&group) {
            Ok(json) => self.store.hash_set(&groups_key(owner), group_id, &json).await,
            Err(e) => Err(e),
        };
        if let Err(e) = written {
            if renamed {
                self.store.hash_del(&names, &new_key).await.ok();
            }
            return Err(e);
        }

        if renamed {
            self.store.hash_del(&names, &old_key).await?;
        }

        tracing::info!(group_id = %group_id, name = %group.name, "Group updated");
        Ok(group)
    }

    /// Stamp the time a send using this group was attempted
    pub async fn mark_sent(&self, owner: &str, group_id: &str, at: DateTime<Utc>) -> Result<()> {
        if let Some(mut group) = self.get_group(owner, group_id).await? {
            group.last_sent = Some(at);
            self.store
                .hash_set(&groups_key(owner), group_id, &encode(&group)?)
                .await?;
        }
        Ok(())
    }

    /// Delete a group. Deleting a missing group is not an error.
    pub async fn delete_group(&self, owner: &str, group_id: &str) -> Result<bool> {
        let group = match self.get_group(owner, group_id).await? {
            Some(g) => g,
            None => return Ok(false),
        };

        self.store.hash_del(&groups_key(owner), group_id).await?;

        let names = names_key(owner);
        let name_key = Group::name_key(&group.name);
        if self.store.hash_get(&names, &name_key).await?.as_deref() == Some(group_id) {
            self.store.hash_del(&names, &name_key).await?;
        }

        tracing::info!(group_id = %group_id, "Group deleted");
        Ok(true)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn repo() -> GroupRepository {
        GroupRepository::new(Store::memory())
    }

    fn emails(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[tokio::test]
    async fn test_create_list_delete() {
        let repo = repo();
        let group = Group::new("Team".to_string(), emails(&["a", "b", "c"]), "owner".to_string());
        repo.create_group(&group).await.unwrap();

        let listed = repo.list_groups("owner", None).await.unwrap();
        assert_eq!(listed, vec![group.clone()]);

        assert!(repo.delete_group("owner", &group.id).await.unwrap());
        let listed = repo.list_groups("owner", None).await.unwrap();
        assert!(listed.iter().all(|g| g.id != group.id));

        // second delete is a no-op
        assert!(!repo.delete_group("owner", &group.id).await.unwrap());
    }

    #[tokio::test]
    async fn test_duplicate_name_rejected_case_insensitively() {
        let repo = repo();
        let first = Group::new("Team".to_string(), emails(&["a"]), "owner".to_string());
        repo.create_group(&first).await.unwrap();

        let dup = Group::new(" team ".to_string(), emails(&["b"]), "owner".to_string());
        let err = repo.create_group(&dup).await.unwrap_err();
        assert!(matches!(err, AppError::Conflict(_)));

        // another owner may reuse the name
        let other = Group::new("Team".to_string(), emails(&["c"]), "someone".to_string());
        repo.create_group(&other).await.unwrap();

        assert_eq!(repo.list_groups("owner", None).await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_name_is_reusable_after_delete() {
        let repo = repo();
        let group = Group::new("Team".to_string(), emails(&["a"]), "owner".to_string());
        repo.create_group(&group).await.unwrap();
        repo.delete_group("owner", &group.id).await.unwrap();

        let again = Group::new("Team".to_string(), emails(&["b"]), "owner".to_string());
        repo.create_group(&again).await.unwrap();
    }

    #[tokio::test]
    async fn test_search_filters_by_substring() {
        let repo = repo();
        for name in ["Marketing", "Sales", "market research"] {
            let group = Group::new(name.to_string(), emails(&["a"]), "owner".to_string());
            repo.create_group(&group).await.unwrap();
        }

        let mut names: Vec<String> = repo
            .list_groups("owner", Some("MARKET"))
            .await
            .unwrap()
            .into_iter()
            .map(|g| g.name)
            .collect();
        names.sort();
        assert_eq!(names, vec!["Marketing", "market research"]);
    }

    #[tokio::test]
    async fn test_update_replaces_name_and_emails() {
        let repo = repo();
        let group = Group::new("Old".to_string(), emails(&["a", "b"]), "owner".to_string());
        repo.create_group(&group).await.unwrap();

        let updated = repo
            .update_group("owner", &group.id, "New".to_string(), emails(&["c"]))
            .await
            .unwrap();
        assert_eq!(updated.name, "New");
        assert_eq!(updated.emails, emails(&["c"]));

        // the old name is released
        let reuse = Group::new("Old".to_string(), emails(&["d"]), "owner".to_string());
        repo.create_group(&reuse).await.unwrap();
    }

    #[tokio::test]
    async fn test_rename_moves_name_reservation_with_document() {
        let repo = repo();
        let group = Group::new("Old".to_string(), emails(&["a"]), "owner".to_string());
        repo.create_group(&group).await.unwrap();
        repo.update_group("owner", &group.id, "New".to_string(), emails(&["a"]))
            .await
            .unwrap();

        let names = repo.store.hash_values(&names_key("owner")).await.unwrap();
        assert_eq!(names, vec![group.id.clone()]);
        assert_eq!(
            repo.store.hash_get(&names_key("owner"), "new").await.unwrap(),
            Some(group.id.clone())
        );

        let dup = Group::new("NEW".to_string(), emails(&["b"]), "owner".to_string());
        assert!(matches!(
            repo.create_group(&dup).await.unwrap_err(),
            AppError::Conflict(_)
        ));

        // deleting the renamed group frees the new name
        repo.delete_group("owner", &group.id).await.unwrap();
        let again = Group::new("new".to_string(), emails(&["c"]), "owner".to_string());
        repo.create_group(&again).await.unwrap();
    }

    #[tokio::test]
    async fn test_update_rejects_taken_name_and_missing_group() {
        let repo = repo();
        let a = Group::new("A".to_string(), emails(&["a"]), "owner".to_string());
        let b = Group::new("B".to_string(), emails(&["b"]), "owner".to_string());
        repo.create_group(&a).await.unwrap();
        repo.create_group(&b).await.unwrap();

        let err = repo
            .update_group("owner", &b.id, "a".to_string(), emails(&["x"]))
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::Conflict(_)));
        assert_eq!(repo.get_group("owner", &b.id).await.unwrap(), Some(b));

        let err = repo
            .update_group("owner", "missing", "Z".to_string(), emails(&["x"]))
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::NotFound(_)));
    }
}
