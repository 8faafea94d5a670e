use crate::error::{AppError, Result};
use crate::models::Template;

use super::{decode, decode_all, encode, Store};

const TEMPLATES_KEY: &str = "templates";

#[derive(Clone)]
pub struct TemplateRepository {
    store: Store,
}

impl TemplateRepository {
    pub fn new(store: Store) -> Self {
        Self { store }
    }

    pub async fn create_template(&self, template: &Template) -> Result<()> {
        self.store
            .hash_set(TEMPLATES_KEY, &template.id, &encode(template)?)
            .await?;

        tracing::info!(template_id = %template.id, name = %template.name, "Template created");
        Ok(())
    }

    pub async fn get_template(&self, template_id: &str) -> Result<Option<Template>> {
        match self.store.hash_get(TEMPLATES_KEY, template_id).await? {
            Some(json) => Ok(Some(decode(&json)?)),
            None => Ok(None),
        }
    }

    pub async fn list_templates(&self) -> Result<Vec<Template>> {
        let mut templates: Vec<Template> =
            decode_all(self.store.hash_values(TEMPLATES_KEY).await?)?;
        templates.sort_by(|a, b| a.created_at.cmp(&b.created_at));
        Ok(templates)
    }

    pub async fn update_template(
        &self,
        template_id: &str,
        name: String,
        subject: String,
        body: String,
    ) -> Result<Template> {
        let mut template = self
            .get_template(template_id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Template {} not found", template_id)))?;

        template.name = name;
        template.subject = subject;
        template.body = body;
        self.store
            .hash_set(TEMPLATES_KEY, template_id, &encode(&template)?)
            .await?;

        tracing::info!(template_id = %template_id, "Template updated");
        Ok(template)
    }

    pub async fn delete_template(&self, template_id: &str) -> Result<bool> {
        let removed = self.store.hash_del(TEMPLATES_KEY, template_id).await?;
        if removed {
            tracing::info!(template_id = %template_id, "Template deleted");
        }
        Ok(removed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_duplicate_names_allowed() {
        let repo = TemplateRepository::new(Store::memory());
        let a = Template::new("Promo".to_string(), "Hi".to_string(), "one".to_string());
        let b = Template::new("Promo".to_string(), "Hi".to_string(), "two".to_string());
        repo.create_template(&a).await.unwrap();
        repo.create_template(&b).await.unwrap();

        assert_eq!(repo.list_templates().await.unwrap().len(), 2);
    }

    #[tokio::test]
    async fn test_update_and_delete() {
        let repo = TemplateRepository::new(Store::memory());
        let t = Template::new("Promo".to_string(), "Hi".to_string(), "body".to_string());
        repo.create_template(&t).await.unwrap();

        let updated = repo
            .update_template(&t.id, "Promo 2".to_string(), "Hello".to_string(), "new".to_string())
            .await
            .unwrap();
        assert_eq!(updated.subject, "Hello");
        assert_eq!(updated.created_at, t.created_at);

        assert!(repo.delete_template(&t.id).await.unwrap());
        assert!(repo.get_template(&t.id).await.unwrap().is_none());

        let err = repo
            .update_template(&t.id, "x".to_string(), String::new(), String::new())
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::NotFound(_)));
    }
}
