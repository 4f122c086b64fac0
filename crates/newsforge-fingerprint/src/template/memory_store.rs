//! In-memory template store.

use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::RwLock;

use super::store::sort_oldest_first;
use super::{NewTemplate, StoreError, Template, TemplateStore};

/// In-memory template store.
pub struct MemoryTemplateStore {
    templates: RwLock<HashMap<String, Template>>,
}

impl MemoryTemplateStore {
    pub fn new() -> Self {
        Self {
            templates: RwLock::new(HashMap::new()),
        }
    }

    async fn update<F>(&self, id: &str, f: F) -> Result<Template, StoreError>
    where
        F: FnOnce(&mut Template) + Send,
    {
        let mut templates = self.templates.write().await;
        let template = templates
            .get_mut(id)
            .ok_or_else(|| StoreError::NotFound(id.to_string()))?;
        f(template);
        Ok(template.clone())
    }
}

impl Default for MemoryTemplateStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl TemplateStore for MemoryTemplateStore {
    async fn create(&self, new: NewTemplate) -> Result<Template, StoreError> {
        let template = Template::create(new);
        self.templates
            .write()
            .await
            .insert(template.id.clone(), template.clone());
        Ok(template)
    }

    async fn get(&self, id: &str) -> Result<Option<Template>, StoreError> {
        Ok(self.templates.read().await.get(id).cloned())
    }

    async fn list(&self) -> Result<Vec<Template>, StoreError> {
        let mut templates: Vec<Template> = self.templates.read().await.values().cloned().collect();
        sort_oldest_first(&mut templates);
        Ok(templates)
    }

    async fn deactivate(&self, id: &str) -> Result<Template, StoreError> {
        self.update(id, Template::deactivate).await
    }

    async fn attach_preview(&self, id: &str, image: String) -> Result<Template, StoreError> {
        self.update(id, move |t| t.attach_preview(image)).await
    }
}
