//! File-based template store: one pretty-printed JSON file per template.

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use tokio::sync::Mutex;
use tracing::{debug, warn};

use super::store::sort_oldest_first;
use super::{NewTemplate, StoreError, Template, TemplateStore};

/// File-based template store.
pub struct FileTemplateStore {
    directory: PathBuf,
    // Serializes read-modify-write updates.
    write_lock: Mutex<()>,
}

impl FileTemplateStore {
    pub fn new(directory: PathBuf) -> Self {
        Self {
            directory,
            write_lock: Mutex::new(()),
        }
    }

    pub fn directory(&self) -> &Path {
        &self.directory
    }

    /// `None` for ids that are not UUIDs, so an id can never name a path
    /// outside the store directory.
    pub(crate) fn template_path(&self, id: &str) -> Option<PathBuf> {
        uuid::Uuid::parse_str(id)
            .ok()
            .map(|uuid| self.directory.join(format!("{}.json", uuid)))
    }

    async fn write(&self, template: &Template) -> Result<(), StoreError> {
        tokio::fs::create_dir_all(&self.directory).await?;

        let path = self
            .template_path(&template.id)
            .ok_or_else(|| StoreError::NotFound(template.id.clone()))?;
        let json = serde_json::to_string_pretty(template)?;
        tokio::fs::write(&path, json).await?;
        debug!("Saved template {} to {:?}", template.id, path);
        Ok(())
    }

    async fn read(&self, path: &Path) -> Result<Template, StoreError> {
        let json = tokio::fs::read_to_string(path).await?;
        Ok(serde_json::from_str(&json)?)
    }

    async fn update<F>(&self, id: &str, f: F) -> Result<Template, StoreError>
    where
        F: FnOnce(&mut Template) + Send,
    {
        let _guard = self.write_lock.lock().await;
        let mut template = self
            .get(id)
            .await?
            .ok_or_else(|| StoreError::NotFound(id.to_string()))?;
        f(&mut template);
        self.write(&template).await?;
        Ok(template)
    }
}

#[async_trait]
impl TemplateStore for FileTemplateStore {
    async fn create(&self, new: NewTemplate) -> Result<Template, StoreError> {
        let template = Template::create(new);
        self.write(&template).await?;
        Ok(template)
    }

    async fn get(&self, id: &str) -> Result<Option<Template>, StoreError> {
        let Some(path) = self.template_path(id) else {
            return Ok(None);
        };
        if !path.exists() {
            return Ok(None);
        }
        Ok(Some(self.read(&path).await?))
    }

    async fn list(&self) -> Result<Vec<Template>, StoreError> {
        if !self.directory.exists() {
            return Ok(Vec::new());
        }

        let mut templates = Vec::new();
        let mut entries = tokio::fs::read_dir(&self.directory).await?;

        while let Some(entry) = entries.next_entry().await? {
            let path = entry.path();
            if path.extension().and_then(|e| e.to_str()) != Some("json") {
                continue;
            }
            match self.read(&path).await {
                Ok(template) => templates.push(template),
                Err(e) => warn!("Skipping unreadable template file {:?}: {}", path, e),
            }
        }

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
