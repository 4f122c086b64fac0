//! Template persistence seam.

use async_trait::async_trait;

use super::{NewTemplate, Template};

/// Template store error.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Template not found: {0}")]
    NotFound(String),
}

/// Template store trait.
///
/// Templates are never deleted; deactivation and attaching a preview are the
/// only changes after creation.
#[async_trait]
pub trait TemplateStore: Send + Sync {
    /// Persist a new template and return it with its id assigned.
    async fn create(&self, new: NewTemplate) -> Result<Template, StoreError>;

    /// Load a template by id.
    async fn get(&self, id: &str) -> Result<Option<Template>, StoreError>;

    /// All templates, oldest first.
    async fn list(&self) -> Result<Vec<Template>, StoreError>;

    /// Mark a template inactive.
    async fn deactivate(&self, id: &str) -> Result<Template, StoreError>;

    /// Store the preview image on an existing template.
    async fn attach_preview(&self, id: &str, image: String) -> Result<Template, StoreError>;
}

pub(super) fn sort_oldest_first(templates: &mut [Template]) {
    templates.sort_by(|a, b| {
        a.created_at
            .cmp(&b.created_at)
            .then_with(|| a.id.cmp(&b.id))
    });
}
