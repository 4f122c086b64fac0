//! Extraction-to-template service.

use std::sync::Arc;

use tracing::info;

use crate::error::ExtractError;
use crate::extractor::Extractor;
use crate::synthesizer::synthesize;

use super::{NewTemplate, StoreError, Template, TemplateStore, EXTRACTION_METHOD};

/// Template service error.
#[derive(Debug, thiserror::Error)]
pub enum ServiceError {
    #[error("Template name must not be empty")]
    EmptyName,

    #[error(transparent)]
    Extract(#[from] ExtractError),

    #[error(transparent)]
    Store(#[from] StoreError),
}

/// Turns source pages into stored templates.
pub struct TemplateService {
    extractor: Arc<Extractor>,
    store: Arc<dyn TemplateStore>,
}

impl TemplateService {
    pub fn new(extractor: Arc<Extractor>, store: Arc<dyn TemplateStore>) -> Self {
        Self { extractor, store }
    }

    /// Extract `url`, synthesize CSS from its fingerprint and store the result
    /// as a new active template with the preview attached.
    pub async fn extract_template(
        &self,
        url: &str,
        name: &str,
        brand_id: Option<&str>,
    ) -> Result<Template, ServiceError> {
        let name = name.trim();
        if name.is_empty() {
            return Err(ServiceError::EmptyName);
        }

        let extracted = self.extractor.extract(url).await?;
        let css_styles = synthesize(&extracted.layout_metadata);

        let template = self
            .store
            .create(NewTemplate {
                name: name.to_string(),
                brand_id: brand_id.map(str::to_string),
                css_styles,
                html_structure: extracted.html_structure,
                has_sidebar: extracted.has_sidebar,
                layout_metadata: extracted.layout_metadata,
                source_url: url.trim().to_string(),
                extraction_method: EXTRACTION_METHOD.to_string(),
            })
            .await?;

        let template = if extracted.preview_image.is_empty() {
            template
        } else {
            self.store
                .attach_preview(&template.id, extracted.preview_image)
                .await?
        };

        info!("Created template {} ({}) from {}", template.id, template.name, url);
        Ok(template)
    }

    pub async fn get(&self, id: &str) -> Result<Option<Template>, ServiceError> {
        Ok(self.store.get(id).await?)
    }

    /// Stored templates, optionally only the active ones.
    pub async fn list(&self, active_only: bool) -> Result<Vec<Template>, ServiceError> {
        let mut templates = self.store.list().await?;
        if active_only {
            templates.retain(|t| t.is_active);
        }
        Ok(templates)
    }

    pub async fn deactivate(&self, id: &str) -> Result<Template, ServiceError> {
        let template = self.store.deactivate(id).await?;
        info!("Deactivated template {}", id);
        Ok(template)
    }
}
