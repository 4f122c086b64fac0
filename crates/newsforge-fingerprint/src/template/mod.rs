//! Persisted templates and the extraction-to-template service.

mod file_store;
mod memory_store;
mod model;
mod render;
mod service;
mod store;

pub use file_store::FileTemplateStore;
pub use memory_store::MemoryTemplateStore;
pub use model::{NewTemplate, Template, EXTRACTION_METHOD};
pub use service::{ServiceError, TemplateService};
pub use store::{StoreError, TemplateStore};


#[cfg(test)]
#[path = "service_tests.rs"]
mod service_tests;
