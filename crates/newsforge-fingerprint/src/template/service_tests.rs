use std::sync::Arc;

use super::*;
use crate::error::ExtractError;
use crate::extractor::{Extractor, ExtractorConfig};
use crate::test_support::{FakePage, FakeProvider, Navigation};

fn service(page: FakePage) -> (TemplateService, Arc<FakeProvider>) {
    let provider = Arc::new(FakeProvider::new(page));
    let extractor = Arc::new(Extractor::new(provider.clone(), ExtractorConfig::default()));
    let store = Arc::new(MemoryTemplateStore::new());
    (TemplateService::new(extractor, store), provider)
}

#[tokio::test]
async fn test_extract_template_persists_synthesized_css() {
    let (service, provider) = service(FakePage::grid_article());

    let template = service
        .extract_template("https://news.example.com/story", "Daily Grid", Some("brand-7"))
        .await
        .unwrap();

    assert_eq!(template.name, "Daily Grid");
    assert_eq!(template.brand_id.as_deref(), Some("brand-7"));
    assert_eq!(template.source_url, "https://news.example.com/story");
    assert_eq!(template.extraction_method, "automated-browser");
    assert!(template.is_active);
    assert!(template.has_sidebar);
    assert!(template.css_styles.contains("grid-template-columns: repeat(2, 1fr)"));
    assert!(!template.css_styles.contains("aside.sidebar"));
    assert!(template
        .preview_image
        .as_deref()
        .unwrap()
        .starts_with("data:image/png;base64,"));

    let stored = service.get(&template.id).await.unwrap().unwrap();
    assert_eq!(stored, template);
    assert_eq!(provider.counters.closed(), 1);
}

#[tokio::test]
async fn test_extract_template_failure_stores_nothing() {
    let page = FakePage {
        navigation: Navigation::Timeout,
        ..FakePage::grid_article()
    };
    let (service, provider) = service(page);

    let err = service
        .extract_template("https://slow.example.com/", "Slow", None)
        .await
        .unwrap_err();

    assert!(matches!(err, ServiceError::Extract(ExtractError::ExtractionFailed(_))));
    assert!(service.list(false).await.unwrap().is_empty());
    assert_eq!(provider.counters.closed(), 1);
}

#[tokio::test]
async fn test_extract_template_requires_name() {
    let (service, provider) = service(FakePage::default());
    let err = service
        .extract_template("https://news.example.com/", "  ", None)
        .await
        .unwrap_err();

    assert!(matches!(err, ServiceError::EmptyName));
    assert_eq!(provider.counters.acquired(), 0);
}

#[tokio::test]
async fn test_list_active_only() {
    let (service, _) = service(FakePage::grid_article());
    let first = service
        .extract_template("https://a.example.com/", "A", None)
        .await
        .unwrap();
    service
        .extract_template("https://b.example.com/", "B", None)
        .await
        .unwrap();

    service.deactivate(&first.id).await.unwrap();

    assert_eq!(service.list(false).await.unwrap().len(), 2);
    let active = service.list(true).await.unwrap();
    assert_eq!(active.len(), 1);
    assert_eq!(active[0].name, "B");
}
