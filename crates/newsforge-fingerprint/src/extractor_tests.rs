use std::sync::atomic::Ordering;

use super::*;
use crate::model::GridSystem;
use crate::skeleton::FALLBACK_SKELETON;
use crate::synthesizer::synthesize;
use crate::test_support::{FakePage, FakeProvider, Navigation, PNG_BYTES};

fn extractor(provider: &Arc<FakeProvider>, config: ExtractorConfig) -> Extractor {
    Extractor::new(provider.clone(), config)
}

#[tokio::test]
async fn test_extract_grid_article() {
    let provider = Arc::new(FakeProvider::new(FakePage::grid_article()));
    let extractor = extractor(&provider, ExtractorConfig::default());

    let extracted = extractor.extract("https://news.example.com/story").await.unwrap();

    let metadata = &extracted.layout_metadata;
    assert_eq!(metadata.columns, 2);
    assert_eq!(metadata.grid_system, GridSystem::Grid);
    assert_eq!(metadata.typography.fonts, vec!["Georgia, serif", "Arial, sans-serif"]);
    assert_eq!(metadata.responsive.breakpoints, vec!["(max-width: 768px)"]);
    assert!(extracted.has_sidebar);

    assert!(!extracted.css_styles.contains("promo-banner"));
    assert!(extracted.css_styles.contains("aside.sidebar"));
    assert_eq!(
        extracted.html_structure,
        "<article id=\"story\" class=\"post\"><!-- h1 content -->\
         <section class=\"body\"><!-- p content --></section></article>"
    );

    let css = synthesize(metadata);
    assert!(css.contains("grid-template-columns: repeat(2, 1fr)"));
    assert_eq!(css.matches("@media (max-width: 768px)").count(), 1);

    assert_eq!(provider.counters.acquired(), 1);
    assert_eq!(provider.counters.closed(), 1);
}

#[tokio::test]
async fn test_scripts_stripped_before_probes() {
    let provider = Arc::new(FakeProvider::new(FakePage::grid_article()));
    extractor(&provider, ExtractorConfig::default())
        .extract("https://news.example.com/story")
        .await
        .unwrap();

    let scripts = provider.counters.scripts.lock().clone();
    assert_eq!(scripts.len(), 5);
    assert_eq!(scripts[0], STRIP_SCRIPTS);
    assert_eq!(
        provider.counters.navigated.lock().as_slice(),
        ["https://news.example.com/story"]
    );
}

#[tokio::test]
async fn test_preview_is_png_data_url() {
    let provider = Arc::new(FakeProvider::new(FakePage::grid_article()));
    let extracted = extractor(&provider, ExtractorConfig::default())
        .extract("https://news.example.com/story")
        .await
        .unwrap();

    let encoded = extracted
        .preview_image
        .strip_prefix("data:image/png;base64,")
        .unwrap();
    let decoded = base64::engine::general_purpose::STANDARD
        .decode(encoded)
        .unwrap();
    assert_eq!(decoded, PNG_BYTES);
}

#[tokio::test]
async fn test_empty_page_uses_defaults() {
    let provider = Arc::new(FakeProvider::new(FakePage::default()));
    let extracted = extractor(&provider, ExtractorConfig::default())
        .extract("http://example.com/")
        .await
        .unwrap();

    assert_eq!(extracted.css_styles, "");
    assert_eq!(extracted.html_structure, FALLBACK_SKELETON);
    assert!(!extracted.has_sidebar);
    assert_eq!(extracted.layout_metadata.columns, 1);
    assert_eq!(provider.counters.closed(), 1);
}

#[tokio::test]
async fn test_navigation_timeout_closes_session() {
    let page = FakePage {
        navigation: Navigation::Timeout,
        ..FakePage::grid_article()
    };
    let provider = Arc::new(FakeProvider::new(page));

    let err = extractor(&provider, ExtractorConfig::default())
        .extract("https://slow.example.com/")
        .await
        .unwrap_err();

    assert!(matches!(err, ExtractError::ExtractionFailed(_)));
    assert_eq!(provider.counters.closed(), 1);
    assert!(provider.counters.scripts.lock().is_empty());
}

#[tokio::test]
async fn test_hanging_navigation_bounded_by_timeout() {
    let page = FakePage {
        navigation: Navigation::Delay(Duration::from_secs(30)),
        ..FakePage::grid_article()
    };
    let provider = Arc::new(FakeProvider::new(page));

    let err = extractor(&provider, ExtractorConfig::default())
        .extract_with_timeout("https://slow.example.com/", Duration::from_millis(50))
        .await
        .unwrap_err();

    assert!(err.to_string().contains("timed out after 50ms"));
    assert_eq!(provider.counters.closed(), 1);
}

#[tokio::test]
async fn test_navigation_failure_closes_session() {
    let page = FakePage {
        navigation: Navigation::Fail("net::ERR_NAME_NOT_RESOLVED".to_string()),
        ..FakePage::default()
    };
    let provider = Arc::new(FakeProvider::new(page));

    let err = extractor(&provider, ExtractorConfig::default())
        .extract("https://missing.example/")
        .await
        .unwrap_err();

    assert!(err.to_string().contains("ERR_NAME_NOT_RESOLVED"));
    assert_eq!(provider.counters.closed(), 1);
}

#[tokio::test]
async fn test_evaluation_failure_closes_session() {
    let page = FakePage {
        failing_script: Some(LAYOUT_PROBE),
        ..FakePage::grid_article()
    };
    let provider = Arc::new(FakeProvider::new(page));

    let err = extractor(&provider, ExtractorConfig::default())
        .extract("https://news.example.com/story")
        .await
        .unwrap_err();

    assert!(matches!(err, ExtractError::ExtractionFailed(_)));
    assert!(err.to_string().contains("boom"));
    assert_eq!(provider.counters.closed(), 1);
}

#[tokio::test]
async fn test_browser_unavailable() {
    let provider = Arc::new(FakeProvider::unavailable());
    let err = extractor(&provider, ExtractorConfig::default())
        .extract("https://news.example.com/")
        .await
        .unwrap_err();

    assert!(err.is_browser_unavailable());
    assert_eq!(provider.counters.closed(), 0);
}

#[tokio::test]
async fn test_invalid_url_rejected_before_session() {
    let provider = Arc::new(FakeProvider::new(FakePage::default()));
    let extractor = extractor(&provider, ExtractorConfig::default());

    for url in ["not a url", "ftp://example.com/file", "file:///etc/passwd"] {
        let err = extractor.extract(url).await.unwrap_err();
        assert!(matches!(err, ExtractError::ExtractionFailed(_)), "{}", url);
    }
    assert_eq!(provider.counters.acquired(), 0);
}

#[tokio::test]
async fn test_concurrency_bounded_by_permits() {
    let page = FakePage {
        navigation: Navigation::Delay(Duration::from_millis(30)),
        ..FakePage::grid_article()
    };
    let provider = Arc::new(FakeProvider::new(page));
    let extractor = Arc::new(extractor(
        &provider,
        ExtractorConfig {
            max_concurrent: 2,
            ..Default::default()
        },
    ));

    let handles: Vec<_> = (0..6)
        .map(|i| {
            let extractor = extractor.clone();
            tokio::spawn(async move {
                extractor
                    .extract(&format!("https://news.example.com/{}", i))
                    .await
            })
        })
        .collect();
    for handle in handles {
        handle.await.unwrap().unwrap();
    }

    assert_eq!(provider.counters.acquired(), 6);
    assert_eq!(provider.counters.closed(), 6);
    assert!(provider.counters.max_active() <= 2);
}

#[tokio::test]
async fn test_dropped_guard_closes_session() {
    let provider = FakeProvider::new(FakePage::default());
    let session = provider.acquire_session().await.unwrap();

    drop(SessionGuard::new(session));
    for _ in 0..10 {
        if provider.counters.closed.load(Ordering::SeqCst) == 1 {
            break;
        }
        tokio::time::sleep(Duration::from_millis(10)).await;
    }
    assert_eq!(provider.counters.closed(), 1);
}

#[tokio::test]
async fn test_cancelled_extraction_closes_session() {
    let page = FakePage {
        navigation: Navigation::Delay(Duration::from_secs(30)),
        ..FakePage::default()
    };
    let provider = Arc::new(FakeProvider::new(page));
    let extractor = Arc::new(extractor(&provider, ExtractorConfig::default()));

    let task = {
        let extractor = extractor.clone();
        tokio::spawn(async move { extractor.extract("https://news.example.com/").await })
    };
    while provider.counters.acquired() == 0 {
        tokio::time::sleep(Duration::from_millis(5)).await;
    }
    task.abort();
    let _ = task.await;

    for _ in 0..10 {
        if provider.counters.closed() == 1 {
            break;
        }
        tokio::time::sleep(Duration::from_millis(10)).await;
    }
    assert_eq!(provider.counters.closed(), 1);
}
