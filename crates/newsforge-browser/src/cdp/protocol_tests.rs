use super::*;

#[test]
fn test_cdp_request_serialize() {
    let req = CdpRequest {
        id: 1,
        method: "Page.navigate".to_string(),
        params: Some(serde_json::json!({"url": "https://example.com"})),
        session_id: Some("SESSION".to_string()),
    };
    let json = serde_json::to_string(&req).unwrap();
    assert!(json.contains("Page.navigate"));
    assert!(json.contains("\"sessionId\":\"SESSION\""));
}

#[test]
fn test_cdp_request_omits_empty_fields() {
    let req = CdpRequest {
        id: 7,
        method: "Target.createBrowserContext".to_string(),
        params: None,
        session_id: None,
    };
    let json = serde_json::to_string(&req).unwrap();
    assert!(!json.contains("params"));
    assert!(!json.contains("sessionId"));
}

#[test]
fn test_cdp_response_deserialize() {
    let json = r#"{"id": 1, "result": {"frameId": "abc", "loaderId": "L1"}}"#;
    let resp: CdpResponse = serde_json::from_str(json).unwrap();
    assert_eq!(resp.id, Some(1));
    assert!(resp.result.is_some());
}

#[test]
fn test_lifecycle_event_deserialize() {
    let json = r#"{
        "frameId": "F1",
        "loaderId": "L1",
        "name": "networkIdle",
        "timestamp": 1234.5
    }"#;
    let event: LifecycleEvent = serde_json::from_str(json).unwrap();
    assert_eq!(event.name, "networkIdle");
    assert_eq!(event.loader_id, "L1");
}

#[test]
fn test_exception_details_message_prefers_description() {
    let json = r#"{
        "text": "Uncaught",
        "lineNumber": 0,
        "columnNumber": 5,
        "exception": {"type": "object", "description": "TypeError: x is undefined"}
    }"#;
    let details: ExceptionDetails = serde_json::from_str(json).unwrap();
    assert_eq!(details.message(), "TypeError: x is undefined");
}

#[test]
fn test_screenshot_format_serialize() {
    let json = serde_json::to_string(&ScreenshotFormat::Png).unwrap();
    assert_eq!(json, "\"png\"");
    assert_eq!(ScreenshotFormat::Jpeg.mime_type(), "image/jpeg");
}
