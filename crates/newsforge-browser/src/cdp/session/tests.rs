use serde_json::json;

use super::core::PageSession;
use crate::cdp::error::CdpError;
use crate::cdp::protocol::CdpResponse;

fn event(method: &str, params: serde_json::Value) -> CdpResponse {
    serde_json::from_value(json!({
        "method": method,
        "params": params,
        "sessionId": "S1",
    }))
    .unwrap()
}

#[test]
fn test_lifecycle_reached_matches_name_and_loader() {
    let idle = event(
        "Page.lifecycleEvent",
        json!({"frameId": "F", "loaderId": "L2", "name": "networkIdle", "timestamp": 1.0}),
    );
    assert!(PageSession::lifecycle_reached(&idle, "networkIdle", "L2"));
    assert!(!PageSession::lifecycle_reached(&idle, "networkIdle", "L1"));
    assert!(!PageSession::lifecycle_reached(&idle, "load", "L2"));
}

#[test]
fn test_lifecycle_reached_ignores_other_events() {
    let other = event("Page.loadEventFired", json!({"timestamp": 1.0}));
    assert!(!PageSession::lifecycle_reached(&other, "networkIdle", "L1"));
}

#[test]
fn test_is_detach() {
    assert!(PageSession::is_detach(&event(
        "Inspector.detached",
        json!({"reason": "target_closed"})
    )));
    assert!(!PageSession::is_detach(&event("Page.frameNavigated", json!({}))));
}

#[test]
fn test_evaluation_value() {
    let value = PageSession::evaluation_value(json!({
        "result": {"type": "object", "value": {"rules": ["body { margin: 0 }"]}}
    }))
    .unwrap();
    assert_eq!(value["rules"][0], "body { margin: 0 }");
}

#[test]
fn test_evaluation_value_undefined_is_null() {
    let value = PageSession::evaluation_value(json!({"result": {"type": "undefined"}})).unwrap();
    assert!(value.is_null());
}

#[test]
fn test_evaluation_value_exception() {
    let err = PageSession::evaluation_value(json!({
        "result": {"type": "object"},
        "exceptionDetails": {
            "text": "Uncaught",
            "lineNumber": 0,
            "columnNumber": 1,
            "exception": {"type": "object", "description": "ReferenceError: foo is not defined"}
        }
    }))
    .unwrap_err();
    assert!(matches!(err, CdpError::JavaScript(ref m) if m.contains("ReferenceError")));
}
