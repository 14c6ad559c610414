use super::*;

#[test]
fn test_cdp_request_serialize() {
    let req = CdpRequest {
        id: 1,
        method: "Page.navigate".to_string(),
        params: Some(serde_json::json!({"url": "https://example.com"})),
        session_id: Some("S1".to_string()),
    };
    let json = serde_json::to_string(&req).unwrap();
    assert!(json.contains("Page.navigate"));
    assert!(json.contains("\"sessionId\":\"S1\""));
}

#[test]
fn test_cdp_request_omits_empty_fields() {
    let req = CdpRequest {
        id: 7,
        method: "Target.getTargets".to_string(),
        params: None,
        session_id: None,
    };
    let json = serde_json::to_string(&req).unwrap();
    assert_eq!(json, r#"{"id":7,"method":"Target.getTargets"}"#);
}

#[test]
fn test_cdp_response_deserialize() {
    let json = r#"{"id": 1, "result": {"frameId": "abc"}}"#;
    let resp: CdpResponse = serde_json::from_str(json).unwrap();
    assert_eq!(resp.id, Some(1));
    assert!(resp.result.is_some());
}

#[test]
fn test_cdp_event_deserialize() {
    let json = r#"{"method": "Page.loadEventFired", "params": {"timestamp": 1.5}, "sessionId": "S1"}"#;
    let resp: CdpResponse = serde_json::from_str(json).unwrap();
    assert!(resp.id.is_none());
    assert_eq!(resp.method.as_deref(), Some("Page.loadEventFired"));
    assert_eq!(resp.session_id.as_deref(), Some("S1"));
}

#[test]
fn test_browser_version_deserialize() {
    let json = r#"{
        "Browser": "Chrome/126.0.0.0",
        "Protocol-Version": "1.3",
        "User-Agent": "Mozilla/5.0",
        "webSocketDebuggerUrl": "ws://localhost:9222/devtools/browser/abc"
    }"#;
    let version: BrowserVersion = serde_json::from_str(json).unwrap();
    assert!(version.web_socket_debugger_url.starts_with("ws://"));
}

#[test]
fn test_page_info_deserialize() {
    let json = r#"{
        "id": "page123",
        "type": "page",
        "title": "Test",
        "url": "https://example.com",
        "webSocketDebuggerUrl": "ws://localhost:9222/devtools/page/page123"
    }"#;
    let info: PageInfo = serde_json::from_str(json).unwrap();
    assert_eq!(info.id, "page123");
    assert_eq!(info.page_type, "page");
}

#[test]
fn test_mouse_event_serialize() {
    assert_eq!(serde_json::to_string(&MouseButton::Left).unwrap(), "\"left\"");
    assert_eq!(
        serde_json::to_string(&MouseEventType::MousePressed).unwrap(),
        "\"mousePressed\""
    );
}

#[test]
fn test_device_metrics_serialize() {
    let metrics = DeviceMetrics {
        width: 390,
        height: 844,
        device_scale_factor: 3.0,
        mobile: true,
    };
    let json = serde_json::to_value(&metrics).unwrap();
    assert_eq!(json["deviceScaleFactor"], 3.0);
    assert_eq!(json["mobile"], true);
}

#[test]
fn test_screencast_frame_deserialize() {
    let json = r#"{
        "data": "/9j/4AAQ",
        "metadata": {"offsetTop": 0, "pageScaleFactor": 1, "deviceWidth": 390, "deviceHeight": 844,
                     "scrollOffsetX": 0, "scrollOffsetY": 0, "timestamp": 1718000000.25},
        "sessionId": 4
    }"#;
    let frame: ScreencastFrame = serde_json::from_str(json).unwrap();
    assert_eq!(frame.session_id, 4);
    assert_eq!(frame.metadata.timestamp, Some(1718000000.25));
    assert_eq!(serde_json::to_string(&ScreencastFormat::Jpeg).unwrap(), "\"jpeg\"");
}
