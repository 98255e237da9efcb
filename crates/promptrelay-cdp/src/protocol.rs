//! CDP protocol message and discovery types.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// CDP request message.
#[derive(Debug, Serialize)]
pub struct CdpRequest {
    pub id: u64,
    pub method: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub params: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    #[serde(rename = "sessionId")]
    pub session_id: Option<String>,
}

/// CDP response or event message.
#[derive(Debug, Deserialize)]
pub struct CdpResponse {
    pub id: Option<u64>,
    pub result: Option<Value>,
    pub error: Option<CdpErrorResponse>,
    pub method: Option<String>,
    pub params: Option<Value>,
    #[serde(rename = "sessionId")]
    pub session_id: Option<String>,
}

/// CDP error in response.
#[derive(Debug, Deserialize)]
pub struct CdpErrorResponse {
    pub code: i64,
    pub message: String,
    pub data: Option<String>,
}

/// Page info from the `/json` discovery endpoint.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageInfo {
    pub id: String,
    #[serde(rename = "type")]
    pub page_type: String,
    pub title: String,
    pub url: String,
    pub web_socket_debugger_url: Option<String>,
}

impl PageInfo {
    /// Whether this target is an actual page (not an extension, worker...).
    pub fn is_page(&self) -> bool {
        self.page_type == "page"
    }
}

/// Browser version info.
///
/// Note: Chrome returns PascalCase field names for this endpoint.
#[derive(Debug, Clone, Deserialize)]
pub struct BrowserVersion {
    #[serde(rename = "Browser")]
    pub browser: String,
    #[serde(rename = "Protocol-Version")]
    pub protocol_version: String,
    #[serde(rename = "webSocketDebuggerUrl")]
    pub web_socket_debugger_url: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_request_serializes_without_optional_fields() {
        let req = CdpRequest {
            id: 1,
            method: "Page.navigate".to_string(),
            params: None,
            session_id: None,
        };
        let json = serde_json::to_string(&req).unwrap();
        assert!(!json.contains("params"));
        assert!(!json.contains("sessionId"));
    }

    #[test]
    fn test_request_session_id_camel_case() {
        let req = CdpRequest {
            id: 2,
            method: "Runtime.evaluate".to_string(),
            params: Some(json!({"expression": "1+1"})),
            session_id: Some("ABC".to_string()),
        };
        let json = serde_json::to_string(&req).unwrap();
        assert!(json.contains("\"sessionId\":\"ABC\""));
    }

    #[test]
    fn test_response_with_error() {
        let raw = r#"{"id":3,"error":{"code":-32601,"message":"Method not found"}}"#;
        let resp: CdpResponse = serde_json::from_str(raw).unwrap();
        assert_eq!(resp.id, Some(3));
        let err = resp.error.unwrap();
        assert_eq!(err.code, -32601);
    }

    #[test]
    fn test_event_message() {
        let raw = r#"{"method":"Page.loadEventFired","params":{"timestamp":1.0},"sessionId":"S"}"#;
        let resp: CdpResponse = serde_json::from_str(raw).unwrap();
        assert!(resp.id.is_none());
        assert_eq!(resp.method.as_deref(), Some("Page.loadEventFired"));
    }

    #[test]
    fn test_page_info_is_page() {
        let raw = r#"{"id":"T1","type":"page","title":"Chat","url":"https://claude.ai/"}"#;
        let info: PageInfo = serde_json::from_str(raw).unwrap();
        assert!(info.is_page());

        let raw = r#"{"id":"T2","type":"service_worker","title":"","url":"https://x.example/sw.js"}"#;
        let info: PageInfo = serde_json::from_str(raw).unwrap();
        assert!(!info.is_page());
    }

    #[test]
    fn test_browser_version_pascal_case() {
        let raw = r#"{
            "Browser": "Chrome/131.0.0.0",
            "Protocol-Version": "1.3",
            "webSocketDebuggerUrl": "ws://localhost:9222/devtools/browser/x"
        }"#;
        let version: BrowserVersion = serde_json::from_str(raw).unwrap();
        assert!(version.browser.starts_with("Chrome"));
        assert_eq!(version.protocol_version, "1.3");
    }
}
