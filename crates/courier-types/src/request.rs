// ABOUTME: HTTP request payloads produced by the request editor and the transport engine
// ABOUTME: Pure data structures; event envelopes carry them without inspecting them

use serde::{Deserialize, Serialize};

/// The minimal request definition edited in the UI.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BaseRequest {
    pub url: String,
    #[serde(default = "default_method")]
    pub method: String,
    /// Raw HTTP headers string, one `name: value` per line
    #[serde(default)]
    pub headers: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub payload: Option<String>,
    /// Per-request transport configuration. Overrides the global one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub config: Option<RequestConfig>,
}

impl BaseRequest {
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            method: default_method(),
            headers: String::new(),
            payload: None,
            config: None,
        }
    }

    pub fn with_method(mut self, method: impl Into<String>) -> Self {
        self.method = method.into();
        self
    }

    pub fn with_headers(mut self, headers: impl Into<String>) -> Self {
        self.headers = headers.into();
        self
    }

    pub fn with_payload(mut self, payload: impl Into<String>) -> Self {
        self.payload = Some(payload.into());
        self
    }
}

/// A request as it lives in the editor: the request plus editor bookkeeping.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EditorRequest {
    /// Editor-local identifier, also used as the transport request id
    pub id: String,
    pub request: BaseRequest,
}

impl EditorRequest {
    pub fn new(id: impl Into<String>, request: BaseRequest) -> Self {
        Self {
            id: id.into(),
            request,
        }
    }
}

/// What was actually put on the wire, as reported by the transport.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransportRequest {
    pub url: String,
    pub method: String,
    #[serde(default)]
    pub headers: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub payload: Option<String>,
    /// Unix epoch milliseconds
    pub start_time: u64,
    /// Unix epoch milliseconds
    pub end_time: u64,
    /// The raw HTTP message, when the transport captured it
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub http_message: Option<String>,
}

/// Transport configuration.
///
/// `enabled` decides whether these values are applied at all. A disabled
/// config leaves the transport's own defaults in place, and is the default.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RequestConfig {
    #[serde(default)]
    pub enabled: bool,
    /// Request timeout in milliseconds
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timeout: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub follow_redirects: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub validate_certificates: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ignore_session_cookies: Option<bool>,
}

fn default_method() -> String {
    "GET".to_string()
}
