// ABOUTME: Web socket request payloads owned by the web socket editor

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WebsocketRequest {
    pub url: String,
    /// Message queued for the next `send`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub payload: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WebsocketEditorRequest {
    pub id: String,
    pub request: WebsocketRequest,
}

impl WebsocketEditorRequest {
    pub fn new(id: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            request: WebsocketRequest {
                url: url.into(),
                payload: None,
            },
        }
    }

    pub fn with_payload(mut self, payload: impl Into<String>) -> Self {
        self.request.payload = Some(payload.into());
        self
    }
}
