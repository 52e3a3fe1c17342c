// ABOUTME: HTTP response payloads reported by the transport engine
// ABOUTME: A transport result is either a regular response or an error response

use serde::{Deserialize, Serialize};

/// A response received from the remote server.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Response {
    pub status: u16,
    #[serde(default)]
    pub status_text: String,
    #[serde(default)]
    pub headers: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub payload: Option<String>,
    /// Total round trip in milliseconds
    #[serde(default)]
    pub loading_time: f64,
}

/// Reported when the transport could not produce a response.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
    /// Set when the failure happened after a status line was read
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<u16>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum TransportResponse {
    // Tried first: a response body never carries an `error` field
    Error(ErrorResponse),
    Response(Response),
}

impl TransportResponse {
    pub fn is_error(&self) -> bool {
        matches!(self, TransportResponse::Error(_))
    }

    pub fn status(&self) -> Option<u16> {
        match self {
            TransportResponse::Response(response) => Some(response.status),
            TransportResponse::Error(error) => error.status,
        }
    }
}

impl From<Response> for TransportResponse {
    fn from(response: Response) -> Self {
        TransportResponse::Response(response)
    }
}

impl From<ErrorResponse> for TransportResponse {
    fn from(error: ErrorResponse) -> Self {
        TransportResponse::Error(error)
    }
}
