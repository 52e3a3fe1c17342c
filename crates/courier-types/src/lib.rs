// ABOUTME: Pure payload data types with no cross-crate dependencies
// ABOUTME: Owned by the request editor and transport layers, carried opaquely by events

pub mod request;
pub mod response;
pub mod websocket;

// Re-export commonly used types
pub use request::{BaseRequest, EditorRequest, RequestConfig, TransportRequest};
pub use response::{ErrorResponse, Response, TransportResponse};
pub use websocket::{WebsocketEditorRequest, WebsocketRequest};
