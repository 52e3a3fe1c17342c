// ABOUTME: Request editor envelopes: send, property change notifications and workspace append
// ABOUTME: Only globally interesting properties (URL, content type) are announced

use std::borrow::Cow;
use std::sync::Arc;

use courier_types::BaseRequest;
use serde_json::Value;

use crate::event::{Envelope, EventInit, Payload};
use crate::event_types::request;

/// Property names used by the request state notifications.
pub mod properties {
    pub const URL: &str = "url";
    pub const CONTENT_TYPE: &str = "content-type";
}

/// A request property changed.
///
/// Neither the property name nor the value is validated; listeners decide
/// which properties they care about.
#[derive(Debug, Clone, PartialEq)]
pub struct RequestChange {
    event_type: Cow<'static, str>,
    property: String,
    value: Value,
}

impl RequestChange {
    pub fn new(
        event_type: impl Into<Cow<'static, str>>,
        property: impl Into<String>,
        value: Value,
    ) -> Self {
        Self {
            event_type: event_type.into(),
            property: property.into(),
            value,
        }
    }

    pub fn changed_property(&self) -> &str {
        &self.property
    }

    pub fn changed_value(&self) -> &Value {
        &self.value
    }
}

impl Envelope for RequestChange {
    fn event_type(&self) -> Cow<'static, str> {
        self.event_type.clone()
    }

    fn init(&self) -> EventInit {
        EventInit::NOTIFICATION
    }

    fn into_payload(self) -> Payload {
        Payload::RequestChange(self)
    }
}

/// Asks the request logic to send the current request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RequestSend;

impl Envelope for RequestSend {
    fn event_type(&self) -> Cow<'static, str> {
        Cow::Borrowed(request::SEND)
    }

    fn into_payload(self) -> Payload {
        Payload::RequestSend(self)
    }
}

/// Appends a request to the current workspace.
#[derive(Debug, Clone)]
pub struct WorkspaceAppend {
    request: Arc<BaseRequest>,
}

impl WorkspaceAppend {
    pub fn new(request: impl Into<Arc<BaseRequest>>) -> Self {
        Self {
            request: request.into(),
        }
    }

    pub fn request(&self) -> &Arc<BaseRequest> {
        &self.request
    }
}

impl Envelope for WorkspaceAppend {
    fn event_type(&self) -> Cow<'static, str> {
        Cow::Borrowed(request::workspace::APPEND)
    }

    fn into_payload(self) -> Payload {
        Payload::WorkspaceAppend(self)
    }
}
