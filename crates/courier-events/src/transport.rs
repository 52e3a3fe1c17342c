// ABOUTME: Transport envelopes carrying requests, responses and web socket commands
// ABOUTME: Payload objects are shared by reference and never inspected by this layer

use std::borrow::Cow;
use std::sync::Arc;

use courier_types::{
    BaseRequest, EditorRequest, RequestConfig, TransportRequest, TransportResponse,
    WebsocketEditorRequest,
};

use crate::event::{Envelope, EventInit, Payload};
use crate::event_types::transport;

/// The UI asks to make an HTTP request with the current editor data.
#[derive(Debug, Clone)]
pub struct ApiRequest {
    request: Arc<EditorRequest>,
}

impl ApiRequest {
    pub fn new(request: impl Into<Arc<EditorRequest>>) -> Self {
        Self {
            request: request.into(),
        }
    }

    pub fn request(&self) -> &Arc<EditorRequest> {
        &self.request
    }
}

impl Envelope for ApiRequest {
    fn event_type(&self) -> Cow<'static, str> {
        Cow::Borrowed(transport::REQUEST)
    }

    fn into_payload(self) -> Payload {
        Payload::ApiRequest(self)
    }
}

/// The request is ready to be sent by the HTTP transport.
#[derive(Debug, Clone)]
pub struct ApiTransport {
    id: String,
    request: Arc<BaseRequest>,
    config: Arc<RequestConfig>,
}

impl ApiTransport {
    /// A missing config becomes a disabled one. The request's own
    /// configuration overrides these values.
    pub fn new(
        id: impl Into<String>,
        request: impl Into<Arc<BaseRequest>>,
        config: Option<Arc<RequestConfig>>,
    ) -> Self {
        Self {
            id: id.into(),
            request: request.into(),
            config: config.unwrap_or_default(),
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn request(&self) -> &Arc<BaseRequest> {
        &self.request
    }

    pub fn config(&self) -> &Arc<RequestConfig> {
        &self.config
    }
}

impl Envelope for ApiTransport {
    fn event_type(&self) -> Cow<'static, str> {
        Cow::Borrowed(transport::TRANSPORT)
    }

    fn into_payload(self) -> Payload {
        Payload::ApiTransport(self)
    }
}

/// The transport should abort the request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiAbort {
    id: String,
}

impl ApiAbort {
    pub fn new(id: impl Into<String>) -> Self {
        Self { id: id.into() }
    }

    pub fn id(&self) -> &str {
        &self.id
    }
}

impl Envelope for ApiAbort {
    fn event_type(&self) -> Cow<'static, str> {
        Cow::Borrowed(transport::ABORT)
    }

    fn into_payload(self) -> Payload {
        Payload::ApiAbort(self)
    }
}

/// Which step of the response handshake an [`ApiResponse`] announces.
///
/// The transport first reports the raw response, then the processed one.
/// Ordering is the transport's job; nothing here enforces it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ResponsePhase {
    Response,
    ProcessResponse,
}

impl ResponsePhase {
    pub fn event_type(&self) -> &'static str {
        match self {
            ResponsePhase::Response => transport::RESPONSE,
            ResponsePhase::ProcessResponse => transport::PROCESS_RESPONSE,
        }
    }
}

#[derive(Debug, Clone)]
pub struct ApiResponse {
    phase: ResponsePhase,
    id: String,
    source: Arc<BaseRequest>,
    request: Arc<TransportRequest>,
    response: Arc<TransportResponse>,
    cancelable: bool,
}

impl ApiResponse {
    pub fn new(
        phase: ResponsePhase,
        id: impl Into<String>,
        source: impl Into<Arc<BaseRequest>>,
        request: impl Into<Arc<TransportRequest>>,
        response: impl Into<Arc<TransportResponse>>,
    ) -> Self {
        Self {
            phase,
            id: id.into(),
            source: source.into(),
            request: request.into(),
            response: response.into(),
            cancelable: true,
        }
    }

    /// Builds a response event listeners cannot cancel.
    pub fn non_cancelable(mut self) -> Self {
        self.cancelable = false;
        self
    }

    pub fn phase(&self) -> ResponsePhase {
        self.phase
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    /// The request as it was in the request editor
    pub fn source(&self) -> &Arc<BaseRequest> {
        &self.source
    }

    /// The request as it was transported
    pub fn request(&self) -> &Arc<TransportRequest> {
        &self.request
    }

    pub fn response(&self) -> &Arc<TransportResponse> {
        &self.response
    }
}

impl Envelope for ApiResponse {
    fn event_type(&self) -> Cow<'static, str> {
        Cow::Borrowed(self.phase.event_type())
    }

    fn init(&self) -> EventInit {
        if self.cancelable {
            EventInit::CANCELABLE
        } else {
            EventInit::NOTIFICATION
        }
    }

    fn into_payload(self) -> Payload {
        Payload::ApiResponse(self)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum WebsocketAction {
    Connect,
    Disconnect,
    Send,
}

impl WebsocketAction {
    pub fn event_type(&self) -> &'static str {
        match self {
            WebsocketAction::Connect => transport::CONNECT,
            WebsocketAction::Disconnect => transport::DISCONNECT,
            WebsocketAction::Send => transport::CONNECTION_SEND,
        }
    }
}

/// Opens, closes or sends data over a web socket connection.
#[derive(Debug, Clone)]
pub struct WebsocketRequest {
    action: WebsocketAction,
    editor_request: Arc<WebsocketEditorRequest>,
}

impl WebsocketRequest {
    pub fn new(
        action: WebsocketAction,
        editor_request: impl Into<Arc<WebsocketEditorRequest>>,
    ) -> Self {
        Self {
            action,
            editor_request: editor_request.into(),
        }
    }

    pub fn action(&self) -> WebsocketAction {
        self.action
    }

    pub fn editor_request(&self) -> &Arc<WebsocketEditorRequest> {
        &self.editor_request
    }
}

impl Envelope for WebsocketRequest {
    fn event_type(&self) -> Cow<'static, str> {
        Cow::Borrowed(self.action.event_type())
    }

    fn into_payload(self) -> Payload {
        Payload::Websocket(self)
    }
}
