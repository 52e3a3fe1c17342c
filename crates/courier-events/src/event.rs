// ABOUTME: The dispatchable event: type string, propagation flags, payload and dispatch state
// ABOUTME: Every envelope converts into an Event, which fixes its type and flags

use std::borrow::Cow;
use std::cell::{Cell, RefCell};

use crate::navigation::{
    ExternalNavigation, HelpTopic, MenuPopup, Navigation, ProjectNavigation, RequestNavigation,
    RestApiNavigation, RouteNavigation,
};
use crate::request::{RequestChange, RequestSend, WorkspaceAppend};
use crate::target::{Node, WeakNode};
use crate::transport::{ApiAbort, ApiRequest, ApiResponse, ApiTransport, WebsocketRequest};

/// Propagation flags fixed at construction. The default sets none of them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct EventInit {
    pub bubbles: bool,
    pub composed: bool,
    pub cancelable: bool,
}

impl EventInit {
    /// Bubbles, crosses shadow boundaries, and can be canceled
    pub const CANCELABLE: EventInit = EventInit {
        bubbles: true,
        composed: true,
        cancelable: true,
    };

    /// Bubbles and crosses shadow boundaries, cannot be canceled
    pub const NOTIFICATION: EventInit = EventInit {
        bubbles: true,
        composed: true,
        cancelable: false,
    };
}

/// Where the event currently is in its dispatch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Phase {
    /// Not being dispatched
    #[default]
    None,
    AtTarget,
    Bubbling,
}

/// Payload of every event in the catalog.
#[derive(Debug, Clone)]
pub enum Payload {
    Route(RouteNavigation),
    Navigation(Navigation),
    RequestNavigation(RequestNavigation),
    RestApiNavigation(RestApiNavigation),
    ProjectNavigation(ProjectNavigation),
    MenuPopup(MenuPopup),
    ExternalNavigation(ExternalNavigation),
    HelpTopic(HelpTopic),
    RequestChange(RequestChange),
    RequestSend(RequestSend),
    WorkspaceAppend(WorkspaceAppend),
    ApiRequest(ApiRequest),
    ApiTransport(ApiTransport),
    ApiAbort(ApiAbort),
    ApiResponse(ApiResponse),
    Websocket(WebsocketRequest),
}

impl Payload {
    /// Base route of navigation payloads.
    pub fn route(&self) -> Option<&str> {
        match self {
            Payload::Route(event) => Some(event.route()),
            Payload::Navigation(event) => Some(event.route()),
            Payload::RequestNavigation(event) => Some(event.route()),
            Payload::RestApiNavigation(event) => Some(event.route()),
            Payload::ProjectNavigation(event) => Some(event.route()),
            _ => None,
        }
    }

    /// Request id for the payloads that carry one: the stored request for
    /// request navigation, the transport request otherwise.
    pub fn request_id(&self) -> Option<&str> {
        match self {
            Payload::RequestNavigation(event) => Some(event.request_id()),
            Payload::ApiRequest(event) => Some(event.request().id.as_str()),
            Payload::ApiTransport(event) => Some(event.id()),
            Payload::ApiAbort(event) => Some(event.id()),
            Payload::ApiResponse(event) => Some(event.id()),
            Payload::Websocket(event) => Some(event.editor_request().id.as_str()),
            _ => None,
        }
    }
}

/// A typed envelope that can be turned into a dispatchable [`Event`].
pub trait Envelope {
    /// The type string listeners register for
    fn event_type(&self) -> Cow<'static, str>;

    fn init(&self) -> EventInit {
        EventInit::CANCELABLE
    }

    fn into_payload(self) -> Payload;
}

/// An event ready to be dispatched on an [`EventTarget`](crate::target::EventTarget).
///
/// The payload is immutable. Listeners only get a shared reference and can
/// touch nothing but the dispatch flags.
#[derive(Debug)]
pub struct Event {
    event_type: Cow<'static, str>,
    init: EventInit,
    payload: Payload,
    default_prevented: Cell<bool>,
    propagation_stopped: Cell<bool>,
    immediate_propagation_stopped: Cell<bool>,
    phase: Cell<Phase>,
    target: RefCell<Option<WeakNode>>,
    current_target: RefCell<Option<WeakNode>>,
}

impl Event {
    pub fn new(envelope: impl Envelope) -> Self {
        let event_type = envelope.event_type();
        let init = envelope.init();
        Self::with_parts(event_type, init, envelope.into_payload())
    }

    fn with_parts(event_type: Cow<'static, str>, init: EventInit, payload: Payload) -> Self {
        Self {
            event_type,
            init,
            payload,
            default_prevented: Cell::new(false),
            propagation_stopped: Cell::new(false),
            immediate_propagation_stopped: Cell::new(false),
            phase: Cell::new(Phase::None),
            target: RefCell::new(None),
            current_target: RefCell::new(None),
        }
    }

    pub fn event_type(&self) -> &str {
        &self.event_type
    }

    pub fn init(&self) -> EventInit {
        self.init
    }

    pub fn bubbles(&self) -> bool {
        self.init.bubbles
    }

    pub fn composed(&self) -> bool {
        self.init.composed
    }

    pub fn cancelable(&self) -> bool {
        self.init.cancelable
    }

    pub fn payload(&self) -> &Payload {
        &self.payload
    }

    pub fn into_payload(self) -> Payload {
        self.payload
    }

    /// Cancels the event. Has no effect on events that are not cancelable.
    pub fn prevent_default(&self) {
        if self.init.cancelable {
            self.default_prevented.set(true);
        }
    }

    pub fn default_prevented(&self) -> bool {
        self.default_prevented.get()
    }

    /// Stops the event from reaching further targets. Listeners on the
    /// current target still run.
    pub fn stop_propagation(&self) {
        self.propagation_stopped.set(true);
    }

    /// Stops the event immediately, including remaining listeners on the
    /// current target.
    pub fn stop_immediate_propagation(&self) {
        self.propagation_stopped.set(true);
        self.immediate_propagation_stopped.set(true);
    }

    pub fn propagation_stopped(&self) -> bool {
        self.propagation_stopped.get()
    }

    pub(crate) fn immediate_propagation_stopped(&self) -> bool {
        self.immediate_propagation_stopped.get()
    }

    pub fn phase(&self) -> Phase {
        self.phase.get()
    }

    pub(crate) fn set_phase(&self, phase: Phase) {
        self.phase.set(phase);
    }

    /// The node the event was dispatched on. Kept after dispatch ends.
    pub fn target(&self) -> Option<Node> {
        self.target.borrow().as_ref().and_then(WeakNode::upgrade)
    }

    /// The node whose listeners are running. `None` outside of dispatch.
    pub fn current_target(&self) -> Option<Node> {
        self.current_target.borrow().as_ref().and_then(WeakNode::upgrade)
    }

    pub(crate) fn set_target(&self, target: WeakNode) {
        *self.target.borrow_mut() = Some(target);
    }

    pub(crate) fn set_current_target(&self, target: Option<WeakNode>) {
        *self.current_target.borrow_mut() = target;
    }

    /// A copy of this event with fresh dispatch state. Opaque payload
    /// objects are shared, not cloned.
    pub fn snapshot(&self) -> Event {
        Self::with_parts(self.event_type.clone(), self.init, self.payload.clone())
    }
}

macro_rules! impl_into_event {
    ($($envelope:ty),* $(,)?) => {
        $(
            impl From<$envelope> for Event {
                fn from(envelope: $envelope) -> Self {
                    Event::new(envelope)
                }
            }
        )*
    };
}

impl_into_event!(
    RouteNavigation,
    Navigation,
    RequestNavigation,
    RestApiNavigation,
    ProjectNavigation,
    MenuPopup,
    ExternalNavigation,
    HelpTopic,
    RequestChange,
    RequestSend,
    WorkspaceAppend,
    ApiRequest,
    ApiTransport,
    ApiAbort,
    ApiResponse,
    WebsocketRequest,
);
