// ABOUTME: Typed event catalog decoupling UI components from navigation and transport logic
// ABOUTME: Envelopes, type registries, an in-process event target and dispatch helpers

pub mod action;
pub mod dispatch;
pub mod event;
pub mod event_types;
pub mod forward;
pub mod navigation;
pub mod request;
pub mod target;
pub mod transport;


pub use action::{ActionParseError, ProjectAction, RequestAction, RestApiAction};
pub use event::{Envelope, Event, EventInit, Payload, Phase};
pub use forward::{EventHandler, HandlerError, forward_events, forward_to, run_handler};
pub use navigation::{
    ExternalNavigation, ExternalNavigationOptions, HelpTopic, MenuPopup, Navigation,
    ProjectNavigation, RequestNavigation, RestApiNavigation, RouteNavigation,
};
pub use request::{RequestChange, RequestSend, WorkspaceAppend};
pub use target::{
    DispatchError, EventTarget, HierarchyError, Listener, ListenerId, ListenerOptions, Node,
    WeakNode,
};
pub use transport::{
    ApiAbort, ApiRequest, ApiResponse, ApiTransport, ResponsePhase, WebsocketAction,
    WebsocketRequest,
};
