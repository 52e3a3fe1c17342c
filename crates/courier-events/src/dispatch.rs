// ABOUTME: One-line dispatch helpers: build the matching envelope and dispatch it on a target
// ABOUTME: Dispatch errors are returned to the caller unchanged

use std::sync::Arc;

use courier_types::{
    BaseRequest, EditorRequest, RequestConfig, TransportRequest, TransportResponse,
    WebsocketEditorRequest,
};
use serde_json::Value;

use crate::action::{ProjectAction, RequestAction, RestApiAction};
use crate::event::Event;
use crate::event_types;
use crate::navigation::{
    ExternalNavigation, ExternalNavigationOptions, HelpTopic, MenuPopup, Navigation,
    ProjectNavigation, RequestNavigation, RestApiNavigation,
};
use crate::request::{RequestChange, RequestSend, WorkspaceAppend, properties};
use crate::target::{DispatchError, EventTarget};
use crate::transport::{
    ApiAbort, ApiRequest, ApiResponse, ApiTransport, ResponsePhase, WebsocketAction,
    WebsocketRequest,
};

fn dispatch<T>(target: &T, event: impl Into<Event>) -> Result<(), DispatchError>
where
    T: EventTarget + ?Sized,
{
    target.dispatch_event(event.into()).map(|_| ())
}

// Navigation

pub fn navigate<T: EventTarget + ?Sized>(
    target: &T,
    route: impl Into<String>,
    options: Option<Value>,
) -> Result<(), DispatchError> {
    dispatch(target, Navigation::new(route, options))
}

/// Navigates to a stored request. An omitted action opens it.
pub fn navigate_request<T: EventTarget + ?Sized>(
    target: &T,
    request_id: impl Into<String>,
    request_type: impl Into<String>,
    action: Option<RequestAction>,
) -> Result<(), DispatchError> {
    dispatch(
        target,
        RequestNavigation::new(request_id, request_type, action),
    )
}

pub fn navigate_rest_api<T: EventTarget + ?Sized>(
    target: &T,
    api: impl Into<String>,
    version: impl Into<String>,
    action: RestApiAction,
) -> Result<(), DispatchError> {
    dispatch(target, RestApiNavigation::new(api, version, action))
}

/// Navigates to a project. An omitted action opens it.
pub fn navigate_project<T: EventTarget + ?Sized>(
    target: &T,
    id: impl Into<String>,
    action: Option<ProjectAction>,
) -> Result<(), DispatchError> {
    dispatch(target, ProjectNavigation::new(id, action))
}

pub fn popup_menu<T: EventTarget + ?Sized>(
    target: &T,
    menu: impl Into<String>,
) -> Result<(), DispatchError> {
    dispatch(target, MenuPopup::new(menu))
}

pub fn navigate_external<T: EventTarget + ?Sized>(
    target: &T,
    url: impl Into<String>,
    options: Option<ExternalNavigationOptions>,
) -> Result<(), DispatchError> {
    dispatch(target, ExternalNavigation::new(url, options))
}

pub fn help_topic<T: EventTarget + ?Sized>(
    target: &T,
    topic: impl Into<String>,
) -> Result<(), DispatchError> {
    dispatch(target, HelpTopic::new(topic))
}

// Request editor

/// Asks the request logic to send the current request.
pub fn inform_send_action<T: EventTarget + ?Sized>(target: &T) -> Result<(), DispatchError> {
    dispatch(target, RequestSend)
}

pub fn state_url_change_action<T: EventTarget + ?Sized>(
    target: &T,
    value: impl Into<String>,
) -> Result<(), DispatchError> {
    dispatch(
        target,
        RequestChange::new(
            event_types::request::state::URL_CHANGE,
            properties::URL,
            Value::String(value.into()),
        ),
    )
}

pub fn state_content_type_action<T: EventTarget + ?Sized>(
    target: &T,
    value: impl Into<String>,
) -> Result<(), DispatchError> {
    dispatch(
        target,
        RequestChange::new(
            event_types::request::state::CONTENT_TYPE_CHANGE,
            properties::CONTENT_TYPE,
            Value::String(value.into()),
        ),
    )
}

pub fn workspace_append_action<T: EventTarget + ?Sized>(
    target: &T,
    request: impl Into<Arc<BaseRequest>>,
) -> Result<(), DispatchError> {
    dispatch(target, WorkspaceAppend::new(request))
}

// Transport

/// Asks to make an HTTP request with the editor's data.
pub fn send_action<T: EventTarget + ?Sized>(
    target: &T,
    request: impl Into<Arc<EditorRequest>>,
) -> Result<(), DispatchError> {
    dispatch(target, ApiRequest::new(request))
}

pub fn transport_action<T: EventTarget + ?Sized>(
    target: &T,
    id: impl Into<String>,
    request: impl Into<Arc<BaseRequest>>,
    config: Option<Arc<RequestConfig>>,
) -> Result<(), DispatchError> {
    dispatch(target, ApiTransport::new(id, request, config))
}

pub fn abort_action<T: EventTarget + ?Sized>(
    target: &T,
    id: impl Into<String>,
) -> Result<(), DispatchError> {
    dispatch(target, ApiAbort::new(id))
}

/// Reports the raw response received by the transport.
pub fn response_action<T: EventTarget + ?Sized>(
    target: &T,
    id: impl Into<String>,
    source: impl Into<Arc<BaseRequest>>,
    request: impl Into<Arc<TransportRequest>>,
    response: impl Into<Arc<TransportResponse>>,
) -> Result<(), DispatchError> {
    dispatch(
        target,
        ApiResponse::new(ResponsePhase::Response, id, source, request, response),
    )
}

/// Reports the response after the transport processed it.
pub fn process_response_action<T: EventTarget + ?Sized>(
    target: &T,
    id: impl Into<String>,
    source: impl Into<Arc<BaseRequest>>,
    request: impl Into<Arc<TransportRequest>>,
    response: impl Into<Arc<TransportResponse>>,
) -> Result<(), DispatchError> {
    dispatch(
        target,
        ApiResponse::new(
            ResponsePhase::ProcessResponse,
            id,
            source,
            request,
            response,
        ),
    )
}

pub fn inform_connect_action<T: EventTarget + ?Sized>(
    target: &T,
    editor_request: impl Into<Arc<WebsocketEditorRequest>>,
) -> Result<(), DispatchError> {
    dispatch(
        target,
        WebsocketRequest::new(WebsocketAction::Connect, editor_request),
    )
}

pub fn inform_disconnect_action<T: EventTarget + ?Sized>(
    target: &T,
    editor_request: impl Into<Arc<WebsocketEditorRequest>>,
) -> Result<(), DispatchError> {
    dispatch(
        target,
        WebsocketRequest::new(WebsocketAction::Disconnect, editor_request),
    )
}

pub fn inform_web_socket_send_action<T: EventTarget + ?Sized>(
    target: &T,
    editor_request: impl Into<Arc<WebsocketEditorRequest>>,
) -> Result<(), DispatchError> {
    dispatch(
        target,
        WebsocketRequest::new(WebsocketAction::Send, editor_request),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::event::Payload;
    use crate::target::Node;
    use courier_types::Response;
    use std::sync::Mutex;

    /// Records every event of the given types dispatched on the node.
    fn record(node: &Node, types: &[&str]) -> Arc<Mutex<Vec<Event>>> {
        let events = Arc::new(Mutex::new(Vec::new()));
        for event_type in types {
            let events = events.clone();
            node.add_event_listener(*event_type, move |event| {
                events.lock().unwrap().push(event.snapshot());
            });
        }
        events
    }

    fn all_types() -> Vec<&'static str> {
        event_types::CATALOG.iter().map(|(_, value)| *value).collect()
    }

    fn transport_request() -> TransportRequest {
        TransportRequest {
            url: "https://example.com/items".to_string(),
            method: "GET".to_string(),
            headers: "accept: */*".to_string(),
            payload: None,
            start_time: 10,
            end_time: 25,
            http_message: Some("GET /items HTTP/1.1".to_string()),
        }
    }

    #[test]
    fn test_navigate_request_defaults_to_open() {
        let node = Node::new();
        let events = record(&node, &all_types());

        navigate_request(&node, "r-1", "history", None).unwrap();

        let events = events.lock().unwrap();
        assert_eq!(events.len(), 1);
        assert_eq!(events[0].event_type(), event_types::navigation::NAVIGATE_REQUEST);
        match events[0].payload() {
            Payload::RequestNavigation(navigation) => {
                assert_eq!(navigation.request_id(), "r-1");
                assert_eq!(navigation.request_type(), "history");
                assert_eq!(navigation.action(), RequestAction::Open);
            }
            other => panic!("Expected RequestNavigation payload, got {other:?}"),
        }
    }

    #[test]
    fn test_navigation_helpers() {
        let node = Node::new();
        let events = record(&node, &all_types());

        navigate(&node, "history", None).unwrap();
        navigate_rest_api(&node, "api-1", "1.0", RestApiAction::List).unwrap();
        navigate_project(&node, "p-1", Some(ProjectAction::AddWorkspace)).unwrap();
        popup_menu(&node, "saved-menu").unwrap();
        navigate_external(
            &node,
            "https://example.com",
            Some(ExternalNavigationOptions::with_purpose("cookie-session")),
        )
        .unwrap();
        help_topic(&node, "environments").unwrap();

        let events = events.lock().unwrap();
        let types: Vec<&str> = events.iter().map(|event| event.event_type()).collect();
        assert_eq!(
            types,
            vec![
                event_types::navigation::NAVIGATE,
                event_types::navigation::NAVIGATE_REST_API,
                event_types::navigation::NAVIGATE_PROJECT,
                event_types::navigation::POPUP_MENU,
                event_types::navigation::NAVIGATE_EXTERNAL,
                event_types::navigation::HELP_TOPIC,
            ]
        );

        match events[2].payload() {
            Payload::ProjectNavigation(project) => {
                assert_eq!(project.id(), "p-1");
                assert_eq!(project.action(), ProjectAction::AddWorkspace);
            }
            other => panic!("Expected ProjectNavigation payload, got {other:?}"),
        }
        match events[4].payload() {
            Payload::ExternalNavigation(external) => {
                assert_eq!(external.url(), "https://example.com");
                assert_eq!(external.purpose(), Some("cookie-session"));
            }
            other => panic!("Expected ExternalNavigation payload, got {other:?}"),
        }
    }

    #[test]
    fn test_request_state_helpers() {
        let node = Node::new();
        let events = record(&node, &all_types());

        inform_send_action(&node).unwrap();
        state_url_change_action(&node, "https://example.com/v2").unwrap();
        state_content_type_action(&node, "text/plain").unwrap();

        let events = events.lock().unwrap();
        assert_eq!(events.len(), 3);
        assert_eq!(events[0].event_type(), event_types::request::SEND);
        assert!(events[0].cancelable());

        match events[1].payload() {
            Payload::RequestChange(change) => {
                assert_eq!(change.changed_property(), "url");
                assert_eq!(change.changed_value(), "https://example.com/v2");
            }
            other => panic!("Expected RequestChange payload, got {other:?}"),
        }
        assert_eq!(
            events[2].event_type(),
            event_types::request::state::CONTENT_TYPE_CHANGE
        );
    }

    #[test]
    fn test_response_action_shares_payloads() {
        let node = Node::new();
        let events = record(&node, &[event_types::transport::RESPONSE]);

        let source = Arc::new(BaseRequest::new("https://example.com/items"));
        let request = Arc::new(transport_request());
        let response = Arc::new(TransportResponse::from(Response {
            status: 200,
            status_text: "OK".to_string(),
            headers: String::new(),
            payload: Some("[]".to_string()),
            loading_time: 15.0,
        }));

        response_action(
            &node,
            "t-9",
            source.clone(),
            request.clone(),
            response.clone(),
        )
        .unwrap();

        let events = events.lock().unwrap();
        assert_eq!(events.len(), 1);
        match events[0].payload() {
            Payload::ApiResponse(detail) => {
                assert_eq!(detail.id(), "t-9");
                assert!(Arc::ptr_eq(detail.source(), &source));
                assert!(Arc::ptr_eq(detail.request(), &request));
                assert!(Arc::ptr_eq(detail.response(), &response));
            }
            other => panic!("Expected ApiResponse payload, got {other:?}"),
        }
    }

    #[test]
    fn test_process_response_uses_its_own_type() {
        let node = Node::new();
        let raw = record(&node, &[event_types::transport::RESPONSE]);
        let processed = record(&node, &[event_types::transport::PROCESS_RESPONSE]);

        process_response_action(
            &node,
            "t-1",
            BaseRequest::new("https://example.com"),
            transport_request(),
            TransportResponse::from(Response {
                status: 500,
                status_text: "Internal Server Error".to_string(),
                headers: String::new(),
                payload: None,
                loading_time: 3.0,
            }),
        )
        .unwrap();

        assert!(raw.lock().unwrap().is_empty());
        assert_eq!(processed.lock().unwrap().len(), 1);
    }

    #[test]
    fn test_transport_helpers() {
        let node = Node::new();
        let events = record(&node, &all_types());

        let editor_request = Arc::new(EditorRequest::new(
            "t-2",
            BaseRequest::new("https://example.com"),
        ));
        send_action(&node, editor_request.clone()).unwrap();
        transport_action(&node, "t-2", editor_request.request.clone(), None).unwrap();
        abort_action(&node, "t-2").unwrap();

        let events = events.lock().unwrap();
        assert_eq!(events.len(), 3);
        match events[0].payload() {
            Payload::ApiRequest(api_request) => {
                assert!(Arc::ptr_eq(api_request.request(), &editor_request));
            }
            other => panic!("Expected ApiRequest payload, got {other:?}"),
        }
        match events[1].payload() {
            Payload::ApiTransport(transport) => {
                assert_eq!(transport.id(), "t-2");
                assert!(!transport.config().enabled);
            }
            other => panic!("Expected ApiTransport payload, got {other:?}"),
        }
        for event in events.iter() {
            assert_eq!(event.payload().request_id(), Some("t-2"));
        }
    }

    #[test]
    fn test_websocket_helpers() {
        let node = Node::new();
        let events = record(&node, &all_types());
        let editor_request = Arc::new(
            WebsocketEditorRequest::new("ws-1", "wss://echo.example").with_payload("ping"),
        );

        inform_connect_action(&node, editor_request.clone()).unwrap();
        inform_web_socket_send_action(&node, editor_request.clone()).unwrap();
        inform_disconnect_action(&node, editor_request.clone()).unwrap();

        let events = events.lock().unwrap();
        let types: Vec<&str> = events.iter().map(|event| event.event_type()).collect();
        assert_eq!(
            types,
            vec![
                event_types::transport::CONNECT,
                event_types::transport::CONNECTION_SEND,
                event_types::transport::DISCONNECT,
            ]
        );
        for event in events.iter() {
            match event.payload() {
                Payload::Websocket(websocket) => {
                    assert!(Arc::ptr_eq(websocket.editor_request(), &editor_request));
                }
                other => panic!("Expected Websocket payload, got {other:?}"),
            }
        }
    }

    #[test]
    fn test_workspace_append_action() {
        let node = Node::new();
        let events = record(&node, &[event_types::request::workspace::APPEND]);
        let request = Arc::new(BaseRequest::new("https://example.com").with_method("DELETE"));

        workspace_append_action(&node, request.clone()).unwrap();

        let events = events.lock().unwrap();
        match events[0].payload() {
            Payload::WorkspaceAppend(append) => assert!(Arc::ptr_eq(append.request(), &request)),
            other => panic!("Expected WorkspaceAppend payload, got {other:?}"),
        }
    }

    #[test]
    fn test_helpers_propagate_dispatch_errors() {
        let node = Node::new();
        let weak = node.downgrade();
        drop(node);

        let err = abort_action(&weak, "t-3").unwrap_err();
        assert!(matches!(err, DispatchError::Detached { .. }));
        assert!(help_topic(&weak, "auth").is_err());
    }

    #[test]
    fn test_helpers_work_through_trait_objects() {
        let node = Node::new();
        let events = record(&node, &[event_types::navigation::HELP_TOPIC]);
        let target: &dyn EventTarget = &node;

        help_topic(target, "proxy").unwrap();
        assert_eq!(events.lock().unwrap().len(), 1);
    }
}
