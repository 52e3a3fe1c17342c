// ABOUTME: Event type string registries shared by dispatchers and listeners
// ABOUTME: Read-only constant tables; the strings are the wire contract between UI and logic

/// Navigation events: routing inside the application, menus, external links and help.
pub mod navigation {
    /// General purpose navigation with free-form route options
    pub const NAVIGATE: &str = "navigation-navigate";
    pub const NAVIGATE_REQUEST: &str = "navigation-navigate-request";
    pub const NAVIGATE_REST_API: &str = "navigation-navigate-rest-api";
    pub const NAVIGATE_PROJECT: &str = "navigation-navigate-project";
    /// Pops a menu out to a new window
    pub const POPUP_MENU: &str = "navigation-popup-menu";
    pub const NAVIGATE_EXTERNAL: &str = "navigation-navigate-external";
    pub const HELP_TOPIC: &str = "navigation-help-topic";

    pub const ALL: &[&str] = &[
        NAVIGATE,
        NAVIGATE_REQUEST,
        NAVIGATE_REST_API,
        NAVIGATE_PROJECT,
        POPUP_MENU,
        NAVIGATE_EXTERNAL,
        HELP_TOPIC,
    ];
}

/// Base routes carried by the typed navigation events.
pub mod routes {
    pub const REQUEST: &str = "request";
    pub const REST_API: &str = "rest-api";
    pub const PROJECT: &str = "project";
}

/// Request editor events.
pub mod request {
    /// Asks the request logic to send the current request
    pub const SEND: &str = "request-send";

    /// Changes of the few request properties that are globally interesting.
    pub mod state {
        pub const URL_CHANGE: &str = "request-state-url-change";
        pub const CONTENT_TYPE_CHANGE: &str = "request-state-content-type-change";
    }

    pub mod workspace {
        /// Appends a request to the current workspace
        pub const APPEND: &str = "request-workspace-append";
    }

    pub const ALL: &[&str] = &[
        SEND,
        state::URL_CHANGE,
        state::CONTENT_TYPE_CHANGE,
        workspace::APPEND,
    ];
}

/// HTTP and web socket transport lifecycle.
pub mod transport {
    /// The UI asks to make a request with the current editor data
    pub const REQUEST: &str = "transport-request";
    /// The request is ready to be sent by the HTTP transport
    pub const TRANSPORT: &str = "transport-transport";
    pub const ABORT: &str = "transport-abort";
    /// Raw response received from the transport
    pub const RESPONSE: &str = "transport-response";
    /// Response processed and ready for the UI
    pub const PROCESS_RESPONSE: &str = "transport-process-response";
    pub const CONNECT: &str = "transport-connect";
    pub const DISCONNECT: &str = "transport-disconnect";
    pub const CONNECTION_SEND: &str = "transport-connection-send";

    pub const ALL: &[&str] = &[
        REQUEST,
        TRANSPORT,
        ABORT,
        RESPONSE,
        PROCESS_RESPONSE,
        CONNECT,
        DISCONNECT,
        CONNECTION_SEND,
    ];
}

/// Every known event type, paired with its logical name.
pub const CATALOG: &[(&str, &str)] = &[
    ("navigation.navigate", navigation::NAVIGATE),
    ("navigation.navigateRequest", navigation::NAVIGATE_REQUEST),
    ("navigation.navigateRestApi", navigation::NAVIGATE_REST_API),
    ("navigation.navigateProject", navigation::NAVIGATE_PROJECT),
    ("navigation.popupMenu", navigation::POPUP_MENU),
    ("navigation.navigateExternal", navigation::NAVIGATE_EXTERNAL),
    ("navigation.helpTopic", navigation::HELP_TOPIC),
    ("request.send", request::SEND),
    ("request.state.urlChange", request::state::URL_CHANGE),
    (
        "request.state.contentTypeChange",
        request::state::CONTENT_TYPE_CHANGE,
    ),
    ("request.workspace.append", request::workspace::APPEND),
    ("transport.request", transport::REQUEST),
    ("transport.transport", transport::TRANSPORT),
    ("transport.abort", transport::ABORT),
    ("transport.response", transport::RESPONSE),
    ("transport.processResponse", transport::PROCESS_RESPONSE),
    ("transport.connect", transport::CONNECT),
    ("transport.disconnect", transport::DISCONNECT),
    ("transport.connectionSend", transport::CONNECTION_SEND),
];

/// Logical name of a known event type, e.g. `transport.connect`.
pub fn name_of(event_type: &str) -> Option<&'static str> {
    CATALOG
        .iter()
        .find(|(_, value)| *value == event_type)
        .map(|(name, _)| *name)
}

/// Event type registered under a logical name.
pub fn lookup(name: &str) -> Option<&'static str> {
    CATALOG
        .iter()
        .find(|(key, _)| *key == name)
        .map(|(_, value)| *value)
}

pub fn is_known(event_type: &str) -> bool {
    name_of(event_type).is_some()
}
