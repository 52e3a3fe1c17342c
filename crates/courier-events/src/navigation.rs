// ABOUTME: Navigation envelopes: application routes, menus, external links and help topics
// ABOUTME: Immutable values; every parameter is exposed through a read-only accessor

use std::borrow::Cow;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::action::{ProjectAction, RequestAction, RestApiAction};
use crate::event::{Envelope, Payload};
use crate::event_types::{navigation, routes};

/// Navigation to a base route under a caller-chosen event type.
///
/// The typed navigation events below all carry a route too; use this one for
/// custom navigation events that need nothing but the route.
#[derive(Debug, Clone, PartialEq)]
pub struct RouteNavigation {
    event_type: Cow<'static, str>,
    route: String,
}

impl RouteNavigation {
    pub fn new(event_type: impl Into<Cow<'static, str>>, route: impl Into<String>) -> Self {
        Self {
            event_type: event_type.into(),
            route: route.into(),
        }
    }

    pub fn route(&self) -> &str {
        &self.route
    }
}

impl Envelope for RouteNavigation {
    fn event_type(&self) -> Cow<'static, str> {
        self.event_type.clone()
    }

    fn into_payload(self) -> Payload {
        Payload::Route(self)
    }
}

/// General purpose navigation. Prefer the typed events when one matches.
#[derive(Debug, Clone, PartialEq)]
pub struct Navigation {
    route: String,
    options: Value,
}

impl Navigation {
    /// `options` are free-form route parameters; `None` becomes an empty object.
    pub fn new(route: impl Into<String>, options: Option<Value>) -> Self {
        Self {
            route: route.into(),
            options: options.unwrap_or_else(|| Value::Object(Default::default())),
        }
    }

    pub fn route(&self) -> &str {
        &self.route
    }

    pub fn options(&self) -> &Value {
        &self.options
    }
}

impl Envelope for Navigation {
    fn event_type(&self) -> Cow<'static, str> {
        Cow::Borrowed(navigation::NAVIGATE)
    }

    fn into_payload(self) -> Payload {
        Payload::Navigation(self)
    }
}

/// Navigation to a saved or history request.
#[derive(Debug, Clone, PartialEq)]
pub struct RequestNavigation {
    request_id: String,
    request_type: String,
    action: RequestAction,
}

impl RequestNavigation {
    /// An omitted action opens the request.
    pub fn new(
        request_id: impl Into<String>,
        request_type: impl Into<String>,
        action: Option<RequestAction>,
    ) -> Self {
        Self {
            request_id: request_id.into(),
            request_type: request_type.into(),
            action: action.unwrap_or_default(),
        }
    }

    pub fn route(&self) -> &'static str {
        routes::REQUEST
    }

    pub fn request_id(&self) -> &str {
        &self.request_id
    }

    /// The kind of stored request, e.g. `saved` or `history`
    pub fn request_type(&self) -> &str {
        &self.request_type
    }

    pub fn action(&self) -> RequestAction {
        self.action
    }
}

impl Envelope for RequestNavigation {
    fn event_type(&self) -> Cow<'static, str> {
        Cow::Borrowed(navigation::NAVIGATE_REQUEST)
    }

    fn into_payload(self) -> Payload {
        Payload::RequestNavigation(self)
    }
}

/// Navigation to a REST API. The action is required: there is no sensible default view.
#[derive(Debug, Clone, PartialEq)]
pub struct RestApiNavigation {
    api: String,
    version: String,
    action: RestApiAction,
}

impl RestApiNavigation {
    pub fn new(api: impl Into<String>, version: impl Into<String>, action: RestApiAction) -> Self {
        Self {
            api: api.into(),
            version: version.into(),
            action,
        }
    }

    pub fn route(&self) -> &'static str {
        routes::REST_API
    }

    /// Id of the REST API index entry
    pub fn api(&self) -> &str {
        &self.api
    }

    pub fn version(&self) -> &str {
        &self.version
    }

    pub fn action(&self) -> RestApiAction {
        self.action
    }
}

impl Envelope for RestApiNavigation {
    fn event_type(&self) -> Cow<'static, str> {
        Cow::Borrowed(navigation::NAVIGATE_REST_API)
    }

    fn into_payload(self) -> Payload {
        Payload::RestApiNavigation(self)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ProjectNavigation {
    id: String,
    action: ProjectAction,
}

impl ProjectNavigation {
    /// An omitted action opens the project screen.
    pub fn new(id: impl Into<String>, action: Option<ProjectAction>) -> Self {
        Self {
            id: id.into(),
            action: action.unwrap_or_default(),
        }
    }

    pub fn route(&self) -> &'static str {
        routes::PROJECT
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn action(&self) -> ProjectAction {
        self.action
    }
}

impl Envelope for ProjectNavigation {
    fn event_type(&self) -> Cow<'static, str> {
        Cow::Borrowed(navigation::NAVIGATE_PROJECT)
    }

    fn into_payload(self) -> Payload {
        Payload::ProjectNavigation(self)
    }
}

/// Pops a menu out to a new window.
#[derive(Debug, Clone, PartialEq)]
pub struct MenuPopup {
    menu: String,
}

impl MenuPopup {
    pub fn new(menu: impl Into<String>) -> Self {
        Self { menu: menu.into() }
    }

    pub fn menu(&self) -> &str {
        &self.menu
    }
}

impl Envelope for MenuPopup {
    fn event_type(&self) -> Cow<'static, str> {
        Cow::Borrowed(navigation::POPUP_MENU)
    }

    fn into_payload(self) -> Payload {
        Payload::MenuPopup(self)
    }
}

/// Options of an external navigation.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExternalNavigationOptions {
    /// Free-form hint that lets listeners tell different kinds of
    /// navigation apart. Not interpreted here.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub purpose: Option<String>,
}

impl ExternalNavigationOptions {
    pub fn with_purpose(purpose: impl Into<String>) -> Self {
        Self {
            purpose: Some(purpose.into()),
        }
    }
}

/// Opens a URL outside of the application.
#[derive(Debug, Clone, PartialEq)]
pub struct ExternalNavigation {
    url: String,
    options: ExternalNavigationOptions,
}

impl ExternalNavigation {
    pub fn new(url: impl Into<String>, options: Option<ExternalNavigationOptions>) -> Self {
        Self {
            url: url.into(),
            options: options.unwrap_or_default(),
        }
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    pub fn options(&self) -> &ExternalNavigationOptions {
        &self.options
    }

    pub fn purpose(&self) -> Option<&str> {
        self.options.purpose.as_deref()
    }
}

impl Envelope for ExternalNavigation {
    fn event_type(&self) -> Cow<'static, str> {
        Cow::Borrowed(navigation::NAVIGATE_EXTERNAL)
    }

    fn into_payload(self) -> Payload {
        Payload::ExternalNavigation(self)
    }
}

/// The user asked for a help topic.
#[derive(Debug, Clone, PartialEq)]
pub struct HelpTopic {
    topic: String,
}

impl HelpTopic {
    pub fn new(topic: impl Into<String>) -> Self {
        Self {
            topic: topic.into(),
        }
    }

    pub fn topic(&self) -> &str {
        &self.topic
    }
}

impl Envelope for HelpTopic {
    fn event_type(&self) -> Cow<'static, str> {
        Cow::Borrowed(navigation::HELP_TOPIC)
    }

    fn into_payload(self) -> Payload {
        Payload::HelpTopic(self)
    }
}
