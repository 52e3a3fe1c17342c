// ABOUTME: Closed action enumerations carried by the typed navigation events
// ABOUTME: Actions render to and parse from their wire strings

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Returned when an action string is not part of the closed enumeration.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown {kind} action: {value:?}")]
pub struct ActionParseError {
    pub kind: &'static str,
    pub value: String,
}

/// What to do with a saved or history request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum RequestAction {
    /// Open the request in the current workspace
    #[default]
    Open,
    /// Show request details
    Detail,
    /// Edit request meta data
    Edit,
}

/// Which view of a REST API to show.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum RestApiAction {
    List,
    Documentation,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ProjectAction {
    /// Opens the project screen
    #[default]
    Open,
    /// Edits project meta
    Edit,
    /// Clears the workspace and adds the project requests to it
    ReplaceWorkspace,
    /// Adds the project requests to the current workspace
    AddWorkspace,
}

impl RequestAction {
    pub const ALL: [RequestAction; 3] = [Self::Open, Self::Detail, Self::Edit];

    pub fn as_str(&self) -> &'static str {
        match self {
            RequestAction::Open => "open",
            RequestAction::Detail => "detail",
            RequestAction::Edit => "edit",
        }
    }
}

impl RestApiAction {
    pub const ALL: [RestApiAction; 2] = [Self::List, Self::Documentation];

    pub fn as_str(&self) -> &'static str {
        match self {
            RestApiAction::List => "list",
            RestApiAction::Documentation => "documentation",
        }
    }
}

impl ProjectAction {
    pub const ALL: [ProjectAction; 4] = [
        Self::Open,
        Self::Edit,
        Self::ReplaceWorkspace,
        Self::AddWorkspace,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ProjectAction::Open => "open",
            ProjectAction::Edit => "edit",
            ProjectAction::ReplaceWorkspace => "replaceWorkspace",
            ProjectAction::AddWorkspace => "addWorkspace",
        }
    }
}

macro_rules! impl_action_str {
    ($action:ty, $kind:literal) => {
        impl fmt::Display for $action {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl FromStr for $action {
            type Err = ActionParseError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                Self::ALL
                    .into_iter()
                    .find(|action| action.as_str() == s)
                    .ok_or_else(|| ActionParseError {
                        kind: $kind,
                        value: s.to_string(),
                    })
            }
        }
    };
}

impl_action_str!(RequestAction, "request");
impl_action_str!(RestApiAction, "rest api");
impl_action_str!(ProjectAction, "project");
