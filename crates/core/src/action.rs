use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// The directive used when the trigger payload does not carry an `action`.
pub const DEFAULT_ACTION: Action = Action::Stop;

/// The directive driving a toggle: bring the environment up or take it down.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Action {
    Start,
    Stop,
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Unknown action: {0}")]
pub struct UnknownActionError(pub String);

impl Action {
    /// Resolves the raw `action` field of a trigger payload, applying the
    /// `stop` default when it is absent.
    pub fn resolve(raw: Option<&str>) -> Result<Self, UnknownActionError> {
        match raw {
            Some(value) => value.parse(),
            None => Ok(DEFAULT_ACTION),
        }
    }

    /// Number of tasks the container service should run after this directive.
    pub fn desired_count(&self) -> i32 {
        match self {
            Action::Stop => 0,
            Action::Start => 1,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Action::Start => "start",
            Action::Stop => "stop",
        }
    }
}

impl FromStr for Action {
    type Err = UnknownActionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "start" => Ok(Action::Start),
            "stop" => Ok(Action::Stop),
            other => Err(UnknownActionError(other.to_string())),
        }
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
