use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use thiserror::Error;

use crate::{
    action::{Action, UnknownActionError, DEFAULT_ACTION},
    aws::UpstreamError,
};

/// The trigger payload: `{"action": "start" | "stop"}`.
///
/// A missing `action` and an explicit `null` are different: only the former
/// falls back to the `stop` default.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ToggleRequest {
    #[serde(default, deserialize_with = "present", skip_serializing_if = "Option::is_none")]
    pub action: Option<Value>,
}

/// Keeps any value that is present in the payload, `null` included.
fn present<'de, D>(deserializer: D) -> Result<Option<Value>, D::Error>
where
    D: Deserializer<'de>,
{
    Value::deserialize(deserializer).map(Some)
}

impl ToggleRequest {
    pub fn new(action: impl Into<String>) -> Self {
        Self { action: Some(Value::String(action.into())) }
    }

    /// The action as it arrived, rendered for logs and errors. Non-string
    /// values are rendered as JSON (`null`, `1`).
    pub fn action_token(&self) -> String {
        match &self.action {
            None => DEFAULT_ACTION.as_str().to_string(),
            Some(Value::String(action)) => action.clone(),
            Some(other) => other.to_string(),
        }
    }

    /// Resolves the directive; only a missing field takes the default.
    pub fn directive(&self) -> Result<Action, UnknownActionError> {
        match &self.action {
            None => Ok(DEFAULT_ACTION),
            Some(Value::String(action)) => action.parse(),
            Some(other) => Err(UnknownActionError(other.to_string())),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ToggleResult {
    pub status: String,
    pub ecs_desired_count: i32,
    pub db_instance: String,
    pub ecs_response: Value,
    pub rds_response: Value,
}

#[derive(Error, Debug)]
pub enum ToggleError {
    #[error("Unknown action: {0}")]
    InvalidAction(String),

    #[error("{0}")]
    ContainerScaling(#[source] UpstreamError),

    #[error("{0}")]
    DatabaseLifecycle(#[source] UpstreamError),
}

impl ToggleError {
    /// The offending token when the directive was not recognised.
    pub fn invalid_action(&self) -> Option<&str> {
        match self {
            ToggleError::InvalidAction(action) => Some(action),
            _ => None,
        }
    }
}
