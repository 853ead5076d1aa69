// SPDX-License-Identifier: MIT OR Apache-2.0
//! Handler request and progress contract with the orchestration engine.

use lfh_error::{HandlerError, HandlerErrorCode};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// Lifecycle operation requested by the orchestration engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Action {
    /// Create the resource.
    Create,
    /// Read current state of the resource.
    Read,
    /// Replace the resource with the desired state.
    Update,
    /// Remove the resource.
    Delete,
    /// Enumerate resources, one page per call.
    List,
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Create => "CREATE",
            Self::Read => "READ",
            Self::Update => "UPDATE",
            Self::Delete => "DELETE",
            Self::List => "LIST",
        };
        f.write_str(s)
    }
}

/// Terminal state of a single handler invocation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum OperationStatus {
    /// The remote call succeeded.
    Success,
    /// The invocation failed with a classified error.
    Failed,
}

/// Opaque retry state owned by the orchestration engine.
///
/// Handlers accept it and never read or write it; every operation here
/// resolves in one call.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CallbackContext {
    /// Engine-defined entries.
    pub entries: BTreeMap<String, serde_json::Value>,
}

/// One invocation's input.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HandlerRequest<M> {
    /// State the caller declared.
    pub desired_resource_state: M,
    /// State before an update, when the engine supplies it.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub previous_resource_state: Option<M>,
    /// Continuation token for list requests.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub next_token: Option<String>,
    /// Owning stack, used for log correlation only.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stack_id: Option<String>,
    /// Logical id of the resource in its template.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub logical_resource_identifier: Option<String>,
    /// Idempotency token of the engine's request.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub client_request_token: Option<String>,
}

impl<M> HandlerRequest<M> {
    /// Request carrying only the desired state.
    pub fn new(desired_resource_state: M) -> Self {
        Self {
            desired_resource_state,
            previous_resource_state: None,
            next_token: None,
            stack_id: None,
            logical_resource_identifier: None,
            client_request_token: None,
        }
    }

    /// Set the previous state.
    pub fn with_previous_state(mut self, previous: M) -> Self {
        self.previous_resource_state = Some(previous);
        self
    }

    /// Set the list continuation token.
    pub fn with_next_token(mut self, token: impl Into<String>) -> Self {
        self.next_token = Some(token.into());
        self
    }

    /// Set the stack id.
    pub fn with_stack_id(mut self, stack_id: impl Into<String>) -> Self {
        self.stack_id = Some(stack_id.into());
        self
    }
}

/// The single result a handler returns to the engine.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProgressEvent<M> {
    /// Success or failure.
    pub status: OperationStatus,
    /// Model read back from the service (read only).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub resource_model: Option<M>,
    /// Models on this page (list only).
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub resource_models: Vec<M>,
    /// Token for the next list page; absent on the last page.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub next_token: Option<String>,
    /// Classified failure kind.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error_code: Option<HandlerErrorCode>,
    /// Failure message.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl<M> ProgressEvent<M> {
    /// Success with no payload.
    pub fn success() -> Self {
        Self {
            status: OperationStatus::Success,
            resource_model: None,
            resource_models: Vec::new(),
            next_token: None,
            error_code: None,
            message: None,
        }
    }

    /// Success carrying one model.
    pub fn success_with_model(model: M) -> Self {
        Self {
            resource_model: Some(model),
            ..Self::success()
        }
    }

    /// Success carrying a page of models.
    pub fn success_with_models(models: Vec<M>, next_token: Option<String>) -> Self {
        Self {
            resource_models: models,
            next_token,
            ..Self::success()
        }
    }

    /// Failure with a classified error.
    pub fn failed(error: &HandlerError) -> Self {
        Self {
            status: OperationStatus::Failed,
            resource_model: None,
            resource_models: Vec::new(),
            next_token: None,
            error_code: Some(error.code),
            message: Some(error.message.clone()),
        }
    }

    /// Whether the invocation succeeded.
    pub fn is_success(&self) -> bool {
        self.status == OperationStatus::Success
    }
}
