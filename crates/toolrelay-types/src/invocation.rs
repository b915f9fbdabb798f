//! Per-call invocation types.
//!
//! Every tool execution receives an [`InvocationContext`] naming the end
//! user on whose behalf the platform acts. When the platform reports that
//! the user has not granted access yet, the tool returns an
//! [`AuthorizationResponse`] instead of failing.

use serde::{Deserialize, Serialize};

/// Message attached to every [`AuthorizationResponse`].
pub const AUTHORIZATION_MESSAGE: &str = "Forward this url to the user for authorization";

/// Context for a single tool invocation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InvocationContext {
    /// Platform-side identifier of the end user.
    pub user_id: String,
}

impl InvocationContext {
    /// Create a context for the given user.
    pub fn new(user_id: impl Into<String>) -> Self {
        Self {
            user_id: user_id.into(),
        }
    }
}

/// Returned in place of a tool result when the user must authorize access.
///
/// Serializes as `{"authorizationRequired": true, "url": ..., "message": ...}`
/// so the model can relay the URL to the user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthorizationResponse {
    /// Always `true`; lets the model detect this shape.
    pub authorization_required: bool,
    /// URL the user must visit to grant access.
    pub url: String,
    /// Instruction for the model.
    pub message: String,
}

impl AuthorizationResponse {
    /// Build a response for the given authorization URL.
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            authorization_required: true,
            url: url.into(),
            message: AUTHORIZATION_MESSAGE.to_string(),
        }
    }

    /// Convert to the JSON value handed back to the orchestration runtime.
    pub fn to_value(&self) -> serde_json::Result<serde_json::Value> {
        serde_json::to_value(self)
    }
}
