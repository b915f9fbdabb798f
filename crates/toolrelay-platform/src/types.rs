//! Wire types for the platform HTTP API.

use serde::{Deserialize, Serialize};

/// Catalog format requested from the platform.
pub const CATALOG_FORMAT: &str = "openai";

/// Response of `GET /v1/formatted_tools`.
///
/// Items are kept as raw JSON; validating them is the schema adapter's job.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ListToolsResponse {
    /// Raw tool description records.
    #[serde(default)]
    pub items: Vec<serde_json::Value>,
    /// Total number of tools matching the query, if reported.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub total_count: Option<u64>,
}

impl ListToolsResponse {
    /// The reported total when it exceeds the number of items returned.
    pub fn missing_tools(&self) -> Option<u64> {
        self.total_count
            .filter(|&total| total > self.items.len() as u64)
    }
}

/// Body of `POST /v1/tools/execute`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExecuteToolRequest {
    /// Tool to run.
    pub tool_name: String,
    /// Arguments, already validated against the tool's schema.
    pub input: serde_json::Value,
    /// End user the tool acts for.
    pub user_id: String,
}

/// Response of `POST /v1/tools/execute`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ExecuteToolResponse {
    /// Whether the tool succeeded.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub success: Option<bool>,
    /// Tool output.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub output: Option<ToolOutput>,
}

/// Output section of an execution response.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ToolOutput {
    /// Result value on success.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<serde_json::Value>,
    /// Error details on failure.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<ToolOutputError>,
}

/// Error reported by a tool run.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ToolOutputError {
    /// Human-readable message.
    #[serde(default)]
    pub message: String,
    /// Machine-readable error kind, if the platform provides one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,
}

/// Body of `POST /v1/tools/authorize`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthorizeToolRequest {
    /// Tool needing authorization.
    pub tool_name: String,
    /// End user who must grant it.
    pub user_id: String,
}

/// Response of `POST /v1/tools/authorize`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AuthorizeToolResponse {
    /// URL the user visits to grant access.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    /// Authorization status (`pending`, `completed`, ...).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    /// Platform-side id of the authorization request.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
}
