//! Platform client: catalog listing, tool execution, authorization.

use std::time::Duration;

use tracing::{debug, info, warn};

use toolrelay_types::config::PlatformConfig;

use crate::classify::{classify_body_error, classify_http_error, classify_tool_error, reports_failure};
use crate::error::{PlatformError, Result};
use crate::transport::{HttpTransport, PlatformRequest, PlatformTransport};
use crate::types::{
    AuthorizeToolRequest, AuthorizeToolResponse, CATALOG_FORMAT, ExecuteToolRequest,
    ExecuteToolResponse, ListToolsResponse,
};

const LIST_TOOLS_PATH: &str = "/v1/formatted_tools";
const EXECUTE_TOOL_PATH: &str = "/v1/tools/execute";
const AUTHORIZE_TOOL_PATH: &str = "/v1/tools/authorize";

/// Client for the tool platform.
pub struct PlatformClient {
    transport: Box<dyn PlatformTransport>,
    page_limit: u32,
}

impl std::fmt::Debug for PlatformClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PlatformClient")
            .field("page_limit", &self.page_limit)
            .finish_non_exhaustive()
    }
}

impl PlatformClient {
    /// Create a client over the given transport.
    pub fn new(transport: Box<dyn PlatformTransport>) -> Self {
        Self {
            transport,
            page_limit: 100,
        }
    }

    /// Create an HTTP client from configuration.
    pub fn from_config(config: &PlatformConfig) -> toolrelay_types::Result<Self> {
        let api_key = config.resolve_api_key()?;
        let transport = HttpTransport::new(
            config.base_url.clone(),
            api_key,
            Duration::from_secs(config.timeout_secs),
        )
        .map_err(|e| toolrelay_types::RelayError::ConfigInvalid { reason: e.to_string() })?;
        Ok(Self::new(Box::new(transport)).with_page_limit(config.page_limit))
    }

    /// Set the maximum number of catalog entries requested.
    pub fn with_page_limit(mut self, limit: u32) -> Self {
        self.page_limit = limit;
        self
    }

    /// Fetch the raw tool catalog, optionally filtered to one toolkit.
    ///
    /// Records are returned unvalidated. Errors propagate unchanged.
    pub async fn list_tools(&self, toolkit: Option<&str>) -> Result<Vec<serde_json::Value>> {
        let mut query = vec![
            ("format".to_string(), CATALOG_FORMAT.to_string()),
            ("limit".to_string(), self.page_limit.to_string()),
        ];
        if let Some(toolkit) = toolkit {
            query.push(("toolkit".to_string(), toolkit.to_string()));
        }

        let response = self
            .transport
            .send(PlatformRequest::get(LIST_TOOLS_PATH, query))
            .await?;

        if !response.is_success() {
            return Err(classify_http_error(None, response.status, &response.body));
        }

        let listing: ListToolsResponse = serde_json::from_value(response.body)
            .map_err(|e| PlatformError::InvalidResponse(format!("tool catalog: {e}")))?;

        info!(
            toolkit = toolkit.unwrap_or("*"),
            count = listing.items.len(),
            "fetched tool catalog"
        );
        if let Some(total) = listing.missing_tools() {
            warn!(
                toolkit = toolkit.unwrap_or("*"),
                total,
                fetched = listing.items.len(),
                page_limit = self.page_limit,
                "tool catalog truncated; raise platform.page_limit to load every tool"
            );
        }
        Ok(listing.items)
    }

    /// Execute a tool for a user.
    ///
    /// Returns the tool's output value unchanged on success. Failures are
    /// classified; see [`crate::classify`].
    pub async fn execute_tool(
        &self,
        tool_name: &str,
        input: serde_json::Value,
        user_id: &str,
    ) -> Result<serde_json::Value> {
        let body = serde_json::to_value(ExecuteToolRequest {
            tool_name: tool_name.to_string(),
            input,
            user_id: user_id.to_string(),
        })?;

        debug!(tool = %tool_name, "executing tool on platform");
        let response = self
            .transport
            .send(PlatformRequest::post(EXECUTE_TOOL_PATH, body))
            .await?;

        if !response.is_success() {
            return Err(classify_http_error(Some(tool_name), response.status, &response.body));
        }

        // Bodies without an `output` envelope are passed through as-is
        // unless they report a failure at the top level.
        if response.body.get("output").is_none() {
            if reports_failure(&response.body) {
                return Err(classify_body_error(tool_name, &response.body));
            }
            return Ok(response.body);
        }

        let parsed: ExecuteToolResponse = serde_json::from_value(response.body)
            .map_err(|e| PlatformError::InvalidResponse(format!("tool execution: {e}")))?;
        let output = parsed.output.unwrap_or_default();

        if let Some(err) = output.error {
            return Err(classify_tool_error(tool_name, err.kind.as_deref(), &err.message));
        }
        if parsed.success == Some(false) {
            return Err(PlatformError::ToolFailed {
                tool: tool_name.to_string(),
                message: "tool reported failure without an error message".into(),
            });
        }

        Ok(output.value.unwrap_or(serde_json::Value::Null))
    }

    /// Start authorization of a tool for a user and return the URL to visit.
    pub async fn authorize_tool(&self, tool_name: &str, user_id: &str) -> Result<String> {
        let body = serde_json::to_value(AuthorizeToolRequest {
            tool_name: tool_name.to_string(),
            user_id: user_id.to_string(),
        })?;

        let response = self
            .transport
            .send(PlatformRequest::post(AUTHORIZE_TOOL_PATH, body))
            .await?;

        if !response.is_success() {
            return Err(classify_http_error(None, response.status, &response.body));
        }

        let auth: AuthorizeToolResponse = serde_json::from_value(response.body)
            .map_err(|e| PlatformError::InvalidResponse(format!("authorization: {e}")))?;

        auth.url.ok_or_else(|| {
            PlatformError::InvalidResponse(format!(
                "authorization response has no url (status: {})",
                auth.status.as_deref().unwrap_or("unknown")
            ))
        })
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::transport::{Method, MockTransport, PlatformResponse};

    fn client_with(responses: Vec<PlatformResponse>) -> (PlatformClient, MockLog) {
        let transport = MockTransport::new(responses);
        let log = transport.request_log();
        (PlatformClient::new(Box::new(transport)), log)
    }

    type MockLog = std::sync::Arc<tokio::sync::Mutex<Vec<PlatformRequest>>>;

    #[tokio::test]
    async fn list_tools_sends_format_and_toolkit() {
        let (client, log) = client_with(vec![PlatformResponse::new(
            200,
            json!({"items": [{"type": "function", "function": {"name": "a"}}]}),
        )]);
        let items = client.list_tools(Some("github")).await.unwrap();
        assert_eq!(items.len(), 1);

        let requests = log.lock().await;
        assert_eq!(requests[0].method, Method::Get);
        assert_eq!(requests[0].path, "/v1/formatted_tools");
        assert!(requests[0].query.contains(&("format".into(), "openai".into())));
        assert!(requests[0].query.contains(&("toolkit".into(), "github".into())));
        assert!(requests[0].query.contains(&("limit".into(), "100".into())));
    }

    #[tokio::test]
    async fn list_tools_without_toolkit_omits_filter() {
        let (client, log) = client_with(vec![PlatformResponse::new(200, json!({"items": []}))]);
        let client = client.with_page_limit(7);
        client.list_tools(None).await.unwrap();

        let requests = log.lock().await;
        assert!(!requests[0].query.iter().any(|(k, _)| k == "toolkit"));
        assert!(requests[0].query.contains(&("limit".into(), "7".into())));
    }

    #[tokio::test]
    async fn list_tools_returns_partial_page() {
        let (client, _) = client_with(vec![PlatformResponse::new(
            200,
            json!({"items": [{"name": "a", "description": "", "parameters": {}}], "total_count": 5}),
        )]);
        let client = client.with_page_limit(1);
        let items = client.list_tools(Some("github")).await.unwrap();
        assert_eq!(items.len(), 1);
    }

    #[tokio::test]
    async fn list_tools_propagates_http_error() {
        let (client, _) = client_with(vec![PlatformResponse::new(500, json!({"message": "boom"}))]);
        let err = client.list_tools(Some("github")).await.unwrap_err();
        assert!(matches!(err, PlatformError::Api { status: 500, .. }));
    }

    #[tokio::test]
    async fn list_tools_propagates_transport_error() {
        let (client, _) = client_with(vec![]);
        let err = client.list_tools(None).await.unwrap_err();
        assert!(matches!(err, PlatformError::Transport(_)));
    }

    #[tokio::test]
    async fn execute_tool_returns_output_value() {
        let (client, log) = client_with(vec![PlatformResponse::new(
            200,
            json!({"success": true, "output": {"value": {"id": 42}}}),
        )]);
        let value = client
            .execute_tool("create_issue", json!({"title": "Bug"}), "dev@example.com")
            .await
            .unwrap();
        assert_eq!(value, json!({"id": 42}));

        let requests = log.lock().await;
        assert_eq!(requests[0].path, "/v1/tools/execute");
        let body = requests[0].body.as_ref().unwrap();
        assert_eq!(body["tool_name"], "create_issue");
        assert_eq!(body["user_id"], "dev@example.com");
        assert_eq!(body["input"]["title"], "Bug");
    }

    #[tokio::test]
    async fn execute_tool_passes_bare_body_through() {
        let (client, _) = client_with(vec![PlatformResponse::new(200, json!({"id": 42}))]);
        let value = client.execute_tool("create_issue", json!({}), "u").await.unwrap();
        assert_eq!(value, json!({"id": 42}));
    }

    #[tokio::test]
    async fn execute_tool_top_level_error_is_classified() {
        let (client, _) = client_with(vec![PlatformResponse::new(
            200,
            json!({
                "success": false,
                "error": {"kind": "TOOL_AUTHORIZATION_REQUIRED", "message": "Permission denied"}
            }),
        )]);
        let err = client.execute_tool("create_issue", json!({}), "u").await.unwrap_err();
        assert!(err.is_authorization_required());
    }

    #[tokio::test]
    async fn execute_tool_top_level_failure_without_error_is_tool_failed() {
        let (client, _) = client_with(vec![PlatformResponse::new(200, json!({"success": false}))]);
        let err = client.execute_tool("create_issue", json!({}), "u").await.unwrap_err();
        assert!(matches!(err, PlatformError::ToolFailed { .. }));
    }

    #[tokio::test]
    async fn execute_tool_output_error_with_phrase_is_authorization() {
        let (client, _) = client_with(vec![PlatformResponse::new(
            200,
            json!({"success": false, "output": {"error": {"message": "authorization required"}}}),
        )]);
        let err = client.execute_tool("create_issue", json!({}), "u").await.unwrap_err();
        assert!(err.is_authorization_required());
    }

    #[tokio::test]
    async fn execute_tool_output_error_unrelated_is_tool_failed() {
        let (client, _) = client_with(vec![PlatformResponse::new(
            200,
            json!({"success": false, "output": {"error": {"message": "rate limit exceeded"}}}),
        )]);
        let err = client.execute_tool("create_issue", json!({}), "u").await.unwrap_err();
        assert!(matches!(err, PlatformError::ToolFailed { .. }));
    }

    #[tokio::test]
    async fn execute_tool_failure_without_error_detail() {
        let (client, _) = client_with(vec![PlatformResponse::new(
            200,
            json!({"success": false, "output": {}}),
        )]);
        let err = client.execute_tool("create_issue", json!({}), "u").await.unwrap_err();
        assert!(matches!(err, PlatformError::ToolFailed { .. }));
    }

    #[tokio::test]
    async fn execute_tool_403_is_authorization() {
        let (client, _) = client_with(vec![PlatformResponse::new(403, json!({"message": "forbidden"}))]);
        let err = client.execute_tool("create_issue", json!({}), "u").await.unwrap_err();
        assert!(err.is_authorization_required());
    }

    #[tokio::test]
    async fn authorize_tool_returns_url() {
        let (client, log) = client_with(vec![PlatformResponse::new(
            200,
            json!({"url": "https://platform.example/oauth/xyz", "status": "pending", "id": "ar_1"}),
        )]);
        let url = client.authorize_tool("create_issue", "dev@example.com").await.unwrap();
        assert_eq!(url, "https://platform.example/oauth/xyz");

        let requests = log.lock().await;
        assert_eq!(requests[0].path, "/v1/tools/authorize");
        let body = requests[0].body.as_ref().unwrap();
        assert_eq!(body["tool_name"], "create_issue");
        assert_eq!(body["user_id"], "dev@example.com");
    }

    #[tokio::test]
    async fn authorize_tool_without_url_is_invalid() {
        let (client, _) = client_with(vec![PlatformResponse::new(200, json!({"status": "completed"}))]);
        let err = client.authorize_tool("create_issue", "u").await.unwrap_err();
        match err {
            PlatformError::InvalidResponse(msg) => assert!(msg.contains("completed")),
            other => panic!("expected InvalidResponse, got: {other}"),
        }
    }
}
