//! Platform transport implementations.
//!
//! Provides the [`PlatformTransport`] trait and:
//! - [`HttpTransport`]: JSON over HTTPS with a bearer API key
//! - `MockTransport` (tests and the `test-utils` feature): returns
//!   pre-programmed responses and records every request

use std::time::Duration;

use async_trait::async_trait;
use tracing::debug;

use toolrelay_types::SecretString;

use crate::error::{PlatformError, Result};

/// HTTP method of a platform request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Method {
    Get,
    Post,
}

/// A request to the platform API.
#[derive(Debug, Clone, PartialEq)]
pub struct PlatformRequest {
    pub method: Method,
    /// Path relative to the base URL, starting with `/`.
    pub path: String,
    pub query: Vec<(String, String)>,
    pub body: Option<serde_json::Value>,
}

impl PlatformRequest {
    /// A GET request with query parameters.
    pub fn get(path: impl Into<String>, query: Vec<(String, String)>) -> Self {
        Self {
            method: Method::Get,
            path: path.into(),
            query,
            body: None,
        }
    }

    /// A POST request with a JSON body.
    pub fn post(path: impl Into<String>, body: serde_json::Value) -> Self {
        Self {
            method: Method::Post,
            path: path.into(),
            query: Vec::new(),
            body: Some(body),
        }
    }
}

/// A response from the platform API.
///
/// Non-success statuses are returned as values, not errors; the client
/// classifies them.
#[derive(Debug, Clone, PartialEq)]
pub struct PlatformResponse {
    pub status: u16,
    /// Parsed JSON body, or the raw text as a JSON string if it was not JSON.
    pub body: serde_json::Value,
}

impl PlatformResponse {
    /// A response with the given status and body.
    pub fn new(status: u16, body: serde_json::Value) -> Self {
        Self { status, body }
    }

    /// Whether the status is 2xx.
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Transport layer for platform API calls.
#[async_trait]
pub trait PlatformTransport: Send + Sync {
    /// Send a request and return the response.
    ///
    /// Only failures to obtain a response at all are errors.
    async fn send(&self, request: PlatformRequest) -> Result<PlatformResponse>;
}

/// Transport that talks to the platform over HTTP.
pub struct HttpTransport {
    client: reqwest::Client,
    base_url: String,
    api_key: SecretString,
}

impl HttpTransport {
    /// Create a transport for `base_url` authenticating with `api_key`.
    pub fn new(base_url: impl Into<String>, api_key: SecretString, timeout: Duration) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| PlatformError::Transport(format!("failed to build HTTP client: {e}")))?;
        Ok(Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            api_key,
        })
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }
}

impl std::fmt::Debug for HttpTransport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HttpTransport")
            .field("base_url", &self.base_url)
            .field("api_key", &self.api_key)
            .finish_non_exhaustive()
    }
}

#[async_trait]
impl PlatformTransport for HttpTransport {
    async fn send(&self, request: PlatformRequest) -> Result<PlatformResponse> {
        let url = self.url(&request.path);
        debug!(method = ?request.method, url = %url, "sending platform request");

        let builder = match request.method {
            Method::Get => self.client.get(&url).query(&request.query),
            Method::Post => {
                let builder = self.client.post(&url);
                match &request.body {
                    Some(body) => builder.json(body),
                    None => builder,
                }
            }
        };

        let resp = builder
            .bearer_auth(self.api_key.expose())
            .send()
            .await
            .map_err(|e| PlatformError::Transport(format!("HTTP request failed: {e}")))?;

        let status = resp.status().as_u16();
        let text = resp
            .text()
            .await
            .map_err(|e| PlatformError::Transport(format!("failed to read response body: {e}")))?;

        let body = if text.trim().is_empty() {
            serde_json::Value::Null
        } else {
            serde_json::from_str(&text).unwrap_or(serde_json::Value::String(text))
        };

        debug!(status, url = %url, "platform response received");
        Ok(PlatformResponse { status, body })
    }
}

/// A mock transport for testing.
///
/// Returns pre-programmed responses in order and records every request.
#[cfg(any(test, feature = "test-utils"))]
pub struct MockTransport {
    responses: tokio::sync::Mutex<Vec<Result<PlatformResponse>>>,
    requests: std::sync::Arc<tokio::sync::Mutex<Vec<PlatformRequest>>>,
}

#[cfg(any(test, feature = "test-utils"))]
impl MockTransport {
    /// Create a mock transport with pre-programmed responses.
    pub fn new(responses: Vec<PlatformResponse>) -> Self {
        Self::with_results(responses.into_iter().map(Ok).collect())
    }

    /// Create a mock transport whose replies may include transport errors.
    pub fn with_results(responses: Vec<Result<PlatformResponse>>) -> Self {
        Self {
            responses: tokio::sync::Mutex::new(responses),
            requests: std::sync::Arc::new(tokio::sync::Mutex::new(Vec::new())),
        }
    }

    /// Shared handle to the recorded requests, usable after the transport
    /// has been moved into a client.
    pub fn request_log(&self) -> std::sync::Arc<tokio::sync::Mutex<Vec<PlatformRequest>>> {
        std::sync::Arc::clone(&self.requests)
    }
}

#[cfg(any(test, feature = "test-utils"))]
#[async_trait]
impl PlatformTransport for MockTransport {
    async fn send(&self, request: PlatformRequest) -> Result<PlatformResponse> {
        self.requests.lock().await.push(request);
        let mut responses = self.responses.lock().await;
        if responses.is_empty() {
            Err(PlatformError::Transport("no more mock responses".into()))
        } else {
            responses.remove(0)
        }
    }
}
