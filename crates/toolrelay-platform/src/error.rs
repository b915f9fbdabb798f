//! Platform error types.

use thiserror::Error;

/// Errors produced while talking to the tool platform.
#[derive(Error, Debug)]
pub enum PlatformError {
    /// The request never produced an HTTP response (connect, timeout, TLS).
    #[error("platform transport error: {0}")]
    Transport(String),

    /// The platform rejected our API key (HTTP 401).
    #[error("platform authentication failed: {0}")]
    AuthenticationFailed(String),

    /// The end user has not authorized the tool yet.
    #[error("authorization required for tool '{tool}': {message}")]
    AuthorizationRequired {
        /// Tool that needs authorization.
        tool: String,
        /// Platform-supplied explanation.
        message: String,
    },

    /// The tool ran and reported a failure.
    #[error("tool '{tool}' failed: {message}")]
    ToolFailed {
        /// Tool that failed.
        tool: String,
        /// Platform-supplied error message.
        message: String,
    },

    /// Any other non-success HTTP status.
    #[error("platform returned HTTP {status}: {message}")]
    Api {
        /// HTTP status code.
        status: u16,
        /// Error message extracted from the body.
        message: String,
    },

    /// The response body did not have the expected shape.
    #[error("invalid platform response: {0}")]
    InvalidResponse(String),

    /// JSON serialization / deserialization error.
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
}

impl PlatformError {
    /// Whether this error means the user must authorize the tool.
    pub fn is_authorization_required(&self) -> bool {
        matches!(self, PlatformError::AuthorizationRequired { .. })
    }
}

/// Convenience alias for results in this crate.
pub type Result<T> = std::result::Result<T, PlatformError>;
