//! Failure classification.
//!
//! Turns raw platform failures into [`PlatformError`] variants. Structured
//! signals are checked first (HTTP 403, an error `kind`/`code`/`name`).
//! Platforms that only report free text fall back to matching known
//! phrasings in the message; that match is exact and lives only here.

use crate::error::PlatformError;

/// Error kinds that mean the user has not authorized the tool (lowercase).
const AUTHORIZATION_KINDS: &[&str] = &[
    "authorization_required",
    "tool_authorization_required",
    "permissiondeniederror",
    "permission_denied",
];

/// Known phrasings that mean the same thing, matched as written.
const AUTHORIZATION_PHRASES: &[&str] = &[
    "Permission denied",
    "permission denied",
    "Authorization required",
    "authorization required",
];

/// Whether a machine-readable error kind signals missing authorization.
pub fn is_authorization_kind(kind: &str) -> bool {
    let kind = kind.to_ascii_lowercase();
    AUTHORIZATION_KINDS.contains(&kind.as_str())
}

/// Whether a free-text message signals missing authorization.
pub fn mentions_authorization(message: &str) -> bool {
    AUTHORIZATION_PHRASES.iter().any(|p| message.contains(p))
}

/// Classify an error reported inside a tool's output.
pub fn classify_tool_error(tool: &str, kind: Option<&str>, message: &str) -> PlatformError {
    if kind.is_some_and(is_authorization_kind) || mentions_authorization(message) {
        return PlatformError::AuthorizationRequired {
            tool: tool.to_string(),
            message: message.to_string(),
        };
    }
    PlatformError::ToolFailed {
        tool: tool.to_string(),
        message: message.to_string(),
    }
}

/// Classify a successful HTTP response whose body reports a failure at the
/// top level (`"success": false` or an `error` member) instead of inside
/// an `output` envelope.
pub fn classify_body_error(tool: &str, body: &serde_json::Value) -> PlatformError {
    match body.get("error") {
        Some(err) if !err.is_null() => classify_tool_error(tool, error_kind(body), &error_message(body)),
        _ => PlatformError::ToolFailed {
            tool: tool.to_string(),
            message: "tool reported failure without an error message".into(),
        },
    }
}

/// Whether a body without an `output` envelope still reports a failure.
pub fn reports_failure(body: &serde_json::Value) -> bool {
    body.get("success").and_then(|v| v.as_bool()) == Some(false)
        || body.get("error").is_some_and(|e| !e.is_null())
}

/// Classify a non-success HTTP response from a tool endpoint.
///
/// `tool` is `None` for catalog requests, which never produce
/// [`PlatformError::AuthorizationRequired`].
pub fn classify_http_error(tool: Option<&str>, status: u16, body: &serde_json::Value) -> PlatformError {
    let message = error_message(body);

    if status == 401 {
        return PlatformError::AuthenticationFailed(message);
    }

    if let Some(tool) = tool {
        let structured = status == 403 || error_kind(body).is_some_and(is_authorization_kind);
        if structured || mentions_authorization(&message) {
            return PlatformError::AuthorizationRequired {
                tool: tool.to_string(),
                message,
            };
        }
    }

    PlatformError::Api { status, message }
}

/// Pull a message out of an error body.
///
/// Accepts `{"message": ..}`, `{"error": {"message": ..}}`,
/// `{"error": ".."}`, or a bare string body.
pub fn error_message(body: &serde_json::Value) -> String {
    let candidates = [
        body.get("message"),
        body.get("error").and_then(|e| e.get("message")),
        body.get("error"),
        Some(body),
    ];
    candidates
        .into_iter()
        .flatten()
        .find_map(|v| v.as_str())
        .map(str::to_string)
        .unwrap_or_else(|| body.to_string())
}

/// Pull a machine-readable kind out of an error body.
fn error_kind(body: &serde_json::Value) -> Option<&str> {
    ["kind", "code", "name"].iter().find_map(|key| {
        body.get(*key)
            .or_else(|| body.get("error").and_then(|e| e.get(*key)))
            .and_then(|v| v.as_str())
    })
}
