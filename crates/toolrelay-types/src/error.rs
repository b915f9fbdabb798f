//! Error types shared across toolrelay.
//!
//! [`RelayError`] covers failures that happen before any tool runs:
//! loading configuration, resolving credentials, parsing model handles.
//! Runtime failures have their own enums in the crates that produce them.

use thiserror::Error;

/// Top-level error type for configuration and setup.
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum RelayError {
    /// Configuration is malformed or semantically invalid.
    #[error("invalid config: {reason}")]
    ConfigInvalid {
        /// What is wrong with the configuration.
        reason: String,
    },

    /// The config file named by the caller does not exist.
    #[error("config file not found: {0}")]
    ConfigNotFound(String),

    /// A model identifier could not be parsed.
    #[error("invalid model handle: {0}")]
    InvalidModel(String),

    /// Underlying I/O error.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization / deserialization error.
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
}

/// A convenience alias used throughout the crate.
pub type Result<T> = std::result::Result<T, RelayError>;
