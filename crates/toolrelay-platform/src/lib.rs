//! Client for the hosted tool platform.
//!
//! The platform hosts pre-built, authenticated integrations. This crate
//! talks to its three endpoints over pluggable transports:
//!
//! - catalog listing ([`PlatformClient::list_tools`])
//! - tool execution ([`PlatformClient::execute_tool`])
//! - authorization initiation ([`PlatformClient::authorize_tool`])
//!
//! Failures are classified once, here, into [`PlatformError`]. Callers
//! decide what to do with [`PlatformError::AuthorizationRequired`] without
//! inspecting message text.

pub mod classify;
pub mod client;
pub mod error;
pub mod transport;
pub mod types;

pub use client::PlatformClient;
pub use error::{PlatformError, Result};
pub use transport::{HttpTransport, PlatformTransport};
