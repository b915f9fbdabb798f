//! # toolrelay-types
//!
//! Core type definitions shared by every toolrelay crate.
//!
//! - **[`error`]** -- [`RelayError`] for configuration and I/O failures
//! - **[`config`]** -- Configuration schema and file discovery
//! - **[`invocation`]** -- Per-call [`InvocationContext`] and the
//!   [`AuthorizationResponse`] returned when a user must grant access
//! - **[`model`]** -- Version-pinned [`ModelHandle`]
//! - **[`secret`]** -- [`SecretString`] for API keys

pub mod config;
pub mod error;
pub mod invocation;
pub mod model;
pub mod secret;

pub use error::{RelayError, Result};
pub use invocation::{AUTHORIZATION_MESSAGE, AuthorizationResponse, InvocationContext};
pub use model::ModelHandle;
pub use secret::SecretString;
