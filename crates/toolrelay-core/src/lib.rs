//! Core engine for toolrelay.
//!
//! Turns a platform's tool catalog into an agent:
//!
//! - [`tools::schema`] compiles parameter schemas into input validators
//! - [`tools::descriptor`] validates raw catalog records
//! - [`tools::platform_tool`] executes adapted tools on the platform and
//!   recovers from missing user authorization
//! - [`tools::registry`] holds the resulting tools by name
//! - [`agent`] assembles the single agent handed to the orchestration runtime

pub mod agent;
pub mod tools;

pub use agent::{Agent, AgentBuilder, AgentError};
pub use tools::registry::{Tool, ToolError, ToolRegistry};
