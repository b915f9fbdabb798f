//! Tool adaptation and registry.

pub mod descriptor;
pub mod platform_tool;
pub mod registry;
pub mod schema;
