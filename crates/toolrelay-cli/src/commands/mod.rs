//! CLI command implementations for `relay`.
//!
//! - [`tools_cmd`] -- Catalog inspection.
//! - [`call`] -- Single tool invocation.
//! - [`agent`] -- Agent summary.
//! - [`config_cmd`] -- Resolved configuration.

pub mod agent;
pub mod call;
pub mod config_cmd;
pub mod tools_cmd;

use std::path::Path;
use std::sync::Arc;

use toolrelay_core::{Agent, AgentBuilder};
use toolrelay_platform::PlatformClient;
use toolrelay_types::config::Config;

/// Load configuration from the given path override or via auto-discovery.
///
/// Discovery order: `TOOLRELAY_CONFIG`, then `~/.toolrelay/config.json`.
/// Returns a default `Config` if no config file is found.
pub fn load_config(config_override: Option<&str>) -> anyhow::Result<Config> {
    toolrelay_types::config::load_config(config_override.map(Path::new))
        .map_err(|e| anyhow::anyhow!("failed to load config: {e}"))
}

/// Fetch the catalog and assemble the agent described by `config`.
pub async fn build_agent(config: &Config) -> anyhow::Result<Agent> {
    let client = PlatformClient::from_config(&config.platform)?;
    let agent = AgentBuilder::new(config.agent.clone(), Arc::new(client))
        .build()
        .await?;
    Ok(agent)
}
