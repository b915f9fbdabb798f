//! Agent assembly.
//!
//! [`AgentBuilder`] fetches the platform catalog once, adapts every record,
//! and binds the resulting registry to a single [`Agent`]. The registry is
//! read-only afterwards; platform-side changes need a restart.

use std::sync::Arc;

use serde_json::Value;
use tracing::{info, warn};

use toolrelay_platform::{PlatformClient, PlatformError};
use toolrelay_types::config::{AgentConfig, DuplicatePolicy};
use toolrelay_types::{InvocationContext, ModelHandle};

use crate::tools::descriptor::{AdaptedDescriptor, adapt_catalog};
use crate::tools::platform_tool::PlatformTool;
use crate::tools::registry::{Tool, ToolError, ToolRegistry};

/// Errors raised while assembling an agent.
#[derive(Debug, thiserror::Error)]
pub enum AgentError {
    /// The catalog could not be fetched.
    #[error("failed to fetch tool catalog: {0}")]
    Catalog(#[from] PlatformError),

    /// Two catalog records share a name under [`DuplicatePolicy::Reject`].
    #[error("duplicate tool name in catalog: {0}")]
    DuplicateTool(String),
}

/// The assembled agent handed to the orchestration runtime.
pub struct Agent {
    pub name: String,
    pub instructions: String,
    pub model: ModelHandle,
    tools: Arc<ToolRegistry>,
}

impl std::fmt::Debug for Agent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Agent")
            .field("name", &self.name)
            .field("model", &self.model)
            .field("tools", &self.tools.list())
            .finish_non_exhaustive()
    }
}

impl Agent {
    /// Create an agent over an already built registry.
    pub fn new(
        name: impl Into<String>,
        instructions: impl Into<String>,
        model: ModelHandle,
        tools: ToolRegistry,
    ) -> Self {
        Self {
            name: name.into(),
            instructions: instructions.into(),
            model,
            tools: Arc::new(tools),
        }
    }

    /// The agent's tools.
    pub fn tools(&self) -> &Arc<ToolRegistry> {
        &self.tools
    }

    /// Function-calling declarations for every tool, sorted by name.
    pub fn tool_schemas(&self) -> Vec<Value> {
        self.tools.schemas()
    }

    /// Invoke a tool on behalf of `ctx.user_id`.
    pub async fn call_tool(
        &self,
        name: &str,
        args: Value,
        ctx: &InvocationContext,
    ) -> Result<Value, ToolError> {
        self.tools.execute(name, args, ctx).await
    }

    /// JSON summary: name, model, instructions and tool declarations.
    pub fn describe(&self) -> Value {
        serde_json::json!({
            "name": self.name,
            "model": self.model.to_string(),
            "instructions": self.instructions,
            "tools": self.tool_schemas(),
        })
    }
}

/// Builds an [`Agent`] from configuration and the platform catalog.
pub struct AgentBuilder {
    config: AgentConfig,
    client: Arc<PlatformClient>,
}

impl AgentBuilder {
    pub fn new(config: AgentConfig, client: Arc<PlatformClient>) -> Self {
        Self { config, client }
    }

    /// Fetch and adapt the catalog, then assemble the agent.
    ///
    /// A catalog fetch failure aborts assembly. Individual records that
    /// fail validation are skipped.
    pub async fn build(self) -> Result<Agent, AgentError> {
        let toolkit = self.config.toolkit.as_deref();
        let records = self.client.list_tools(toolkit).await?;
        let adapted = adapt_catalog(&records);
        let skipped = records.len() - adapted.len();

        let registry = build_registry(adapted, &self.client, self.config.duplicate_policy)?;
        info!(
            agent = %self.config.name,
            model = %self.config.model,
            tools = registry.len(),
            skipped,
            "agent assembled"
        );

        Ok(Agent::new(
            self.config.name,
            self.config.instructions,
            self.config.model,
            registry,
        ))
    }
}

/// Register one [`PlatformTool`] per adapted record.
pub fn build_registry(
    adapted: Vec<AdaptedDescriptor>,
    client: &Arc<PlatformClient>,
    policy: DuplicatePolicy,
) -> Result<ToolRegistry, AgentError> {
    let mut registry = ToolRegistry::new();
    for desc in adapted {
        let name = desc.name().to_string();
        if policy == DuplicatePolicy::Reject && registry.contains(&name) {
            return Err(AgentError::DuplicateTool(name));
        }
        let tool: Arc<dyn Tool> = Arc::new(PlatformTool::new(desc, Arc::clone(client)));
        if registry.register(tool).is_some() {
            warn!(tool = %name, "duplicate tool name in catalog, keeping the later record");
        }
    }
    Ok(registry)
}
