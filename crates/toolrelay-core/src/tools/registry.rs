//! Tool registry and [`Tool`] trait definition.
//!
//! Defines the interface every tool handed to the orchestration runtime
//! satisfies ([`Tool`]) and a [`ToolRegistry`] that stores tools and
//! dispatches execution by name.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use tracing::debug;

use toolrelay_platform::PlatformError;
use toolrelay_types::InvocationContext;

/// Error type for tool execution.
#[derive(Debug, thiserror::Error)]
pub enum ToolError {
    /// The requested tool was not found in the registry.
    #[error("tool not found: {0}")]
    NotFound(String),

    /// The arguments do not match the tool's input schema.
    #[error("invalid arguments: {0}")]
    InvalidArgs(String),

    /// The platform failed for a reason other than missing authorization.
    /// The original error is preserved unchanged.
    #[error(transparent)]
    Platform(#[from] PlatformError),
}

/// A tool that can be invoked by the agent.
///
/// Implementations provide a name, description, JSON Schema for parameters,
/// and an async `execute` method that receives the caller's
/// [`InvocationContext`].
///
/// ```rust,ignore
/// use async_trait::async_trait;
/// use toolrelay_core::tools::registry::{Tool, ToolError};
/// use toolrelay_types::InvocationContext;
///
/// struct EchoTool;
///
/// #[async_trait]
/// impl Tool for EchoTool {
///     fn name(&self) -> &str { "echo" }
///     fn description(&self) -> &str { "Echo back the input" }
///     fn parameters(&self) -> serde_json::Value {
///         serde_json::json!({"type": "object", "properties": {"text": {"type": "string"}}})
///     }
///     async fn execute(
///         &self,
///         args: serde_json::Value,
///         _ctx: &InvocationContext,
///     ) -> Result<serde_json::Value, ToolError> {
///         Ok(args)
///     }
/// }
/// ```
#[async_trait]
pub trait Tool: Send + Sync {
    /// The unique name of this tool (used in LLM function calling).
    fn name(&self) -> &str;

    /// A human-readable description of what this tool does.
    fn description(&self) -> &str;

    /// JSON Schema describing the tool's parameters.
    fn parameters(&self) -> serde_json::Value;

    /// Execute the tool with the given arguments on behalf of `ctx.user_id`.
    async fn execute(
        &self,
        args: serde_json::Value,
        ctx: &InvocationContext,
    ) -> Result<serde_json::Value, ToolError>;
}

/// Registry of available tools, indexed by name.
pub struct ToolRegistry {
    tools: HashMap<String, Arc<dyn Tool>>,
}

impl std::fmt::Debug for ToolRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ToolRegistry")
            .field("tools", &self.list())
            .finish()
    }
}

impl ToolRegistry {
    /// Create an empty tool registry.
    pub fn new() -> Self {
        Self {
            tools: HashMap::new(),
        }
    }

    /// Register a tool, returning the tool it replaced, if any.
    pub fn register(&mut self, tool: Arc<dyn Tool>) -> Option<Arc<dyn Tool>> {
        let name = tool.name().to_string();
        debug!(tool = %name, "registering tool");
        self.tools.insert(name, tool)
    }

    /// Whether a tool with this name is registered.
    pub fn contains(&self, name: &str) -> bool {
        self.tools.contains_key(name)
    }

    /// Look up a tool by name.
    pub fn get(&self, name: &str) -> Option<Arc<dyn Tool>> {
        self.tools.get(name).cloned()
    }

    /// List all registered tool names (sorted alphabetically).
    pub fn list(&self) -> Vec<String> {
        let mut names: Vec<String> = self.tools.keys().cloned().collect();
        names.sort();
        names
    }

    /// Generate tool schemas in OpenAI function calling format, sorted by name.
    ///
    /// ```json
    /// {
    ///   "type": "function",
    ///   "function": { "name": "..", "description": "..", "parameters": { .. } }
    /// }
    /// ```
    pub fn schemas(&self) -> Vec<serde_json::Value> {
        self.list()
            .into_iter()
            .filter_map(|name| self.tools.get(&name))
            .map(|tool| {
                serde_json::json!({
                    "type": "function",
                    "function": {
                        "name": tool.name(),
                        "description": tool.description(),
                        "parameters": tool.parameters(),
                    }
                })
            })
            .collect()
    }

    /// Execute a tool by name.
    ///
    /// Returns [`ToolError::NotFound`] if no tool with that name is registered.
    pub async fn execute(
        &self,
        name: &str,
        args: serde_json::Value,
        ctx: &InvocationContext,
    ) -> Result<serde_json::Value, ToolError> {
        let tool = self
            .tools
            .get(name)
            .ok_or_else(|| ToolError::NotFound(name.to_string()))?;

        debug!(tool = %name, user = %ctx.user_id, "executing tool");
        tool.execute(args, ctx).await
    }

    /// Return the number of registered tools.
    pub fn len(&self) -> usize {
        self.tools.len()
    }

    /// Return true if no tools are registered.
    pub fn is_empty(&self) -> bool {
        self.tools.is_empty()
    }
}

impl Default for ToolRegistry {
    fn default() -> Self {
        Self::new()
    }
}
