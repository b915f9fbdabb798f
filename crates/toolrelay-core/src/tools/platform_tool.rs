//! Platform tool wrapper for bridging catalog tools into the tool registry.
//!
//! Wraps adapted catalog records as implementations of the [`Tool`] trait.
//! Execution is delegated to [`PlatformClient::execute_tool`]; when the
//! platform reports that the user has not authorized the tool yet, the
//! wrapper starts authorization and returns an [`AuthorizationResponse`]
//! as a normal result.

use std::sync::Arc;

use async_trait::async_trait;
use serde_json::Value;
use tracing::{debug, info};

use toolrelay_platform::{PlatformClient, PlatformError};
use toolrelay_types::{AuthorizationResponse, InvocationContext};

use super::descriptor::AdaptedDescriptor;
use super::registry::{Tool, ToolError};

/// A catalog tool executed on the platform.
pub struct PlatformTool {
    adapted: AdaptedDescriptor,
    client: Arc<PlatformClient>,
}

impl PlatformTool {
    pub fn new(adapted: AdaptedDescriptor, client: Arc<PlatformClient>) -> Self {
        Self { adapted, client }
    }
}

#[async_trait]
impl Tool for PlatformTool {
    fn name(&self) -> &str {
        &self.adapted.descriptor.name
    }

    fn description(&self) -> &str {
        &self.adapted.descriptor.description
    }

    fn parameters(&self) -> Value {
        self.adapted.validator.schema().clone()
    }

    async fn execute(&self, args: Value, ctx: &InvocationContext) -> Result<Value, ToolError> {
        self.adapted
            .validator
            .validate(&args)
            .map_err(|e| ToolError::InvalidArgs(e.to_string()))?;

        let name = self.name();
        match self.client.execute_tool(name, args, &ctx.user_id).await {
            Ok(value) => Ok(value),
            Err(e) if e.is_authorization_required() => {
                debug!(tool = %name, error = %e, "tool needs user authorization");
                let url = self.client.authorize_tool(name, &ctx.user_id).await?;
                info!(tool = %name, user = %ctx.user_id, "returning authorization url");
                let response = AuthorizationResponse::new(url);
                Ok(response.to_value().map_err(PlatformError::from)?)
            }
            Err(e) => Err(ToolError::Platform(e)),
        }
    }
}
