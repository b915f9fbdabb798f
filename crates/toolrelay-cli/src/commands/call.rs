//! `relay call` -- invoke one tool through the assembled agent.
//!
//! Prints the tool result as JSON. When the user has not authorized the
//! tool yet, the printed result is the authorization response carrying the
//! URL to visit.
//!
//! ```text
//! relay call Github_CreateIssue --args '{"owner":"octo","repo":"hello","title":"Bug"}'
//! ```

use clap::Args;
use tracing::debug;

/// Arguments for `relay call`.
#[derive(Args)]
pub struct CallArgs {
    /// Tool name.
    pub name: String,

    /// Tool input as a JSON object.
    #[arg(long, default_value = "{}")]
    pub args: String,

    /// Platform user to act for (overrides `agent.user_id`).
    #[arg(long)]
    pub user: Option<String>,

    /// Config file path (overrides auto-discovery).
    #[arg(short, long)]
    pub config: Option<String>,
}

/// Parse the `--args` value.
fn parse_args(raw: &str) -> anyhow::Result<serde_json::Value> {
    let value: serde_json::Value =
        serde_json::from_str(raw).map_err(|e| anyhow::anyhow!("--args is not valid JSON: {e}"))?;
    if !value.is_object() {
        anyhow::bail!("--args must be a JSON object");
    }
    Ok(value)
}

/// Run the call subcommand.
pub async fn run(args: CallArgs) -> anyhow::Result<()> {
    let input = parse_args(&args.args)?;
    let cfg = super::load_config(args.config.as_deref())?;
    let ctx = cfg.agent.invocation_context(args.user.as_deref())?;

    let agent = super::build_agent(&cfg).await?;
    debug!(tool = %args.name, user = %ctx.user_id, "calling tool");
    let result = agent.call_tool(&args.name, input, &ctx).await?;

    println!("{}", serde_json::to_string_pretty(&result)?);
    Ok(())
}
