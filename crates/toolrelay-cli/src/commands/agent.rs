//! `relay agent` -- assemble the agent and print it.
//!
//! The output is what the orchestration runtime receives: name, model,
//! instructions and the function-calling declaration of every tool.

use clap::Args;

/// Arguments for `relay agent`.
#[derive(Args)]
pub struct AgentArgs {
    /// Config file path (overrides auto-discovery).
    #[arg(short, long)]
    pub config: Option<String>,
}

/// Run the agent subcommand.
pub async fn run(args: AgentArgs) -> anyhow::Result<()> {
    let cfg = super::load_config(args.config.as_deref())?;
    let agent = super::build_agent(&cfg).await?;
    println!("{}", serde_json::to_string_pretty(&agent.describe())?);
    Ok(())
}
