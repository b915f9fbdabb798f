//! `relay tools` -- inspect the tools adapted from the platform catalog.
//!
//! - `relay tools list` -- fetch, adapt and tabulate the catalog.
//! - `relay tools show <name>` -- show one tool's parameter schema.

use clap::{Args, Subcommand};
use comfy_table::{Table, presets};

use toolrelay_core::ToolRegistry;

/// Arguments for the `relay tools` subcommand.
#[derive(Args)]
pub struct ToolsArgs {
    #[command(subcommand)]
    pub action: ToolsAction,
}

/// Subcommands for `relay tools`.
#[derive(Subcommand)]
pub enum ToolsAction {
    /// List every adapted tool.
    List {
        /// Toolkit to fetch (overrides `agent.toolkit`).
        #[arg(long)]
        toolkit: Option<String>,

        /// Config file path (overrides auto-discovery).
        #[arg(short, long)]
        config: Option<String>,
    },

    /// Show the description and parameter schema of one tool.
    Show {
        /// Tool name to inspect.
        name: String,

        /// Toolkit to fetch (overrides `agent.toolkit`).
        #[arg(long)]
        toolkit: Option<String>,

        /// Config file path (overrides auto-discovery).
        #[arg(short, long)]
        config: Option<String>,
    },
}

/// Run the tools subcommand.
pub async fn run(args: ToolsArgs) -> anyhow::Result<()> {
    match args.action {
        ToolsAction::List { toolkit, config } => {
            let registry = load_registry(toolkit, config.as_deref()).await?;
            tools_list(&registry);
            Ok(())
        }
        ToolsAction::Show {
            name,
            toolkit,
            config,
        } => {
            let registry = load_registry(toolkit, config.as_deref()).await?;
            tools_show(&name, &registry)
        }
    }
}

async fn load_registry(
    toolkit: Option<String>,
    config_override: Option<&str>,
) -> anyhow::Result<std::sync::Arc<ToolRegistry>> {
    let mut cfg = super::load_config(config_override)?;
    if toolkit.is_some() {
        cfg.agent.toolkit = toolkit;
    }
    let agent = super::build_agent(&cfg).await?;
    Ok(std::sync::Arc::clone(agent.tools()))
}

/// Truncate to `max_len` characters, appending "..." if truncated.
fn truncate(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        s.to_string()
    } else {
        let head: String = s.chars().take(max_len.saturating_sub(3)).collect();
        format!("{head}...")
    }
}

/// Comma-separated top-level required fields of a schema.
fn required_fields(schema: &serde_json::Value) -> String {
    schema
        .get("required")
        .and_then(|r| r.as_array())
        .map(|r| r.iter().filter_map(|v| v.as_str()).collect::<Vec<_>>().join(", "))
        .unwrap_or_default()
}

fn tools_list(registry: &ToolRegistry) {
    let names = registry.list();

    if names.is_empty() {
        println!("No tools available.");
        return;
    }

    let mut table = Table::new();
    table.load_preset(presets::UTF8_FULL_CONDENSED);
    table.set_header(["NAME", "REQUIRED", "DESCRIPTION"]);

    for name in &names {
        let (required, desc) = registry
            .get(name)
            .map(|t| (required_fields(&t.parameters()), truncate(t.description(), 60)))
            .unwrap_or_default();
        table.add_row([name.as_str(), &required, &desc]);
    }

    println!("{table}");
    println!();
    println!("Total: {} tool(s)", names.len());
}

fn tools_show(name: &str, registry: &ToolRegistry) -> anyhow::Result<()> {
    let tool = registry.get(name).ok_or_else(|| {
        anyhow::anyhow!("tool not found: {name}\nUse 'relay tools list' to see available tools.")
    })?;

    println!("Tool: {}", tool.name());
    println!("Description: {}", tool.description());
    println!();
    println!("Parameters:");
    println!("{}", serde_json::to_string_pretty(&tool.parameters())?);

    Ok(())
}
