//! `relay` -- CLI binary for toolrelay.
//!
//! Provides the following subcommands:
//!
//! - `relay tools` -- List or inspect the tools adapted from the platform catalog.
//! - `relay call` -- Invoke one tool on behalf of a user.
//! - `relay agent` -- Print the assembled agent.
//! - `relay config` -- Show the resolved configuration.

use clap::{Parser, Subcommand};

mod commands;

/// toolrelay CLI.
#[derive(Parser)]
#[command(name = "relay", about = "Expose hosted platform tools to an AI agent", version)]
struct Cli {
    /// Enable verbose (debug-level) logging.
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

/// Top-level subcommands.
#[derive(Subcommand)]
enum Commands {
    /// List or inspect adapted tools.
    Tools(commands::tools_cmd::ToolsArgs),

    /// Invoke a tool through the agent.
    Call(commands::call::CallArgs),

    /// Print the assembled agent as JSON.
    Agent(commands::agent::AgentArgs),

    /// Show resolved configuration.
    Config {
        #[command(subcommand)]
        action: ConfigCmd,
    },
}

/// Subcommands for `relay config`.
#[derive(Subcommand)]
enum ConfigCmd {
    /// Show the full resolved configuration (secrets redacted).
    Show {
        /// Config file path (overrides auto-discovery).
        #[arg(short, long)]
        config: Option<String>,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let default_filter = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| default_filter.into()),
        )
        .with_writer(std::io::stderr)
        .init();

    match cli.command {
        Commands::Tools(args) => commands::tools_cmd::run(args).await?,
        Commands::Call(args) => commands::call::run(args).await?,
        Commands::Agent(args) => commands::agent::run(args).await?,
        Commands::Config { action } => match action {
            ConfigCmd::Show { config } => {
                let cfg = commands::load_config(config.as_deref())?;
                commands::config_cmd::config_show(&cfg);
            }
        },
    }

    Ok(())
}
