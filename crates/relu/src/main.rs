//! Relu - command-line client for the Relu AI Worker platform
//!
//! Main entry point for the Relu CLI.

use std::time::Duration;

use anyhow::Result;
use clap::{Parser, Subcommand};

mod commands;

use commands::{agents, config, setup, threads};

// ─────────────────────────────────────────────────────────────────────────────
// CLI Structure
// ─────────────────────────────────────────────────────────────────────────────

/// Relu - manage AI Workers on the Relu platform
#[derive(Parser)]
#[command(name = "relu")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Output as JSON (for scripting)
    #[arg(long, global = true)]
    pub json: bool,

    /// API URL (default: https://api.relu.work/v1)
    #[arg(long, global = true, env = "RELU_API_URL")]
    pub api_url: Option<String>,

    /// API key
    #[arg(long, global = true, env = "RELU_API_KEY", hide_env_values = true)]
    pub api_key: Option<String>,

    /// Request timeout in seconds (default: none)
    #[arg(long, global = true)]
    pub timeout: Option<u64>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Manage agents
    Agents(agents::AgentsArgs),

    /// Manage threads and run agents on them
    Threads(threads::ThreadsArgs),

    /// Platform setup steps
    Setup(setup::SetupArgs),

    /// Configuration inspection
    Config(config::ConfigArgs),
}

// ─────────────────────────────────────────────────────────────────────────────
// Main
// ─────────────────────────────────────────────────────────────────────────────

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Console (human-readable, stderr) + rotating JSON file
    let filter = if cli.verbose {
        "relu=debug,relu_client=debug,relu_config=debug,info"
    } else {
        "relu=info,relu_client=info,relu_config=info,warn"
    };

    let log_dir = relu_config::user_config_dir()
        .map(|d| d.join("logs"))
        .unwrap_or_else(|| std::path::PathBuf::from("logs"));
    let file_appender = tracing_appender::rolling::daily(&log_dir, "relu.log");
    let (non_blocking, _guard) = tracing_appender::non_blocking(file_appender);

    use tracing_subscriber::prelude::*;
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(true)
                .with_writer(std::io::stderr)
                .with_filter(tracing_subscriber::EnvFilter::new(filter)),
        )
        .with(
            tracing_subscriber::fmt::layer()
                .json()
                .with_writer(non_blocking)
                .with_filter(tracing_subscriber::EnvFilter::new(
                    "relu=trace,relu_client=trace,relu_config=trace,info",
                )),
        )
        .init();

    let loaded = relu_config::load_config(None)?;
    for warning in &loaded.warnings {
        tracing::warn!("{}", warning);
    }

    let ctx = commands::Context {
        api_url: cli.api_url,
        api_key: cli.api_key,
        timeout: cli.timeout.map(Duration::from_secs),
        json_output: cli.json,
        verbose: cli.verbose,
        config: loaded,
    };

    // Dispatch to command handlers
    match cli.command {
        Commands::Agents(args) => agents::run(args, &ctx).await,
        Commands::Threads(args) => threads::run(args, &ctx).await,
        Commands::Setup(args) => setup::run(args, &ctx).await,
        Commands::Config(args) => config::run(args, &ctx).await,
    }
}
