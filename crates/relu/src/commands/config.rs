//! Config command - configuration inspection.

use anyhow::Result;
use clap::{Args, Subcommand};
use console::Style;

use relu_client::DEFAULT_API_URL;

use super::{Context, header};

/// Arguments for the config command.
#[derive(Args, Debug)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub command: ConfigCommand,
}

#[derive(Subcommand, Debug)]
pub enum ConfigCommand {
    /// Show the resolved configuration (secrets masked)
    Show,

    /// Show the user configuration file path
    Path,
}

/// Run the config command.
pub async fn run(args: ConfigArgs, ctx: &Context) -> Result<()> {
    match args.command {
        ConfigCommand::Show => cmd_show(ctx),
        ConfigCommand::Path => cmd_path(),
    }
}

fn cmd_show(ctx: &Context) -> Result<()> {
    let dim = Style::new().dim();
    let client = ctx.config.config.client_or_default();

    let api_url = ctx.api_url().unwrap_or_else(|| DEFAULT_API_URL.to_string());
    let key_source = if ctx.api_key.is_some() {
        Some("command line or RELU_API_KEY".to_string())
    } else {
        relu_config::resolve_api_key(client.api_key.as_deref()).map(|s| s.source.to_string())
    };
    let timeout = ctx.timeout().map(|t| t.as_secs());
    let admin_key_set = ctx.config.config.admin_api_key().is_some();
    let sources: Vec<String> = ctx
        .config
        .loaded_from()
        .iter()
        .map(|p| p.display().to_string())
        .collect();

    if ctx.json_output {
        return ctx.print_json(&serde_json::json!({
            "sources": sources,
            "api_url": api_url,
            "api_key_source": key_source,
            "timeout_secs": timeout,
            "admin_api_key_set": admin_key_set,
        }));
    }

    header("Relu Configuration");
    if sources.is_empty() {
        println!("{}", dim.apply_to("No config files loaded (using defaults)"));
    } else {
        for source in &sources {
            println!("{} {}", dim.apply_to("File:     "), source);
        }
    }
    println!("{} {}", dim.apply_to("API URL:  "), api_url);
    println!(
        "{} {}",
        dim.apply_to("API key:  "),
        key_source.unwrap_or_else(|| "not set".to_string())
    );
    println!(
        "{} {}",
        dim.apply_to("Timeout:  "),
        timeout.map_or_else(|| "none".to_string(), |t| format!("{}s", t))
    );
    println!(
        "{} {}",
        dim.apply_to("Admin key:"),
        if admin_key_set { "set" } else { "not set" }
    );

    Ok(())
}

fn cmd_path() -> Result<()> {
    match relu_config::user_config_path() {
        Some(path) => println!("{}", path.display()),
        None => println!("No config directory available"),
    }
    Ok(())
}
