//! Setup command - platform bootstrap steps.

use anyhow::Result;
use clap::{Args, Subcommand};
use console::Style;

use relu_config::{ConfigError, ReluConfig};

use super::{Context, success};

/// Arguments for the setup command.
#[derive(Args, Debug)]
pub struct SetupArgs {
    #[command(subcommand)]
    pub command: SetupCommand,
}

#[derive(Subcommand, Debug)]
pub enum SetupCommand {
    /// Generate the admin API key and store it in the user config
    AdminKey {
        /// Print the key without saving it
        #[arg(long)]
        print_only: bool,
    },
}

/// Run the setup command.
pub async fn run(args: SetupArgs, ctx: &Context) -> Result<()> {
    match args.command {
        SetupCommand::AdminKey { print_only } => cmd_admin_key(print_only, ctx),
    }
}

/// Generate a fresh admin key. An existing key is always replaced.
fn cmd_admin_key(print_only: bool, ctx: &Context) -> Result<()> {
    tracing::info!("Generating admin API key");
    let key = relu_client::generate_admin_api_key();

    let saved_to = if print_only {
        None
    } else {
        let path = relu_config::user_config_path().ok_or(ConfigError::NoConfigDir)?;
        let mut config = if path.is_file() {
            relu_config::load_config_file(&path)?
        } else {
            ReluConfig::new()
        };
        config.set_admin_api_key(key.as_str());
        relu_config::save_config(&config, &path)?;
        tracing::info!(path = %path.display(), "Admin API key saved");
        Some(path)
    };

    if ctx.json_output {
        ctx.print_json(&serde_json::json!({
            "admin_api_key": key,
            "saved_to": saved_to.as_ref().map(|p| p.display().to_string()),
        }))?;
        return Ok(());
    }

    success("Admin API key generated");
    if let Some(path) = &saved_to {
        success(format!("Saved to {}", path.display()));
    }
    println!();
    println!("{}", key);
    println!();
    println!(
        "{}",
        Style::new()
            .dim()
            .apply_to("Store this key somewhere safe; it grants administrative access.")
    );

    Ok(())
}
