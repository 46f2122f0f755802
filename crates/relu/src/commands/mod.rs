//! CLI command handlers.

use std::time::Duration;

use anyhow::{Context as _, Result, bail};
use console::Style;
use futures::{Stream, StreamExt, TryStreamExt};
use relu_client::Relu;
use relu_config::LoadedConfig;
use serde::Serialize;

pub mod agents;
pub mod config;
pub mod setup;
pub mod threads;

/// Shared context for all commands.
pub struct Context {
    /// API URL from the command line or environment.
    pub api_url: Option<String>,
    /// API key from the command line or environment.
    pub api_key: Option<String>,
    /// Request timeout from the command line.
    pub timeout: Option<Duration>,
    /// Output as JSON for scripting.
    pub json_output: bool,
    /// Verbose output enabled.
    pub verbose: bool,
    /// Discovered configuration files.
    pub config: LoadedConfig,
}

impl Context {
    /// Effective API URL: flag/env, then config file.
    pub fn api_url(&self) -> Option<String> {
        self.api_url
            .clone()
            .or_else(|| self.config.config.client.as_ref()?.api_url.clone())
    }

    /// Effective timeout: flag, then config file.
    pub fn timeout(&self) -> Option<Duration> {
        self.timeout
            .or_else(|| self.config.config.client_or_default().timeout())
    }

    /// Build an SDK instance from flags, environment and config.
    pub fn sdk(&self) -> Result<Relu> {
        let client = self.config.config.client_or_default();

        let api_key = match &self.api_key {
            Some(key) => key.clone(),
            None => match relu_config::resolve_api_key(client.api_key.as_deref()) {
                Some(secret) => {
                    tracing::debug!(source = %secret.source, "Resolved API key");
                    secret.value
                }
                None => bail!(
                    "no API key configured; pass --api-key or set {}",
                    relu_config::API_KEY_ENV
                ),
            },
        };

        let mut builder = Relu::builder().api_key(api_key);
        if let Some(url) = self.api_url() {
            builder = builder.api_url(url);
        }
        if let Some(timeout) = self.timeout() {
            builder = builder.timeout(timeout);
        }
        if let Some(agent) = client.user_agent {
            builder = builder.user_agent(agent);
        }

        builder.build().context("failed to create Relu client")
    }

    /// Print a value as pretty JSON.
    pub fn print_json<T: Serialize + ?Sized>(&self, value: &T) -> Result<()> {
        println!("{}", serde_json::to_string_pretty(value)?);
        Ok(())
    }
}

/// Print a bold section header with a rule underneath.
pub fn header(title: &str) {
    let dim = Style::new().dim();
    println!("{}", Style::new().bold().apply_to(title));
    println!("{}", dim.apply_to("─".repeat(50)));
}

/// Print a green check line.
pub fn success(message: impl std::fmt::Display) {
    println!("{} {}", Style::new().green().apply_to("✓"), message);
}

/// Shorten text for single-line display.
pub fn truncate(s: &str, max_len: usize) -> String {
    let s = s.replace('\n', " ");
    if s.chars().count() <= max_len {
        s
    } else {
        let cut: String = s.chars().take(max_len.saturating_sub(3)).collect();
        format!("{}...", cut)
    }
}

/// Drain a list stream, stopping after `limit` items without fetching more.
pub async fn collect_limited<T>(
    stream: impl Stream<Item = relu_client::Result<T>>,
    limit: Option<usize>,
) -> Result<Vec<T>> {
    let items = stream
        .take(limit.unwrap_or(usize::MAX))
        .try_collect()
        .await?;
    Ok(items)
}
