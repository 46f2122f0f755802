//! HTTP client SDK for the Relu AI Worker platform.
//!
//! This crate provides typed, authenticated access to the platform's agent
//! and thread collections, plus the admin key generator used during setup.
//!
//! # Example
//!
//! ```no_run
//! use futures::StreamExt;
//! use relu_client::{AgentConfig, AgentPressTool, ListFilters, Relu, Result, RunInput};
//!
//! # async fn example() -> Result<()> {
//! let relu = Relu::new("key-123")?;
//!
//! // Create an agent with a built-in tool
//! let agent = relu
//!     .agent()
//!     .create(&AgentConfig::new("bot").with_tool(AgentPressTool::WebSearchTool))
//!     .await?;
//!
//! // Walk every agent; pages are fetched lazily
//! let mut agents = Box::pin(relu.agent().list(ListFilters::default()));
//! while let Some(agent) = agents.next().await {
//!     println!("{}", agent?.name);
//! }
//!
//! // Run the agent on a new thread
//! let thread = relu.thread().create(&Default::default()).await?;
//! let run = relu.thread().run(&thread.id, &agent.id, &RunInput::new("hi")).await?;
//! println!("run {}: {:?}", run.id, run.status);
//! # Ok(())
//! # }
//! ```
//!
//! # Errors
//!
//! Every operation returns [`Error`]. HTTP failures are split by status
//! (validation, authentication, not found, server) and kept apart from
//! [`Error::Transport`], which means no response was received. Nothing is
//! retried automatically.
//!
//! # Pagination
//!
//! `list` returns a lazy stream that follows the server's cursor. Items from
//! pages fetched before a failure are still delivered; the failing page ends
//! the stream with its error. `list_all` collects eagerly and fails fast.

pub mod admin_key;
pub mod api;
pub mod client;
pub mod error;
pub mod relu;
pub mod types;

pub use admin_key::{ADMIN_API_KEY_PREFIX, generate_admin_api_key, is_admin_api_key};
pub use api::{AGENTS_PATH, AgentsApi, THREADS_PATH, ThreadsApi};
pub use client::{ApiClient, ApiKey, ClientBuilder, create_client};
pub use error::{Error, Result};
pub use relu::{DEFAULT_API_URL, Kortix, Relu, ReluBuilder};
pub use types::*;
