//! Request and response types for the Relu API.
//!
//! Request types validate their own shape before dispatch; the server stays
//! the source of truth for everything else.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use url::Url;

use crate::error::{Error, Result};

// ─────────────────────────────────────────────────────────────────────────────
// Tools
// ─────────────────────────────────────────────────────────────────────────────

/// Built-in sandbox tools an agent can be granted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AgentPressTool {
    /// Read and write files in the sandbox.
    SbFilesTool,
    /// Run shell commands in the sandbox.
    SbShellTool,
    /// Deploy static sites from the sandbox.
    SbDeployTool,
    /// Expose sandbox ports publicly.
    SbExposeTool,
    /// Inspect images in the sandbox.
    SbVisionTool,
    /// Edit and generate images.
    SbImageEditTool,
    /// Drive a headless browser.
    BrowserTool,
    /// Search the web.
    WebSearchTool,
    /// Query third-party data providers.
    DataProvidersTool,
}

impl AgentPressTool {
    /// All built-in tools.
    pub const ALL: [AgentPressTool; 9] = [
        AgentPressTool::SbFilesTool,
        AgentPressTool::SbShellTool,
        AgentPressTool::SbDeployTool,
        AgentPressTool::SbExposeTool,
        AgentPressTool::SbVisionTool,
        AgentPressTool::SbImageEditTool,
        AgentPressTool::BrowserTool,
        AgentPressTool::WebSearchTool,
        AgentPressTool::DataProvidersTool,
    ];

    /// Wire name of the tool.
    pub fn as_str(&self) -> &'static str {
        match self {
            AgentPressTool::SbFilesTool => "sb_files_tool",
            AgentPressTool::SbShellTool => "sb_shell_tool",
            AgentPressTool::SbDeployTool => "sb_deploy_tool",
            AgentPressTool::SbExposeTool => "sb_expose_tool",
            AgentPressTool::SbVisionTool => "sb_vision_tool",
            AgentPressTool::SbImageEditTool => "sb_image_edit_tool",
            AgentPressTool::BrowserTool => "browser_tool",
            AgentPressTool::WebSearchTool => "web_search_tool",
            AgentPressTool::DataProvidersTool => "data_providers_tool",
        }
    }
}

impl std::str::FromStr for AgentPressTool {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        AgentPressTool::ALL
            .into_iter()
            .find(|t| t.as_str() == s)
            .ok_or_else(|| Error::InvalidRequest(format!("unknown tool '{}'", s)))
    }
}

/// A tool granted to an agent.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ToolBinding {
    /// A built-in sandbox tool.
    #[serde(rename = "agentpress")]
    AgentPress {
        /// Which tool.
        tool: AgentPressTool,
    },
    /// Tools served by a remote MCP server.
    Mcp {
        /// Display name of the server.
        name: String,
        /// Server URL.
        url: String,
        /// Tool names to expose; empty means all.
        #[serde(default, skip_serializing_if = "Vec::is_empty")]
        allowed_tools: Vec<String>,
    },
}

impl ToolBinding {
    /// Bind an MCP server exposing all of its tools.
    pub fn mcp(name: impl Into<String>, url: impl Into<String>) -> Self {
        ToolBinding::Mcp {
            name: name.into(),
            url: url.into(),
            allowed_tools: Vec::new(),
        }
    }

    fn validate(&self) -> Result<()> {
        if let ToolBinding::Mcp { name, url, .. } = self {
            if name.trim().is_empty() {
                return Err(Error::InvalidRequest(
                    "MCP tool binding needs a name".to_string(),
                ));
            }
            Url::parse(url).map_err(|e| {
                Error::InvalidRequest(format!("MCP server '{}' has invalid url: {}", name, e))
            })?;
        }
        Ok(())
    }
}

impl From<AgentPressTool> for ToolBinding {
    fn from(tool: AgentPressTool) -> Self {
        ToolBinding::AgentPress { tool }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Agents
// ─────────────────────────────────────────────────────────────────────────────

/// Configuration for creating an agent.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AgentConfig {
    /// Agent name.
    pub name: String,
    /// System instructions.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub instructions: Option<String>,
    /// Model override.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub model: Option<String>,
    /// Tools granted to the agent.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub tools: Vec<ToolBinding>,
    /// Arbitrary metadata.
    #[serde(default, skip_serializing_if = "HashMap::is_empty")]
    pub metadata: HashMap<String, serde_json::Value>,
}

impl AgentConfig {
    /// Create a config with just a name.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }

    /// Set the system instructions.
    pub fn with_instructions(mut self, instructions: impl Into<String>) -> Self {
        self.instructions = Some(instructions.into());
        self
    }

    /// Set the model.
    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = Some(model.into());
        self
    }

    /// Grant a tool.
    pub fn with_tool(mut self, tool: impl Into<ToolBinding>) -> Self {
        self.tools.push(tool.into());
        self
    }

    /// Attach a metadata entry.
    pub fn with_metadata(mut self, key: impl Into<String>, value: serde_json::Value) -> Self {
        self.metadata.insert(key.into(), value);
        self
    }

    /// Check the config before sending it.
    pub fn validate(&self) -> Result<()> {
        if self.name.trim().is_empty() {
            return Err(Error::InvalidRequest("agent name must not be empty".to_string()));
        }
        self.tools.iter().try_for_each(ToolBinding::validate)
    }
}

/// Partial update for an agent. Unset fields are left unchanged.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AgentUpdate {
    /// New name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// New instructions.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub instructions: Option<String>,
    /// New model.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub model: Option<String>,
    /// Replacement tool list.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tools: Option<Vec<ToolBinding>>,
    /// Metadata to merge.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub metadata: Option<HashMap<String, serde_json::Value>>,
}

impl AgentUpdate {
    /// Check the update before sending it.
    pub fn validate(&self) -> Result<()> {
        if self.name.as_deref().is_some_and(|n| n.trim().is_empty()) {
            return Err(Error::InvalidRequest("agent name must not be empty".to_string()));
        }
        self.tools
            .iter()
            .flatten()
            .try_for_each(ToolBinding::validate)
    }
}

/// An agent as returned by the server.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Agent {
    /// Agent ID.
    #[serde(alias = "agent_id")]
    pub id: String,
    /// Agent name.
    pub name: String,
    /// System instructions.
    #[serde(default, alias = "system_prompt", skip_serializing_if = "Option::is_none")]
    pub instructions: Option<String>,
    /// Model.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub model: Option<String>,
    /// Tools granted to the agent.
    #[serde(default)]
    pub tools: Vec<ToolBinding>,
    /// Agent metadata.
    #[serde(default)]
    pub metadata: HashMap<String, serde_json::Value>,
    /// Creation time (ISO 8601).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<String>,
    /// Last update time (ISO 8601).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<String>,
}

// ─────────────────────────────────────────────────────────────────────────────
// Threads
// ─────────────────────────────────────────────────────────────────────────────

/// Configuration for creating a thread.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ThreadConfig {
    /// Optional title.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    /// Optional metadata.
    #[serde(default, skip_serializing_if = "HashMap::is_empty")]
    pub metadata: HashMap<String, serde_json::Value>,
}

impl ThreadConfig {
    /// Create a config with a title.
    pub fn titled(title: impl Into<String>) -> Self {
        Self {
            title: Some(title.into()),
            ..Default::default()
        }
    }

    /// Check the config before sending it.
    pub fn validate(&self) -> Result<()> {
        validate_title(self.title.as_deref())
    }
}

/// Partial update for a thread.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ThreadUpdate {
    /// New title.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    /// Metadata to merge.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub metadata: Option<HashMap<String, serde_json::Value>>,
}

/// A thread as returned by the server.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Thread {
    /// Thread ID.
    #[serde(alias = "thread_id")]
    pub id: String,
    /// Title.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    /// Thread metadata.
    #[serde(default)]
    pub metadata: HashMap<String, serde_json::Value>,
    /// Creation time (ISO 8601).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<String>,
    /// Last update time (ISO 8601).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<String>,
}

/// A message to append to a thread.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewMessage {
    /// Role of the sender (defaults to `user`).
    pub role: String,
    /// Message content.
    pub content: String,
}

impl NewMessage {
    /// A user message.
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: "user".to_string(),
            content: content.into(),
        }
    }

    /// Check the message before sending it.
    pub fn validate(&self) -> Result<()> {
        if self.content.trim().is_empty() {
            return Err(Error::InvalidRequest("message content must not be empty".to_string()));
        }
        Ok(())
    }
}

/// A message stored in a thread.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Message {
    /// Message ID.
    #[serde(alias = "message_id")]
    pub id: String,
    /// Role of the sender.
    #[serde(default, alias = "type")]
    pub role: String,
    /// Message content; shape is server-defined.
    #[serde(default)]
    pub content: serde_json::Value,
    /// Creation time (ISO 8601).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<String>,
}

/// Response for listing thread messages.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MessagesResponse {
    /// Messages, oldest first.
    #[serde(alias = "data")]
    pub messages: Vec<Message>,
}

// ─────────────────────────────────────────────────────────────────────────────
// Runs
// ─────────────────────────────────────────────────────────────────────────────

/// Input for running an agent on a thread.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RunInput {
    /// Prompt appended to the thread before the run starts.
    pub message: String,
    /// Model override for this run.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub model: Option<String>,
    /// Metadata to merge.
    #[serde(default, skip_serializing_if = "HashMap::is_empty")]
    pub metadata: HashMap<String, serde_json::Value>,
}

impl ThreadUpdate {
    /// Check the update before sending it.
    pub fn validate(&self) -> Result<()> {
        validate_title(self.title.as_deref())
    }
}

fn validate_title(title: Option<&str>) -> Result<()> {
    if title.is_some_and(|t| t.trim().is_empty()) {
        return Err(Error::InvalidRequest("thread title must not be empty".to_string()));
    }
    Ok(())
}

impl RunInput {
    /// Create input with just a message.
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            ..Default::default()
        }
    }

    /// Set the model.
    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = Some(model.into());
        self
    }

    /// Check the input before sending it.
    pub fn validate(&self) -> Result<()> {
        if self.message.trim().is_empty() {
            return Err(Error::InvalidRequest("run message must not be empty".to_string()));
        }
        Ok(())
    }
}

/// Body of a run request.
#[derive(Debug, Serialize)]
pub(crate) struct RunRequest<'a> {
    pub agent_id: &'a str,
    pub input: &'a RunInput,
}

/// Status of a run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RunStatus {
    Queued,
    Running,
    Completed,
    Failed,
    Stopped,
    /// A status this SDK version does not know, or none at all.
    #[default]
    #[serde(other)]
    Unknown,
}

impl RunStatus {
    /// Whether the run has finished.
    pub fn is_terminal(&self) -> bool {
        matches!(
            self,
            RunStatus::Completed | RunStatus::Failed | RunStatus::Stopped
        )
    }
}

/// A run descriptor as returned by the server.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Run {
    /// Run ID.
    #[serde(alias = "run_id", alias = "agent_run_id")]
    pub id: String,
    /// Thread the run belongs to.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub thread_id: Option<String>,
    /// Agent that executed the run.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub agent_id: Option<String>,
    /// Current status.
    #[serde(default)]
    pub status: RunStatus,
    /// Run output, once available.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub output: Option<serde_json::Value>,
    /// Failure description, if the run failed.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    /// When the run started.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<String>,
    /// When the run finished.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub completed_at: Option<String>,
}

// ─────────────────────────────────────────────────────────────────────────────
// Listing
// ─────────────────────────────────────────────────────────────────────────────

/// Filters for list operations.
#[derive(Debug, Clone, Default)]
pub struct ListFilters {
    /// Page size requested from the server.
    pub limit: Option<u32>,
    /// Free-text search.
    pub search: Option<String>,
    /// Additional server-specific filters.
    pub extra: Vec<(String, String)>,
}

impl ListFilters {
    /// Set the page size.
    pub fn limit(mut self, limit: u32) -> Self {
        self.limit = Some(limit);
        self
    }

    /// Set the search text.
    pub fn search(mut self, search: impl Into<String>) -> Self {
        self.search = Some(search.into());
        self
    }

    /// Add a server-specific filter.
    pub fn filter(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.extra.push((key.into(), value.into()));
        self
    }

    /// Query pairs for one page request.
    pub(crate) fn to_query(&self, cursor: Option<&str>) -> Vec<(String, String)> {
        let mut query = Vec::new();
        if let Some(limit) = self.limit {
            query.push(("limit".to_string(), limit.to_string()));
        }
        if let Some(search) = &self.search {
            query.push(("search".to_string(), search.clone()));
        }
        query.extend(self.extra.iter().cloned());
        if let Some(cursor) = cursor {
            query.push(("cursor".to_string(), cursor.to_string()));
        }
        query
    }
}

/// One page of a list response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Page<T> {
    /// Items on this page.
    #[serde(alias = "data")]
    pub items: Vec<T>,
    /// Cursor for the next page; absent on the last page.
    #[serde(default, alias = "next_page_token", skip_serializing_if = "Option::is_none")]
    pub next_cursor: Option<String>,
}
