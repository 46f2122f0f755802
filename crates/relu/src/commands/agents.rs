//! Agents command - agent management.

use anyhow::{Context as _, Result};
use clap::{Args, Subcommand};
use console::Style;

use relu_client::{Agent, AgentConfig, AgentPressTool, AgentUpdate, ListFilters, ToolBinding};

use super::{Context, collect_limited, header, success, truncate};

/// Arguments for the agents command.
#[derive(Args, Debug)]
pub struct AgentsArgs {
    #[command(subcommand)]
    pub command: AgentsCommand,
}

#[derive(Subcommand, Debug)]
pub enum AgentsCommand {
    /// List agents
    List {
        /// Page size requested from the server
        #[arg(long)]
        page_size: Option<u32>,

        /// Free-text search
        #[arg(short, long)]
        search: Option<String>,

        /// Stop after this many agents
        #[arg(short, long)]
        limit: Option<usize>,
    },

    /// Show an agent
    Get {
        /// Agent ID
        id: String,
    },

    /// Create an agent
    Create {
        /// Agent name
        #[arg(short, long)]
        name: String,

        /// System instructions
        #[arg(short, long)]
        instructions: Option<String>,

        /// Model override
        #[arg(short, long)]
        model: Option<String>,

        /// Built-in tool to grant (e.g. web_search_tool); repeatable
        #[arg(short, long = "tool")]
        tools: Vec<String>,

        /// MCP server as NAME=URL; repeatable
        #[arg(long = "mcp")]
        mcp_servers: Vec<String>,
    },

    /// Update an agent
    Update {
        /// Agent ID
        id: String,

        /// New name
        #[arg(short, long)]
        name: Option<String>,

        /// New instructions
        #[arg(short, long)]
        instructions: Option<String>,

        /// New model
        #[arg(short, long)]
        model: Option<String>,
    },

    /// Delete an agent
    Delete {
        /// Agent ID
        id: String,
    },
}

/// Run the agents command.
pub async fn run(args: AgentsArgs, ctx: &Context) -> Result<()> {
    let relu = ctx.sdk()?;
    let api = relu.agent();

    match args.command {
        AgentsCommand::List {
            page_size,
            search,
            limit,
        } => {
            let filters = ListFilters {
                limit: page_size,
                search,
                ..Default::default()
            };
            let agents = collect_limited(api.list(filters), limit).await?;

            if ctx.json_output {
                ctx.print_json(&agents)?;
            } else {
                print_agent_list(&agents);
            }
        }
        AgentsCommand::Get { id } => {
            let agent = api.get(&id).await?;
            if ctx.json_output {
                ctx.print_json(&agent)?;
            } else {
                print_agent(&agent);
            }
        }
        AgentsCommand::Create {
            name,
            instructions,
            model,
            tools,
            mcp_servers,
        } => {
            let mut config = AgentConfig::new(name);
            config.instructions = instructions;
            config.model = model;
            for tool in tools {
                config.tools.push(tool.parse::<AgentPressTool>()?.into());
            }
            for server in mcp_servers {
                config.tools.push(parse_mcp(&server)?);
            }

            let agent = api.create(&config).await?;
            if ctx.json_output {
                ctx.print_json(&agent)?;
            } else {
                success(format!("Agent created: {}", agent.id));
            }
        }
        AgentsCommand::Update {
            id,
            name,
            instructions,
            model,
        } => {
            let update = AgentUpdate {
                name,
                instructions,
                model,
                ..Default::default()
            };
            let agent = api.update(&id, &update).await?;
            if ctx.json_output {
                ctx.print_json(&agent)?;
            } else {
                success(format!("Agent updated: {}", agent.id));
            }
        }
        AgentsCommand::Delete { id } => {
            api.delete(&id).await?;
            if ctx.json_output {
                ctx.print_json(&serde_json::json!({ "deleted": id }))?;
            } else {
                success(format!("Agent deleted: {}", id));
            }
        }
    }

    Ok(())
}

/// Parse `NAME=URL` into an MCP tool binding.
fn parse_mcp(spec: &str) -> Result<ToolBinding> {
    let (name, url) = spec
        .split_once('=')
        .context("MCP server must be given as NAME=URL")?;
    Ok(ToolBinding::mcp(name.trim(), url.trim()))
}

fn print_agent_list(agents: &[Agent]) {
    let dim = Style::new().dim();
    header("Agents");
    println!();

    if agents.is_empty() {
        println!("{}", dim.apply_to("No agents found"));
        return;
    }

    for agent in agents {
        let summary = agent.instructions.as_deref().unwrap_or("");
        println!(
            "{} {}  {}",
            dim.apply_to(format!("[{}]", agent.id)),
            agent.name,
            dim.apply_to(truncate(summary, 50))
        );
    }
}

fn print_agent(agent: &Agent) {
    let dim = Style::new().dim();
    header(&agent.name);
    println!("{} {}", dim.apply_to("ID:      "), agent.id);
    if let Some(model) = &agent.model {
        println!("{} {}", dim.apply_to("Model:   "), model);
    }
    if let Some(created) = &agent.created_at {
        println!("{} {}", dim.apply_to("Created: "), created);
    }
    if !agent.tools.is_empty() {
        println!("{}", dim.apply_to("Tools:"));
        for tool in &agent.tools {
            match tool {
                ToolBinding::AgentPress { tool } => println!("  {}", tool.as_str()),
                ToolBinding::Mcp { name, url, .. } => println!("  mcp:{} ({})", name, url),
            }
        }
    }
    if let Some(instructions) = &agent.instructions {
        println!();
        println!("{}", instructions);
    }
}
