//! Threads command - thread management and agent runs.

use anyhow::Result;
use clap::{Args, Subcommand};
use console::Style;

use relu_client::{ListFilters, Message, NewMessage, Run, RunInput, RunStatus, ThreadConfig};

use super::{Context, collect_limited, header, success, truncate};

/// Arguments for the threads command.
#[derive(Args, Debug)]
pub struct ThreadsArgs {
    #[command(subcommand)]
    pub command: ThreadsCommand,
}

#[derive(Subcommand, Debug)]
pub enum ThreadsCommand {
    /// Create a thread
    Create {
        /// Thread title
        #[arg(short, long)]
        title: Option<String>,
    },

    /// List threads
    List {
        /// Page size requested from the server
        #[arg(long)]
        page_size: Option<u32>,

        /// Free-text search
        #[arg(short, long)]
        search: Option<String>,

        /// Stop after this many threads
        #[arg(short, long)]
        limit: Option<usize>,
    },

    /// Show a thread
    Get {
        /// Thread ID
        id: String,
    },

    /// Delete a thread
    Delete {
        /// Thread ID
        id: String,
    },

    /// Run an agent on a thread
    Run {
        /// Thread ID
        thread_id: String,

        /// Agent ID
        agent_id: String,

        /// Prompt for the run
        message: String,

        /// Model override
        #[arg(short, long)]
        model: Option<String>,
    },

    /// Show the status of a run
    RunStatus {
        /// Thread ID
        thread_id: String,

        /// Run ID
        run_id: String,
    },

    /// Show the messages in a thread
    Messages {
        /// Thread ID
        thread_id: String,
    },

    /// Append a message to a thread without running an agent
    Send {
        /// Thread ID
        thread_id: String,

        /// Message content
        content: String,
    },
}

/// Run the threads command.
pub async fn run(args: ThreadsArgs, ctx: &Context) -> Result<()> {
    let relu = ctx.sdk()?;
    let api = relu.thread();
    let dim = Style::new().dim();

    match args.command {
        ThreadsCommand::Create { title } => {
            let config = ThreadConfig {
                title,
                ..Default::default()
            };
            let thread = api.create(&config).await?;
            if ctx.json_output {
                ctx.print_json(&thread)?;
            } else {
                success(format!("Thread created: {}", thread.id));
            }
        }
        ThreadsCommand::List {
            page_size,
            search,
            limit,
        } => {
            let filters = ListFilters {
                limit: page_size,
                search,
                ..Default::default()
            };
            let threads = collect_limited(api.list(filters), limit).await?;

            if ctx.json_output {
                ctx.print_json(&threads)?;
            } else {
                header("Threads");
                println!();
                if threads.is_empty() {
                    println!("{}", dim.apply_to("No threads found"));
                }
                for thread in &threads {
                    println!(
                        "{} {}",
                        dim.apply_to(format!("[{}]", thread.id)),
                        thread.title.as_deref().unwrap_or("(untitled)")
                    );
                }
            }
        }
        ThreadsCommand::Get { id } => {
            let thread = api.get(&id).await?;
            if ctx.json_output {
                ctx.print_json(&thread)?;
            } else {
                header(thread.title.as_deref().unwrap_or("(untitled)"));
                println!("{} {}", dim.apply_to("ID:      "), thread.id);
                if let Some(created) = &thread.created_at {
                    println!("{} {}", dim.apply_to("Created: "), created);
                }
            }
        }
        ThreadsCommand::Delete { id } => {
            api.delete(&id).await?;
            if ctx.json_output {
                ctx.print_json(&serde_json::json!({ "deleted": id }))?;
            } else {
                success(format!("Thread deleted: {}", id));
            }
        }
        ThreadsCommand::Run {
            thread_id,
            agent_id,
            message,
            model,
        } => {
            let mut input = RunInput::new(message);
            input.model = model;
            let run = api.run(&thread_id, &agent_id, &input).await?;
            if ctx.json_output {
                ctx.print_json(&run)?;
            } else {
                print_run(&run);
            }
        }
        ThreadsCommand::RunStatus { thread_id, run_id } => {
            let run = api.get_run(&thread_id, &run_id).await?;
            if ctx.json_output {
                ctx.print_json(&run)?;
            } else {
                print_run(&run);
            }
        }
        ThreadsCommand::Messages { thread_id } => {
            let messages = api.messages(&thread_id).await?;
            if ctx.json_output {
                ctx.print_json(&messages)?;
            } else {
                header("Messages");
                println!();
                for message in &messages {
                    print_message(message);
                }
            }
        }
        ThreadsCommand::Send { thread_id, content } => {
            let message = api.add_message(&thread_id, &NewMessage::user(content)).await?;
            if ctx.json_output {
                ctx.print_json(&message)?;
            } else {
                success(format!("Message added: {}", message.id));
            }
        }
    }

    Ok(())
}

fn print_run(run: &Run) {
    let dim = Style::new().dim();
    let status = match run.status {
        RunStatus::Completed => Style::new().green(),
        RunStatus::Failed | RunStatus::Stopped => Style::new().red(),
        _ => Style::new().yellow(),
    };

    println!(
        "{} {}",
        dim.apply_to(format!("[{}]", run.id)),
        status.apply_to(format!("{:?}", run.status).to_lowercase())
    );
    if let Some(output) = &run.output {
        match output.as_str() {
            Some(text) => println!("{}", text),
            None => println!("{}", output),
        }
    }
    if let Some(error) = &run.error {
        println!("{} {}", Style::new().red().apply_to("Error:"), error);
    }
}

fn print_message(message: &Message) {
    let dim = Style::new().dim();
    let text = match message.content.as_str() {
        Some(text) => text.to_string(),
        None => message.content.to_string(),
    };
    println!("{} {}", dim.apply_to(format!("{:>9}", message.role)), truncate(&text, 70));
}
