//! # taskdeck
//!
//! CLI front-end over the taskdeck crates: flat task list, kanban board,
//! and the create/edit/move/delete flows. All presentation, no policy —
//! validation lives in `taskdeck-core`, transport in `taskdeck-client`,
//! caching in `taskdeck-cache`, drag reconciliation in `taskdeck-board`.

#![deny(unsafe_code)]

mod commands;
mod render;

use anyhow::Result;
use clap::{Parser, Subcommand};

use taskdeck_client::TasksClient;
use taskdeck_core::TaskStatus;

/// Task list and kanban board over a remote tasks API.
#[derive(Parser, Debug)]
#[command(name = "taskdeck", version, about)]
struct Cli {
    /// Enable debug logging for taskdeck crates.
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// List tasks as a paginated table.
    List {
        /// 1-based page to show.
        #[arg(long, default_value_t = 1)]
        page: u32,
        /// Page size (defaults to the configured page size).
        #[arg(long)]
        limit: Option<u32>,
        /// Only show tasks with this status.
        #[arg(long)]
        status: Option<TaskStatus>,
    },
    /// Render the kanban board.
    Board {
        /// Page size used when fetching board tasks.
        #[arg(long)]
        limit: Option<u32>,
    },
    /// Show one task in full.
    Show {
        /// Task id.
        id: String,
    },
    /// Create a task.
    Create {
        /// Task title (required, must be non-empty).
        #[arg(long)]
        title: String,
        /// Optional description.
        #[arg(long, default_value = "")]
        description: String,
    },
    /// Edit a task; only changed fields are sent.
    Edit {
        /// Task id.
        id: String,
        /// New title.
        #[arg(long)]
        title: Option<String>,
        /// New description; pass an empty string to clear it.
        #[arg(long)]
        description: Option<String>,
        /// New status.
        #[arg(long)]
        status: Option<TaskStatus>,
    },
    /// Move a task to another column.
    Move {
        /// Task id.
        id: String,
        /// Target column (TO_DO, IN_PROGRESS or DONE).
        status: TaskStatus,
    },
    /// Delete a task after confirmation.
    Delete {
        /// Task id.
        id: String,
        /// Skip the confirmation prompt.
        #[arg(long)]
        yes: bool,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    taskdeck_logging::init(cli.verbose);

    let settings = taskdeck_settings::load_settings()?;
    let client = TasksClient::new(settings.api.base_url.as_deref())?;

    match cli.command {
        Command::List { page, limit, status } => {
            commands::list(&client, &settings, page, limit, status).await
        }
        Command::Board { limit } => commands::board(&client, &settings, limit).await,
        Command::Show { id } => commands::show(&client, &id).await,
        Command::Create { title, description } => {
            commands::create(&client, &title, &description).await
        }
        Command::Edit {
            id,
            title,
            description,
            status,
        } => commands::edit(&client, &id, title, description, status).await,
        Command::Move { id, status } => commands::move_task(&client, &id, status).await,
        Command::Delete { id, yes } => commands::delete(&client, &settings, &id, yes).await,
    }
}
