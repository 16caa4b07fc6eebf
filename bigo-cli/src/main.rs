//! BIGO CLI - team task board for your terminal.
//!
//! Commands:
//! - `bigo init`: Create a board with the three seed lanes
//! - `bigo board`: Show the board, optionally filtered by label/assignee
//! - `bigo add-task <title>`: Add a task (assigned to --actor)
//! - `bigo add-column <title>`: Append a status lane
//! - `bigo move-task <task> <column>`: Move a task to a lane
//! - `bigo move-column <from> <to>`: Reorder lanes by position
//! - `bigo rename-column <column> <title>`: Rename a lane
//! - `bigo remove-column <column>`: Remove an empty lane
//! - `bigo label add|rm <task> <label>`: Manage task labels
//! - `bigo edit-task <task>`: Edit title, description, or assignee
//! - `bigo log`: Show recent board activity
//!
//! Exit codes:
//! - 0: Success
//! - 1: Error

use clap::Parser;
use tracing_subscriber::EnvFilter;

use bigo_board::Actor;

mod cli;
mod commands;

use cli::{Cli, Commands, LabelAction};

/// Map a command result to an exit code
fn handle_result(result: bigo_board::Result<()>) -> i32 {
    match result {
        Ok(()) => 0,
        Err(e) => {
            eprintln!("Error: {}", e);
            1
        }
    }
}

/// The acting user for this invocation
fn resolve_actor(name: Option<String>) -> Actor {
    match name {
        Some(name) => {
            let id = name.trim().to_lowercase().replace(' ', "-");
            Actor::new(id, name)
        }
        None => Actor::unassigned(),
    }
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_ansi(false)
        .with_writer(std::io::stderr)
        .init();

    let actor = resolve_actor(cli.actor);
    let dir = cli.board;

    let exit_code = match cli.command {
        Commands::Init => handle_result(commands::run_init(&dir, &actor).await),

        Commands::Board { label, assignee } => {
            handle_result(commands::run_board(&dir, &label, &assignee).await)
        }

        Commands::AddTask {
            title,
            description,
            labels,
            column,
        } => handle_result(
            commands::run_add_task(&dir, &actor, title, description, labels, column).await,
        ),

        Commands::AddColumn { title } => {
            handle_result(commands::run_add_column(&dir, &actor, title).await)
        }

        Commands::MoveTask { task, column } => {
            handle_result(commands::run_move_task(&dir, &actor, task, column).await)
        }

        Commands::MoveColumn { from, to } => {
            handle_result(commands::run_move_column(&dir, &actor, from, to).await)
        }

        Commands::RenameColumn { column, title } => {
            handle_result(commands::run_rename_column(&dir, &actor, column, title).await)
        }

        Commands::RemoveColumn { column } => {
            handle_result(commands::run_remove_column(&dir, &actor, column).await)
        }

        Commands::Label { action } => match action {
            LabelAction::Add { task, label } => {
                handle_result(commands::run_label_add(&dir, &actor, task, label).await)
            }
            LabelAction::Rm { task, label } => {
                handle_result(commands::run_label_rm(&dir, &actor, task, label).await)
            }
        },

        Commands::EditTask {
            task,
            title,
            description,
            assignee,
        } => handle_result(
            commands::run_edit_task(&dir, &actor, task, title, description, assignee).await,
        ),

        Commands::Log { limit } => handle_result(commands::run_log(&dir, limit).await),
    };

    std::process::exit(exit_code);
}
