//! CLI definition for the BIGO command-line interface
//!
//! This module only depends on `clap` and `std`; all behavior lives in
//! `commands`.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// BIGO - Team task board for your terminal.
///
/// The board lives in a directory (default `.bigo/`): a JSON snapshot of
/// columns and tasks plus an append-only activity journal. Every command
/// loads the board, applies one change, and saves it back.
#[derive(Parser, Debug)]
#[command(name = "bigo")]
#[command(version)]
#[command(about = "Team task board for your terminal")]
#[command(
    long_about = "BIGO keeps a team task board in a directory: columns are status lanes, \
    tasks point at their lane by id, and every change is saved as a whole-board snapshot \
    alongside an append-only activity journal.\n\n\
    Start with `bigo init`, then `bigo add-task` and `bigo board`."
)]
pub struct Cli {
    /// Board directory
    #[arg(long, global = true, value_name = "DIR", default_value = ".bigo")]
    pub board: PathBuf,

    /// Act as this user; new tasks are assigned to them
    #[arg(long, global = true, value_name = "NAME")]
    pub actor: Option<String>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Create a board with the three seed lanes
    Init,

    /// Show the board, optionally filtered
    Board {
        /// Only tasks carrying this label ("all" for everything)
        #[arg(long, default_value = "all")]
        label: String,
        /// Only tasks assigned to this name ("all" for everyone)
        #[arg(long, default_value = "all")]
        assignee: String,
    },

    /// Add a task
    AddTask {
        /// Task title
        title: String,
        /// Task description
        #[arg(long, default_value = "")]
        description: String,
        /// Label to attach; may be repeated
        #[arg(long = "label", value_name = "LABEL")]
        labels: Vec<String>,
        /// Column to land in (id or title); the default lane when omitted
        #[arg(long, value_name = "COLUMN")]
        column: Option<String>,
    },

    /// Append a column to the board
    AddColumn {
        /// Column title
        title: String,
    },

    /// Move a task to a column
    MoveTask {
        /// Task id or exact title
        task: String,
        /// Column id or title
        column: String,
    },

    /// Move a column from one position to another (0-based)
    MoveColumn {
        from: usize,
        to: usize,
    },

    /// Rename a column
    RenameColumn {
        /// Column id or title
        column: String,
        /// New title
        title: String,
    },

    /// Remove a column that has no tasks
    RemoveColumn {
        /// Column id or title
        column: String,
    },

    /// Manage task labels
    Label {
        #[command(subcommand)]
        action: LabelAction,
    },

    /// Edit a task's title, description, or assignee
    EditTask {
        /// Task id or exact title
        task: String,
        /// New title
        #[arg(long)]
        title: Option<String>,
        /// New description
        #[arg(long)]
        description: Option<String>,
        /// New assignee display name
        #[arg(long)]
        assignee: Option<String>,
    },

    /// Show recent board activity, newest first
    Log {
        /// Number of entries to show
        #[arg(long, default_value_t = 20)]
        limit: usize,
    },
}

#[derive(Subcommand, Debug)]
pub enum LabelAction {
    /// Add a label to a task
    Add {
        /// Task id or exact title
        task: String,
        label: String,
    },
    /// Remove every occurrence of a label from a task
    Rm {
        /// Task id or exact title
        task: String,
        label: String,
    },
}

#[cfg(test)]
impl Cli {
    fn try_parse_from_args<I, T>(args: I) -> Result<Self, clap::Error>
    where
        I: IntoIterator<Item = T>,
        T: Into<std::ffi::OsString> + Clone,
    {
        <Self as clap::Parser>::try_parse_from(args)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_help_works() {
        let result = Cli::try_parse_from_args(["bigo", "--help"]);
        assert!(result.is_err()); // Help exits with error code but that's expected

        let error = result.unwrap_err();
        assert_eq!(error.kind(), clap::error::ErrorKind::DisplayHelp);
    }

    #[test]
    fn test_cli_version_works() {
        let result = Cli::try_parse_from_args(["bigo", "--version"]);
        assert!(result.is_err());

        let error = result.unwrap_err();
        assert_eq!(error.kind(), clap::error::ErrorKind::DisplayVersion);
    }

    #[test]
    fn test_cli_requires_subcommand() {
        let result = Cli::try_parse_from_args(["bigo"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_cli_init_subcommand() {
        let cli = Cli::try_parse_from_args(["bigo", "init"]).unwrap();
        assert!(matches!(cli.command, Commands::Init));
        assert_eq!(cli.board, PathBuf::from(".bigo"));
        assert!(cli.actor.is_none());
    }

    #[test]
    fn test_cli_global_flags() {
        let cli = Cli::try_parse_from_args([
            "bigo", "--board", "/tmp/b", "--actor", "Casey", "board",
        ])
        .unwrap();
        assert_eq!(cli.board, PathBuf::from("/tmp/b"));
        assert_eq!(cli.actor.as_deref(), Some("Casey"));

        // Global flags also parse after the subcommand
        let cli = Cli::try_parse_from_args(["bigo", "init", "--board", "/tmp/b"]).unwrap();
        assert_eq!(cli.board, PathBuf::from("/tmp/b"));
    }

    #[test]
    fn test_cli_board_filters_default_to_all() {
        let cli = Cli::try_parse_from_args(["bigo", "board"]).unwrap();
        match cli.command {
            Commands::Board { label, assignee } => {
                assert_eq!(label, "all");
                assert_eq!(assignee, "all");
            }
            other => panic!("expected Board, got {other:?}"),
        }
    }

    #[test]
    fn test_cli_add_task_repeated_labels() {
        let cli = Cli::try_parse_from_args([
            "bigo",
            "add-task",
            "Ship the beta",
            "--label",
            "development",
            "--label",
            "marketing",
            "--column",
            "in-progress",
        ])
        .unwrap();
        match cli.command {
            Commands::AddTask {
                title,
                labels,
                column,
                ..
            } => {
                assert_eq!(title, "Ship the beta");
                assert_eq!(labels, vec!["development", "marketing"]);
                assert_eq!(column.as_deref(), Some("in-progress"));
            }
            other => panic!("expected AddTask, got {other:?}"),
        }
    }

    #[test]
    fn test_cli_move_column_positions() {
        let cli = Cli::try_parse_from_args(["bigo", "move-column", "0", "2"]).unwrap();
        assert!(matches!(cli.command, Commands::MoveColumn { from: 0, to: 2 }));
    }

    #[test]
    fn test_cli_label_subcommands() {
        let cli = Cli::try_parse_from_args(["bigo", "label", "add", "t1", "design"]).unwrap();
        match cli.command {
            Commands::Label {
                action: LabelAction::Add { task, label },
            } => {
                assert_eq!(task, "t1");
                assert_eq!(label, "design");
            }
            other => panic!("expected Label Add, got {other:?}"),
        }

        let cli = Cli::try_parse_from_args(["bigo", "label", "rm", "t1", "design"]).unwrap();
        assert!(matches!(
            cli.command,
            Commands::Label {
                action: LabelAction::Rm { .. }
            }
        ));
    }

    #[test]
    fn test_cli_edit_task_partial_flags() {
        let cli =
            Cli::try_parse_from_args(["bigo", "edit-task", "t1", "--assignee", "Robin"]).unwrap();
        match cli.command {
            Commands::EditTask {
                task,
                title,
                description,
                assignee,
            } => {
                assert_eq!(task, "t1");
                assert!(title.is_none());
                assert!(description.is_none());
                assert_eq!(assignee.as_deref(), Some("Robin"));
            }
            other => panic!("expected EditTask, got {other:?}"),
        }
    }

    #[test]
    fn test_cli_log_limit() {
        let cli = Cli::try_parse_from_args(["bigo", "log"]).unwrap();
        assert!(matches!(cli.command, Commands::Log { limit: 20 }));

        let cli = Cli::try_parse_from_args(["bigo", "log", "--limit", "5"]).unwrap();
        assert!(matches!(cli.command, Commands::Log { limit: 5 }));
    }
}
