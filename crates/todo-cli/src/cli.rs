use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;
use todo_domain::{DropTarget, DropZone, StatusFilter};

#[derive(Parser)]
#[command(name = "todo")]
#[command(about = "A local-first todo list", long_about = None)]
#[command(version, long_version = env!("TODO_LONG_VERSION"))]
pub struct Cli {
    /// Path to the todo data file (or set TODO_FILE env var)
    #[arg(long, global = true, value_name = "FILE", env = "TODO_FILE")]
    pub file: Option<PathBuf>,

    /// Path to the config file (or set TODO_CONFIG env var)
    #[arg(long, global = true, value_name = "FILE", env = "TODO_CONFIG")]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    #[command(flatten)]
    Todo(TodoAction),
    #[command(flatten)]
    Arrange(ArrangeAction),
    /// Active filter operations
    Filter(FilterCommand),
    /// Dark mode operations
    Theme(ThemeCommand),
    /// Generate shell completions
    Completions {
        #[arg(value_enum)]
        shell: clap_complete::Shell,
    },
}

#[derive(Subcommand)]
pub enum TodoAction {
    /// Add a new todo
    Add(AddArgs),
    /// List todos in the active filter
    List(ListArgs),
    /// Get a specific todo
    Get {
        #[arg(long)]
        id: String,
    },
    /// Edit a todo
    Edit(EditArgs),
    /// Remove a todo
    Remove {
        #[arg(long)]
        id: String,
    },
    /// Flip a todo between pending and completed
    Toggle {
        #[arg(long)]
        id: String,
    },
}

#[derive(Args)]
pub struct AddArgs {
    #[arg(long)]
    pub title: String,
    #[arg(long)]
    pub description: Option<String>,
    /// Due date (YYYY-MM-DD)
    #[arg(long)]
    pub due_date: Option<String>,
}

#[derive(Args)]
pub struct ListArgs {
    /// Override the active filter for this listing only
    #[arg(long)]
    pub filter: Option<StatusFilter>,
    /// Only pending todos whose due date has passed
    #[arg(long)]
    pub overdue: bool,
    /// Include the full collection alongside the filtered view
    #[arg(long)]
    pub all: bool,
}

#[derive(Args)]
pub struct EditArgs {
    #[arg(long)]
    pub id: String,
    #[arg(long)]
    pub title: Option<String>,
    /// New description (empty string clears it)
    #[arg(long, conflicts_with = "clear_description")]
    pub description: Option<String>,
    /// Due date (YYYY-MM-DD)
    #[arg(long, conflicts_with = "clear_due_date")]
    pub due_date: Option<String>,
    #[arg(long)]
    pub clear_description: bool,
    #[arg(long)]
    pub clear_due_date: bool,
}

#[derive(Subcommand)]
pub enum ArrangeAction {
    /// Move a todo within the active filtered view
    Reorder {
        /// Index in the filtered view
        #[arg(long)]
        from: usize,
        /// Index in the filtered view
        #[arg(long)]
        to: usize,
    },
    /// Drop a todo into the pending or completed zone
    Drop {
        #[arg(long)]
        id: String,
        #[arg(long)]
        zone: DropZone,
    },
    /// Finish a drag over a zone or another todo
    Drag {
        #[arg(long)]
        id: String,
        /// Zone name (pending, completed) or a todo id
        #[arg(long)]
        over: DropTarget,
    },
}

#[derive(Args)]
pub struct FilterCommand {
    #[command(subcommand)]
    pub action: FilterAction,
}

#[derive(Subcommand)]
pub enum FilterAction {
    /// Show the active filter
    Show,
    /// Set the active filter
    Set {
        /// all, pending or completed
        filter: StatusFilter,
    },
}

#[derive(Args)]
pub struct ThemeCommand {
    #[command(subcommand)]
    pub action: ThemeAction,
}

#[derive(Subcommand)]
pub enum ThemeAction {
    /// Show the effective dark mode setting
    Show,
    /// Flip dark mode and save the choice
    Toggle,
    /// Save an explicit dark mode choice
    Set {
        #[arg(long, action = clap::ArgAction::Set)]
        dark: bool,
    },
}
