//! CLI argument parsing using clap derive macros.
//!
//! This module defines the command-line interface for the atask CLI.

use std::path::PathBuf;

use chrono::NaiveDate;
use clap::{Parser, Subcommand, ValueEnum};

/// atask - query and complete tasks from a local task file
#[derive(Parser, Debug)]
#[command(name = "atask")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Verbose output (show debug information)
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Quiet mode (errors only)
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Output JSON instead of tables
    #[arg(long, global = true)]
    pub json: bool,

    /// Disable colors in output
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Task file to use (default: from config, then the XDG data directory)
    #[arg(long, global = true, env = "ATASK_TASKS")]
    pub tasks: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// List tasks matching a query expression
    #[command(alias = "q")]
    Query {
        /// Query expression (e.g., "status:open AND due:soon")
        expr: String,

        /// Sort by field
        #[arg(long, value_enum, default_value = "id")]
        sort: SortField,

        /// Reverse sort order
        #[arg(long)]
        reverse: bool,

        /// Limit results (default: 50)
        #[arg(long, default_value = "50")]
        limit: u32,

        /// Show all matching tasks (no limit)
        #[arg(long, conflicts_with = "limit")]
        all: bool,
    },

    /// Create a task
    #[command(alias = "add")]
    New {
        /// Task title
        title: String,

        /// Priority (p1, p2, p3)
        #[arg(short, long)]
        priority: Option<String>,

        /// Due date (YYYY-MM-DD)
        #[arg(long)]
        due: Option<NaiveDate>,

        /// Area
        #[arg(long)]
        area: Option<String>,

        /// Effort estimate
        #[arg(long)]
        estimate: Option<i64>,

        /// Comma-separated tags
        #[arg(long, value_delimiter = ',')]
        tags: Vec<String>,

        /// Recurrence pattern (requires --due)
        #[arg(long, requires = "due")]
        recur: Option<String>,
    },

    /// Change fields of existing task(s)
    Update {
        /// Task index IDs
        #[arg(required = true)]
        ids: Vec<i64>,

        /// Priority (p1, p2, p3)
        #[arg(short, long)]
        priority: Option<String>,

        /// Due date (YYYY-MM-DD)
        #[arg(long)]
        due: Option<NaiveDate>,

        /// Start date (YYYY-MM-DD)
        #[arg(long)]
        start: Option<NaiveDate>,

        /// Area
        #[arg(long)]
        area: Option<String>,

        /// Effort estimate
        #[arg(long)]
        estimate: Option<i64>,

        /// Status (open, done, paused, delegated, dropped)
        #[arg(long)]
        status: Option<String>,

        /// Recurrence pattern, or "none" to clear it
        #[arg(long)]
        recur: Option<String>,
    },

    /// Mark task(s) as done, scheduling the next instance of recurring tasks
    Done {
        /// Task index IDs
        #[arg(required = true)]
        ids: Vec<i64>,
    },

    /// Validate recurrence patterns and preview schedules
    Recur {
        #[command(subcommand)]
        command: RecurCommands,
    },

    /// View or edit configuration
    Config {
        #[command(subcommand)]
        command: Option<ConfigCommands>,
    },

    /// Generate shell completions
    Completions {
        /// Shell to generate completions for
        shell: Shell,
    },
}

/// Sort fields for the query command
#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum SortField {
    Id,
    Priority,
    Due,
}

/// Shell types for completions
#[derive(ValueEnum, Clone, Debug)]
pub enum Shell {
    Bash,
    Zsh,
    Fish,
    Powershell,
}

/// Recurrence subcommands
#[derive(Subcommand, Debug)]
pub enum RecurCommands {
    /// Validate a pattern and print its normalized form
    Check {
        /// Recurrence pattern (e.g., "every 2w", "every mon,thu")
        pattern: String,
    },

    /// Compute the next occurrence of a pattern
    Next {
        /// Recurrence pattern
        pattern: String,

        /// Current due date (YYYY-MM-DD)
        #[arg(long)]
        due: NaiveDate,

        /// Date to treat as today (default: the current date)
        #[arg(long)]
        today: Option<NaiveDate>,
    },
}

/// Config subcommands
#[derive(Subcommand, Debug)]
pub enum ConfigCommands {
    /// Show current configuration
    Show,

    /// Set a configuration value
    Set {
        /// Configuration key
        key: String,

        /// Configuration value
        value: String,
    },

    /// Print config file path
    Path,
}
