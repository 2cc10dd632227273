//! Command implementations for the atask CLI.
//!
//! This module contains the actual command handlers that are invoked by the CLI.

pub mod completions;
pub mod config;
pub mod done;
pub mod new;
pub mod query;
pub mod recur;
pub mod update;

use std::path::PathBuf;

use atask_core_rs::query::QueryError;
use atask_core_rs::recurrence::{PatternError, ScheduleError};
use atask_core_rs::{TaskStore, TaskStoreError};
use tracing::debug;

use crate::cli::Cli;

/// Error type for command execution.
#[derive(Debug, thiserror::Error)]
pub enum CommandError {
    /// Query parse error.
    #[error("query error: {0}")]
    Query(#[from] QueryError),

    /// Invalid recurrence pattern.
    #[error("{0}")]
    Pattern(#[from] PatternError),

    /// Next-occurrence computation failed.
    #[error("{0}")]
    Schedule(#[from] ScheduleError),

    /// Task file error.
    #[error("task file error: {0}")]
    Store(#[from] TaskStoreError),

    /// A command-line value failed validation.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// A requested task does not exist.
    #[error("task not found: {0}")]
    TaskNotFound(i64),

    /// Configuration error.
    #[error("configuration error: {0}")]
    Config(String),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization error.
    #[error("serialization error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result type for command execution.
pub type Result<T> = std::result::Result<T, CommandError>;

/// Context for command execution, containing common dependencies.
pub struct CommandContext {
    /// Whether to output JSON.
    pub json_output: bool,
    /// Whether to use colors.
    pub use_colors: bool,
    /// Whether to be quiet (errors only).
    pub quiet: bool,
    /// Whether to be verbose.
    pub verbose: bool,
    /// Task file given on the command line or via `ATASK_TASKS`.
    pub tasks_path: Option<PathBuf>,
}

impl CommandContext {
    /// Creates a new command context from CLI arguments and the loaded config.
    ///
    /// Colors are on unless `--no-color` is given, `NO_COLOR` is set, or the
    /// config disables them.
    pub fn from_cli(cli: &Cli, config: &config::Config) -> Self {
        let color_env_off = std::env::var_os("NO_COLOR").is_some_and(|v| !v.is_empty());
        Self {
            json_output: cli.json,
            use_colors: !cli.no_color && !color_env_off && config.output.color.unwrap_or(true),
            quiet: cli.quiet,
            verbose: cli.verbose,
            tasks_path: cli.tasks.clone(),
        }
    }

    /// Opens the task store.
    ///
    /// Path precedence: `--tasks`/`ATASK_TASKS`, then `tasks_file` from the
    /// config, then the default data directory.
    pub fn open_store(&self, config: &config::Config) -> Result<TaskStore> {
        let store = match (&self.tasks_path, &config.tasks_file) {
            (Some(path), _) => TaskStore::with_path(path.clone()),
            (None, Some(path)) => TaskStore::with_path(path.clone()),
            (None, None) => TaskStore::new()?,
        };
        debug!(path = %store.path().display(), "using task file");
        Ok(store)
    }
}
