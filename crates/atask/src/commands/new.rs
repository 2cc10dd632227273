//! New command implementation.
//!
//! Appends a task to the task file. A recurrence pattern is validated up
//! front and stored in its normalized form.

use atask_core_rs::recurrence::parse_recurrence_pattern;
use atask_core_rs::task::{format_date, is_valid_priority, next_index_id, TASK_PRIORITIES};
use atask_core_rs::Task;
use chrono::NaiveDate;
use serde::Serialize;
use tracing::debug;

use super::config::Config;
use super::{CommandContext, CommandError, Result};

/// Options for the new command.
#[derive(Debug, Default)]
pub struct NewOptions {
    /// Task title.
    pub title: String,
    /// Priority (`p1`, `p2`, `p3`).
    pub priority: Option<String>,
    /// Due date.
    pub due: Option<NaiveDate>,
    /// Area.
    pub area: Option<String>,
    /// Effort estimate.
    pub estimate: Option<i64>,
    /// Tags.
    pub tags: Vec<String>,
    /// Recurrence pattern; needs a due date to anchor on.
    pub recur: Option<String>,
}

/// Builds the task that `new` appends to `tasks`.
///
/// # Errors
///
/// Returns an error for an empty title, an unknown priority, a negative
/// estimate, an invalid pattern, or a pattern without a due date.
pub fn build_task(tasks: &[Task], opts: &NewOptions) -> Result<Task> {
    let title = opts.title.trim();
    if title.is_empty() {
        return Err(CommandError::InvalidArgument(
            "task title is empty".to_string(),
        ));
    }

    let recur = match &opts.recur {
        Some(_) if opts.due.is_none() => {
            return Err(CommandError::InvalidArgument(
                "--due is required when --recur is set".to_string(),
            ));
        }
        Some(pattern) => parse_recurrence_pattern(pattern)?.to_string(),
        None => String::new(),
    };

    let priority = match &opts.priority {
        Some(priority) => normalize_priority(priority)?,
        None => String::new(),
    };

    let estimate = opts.estimate.unwrap_or(0);
    if estimate < 0 {
        return Err(CommandError::InvalidArgument(format!(
            "estimate must not be negative, got {estimate}"
        )));
    }

    let mut task = Task::new(next_index_id(tasks), title);
    task.priority = priority;
    task.due_date = opts.due;
    task.area = opts.area.clone().unwrap_or_default();
    task.estimate = estimate;
    task.tags = opts
        .tags
        .iter()
        .map(|tag| tag.trim())
        .filter(|tag| !tag.is_empty())
        .map(String::from)
        .collect();
    task.recur = recur;

    Ok(task)
}

/// Lowercases a priority and checks it against [`TASK_PRIORITIES`].
pub(crate) fn normalize_priority(priority: &str) -> Result<String> {
    let priority = priority.trim().to_lowercase();
    if !is_valid_priority(&priority) {
        return Err(CommandError::InvalidArgument(format!(
            "unknown priority '{}' (expected one of: {})",
            priority,
            TASK_PRIORITIES.join(", ")
        )));
    }
    Ok(priority)
}

/// Executes the new command.
///
/// # Errors
///
/// Returns an error if the options are invalid or the task file cannot be
/// read or written. The file is untouched on error.
pub fn execute(ctx: &CommandContext, config: &Config, opts: &NewOptions) -> Result<()> {
    let store = ctx.open_store(config)?;
    let mut tasks = store.load_or_default()?;

    let task = build_task(&tasks, opts)?;
    debug!(id = task.index_id, recur = %task.recur, "creating task");
    tasks.push(task.clone());
    store.save(&tasks)?;

    if ctx.json_output {
        println!("{}", format_created_json(&task)?);
    } else if !ctx.quiet {
        println!("Created: {} (#{})", task.title, task.index_id);
        if task.is_recurring() {
            println!(
                "  Repeats {} from {}",
                task.recur,
                format_date(task.due_date)
            );
        }
    }

    Ok(())
}

fn format_created_json(task: &Task) -> Result<String> {
    #[derive(Serialize)]
    struct CreatedOutput<'a> {
        id: i64,
        title: &'a str,
        #[serde(skip_serializing_if = "Option::is_none")]
        due: Option<String>,
        #[serde(skip_serializing_if = "Option::is_none")]
        recur: Option<&'a str>,
    }

    let output = CreatedOutput {
        id: task.index_id,
        title: &task.title,
        due: task.due_date.map(|d| format_date(Some(d))),
        recur: task.is_recurring().then_some(task.recur.as_str()),
    };

    serde_json::to_string_pretty(&output).map_err(CommandError::from)
}
