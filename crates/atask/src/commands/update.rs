//! Update command implementation.
//!
//! Applies the same field changes to one or more tasks. Every value is
//! validated before the task file is read, so a bad flag never leaves a
//! partial edit behind.

use atask_core_rs::recurrence::{parse_recurrence_pattern, Recurrence};
use atask_core_rs::task::{is_valid_status, TASK_STATUSES};
use atask_core_rs::Task;
use chrono::NaiveDate;
use serde::Serialize;
use tracing::warn;

use super::config::Config;
use super::new::normalize_priority;
use super::{CommandContext, CommandError, Result};

/// Value of `--recur` that removes a task's pattern.
const CLEAR_RECUR: &str = "none";

/// Options for the update command.
#[derive(Debug, Default)]
pub struct UpdateOptions {
    /// Task index IDs.
    pub ids: Vec<i64>,
    /// New priority.
    pub priority: Option<String>,
    /// New due date.
    pub due: Option<NaiveDate>,
    /// New start date.
    pub start: Option<NaiveDate>,
    /// New area.
    pub area: Option<String>,
    /// New estimate.
    pub estimate: Option<i64>,
    /// New status.
    pub status: Option<String>,
    /// New recurrence pattern, or `none` to clear it.
    pub recur: Option<String>,
}

/// What `--recur` asks for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RecurChange {
    /// Store this pattern.
    Set(Recurrence),
    /// Remove the pattern.
    Clear,
}

impl RecurChange {
    /// Parses a `--recur` value: `none` (any case) or a recurrence pattern.
    ///
    /// # Errors
    ///
    /// Returns an error if the value is neither `none` nor a valid pattern.
    pub fn parse(value: &str) -> Result<Self> {
        if value.trim().eq_ignore_ascii_case(CLEAR_RECUR) {
            return Ok(RecurChange::Clear);
        }
        Ok(RecurChange::Set(parse_recurrence_pattern(value)?))
    }
}

/// Validated field changes applied to every selected task.
#[derive(Debug, Default)]
pub struct TaskChanges {
    priority: Option<String>,
    due: Option<NaiveDate>,
    start: Option<NaiveDate>,
    area: Option<String>,
    estimate: Option<i64>,
    status: Option<String>,
    recur: Option<RecurChange>,
}

impl TaskChanges {
    /// Validates the options.
    ///
    /// # Errors
    ///
    /// Returns an error for an unknown priority or status, a negative
    /// estimate, an invalid pattern, or when no change was requested.
    pub fn from_options(opts: &UpdateOptions) -> Result<Self> {
        let priority = opts
            .priority
            .as_deref()
            .map(normalize_priority)
            .transpose()?;

        let status = match &opts.status {
            Some(status) => {
                let status = status.trim().to_lowercase();
                if !is_valid_status(&status) {
                    return Err(CommandError::InvalidArgument(format!(
                        "unknown status '{}' (expected one of: {})",
                        status,
                        TASK_STATUSES.join(", ")
                    )));
                }
                Some(status)
            }
            None => None,
        };

        if let Some(estimate) = opts.estimate.filter(|e| *e < 0) {
            return Err(CommandError::InvalidArgument(format!(
                "estimate must not be negative, got {estimate}"
            )));
        }

        let changes = Self {
            priority,
            due: opts.due,
            start: opts.start,
            area: opts.area.clone(),
            estimate: opts.estimate,
            status,
            recur: opts.recur.as_deref().map(RecurChange::parse).transpose()?,
        };

        if changes.is_empty() {
            return Err(CommandError::InvalidArgument(
                "nothing to update (use --priority, --due, --start, --area, --estimate, --status, or --recur)"
                    .to_string(),
            ));
        }

        Ok(changes)
    }

    fn is_empty(&self) -> bool {
        self.priority.is_none()
            && self.due.is_none()
            && self.start.is_none()
            && self.area.is_none()
            && self.estimate.is_none()
            && self.status.is_none()
            && self.recur.is_none()
    }

    /// Applies the changes to `task` and returns the names of the fields set.
    pub fn apply(&self, task: &mut Task) -> Vec<&'static str> {
        let mut fields = Vec::new();

        if let Some(priority) = &self.priority {
            task.priority = priority.clone();
            fields.push("priority");
        }
        if let Some(due) = self.due {
            task.due_date = Some(due);
            fields.push("due_date");
        }
        if let Some(start) = self.start {
            task.start_date = Some(start);
            fields.push("start_date");
        }
        if let Some(area) = &self.area {
            task.area = area.clone();
            fields.push("area");
        }
        if let Some(estimate) = self.estimate {
            task.estimate = estimate;
            fields.push("estimate");
        }
        if let Some(status) = &self.status {
            task.status = status.clone();
            fields.push("status");
        }
        match &self.recur {
            Some(RecurChange::Set(recurrence)) => {
                task.recur = recurrence.to_string();
                fields.push("recur");
            }
            Some(RecurChange::Clear) => {
                task.recur.clear();
                fields.push("recur");
            }
            None => {}
        }

        fields
    }
}

/// Outcome of updating a single task.
#[derive(Debug)]
pub enum UpdateOutcome {
    /// The task was changed.
    Updated {
        id: i64,
        title: String,
        fields: Vec<&'static str>,
    },
    /// The task could not be updated.
    Failed { id: i64, error: CommandError },
}

/// Applies `changes` to each task in `ids`. Unknown IDs are reported and skipped.
pub fn update_tasks(tasks: &mut [Task], ids: &[i64], changes: &TaskChanges) -> Vec<UpdateOutcome> {
    ids.iter()
        .map(|&id| {
            let Some(task) = tasks.iter_mut().find(|t| t.index_id == id) else {
                return UpdateOutcome::Failed {
                    id,
                    error: CommandError::TaskNotFound(id),
                };
            };

            let fields = changes.apply(task);
            if task.is_recurring() && task.due_date.is_none() {
                warn!(id, pattern = %task.recur, "task repeats but has no due date; completing it will not schedule a next instance");
            }

            UpdateOutcome::Updated {
                id,
                title: task.title.clone(),
                fields,
            }
        })
        .collect()
}

/// Executes the update command.
///
/// # Errors
///
/// Returns an error if a value is invalid, the task file cannot be read or
/// written, or no task could be updated.
pub fn execute(ctx: &CommandContext, config: &Config, opts: &UpdateOptions) -> Result<()> {
    let changes = TaskChanges::from_options(opts)?;

    let store = ctx.open_store(config)?;
    let mut tasks = store.load_or_default()?;
    let outcomes = update_tasks(&mut tasks, &opts.ids, &changes);

    let updated = outcomes
        .iter()
        .filter(|o| matches!(o, UpdateOutcome::Updated { .. }))
        .count();
    if updated > 0 {
        store.save(&tasks)?;
    }

    if ctx.json_output {
        println!("{}", format_update_results_json(&outcomes)?);
    } else {
        for outcome in &outcomes {
            match outcome {
                UpdateOutcome::Updated { id, title, fields } => {
                    if !ctx.quiet {
                        println!("Updated: {} (#{}): {}", title, id, fields.join(", "));
                    }
                }
                UpdateOutcome::Failed { id, error } => {
                    eprintln!("Failed to update #{}: {}", id, error);
                }
            }
        }
    }

    if updated == 0 {
        let first_failure = outcomes.into_iter().find_map(|o| match o {
            UpdateOutcome::Failed { error, .. } => Some(error),
            UpdateOutcome::Updated { .. } => None,
        });
        if let Some(error) = first_failure {
            return Err(error);
        }
    }

    Ok(())
}

fn format_update_results_json(outcomes: &[UpdateOutcome]) -> Result<String> {
    #[derive(Serialize)]
    struct UpdateOutput<'a> {
        updated: Vec<UpdatedTaskOutput<'a>>,
        failed: Vec<FailedTaskOutput>,
    }

    #[derive(Serialize)]
    struct UpdatedTaskOutput<'a> {
        id: i64,
        title: &'a str,
        fields: &'a [&'static str],
    }

    #[derive(Serialize)]
    struct FailedTaskOutput {
        id: i64,
        error: String,
    }

    let mut output = UpdateOutput {
        updated: Vec::new(),
        failed: Vec::new(),
    };
    for outcome in outcomes {
        match outcome {
            UpdateOutcome::Updated { id, title, fields } => {
                output.updated.push(UpdatedTaskOutput {
                    id: *id,
                    title,
                    fields,
                })
            }
            UpdateOutcome::Failed { id, error } => output.failed.push(FailedTaskOutput {
                id: *id,
                error: error.to_string(),
            }),
        }
    }

    serde_json::to_string_pretty(&output).map_err(CommandError::from)
}
