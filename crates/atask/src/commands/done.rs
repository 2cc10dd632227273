//! Done command implementation.
//!
//! Marks tasks as done in the task file. Completing a recurring task appends
//! its next instance; the next due date is computed first, so a task whose
//! pattern cannot be scheduled is left untouched.

use atask_core_rs::recurrence::spawn_next;
use atask_core_rs::task::{format_date, next_index_id, STATUS_DONE};
use atask_core_rs::Task;
use chrono::{Local, NaiveDate};
use serde::Serialize;
use tracing::warn;

use super::config::Config;
use super::{CommandContext, CommandError, Result};

/// Options for the done command.
#[derive(Debug)]
pub struct DoneOptions {
    /// Task index IDs.
    pub ids: Vec<i64>,
}

/// Outcome of completing a single task.
#[derive(Debug)]
pub enum DoneOutcome {
    /// The task was marked done.
    Completed {
        id: i64,
        title: String,
        /// ID and due date of the spawned instance, for recurring tasks.
        next: Option<(i64, NaiveDate)>,
    },
    /// The task was already done and was left alone.
    AlreadyDone { id: i64, title: String },
    /// The task could not be completed.
    Failed { id: i64, error: CommandError },
}

/// Marks the given tasks done, appending next instances of recurring tasks.
///
/// `tasks` is only modified for outcomes that are [`DoneOutcome::Completed`].
pub fn complete_tasks(tasks: &mut Vec<Task>, ids: &[i64], today: NaiveDate) -> Vec<DoneOutcome> {
    ids.iter()
        .map(|&id| complete_one(tasks, id, today))
        .collect()
}

fn complete_one(tasks: &mut Vec<Task>, id: i64, today: NaiveDate) -> DoneOutcome {
    let Some(pos) = tasks.iter().position(|t| t.index_id == id) else {
        return DoneOutcome::Failed {
            id,
            error: CommandError::TaskNotFound(id),
        };
    };

    if tasks[pos].is_done() {
        return DoneOutcome::AlreadyDone {
            id,
            title: tasks[pos].title.clone(),
        };
    }

    let next_id = next_index_id(tasks);
    let next = match spawn_next(&tasks[pos], next_id, today) {
        Ok(next) => next,
        Err(e) => {
            warn!(id, pattern = %tasks[pos].recur, "cannot schedule next occurrence: {e}");
            return DoneOutcome::Failed {
                id,
                error: e.into(),
            };
        }
    };

    tasks[pos].status = STATUS_DONE.to_string();
    let title = tasks[pos].title.clone();
    let next_info = next.map(|task| {
        let info = (task.index_id, task.due_date.unwrap_or(today));
        tasks.push(task);
        info
    });

    DoneOutcome::Completed {
        id,
        title,
        next: next_info,
    }
}

/// Executes the done command.
///
/// # Errors
///
/// Returns an error if the task file cannot be read or written, or if no
/// task could be completed.
pub fn execute(ctx: &CommandContext, config: &Config, opts: &DoneOptions) -> Result<()> {
    let store = ctx.open_store(config)?;
    let mut tasks = store.load_or_default()?;

    let today = Local::now().date_naive();
    let outcomes = complete_tasks(&mut tasks, &opts.ids, today);

    let completed = outcomes
        .iter()
        .filter(|o| matches!(o, DoneOutcome::Completed { .. }))
        .count();
    if completed > 0 {
        store.save(&tasks)?;
    }

    if ctx.json_output {
        println!("{}", format_done_results_json(&outcomes)?);
    } else {
        print_outcomes(ctx, &outcomes);
    }

    if completed == 0 {
        let first_failure = outcomes.into_iter().find_map(|o| match o {
            DoneOutcome::Failed { error, .. } => Some(error),
            _ => None,
        });
        if let Some(error) = first_failure {
            return Err(error);
        }
    }

    Ok(())
}

fn print_outcomes(ctx: &CommandContext, outcomes: &[DoneOutcome]) {
    for outcome in outcomes {
        match outcome {
            DoneOutcome::Completed { id, title, next } => {
                if ctx.quiet {
                    continue;
                }
                println!("Completed: {} (#{})", title, id);
                if let Some((next_id, due)) = next {
                    println!("  Next: #{} due {}", next_id, format_date(Some(*due)));
                }
            }
            DoneOutcome::AlreadyDone { id, title } => {
                if !ctx.quiet {
                    println!("Already done: {} (#{})", title, id);
                }
            }
            DoneOutcome::Failed { id, error } => {
                eprintln!("Failed to complete #{}: {}", id, error);
            }
        }
    }

    if ctx.verbose && outcomes.len() > 1 {
        let failed = outcomes
            .iter()
            .filter(|o| matches!(o, DoneOutcome::Failed { .. }))
            .count();
        println!("\n{} processed, {} failed", outcomes.len(), failed);
    }
}

/// Formats done results as JSON.
fn format_done_results_json(outcomes: &[DoneOutcome]) -> Result<String> {
    #[derive(Serialize)]
    struct DoneOutput<'a> {
        completed: Vec<CompletedTaskOutput<'a>>,
        already_done: Vec<i64>,
        failed: Vec<FailedTaskOutput>,
        total_completed: usize,
        total_failed: usize,
    }

    #[derive(Serialize)]
    struct CompletedTaskOutput<'a> {
        id: i64,
        title: &'a str,
        #[serde(skip_serializing_if = "Option::is_none")]
        next: Option<NextOutput>,
    }

    #[derive(Serialize)]
    struct NextOutput {
        id: i64,
        due: String,
    }

    #[derive(Serialize)]
    struct FailedTaskOutput {
        id: i64,
        error: String,
    }

    let mut completed = Vec::new();
    let mut already_done = Vec::new();
    let mut failed = Vec::new();

    for outcome in outcomes {
        match outcome {
            DoneOutcome::Completed { id, title, next } => completed.push(CompletedTaskOutput {
                id: *id,
                title,
                next: next.map(|(id, due)| NextOutput {
                    id,
                    due: format_date(Some(due)),
                }),
            }),
            DoneOutcome::AlreadyDone { id, .. } => already_done.push(*id),
            DoneOutcome::Failed { id, error } => failed.push(FailedTaskOutput {
                id: *id,
                error: error.to_string(),
            }),
        }
    }

    let output = DoneOutput {
        total_completed: completed.len(),
        total_failed: failed.len(),
        completed,
        already_done,
        failed,
    };

    serde_json::to_string_pretty(&output).map_err(CommandError::from)
}
