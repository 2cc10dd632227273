//! Query command implementation.
//!
//! Lists tasks from the task file that match a query expression.

use std::cmp::Ordering;

use atask_core_rs::query::{suggest_field, EvalContext, QueryEvaluator, QueryParser};
use atask_core_rs::Task;
use tracing::{debug, warn};

use super::config::Config;
use super::{CommandContext, Result};
use crate::cli::SortField;
use crate::output::{format_tasks_json, format_tasks_table};

/// Options for the query command.
#[derive(Debug)]
pub struct QueryOptions {
    /// Query expression.
    pub expr: String,
    /// Sort field.
    pub sort: SortField,
    /// Reverse sort order.
    pub reverse: bool,
    /// Limit results.
    pub limit: u32,
    /// Show all matches (no limit).
    pub all: bool,
}

/// Executes the query command.
///
/// # Errors
///
/// Returns an error if the expression does not parse or the task file cannot be read.
pub fn execute(ctx: &CommandContext, config: &Config, opts: &QueryOptions) -> Result<()> {
    let query = QueryParser::parse(&opts.expr)?;

    for field in query.unknown_fields() {
        match suggest_field(field) {
            Some(suggestion) => {
                warn!("unknown field '{field}' matches no tasks (did you mean '{suggestion}'?)")
            }
            None => warn!("unknown field '{field}' matches no tasks"),
        }
    }

    let evaluation = config.evaluation();
    let store = ctx.open_store(config)?;
    let tasks = store.load_or_default()?;

    let context = EvalContext::new(&evaluation);
    let evaluator = QueryEvaluator::new(&query, &context);
    let matched = sort_tasks(evaluator.filter_tasks(&tasks), opts);
    let total = matched.len();
    let shown = apply_limit(matched, opts);

    debug!(total, shown = shown.len(), "query evaluated");

    if ctx.json_output {
        let output = format_tasks_json(&opts.expr, &shown, total)?;
        println!("{output}");
    } else if !ctx.quiet {
        let output = format_tasks_table(&shown, context.today(), ctx.use_colors);
        print!("{output}");
        if shown.len() < total {
            println!("({} more; use --all to show everything)", total - shown.len());
        }
    }

    Ok(())
}

/// Rank of a priority label; unset or unknown priorities sort last.
fn priority_rank(priority: &str) -> u8 {
    match priority.to_lowercase().as_str() {
        "p1" => 1,
        "p2" => 2,
        "p3" => 3,
        _ => u8::MAX,
    }
}

/// Sorts tasks based on the provided options. Ties keep index order.
fn sort_tasks<'a>(mut tasks: Vec<&'a Task>, opts: &QueryOptions) -> Vec<&'a Task> {
    match opts.sort {
        SortField::Id => tasks.sort_by_key(|t| t.index_id),
        SortField::Priority => tasks.sort_by(|a, b| {
            priority_rank(&a.priority)
                .cmp(&priority_rank(&b.priority))
                .then(a.index_id.cmp(&b.index_id))
        }),
        SortField::Due => tasks.sort_by(|a, b| {
            // Tasks without a due date go last
            let by_due = match (a.due_date, b.due_date) {
                (None, None) => Ordering::Equal,
                (None, Some(_)) => Ordering::Greater,
                (Some(_), None) => Ordering::Less,
                (Some(a), Some(b)) => a.cmp(&b),
            };
            by_due.then(a.index_id.cmp(&b.index_id))
        }),
    }

    if opts.reverse {
        tasks.reverse();
    }

    tasks
}

/// Applies the limit to the tasks.
fn apply_limit<'a>(tasks: Vec<&'a Task>, opts: &QueryOptions) -> Vec<&'a Task> {
    if opts.all {
        tasks
    } else {
        tasks.into_iter().take(opts.limit as usize).collect()
    }
}
