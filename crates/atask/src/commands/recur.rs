//! Recur command implementation.
//!
//! Validates recurrence patterns and previews the next occurrence without
//! touching the task file.

use atask_core_rs::recurrence::parse_recurrence_pattern;
use atask_core_rs::task::format_date;
use chrono::{Local, NaiveDate};

use super::{CommandContext, Result};

/// Options for the recur next command.
#[derive(Debug)]
pub struct RecurNextOptions {
    /// Recurrence pattern.
    pub pattern: String,
    /// Current due date.
    pub due: NaiveDate,
    /// Date treated as today (default: the current date).
    pub today: Option<NaiveDate>,
}

/// Executes the recur check command.
///
/// # Errors
///
/// Returns an error naming the offending fragment if the pattern is invalid.
pub fn execute_check(ctx: &CommandContext, pattern: &str) -> Result<()> {
    let recurrence = parse_recurrence_pattern(pattern)?;
    let normalized = recurrence.to_string();

    if ctx.json_output {
        let output = serde_json::json!({
            "input": pattern,
            "normalized": normalized,
            "valid": true,
        });
        println!("{}", serde_json::to_string_pretty(&output)?);
    } else if !ctx.quiet {
        println!("{normalized}");
    }

    Ok(())
}

/// Executes the recur next command.
///
/// # Errors
///
/// Returns an error if the pattern is invalid or the date leaves the calendar range.
pub fn execute_next(ctx: &CommandContext, opts: &RecurNextOptions) -> Result<()> {
    let recurrence = parse_recurrence_pattern(&opts.pattern)?;
    let today = opts.today.unwrap_or_else(|| Local::now().date_naive());
    let next = recurrence.next_after(opts.due, today)?;

    if ctx.json_output {
        let output = serde_json::json!({
            "pattern": recurrence.to_string(),
            "due": format_date(Some(opts.due)),
            "today": format_date(Some(today)),
            "next": format_date(Some(next)),
        });
        println!("{}", serde_json::to_string_pretty(&output)?);
    } else if !ctx.quiet {
        println!("{}", format_date(Some(next)));
    }

    Ok(())
}
