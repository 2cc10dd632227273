//! Next-occurrence computation.

use std::collections::HashSet;

use chrono::{Datelike, Days, Months, NaiveDate, Weekday};
use tracing::debug;

use super::error::ScheduleError;
use super::pattern::{parse_recurrence_pattern, IntervalUnit, Recurrence, WeekdayToken};
use crate::task::{Task, STATUS_OPEN};

/// Computes the next due date for a recurrence pattern.
///
/// The result is never before `today`: stale tasks skip missed occurrences
/// rather than landing in the past.
///
/// # Errors
///
/// Returns [`ScheduleError::Pattern`] if `pattern` does not parse, or
/// [`ScheduleError::OutOfRange`] if the calendar runs out.
pub fn next_occurrence(
    pattern: &str,
    current_due: NaiveDate,
    today: NaiveDate,
) -> Result<NaiveDate, ScheduleError> {
    let recurrence = parse_recurrence_pattern(pattern)?;
    recurrence.next_after(current_due, today)
}

impl Recurrence {
    /// Computes the first occurrence after `current_due` that is not before `today`.
    ///
    /// Weekday patterns always move at least one day past `current_due`.
    pub fn next_after(
        &self,
        current_due: NaiveDate,
        today: NaiveDate,
    ) -> Result<NaiveDate, ScheduleError> {
        let next = match self.interval() {
            Some((count, unit)) => advance_by_interval(current_due, count, unit, today),
            None => next_matching_weekday(current_due, self.weekdays(), today),
        }?;

        debug!(pattern = %self, %current_due, %today, %next, "computed next occurrence");
        Ok(next)
    }
}

/// Steps `count` units at a time from `current_due` until not before `today`.
///
/// Each candidate is `current_due + k * interval`, so month-end clamping on
/// one step never carries into the next.
fn advance_by_interval(
    current_due: NaiveDate,
    count: u32,
    unit: IntervalUnit,
    today: NaiveDate,
) -> Result<NaiveDate, ScheduleError> {
    let out_of_range = || ScheduleError::OutOfRange { from: current_due };

    let mut steps: u32 = 1;
    loop {
        let next = offset(current_due, count, unit, steps).ok_or_else(out_of_range)?;
        if next >= today {
            return Ok(next);
        }
        steps = steps.checked_add(1).ok_or_else(out_of_range)?;
    }
}

fn offset(start: NaiveDate, count: u32, unit: IntervalUnit, steps: u32) -> Option<NaiveDate> {
    let total = count.checked_mul(steps)?;
    match unit {
        IntervalUnit::Day => start.checked_add_days(Days::new(u64::from(total))),
        IntervalUnit::Week => start.checked_add_days(Days::new(u64::from(total) * 7)),
        IntervalUnit::Month => start.checked_add_months(Months::new(total)),
        IntervalUnit::Year => start.checked_add_months(Months::new(total.checked_mul(12)?)),
    }
}

/// Finds the first accepted weekday on or after max(`current_due` + 1, `today`).
fn next_matching_weekday(
    current_due: NaiveDate,
    days: &[WeekdayToken],
    today: NaiveDate,
) -> Result<NaiveDate, ScheduleError> {
    let accepted: HashSet<Weekday> = days.iter().map(WeekdayToken::weekday).collect();
    if accepted.is_empty() {
        return Err(ScheduleError::NoWeekdays);
    }

    let out_of_range = || ScheduleError::OutOfRange { from: current_due };
    let mut candidate = current_due.succ_opt().ok_or_else(out_of_range)?.max(today);

    // A full week always contains every accepted day.
    for _ in 0..7 {
        if accepted.contains(&candidate.weekday()) {
            return Ok(candidate);
        }
        candidate = candidate.succ_opt().ok_or_else(out_of_range)?;
    }

    Err(out_of_range())
}

/// Builds the next instance of a recurring task.
///
/// Returns `Ok(None)` when the task has no recurrence pattern or no due date.
/// Otherwise the returned task is a copy of `task` with `next_index_id`, the
/// next due date, status `open`, no today tag, and the pattern in normalized
/// form. `task` itself is left untouched.
pub fn spawn_next(
    task: &Task,
    next_index_id: i64,
    today: NaiveDate,
) -> Result<Option<Task>, ScheduleError> {
    if !task.is_recurring() {
        return Ok(None);
    }
    let Some(current_due) = task.due_date else {
        return Ok(None);
    };

    let recurrence = parse_recurrence_pattern(&task.recur)?;
    let next_due = recurrence.next_after(current_due, today)?;

    let mut next = task.clone();
    next.index_id = next_index_id;
    next.status = STATUS_OPEN.to_string();
    next.due_date = Some(next_due);
    next.today_date = None;
    next.recur = recurrence.to_string();

    debug!(
        from = task.index_id,
        to = next.index_id,
        %next_due,
        "spawned next recurring instance"
    );
    Ok(Some(next))
}
