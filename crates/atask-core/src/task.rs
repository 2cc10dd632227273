//! Task record model.
//!
//! A [`Task`] is a read-only snapshot of one stored task. The query evaluator
//! and the recurrence engine only ever borrow it; reading and writing tasks is
//! the job of [`crate::TaskStore`] or any other collaborator.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Status of a task that has not been completed.
pub const STATUS_OPEN: &str = "open";

/// Status of a completed task.
pub const STATUS_DONE: &str = "done";

/// Status of a task put on hold.
pub const STATUS_PAUSED: &str = "paused";

/// Status of a task handed to someone else.
pub const STATUS_DELEGATED: &str = "delegated";

/// Status of a task that will not be done.
pub const STATUS_DROPPED: &str = "dropped";

/// All statuses a task may carry.
pub const TASK_STATUSES: [&str; 5] = [
    STATUS_OPEN,
    STATUS_DONE,
    STATUS_PAUSED,
    STATUS_DELEGATED,
    STATUS_DROPPED,
];

/// Priorities a task may carry, highest first.
pub const TASK_PRIORITIES: [&str; 3] = ["p1", "p2", "p3"];

/// Date format used for every date field (`YYYY-MM-DD`).
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// A task record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    /// Sequential ID used to address the task from the CLI.
    pub index_id: i64,

    /// Human-readable title.
    pub title: String,

    /// Workflow status (`open`, `done`, `paused`, `delegated`, `dropped`).
    #[serde(default = "default_status")]
    pub status: String,

    /// Priority (`p1`, `p2`, `p3`), empty when unset.
    #[serde(default)]
    pub priority: String,

    /// Life context such as `work` or `home`.
    #[serde(default)]
    pub area: String,

    /// Person responsible for the task.
    #[serde(default)]
    pub assignee: String,

    /// Reference to the owning project, empty when unset.
    #[serde(default)]
    pub project_id: String,

    /// Effort estimate (Fibonacci points), 0 when unset.
    #[serde(default)]
    pub estimate: i64,

    /// Due date.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub due_date: Option<NaiveDate>,

    /// Start date.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start_date: Option<NaiveDate>,

    /// Date on which the task was tagged for "today".
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub today_date: Option<NaiveDate>,

    /// Free-form tags.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub tags: Vec<String>,

    /// Normalized recurrence pattern, empty for one-off tasks.
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub recur: String,

    /// Full text content of the task (notes, log entries).
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub content: String,
}

fn default_status() -> String {
    STATUS_OPEN.to_string()
}

impl Task {
    /// Creates an open task with the given ID and title and every other field unset.
    pub fn new(index_id: i64, title: impl Into<String>) -> Self {
        Self {
            index_id,
            title: title.into(),
            status: default_status(),
            priority: String::new(),
            area: String::new(),
            assignee: String::new(),
            project_id: String::new(),
            estimate: 0,
            due_date: None,
            start_date: None,
            today_date: None,
            tags: Vec::new(),
            recur: String::new(),
            content: String::new(),
        }
    }

    /// Returns true if the task has been completed.
    pub fn is_done(&self) -> bool {
        self.status.eq_ignore_ascii_case(STATUS_DONE)
    }

    /// Returns true if the task carries a recurrence pattern.
    pub fn is_recurring(&self) -> bool {
        !self.recur.trim().is_empty()
    }

    /// Number of days from `today` until the due date, negative when past due.
    pub fn days_until_due(&self, today: NaiveDate) -> Option<i64> {
        self.due_date.map(|due| (due - today).num_days())
    }

    /// Returns true if the due date lies before `today`.
    pub fn is_overdue(&self, today: NaiveDate) -> bool {
        self.due_date.is_some_and(|due| due < today)
    }

    /// Returns true if the task is due today or within `horizon_days`.
    pub fn is_due_within(&self, today: NaiveDate, horizon_days: i64) -> bool {
        self.days_until_due(today)
            .is_some_and(|days| (0..=horizon_days).contains(&days))
    }

    /// Returns true if the task was tagged for `today`.
    pub fn is_tagged_for_today(&self, today: NaiveDate) -> bool {
        self.today_date == Some(today)
    }
}

/// Returns true if `status` is one of [`TASK_STATUSES`].
pub fn is_valid_status(status: &str) -> bool {
    TASK_STATUSES.contains(&status)
}

/// Returns true if `priority` is one of [`TASK_PRIORITIES`].
pub fn is_valid_priority(priority: &str) -> bool {
    TASK_PRIORITIES.contains(&priority)
}

/// Returns the ID one past the highest `index_id` in `tasks` (1 for an empty list).
pub fn next_index_id(tasks: &[Task]) -> i64 {
    tasks.iter().map(|t| t.index_id).max().unwrap_or(0) + 1
}

/// Formats an optional date as `YYYY-MM-DD`, or an empty string when unset.
pub fn format_date(date: Option<NaiveDate>) -> String {
    date.map(|d| d.format(DATE_FORMAT).to_string())
        .unwrap_or_default()
}
