//! Task output formatting.

use atask_core_rs::task::DATE_FORMAT;
use atask_core_rs::Task;
use chrono::NaiveDate;
use owo_colors::OwoColorize;
use serde::Serialize;

use super::helpers::{format_due, format_priority, format_tags, truncate_str};

/// JSON output structure for the query command.
#[derive(Serialize)]
pub struct QueryOutput<'a> {
    pub query: &'a str,
    pub tasks: Vec<TaskOutput<'a>>,
    pub total: usize,
    pub has_more: bool,
}

/// JSON output structure for a single task.
#[derive(Serialize)]
pub struct TaskOutput<'a> {
    pub index_id: i64,
    pub title: &'a str,
    pub status: &'a str,
    pub priority: &'a str,
    pub area: &'a str,
    pub due: Option<String>,
    pub tags: &'a [String],
    #[serde(skip_serializing_if = "Option::is_none")]
    pub recur: Option<&'a str>,
}

impl<'a> From<&'a Task> for TaskOutput<'a> {
    fn from(task: &'a Task) -> Self {
        Self {
            index_id: task.index_id,
            title: &task.title,
            status: &task.status,
            priority: &task.priority,
            area: &task.area,
            due: task.due_date.map(|d| d.format(DATE_FORMAT).to_string()),
            tags: &task.tags,
            recur: task.is_recurring().then_some(task.recur.as_str()),
        }
    }
}

/// Formats query results as JSON.
///
/// `total` is the number of matches before the limit was applied.
pub fn format_tasks_json(
    query: &str,
    tasks: &[&Task],
    total: usize,
) -> Result<String, serde_json::Error> {
    let output = QueryOutput {
        query,
        tasks: tasks.iter().map(|t| TaskOutput::from(*t)).collect(),
        total,
        has_more: total > tasks.len(),
    };

    serde_json::to_string_pretty(&output)
}

/// Formats tasks as a table.
pub fn format_tasks_table(tasks: &[&Task], today: NaiveDate, use_colors: bool) -> String {
    if tasks.is_empty() {
        return "No tasks found.\n".to_string();
    }

    let mut output = String::new();

    let header = format!(
        "{:<5} {:<4} {:<12} {:<10} {:<15} {}",
        "ID", "Pri", "Due", "Area", "Tags", "Title"
    );
    if use_colors {
        output.push_str(&format!("{}\n", header.dimmed()));
    } else {
        output.push_str(&header);
        output.push('\n');
    }

    for task in tasks {
        let priority = format_priority(&task.priority, use_colors);
        let due = format_due(task.due_date, today, use_colors);
        let area = truncate_str(&task.area, 10);
        let tags = format_tags(&task.tags, 15);
        let title = if task.is_recurring() {
            format!("{} ({})", task.title, task.recur)
        } else {
            task.title.clone()
        };

        let line = format!(
            "{:<5} {:<4} {:<12} {:<10} {:<15} {}",
            task.index_id, priority, due, area, tags, title
        );
        output.push_str(&line);
        output.push('\n');
    }

    output
}
