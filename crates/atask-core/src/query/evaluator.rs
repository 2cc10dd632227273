//! Query evaluation against task records.
//!
//! This module provides the [`QueryEvaluator`] for evaluating parsed queries
//! against [`Task`]s. Evaluation never fails: a clause that cannot be
//! answered (unknown field, non-numeric literal against an integer field, a
//! sentinel used with an operator other than `:`) is simply false.
//!
//! # Example
//!
//! ```
//! use atask_core_rs::query::{EvalContext, QueryEvaluator, QueryParser};
//! use atask_core_rs::{Config, Task};
//!
//! let query = QueryParser::parse("status:open AND priority:p1").unwrap();
//! let config = Config::default();
//! let context = EvalContext::new(&config);
//! let evaluator = QueryEvaluator::new(&query, &context);
//!
//! let mut task = Task::new(1, "Ship release");
//! task.priority = "p1".to_string();
//! assert!(evaluator.matches(&task));
//! ```

use chrono::{Local, NaiveDate};

use super::ast::{Comparison, Operator, Query};
use super::fields::Field;
use crate::config::Config;
use crate::task::{format_date, Task};

/// Days ahead (inclusive) matched by the `due:week` sentinel.
const WEEK_HORIZON_DAYS: i64 = 7;

/// Context for query evaluation.
///
/// Holds the caller's [`Config`] and the date treated as "today" by the date
/// sentinels.
#[derive(Debug, Clone, Copy)]
pub struct EvalContext<'a> {
    config: &'a Config,
    today: NaiveDate,
}

impl<'a> EvalContext<'a> {
    /// Creates a context whose "today" is the current local date.
    pub fn new(config: &'a Config) -> Self {
        Self::with_today(config, Local::now().date_naive())
    }

    /// Creates a context with an explicit "today".
    pub fn with_today(config: &'a Config, today: NaiveDate) -> Self {
        Self { config, today }
    }

    /// The config used for evaluation.
    pub fn config(&self) -> &Config {
        self.config
    }

    /// The date treated as today.
    pub fn today(&self) -> NaiveDate {
        self.today
    }
}

/// Evaluates a parsed query against tasks.
#[derive(Debug)]
pub struct QueryEvaluator<'a> {
    query: &'a Query,
    context: &'a EvalContext<'a>,
}

impl<'a> QueryEvaluator<'a> {
    /// Creates a new query evaluator.
    pub fn new(query: &'a Query, context: &'a EvalContext<'a>) -> Self {
        Self { query, context }
    }

    /// Returns true if the task matches the query.
    pub fn matches(&self, task: &Task) -> bool {
        self.evaluate_query(self.query, task)
    }

    /// Filters a slice of tasks, returning only those that match.
    pub fn filter_tasks<'b>(&self, tasks: &'b [Task]) -> Vec<&'b Task> {
        tasks.iter().filter(|task| self.matches(task)).collect()
    }

    /// Evaluates a query node against a task.
    fn evaluate_query(&self, query: &Query, task: &Task) -> bool {
        match query {
            Query::Comparison(comparison) => self.evaluate_comparison(comparison, task),
            Query::And(left, right) => {
                self.evaluate_query(left, task) && self.evaluate_query(right, task)
            }
            Query::Or(left, right) => {
                self.evaluate_query(left, task) || self.evaluate_query(right, task)
            }
            Query::Not(inner) => !self.evaluate_query(inner, task),
        }
    }

    /// Evaluates a single comparison against a task.
    fn evaluate_comparison(&self, comparison: &Comparison, task: &Task) -> bool {
        // Unknown field always returns false
        let Some(field) = comparison.resolve_field() else {
            return false;
        };
        let op = comparison.operator;
        let value = comparison.value.to_lowercase();

        match field {
            Field::Status => compare_field_text(&task.status, op, &value),
            Field::Priority => compare_field_text(&task.priority, op, &value),
            Field::Area => compare_field_text(&task.area, op, &value),
            Field::Assignee => compare_field_text(&task.assignee, op, &value),
            Field::ProjectId => compare_field_text(&task.project_id, op, &value),
            Field::Title => compare_field_text(&task.title, op, &value),
            Field::Recur => compare_field_text(&task.recur, op, &value),
            Field::Estimate => compare_int(task.estimate, op, &value),
            Field::IndexId => compare_int(task.index_id, op, &value),
            Field::Due => self.evaluate_due(task, op, &value),
            Field::Start => compare_field_text(&format_date(task.start_date), op, &value),
            Field::Today => self.evaluate_today(task, op, &value),
            Field::Tags => compare_tags(&task.tags, op, &value),
            Field::Content => compare_content(&task.content, op, &value),
        }
    }

    /// Evaluates the due field, including its date sentinels.
    fn evaluate_due(&self, task: &Task, op: Operator, value: &str) -> bool {
        let today = self.context.today();
        let sentinel = match value {
            "overdue" => task.is_overdue(today),
            "today" => task.days_until_due(today) == Some(0),
            "week" => task.is_due_within(today, WEEK_HORIZON_DAYS),
            "soon" => task.is_due_within(today, self.context.config().soon_horizon),
            _ => return compare_field_text(&format_date(task.due_date), op, value),
        };
        op == Operator::Colon && sentinel
    }

    /// Evaluates the today field: `tagged`/`true` checks the today tag.
    fn evaluate_today(&self, task: &Task, op: Operator, value: &str) -> bool {
        match value {
            "tagged" | "true" => {
                op == Operator::Colon && task.is_tagged_for_today(self.context.today())
            }
            _ => compare_field_text(&format_date(task.today_date), op, value),
        }
    }
}

impl Query {
    /// Evaluates the query against a task, using the current local date.
    pub fn evaluate(&self, task: &Task, config: &Config) -> bool {
        self.evaluate_at(task, config, Local::now().date_naive())
    }

    /// Evaluates the query against a task with an explicit "today".
    pub fn evaluate_at(&self, task: &Task, config: &Config, today: NaiveDate) -> bool {
        let context = EvalContext::with_today(config, today);
        QueryEvaluator::new(self, &context).matches(task)
    }
}

/// Compares a text attribute, honoring the `empty` / `set` sentinels.
fn compare_field_text(actual: &str, op: Operator, expected: &str) -> bool {
    match expected {
        "empty" => op == Operator::Colon && actual.trim().is_empty(),
        "set" => op == Operator::Colon && !actual.trim().is_empty(),
        _ => compare_string(actual, op, expected),
    }
}

/// Case-insensitive string comparison. `<` and `>` never match.
fn compare_string(actual: &str, op: Operator, expected: &str) -> bool {
    let actual = actual.to_lowercase();
    match op {
        Operator::NotEq => actual != expected,
        op => op.is_equality() && actual == expected,
    }
}

/// Integer comparison. A non-numeric literal never matches.
fn compare_int(actual: i64, op: Operator, expected: &str) -> bool {
    let Ok(expected) = expected.parse::<i64>() else {
        return false;
    };
    match op {
        Operator::NotEq => actual != expected,
        Operator::Gt => actual > expected,
        Operator::Lt => actual < expected,
        op => op.is_equality() && actual == expected,
    }
}

/// Tag-set comparison: equality matches any tag.
///
/// `tag!=x` is exactly `NOT tag:x`: a task tagged both `x` and `y` does not
/// match, even though one of its tags differs from `x`.
fn compare_tags(tags: &[String], op: Operator, expected: &str) -> bool {
    let any_equal = || tags.iter().any(|tag| compare_string(tag, Operator::Eq, expected));
    match expected {
        "empty" => op == Operator::Colon && tags.is_empty(),
        "set" => op == Operator::Colon && !tags.is_empty(),
        _ => match op {
            Operator::NotEq => !any_equal(),
            op => op.is_equality() && any_equal(),
        },
    }
}

/// Case-insensitive substring search over the full task text.
///
/// `content:empty` and `content:set` test for presence instead of searching.
fn compare_content(content: &str, op: Operator, expected: &str) -> bool {
    match expected {
        "empty" => return op == Operator::Colon && content.trim().is_empty(),
        "set" => return op == Operator::Colon && !content.trim().is_empty(),
        _ => {}
    }

    let contains = content.to_lowercase().contains(expected);
    match op {
        Operator::NotEq => !contains,
        op => op.is_equality() && contains,
    }
}
