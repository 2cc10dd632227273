//! Integration tests for querying a task list through the public API.

use atask_core_rs::query::{EvalContext, QueryEvaluator, QueryParser};
use atask_core_rs::{Config, Task};
use chrono::NaiveDate;

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn today() -> NaiveDate {
    date(2025, 6, 11)
}

fn tasks() -> Vec<Task> {
    let mut budget = Task::new(1, "Review budget");
    budget.area = "work".to_string();
    budget.priority = "p1".to_string();
    budget.due_date = Some(date(2025, 6, 12));

    let mut report = Task::new(2, "Quarterly report");
    report.area = "Work".to_string();
    report.priority = "p3".to_string();
    report.estimate = 8;

    let mut plants = Task::new(3, "Water plants");
    plants.area = "home".to_string();
    plants.recur = "every 3d".to_string();
    plants.due_date = Some(date(2025, 6, 9));
    plants.tags = vec!["chores".to_string()];

    let mut taxes = Task::new(4, "File taxes");
    taxes.status = "done".to_string();
    taxes.priority = "p2".to_string();
    taxes.area = "work".to_string();
    taxes.due_date = Some(date(2025, 4, 15));

    vec![budget, report, plants, taxes]
}

fn select(expr: &str) -> Vec<i64> {
    let query = QueryParser::parse(expr).expect("query should parse");
    let config = Config::default();
    let context = EvalContext::with_today(&config, today());
    let evaluator = QueryEvaluator::new(&query, &context);
    let tasks = tasks();
    evaluator
        .filter_tasks(&tasks)
        .into_iter()
        .map(|t| t.index_id)
        .collect()
}

#[test]
fn test_grouped_priorities_in_area() {
    assert_eq!(select("area:work AND (priority:p1 OR priority:p2)"), vec![1, 4]);
}

#[test]
fn test_overdue_excludes_done() {
    assert_eq!(select("due:overdue"), vec![3, 4]);
    assert_eq!(select("due:overdue AND NOT status:done"), vec![3]);
}

#[test]
fn test_due_soon_uses_config_horizon() {
    assert_eq!(select("due:soon"), vec![1]);
}

#[test]
fn test_recurring_tasks() {
    assert_eq!(select("recur:set"), vec![3]);
    assert_eq!(select("recur:empty AND NOT status:done"), vec![1, 2]);
}

#[test]
fn test_integer_comparisons() {
    assert_eq!(select("estimate>5"), vec![2]);
    assert_eq!(select("index_id<3"), vec![1, 2]);
}

#[test]
fn test_unknown_field_matches_nothing() {
    assert!(select("colour:red").is_empty());
    assert_eq!(select("NOT colour:red").len(), 4);
}

#[test]
fn test_evaluate_at_matches_evaluator() {
    let query = QueryParser::parse("tag:chores AND due:overdue").unwrap();
    let config = Config::default();
    let tasks = tasks();
    let plants = &tasks[2];
    assert!(query.evaluate_at(plants, &config, today()));
    assert!(!query.evaluate_at(plants, &config, date(2025, 6, 1)));
}

#[test]
fn test_parse_error_rejects_whole_query() {
    let err = QueryParser::parse("area:work AND (priority:p1").unwrap_err();
    assert_eq!(err.position(), 26);
}
