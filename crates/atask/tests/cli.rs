//! CLI tests that run the `atask` binary against a temporary task file.
//!
//! Each test gets its own task file and a config path that does not exist,
//! so nothing in the user's home directory is read or written.

use std::fs;
use std::path::{Path, PathBuf};
use std::process::{Command, Output};

use serde_json::Value;
use tempfile::TempDir;

struct Sandbox {
    dir: TempDir,
}

impl Sandbox {
    fn new(tasks_json: &str) -> Self {
        let dir = TempDir::new().expect("failed to create temp dir");
        fs::write(dir.path().join("tasks.json"), tasks_json).expect("failed to write tasks");
        Self { dir }
    }

    fn tasks_path(&self) -> PathBuf {
        self.dir.path().join("tasks.json")
    }

    fn config_path(&self) -> PathBuf {
        self.dir.path().join("config").join("config.toml")
    }

    fn run(&self, args: &[&str]) -> Output {
        Command::new(env!("CARGO_BIN_EXE_atask"))
            .args(args)
            .env("ATASK_TASKS", self.tasks_path())
            .env("ATASK_CONFIG", self.config_path())
            .env_remove("ATASK_LOG")
            .env_remove("RUST_LOG")
            .env("NO_COLOR", "1")
            .output()
            .expect("failed to run atask")
    }

    fn tasks(&self) -> Value {
        read_json(&self.tasks_path())
    }
}

fn read_json(path: &Path) -> Value {
    let contents = fs::read_to_string(path).expect("failed to read file");
    serde_json::from_str(&contents).expect("invalid JSON")
}

fn stdout(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).into_owned()
}

fn stderr(output: &Output) -> String {
    String::from_utf8_lossy(&output.stderr).into_owned()
}

const TASKS: &str = r#"[
  {"index_id": 1, "title": "Review budget", "area": "work", "priority": "p1"},
  {"index_id": 2, "title": "Quarterly report", "area": "work", "priority": "p3", "estimate": 8},
  {"index_id": 3, "title": "Water plants", "area": "home", "recur": "every 3d", "due_date": "2025-06-10"},
  {"index_id": 4, "title": "File taxes", "area": "work", "priority": "p2", "status": "done"},
  {"index_id": 5, "title": "Stretch", "recur": "every funday", "due_date": "2025-06-10"}
]"#;

#[test]
fn test_query_json() {
    let sandbox = Sandbox::new(TASKS);
    let output = sandbox.run(&[
        "--json",
        "query",
        "area:work AND (priority:p1 OR priority:p2)",
    ]);
    assert!(output.status.success(), "stderr: {}", stderr(&output));

    let value: Value = serde_json::from_str(&stdout(&output)).unwrap();
    let ids: Vec<i64> = value["tasks"]
        .as_array()
        .unwrap()
        .iter()
        .map(|t| t["index_id"].as_i64().unwrap())
        .collect();
    assert_eq!(ids, vec![1, 4]);
    assert_eq!(value["total"], 2);
}

#[test]
fn test_query_table_with_sort_and_limit() {
    let sandbox = Sandbox::new(TASKS);
    let output = sandbox.run(&["query", "area:work", "--sort", "priority", "--limit", "2"]);
    assert!(output.status.success(), "stderr: {}", stderr(&output));

    let text = stdout(&output);
    let rows: Vec<&str> = text.lines().skip(1).take(2).collect();
    assert!(rows[0].starts_with("1 "), "unexpected table: {}", text);
    assert!(rows[1].starts_with("4 "), "unexpected table: {}", text);
    assert!(text.contains("1 more"), "unexpected table: {}", text);
}

#[test]
fn test_query_unknown_field_warns_with_suggestion() {
    let sandbox = Sandbox::new(TASKS);
    let output = sandbox.run(&["query", "priorty:p1"]);
    assert!(output.status.success());
    assert!(stdout(&output).contains("No tasks found."));
    assert!(
        stderr(&output).contains("did you mean 'priority'"),
        "stderr: {}",
        stderr(&output)
    );
}

#[test]
fn test_query_parse_error_json() {
    let sandbox = Sandbox::new(TASKS);
    let output = sandbox.run(&["--json", "query", "status open"]);
    assert_eq!(output.status.code(), Some(1));

    let value: Value = serde_json::from_str(&stderr(&output)).unwrap();
    assert_eq!(value["error"]["code"], "QUERY_ERROR");
    assert!(value["error"]["message"]
        .as_str()
        .unwrap()
        .contains("position 7"));
}

#[test]
fn test_done_recurring_appends_next_instance() {
    let sandbox = Sandbox::new(TASKS);
    let output = sandbox.run(&["done", "3", "2"]);
    assert!(output.status.success(), "stderr: {}", stderr(&output));
    assert!(stdout(&output).contains("Next: #6"));

    let tasks = sandbox.tasks();
    let tasks = tasks.as_array().unwrap();
    assert_eq!(tasks.len(), 6);
    assert_eq!(tasks[1]["status"], "done");
    assert_eq!(tasks[2]["status"], "done");
    assert_eq!(tasks[5]["index_id"], 6);
    assert_eq!(tasks[5]["status"], "open");
    assert_eq!(tasks[5]["recur"], "every 3d");
}

#[test]
fn test_done_bad_pattern_leaves_file_unchanged() {
    let sandbox = Sandbox::new(TASKS);
    let before = sandbox.tasks();

    let output = sandbox.run(&["done", "5"]);
    assert_eq!(output.status.code(), Some(2));
    assert!(stderr(&output).contains("funday"), "stderr: {}", stderr(&output));
    assert_eq!(sandbox.tasks(), before);
}

#[test]
fn test_done_unknown_id() {
    let sandbox = Sandbox::new(TASKS);
    let output = sandbox.run(&["done", "42"]);
    assert_eq!(output.status.code(), Some(2));
    assert!(stderr(&output).contains("task not found: 42"));
}

#[test]
fn test_recur_check() {
    let sandbox = Sandbox::new("[]");
    let output = sandbox.run(&["recur", "check", "Every Mon, FRI"]);
    assert!(output.status.success());
    assert_eq!(stdout(&output).trim(), "every mon,fri");

    let output = sandbox.run(&["recur", "check", "every 0d"]);
    assert_eq!(output.status.code(), Some(1));
    assert!(stderr(&output).contains("must be positive"));
}

#[test]
fn test_recur_next() {
    let sandbox = Sandbox::new("[]");
    let output = sandbox.run(&[
        "recur",
        "next",
        "every wed,fri",
        "--due",
        "2025-06-09",
        "--today",
        "2025-06-09",
    ]);
    assert!(output.status.success(), "stderr: {}", stderr(&output));
    assert_eq!(stdout(&output).trim(), "2025-06-11");
}

#[test]
fn test_config_set_soon_horizon_changes_due_soon() {
    let sandbox = Sandbox::new("[]");
    let output = sandbox.run(&["config", "set", "soon_horizon", "10"]);
    assert!(output.status.success(), "stderr: {}", stderr(&output));
    assert!(sandbox.config_path().exists());

    let output = sandbox.run(&["--json", "config", "show"]);
    let value: Value = serde_json::from_str(&stdout(&output)).unwrap();
    assert_eq!(value["effective"]["soon_horizon"], 10);

    let output = sandbox.run(&["config", "set", "colour", "true"]);
    assert_eq!(output.status.code(), Some(5));
}

#[test]
fn test_completions() {
    let sandbox = Sandbox::new("[]");
    let output = sandbox.run(&["completions", "bash"]);
    assert!(output.status.success());
    assert!(stdout(&output).contains("atask"));
}

#[test]
fn test_new_recurring_task_stores_normalized_pattern() {
    let sandbox = Sandbox::new(TASKS);
    let output = sandbox.run(&[
        "new",
        "Take out trash",
        "--due",
        "2025-06-09",
        "--recur",
        "Every Mon, FRI",
    ]);
    assert!(output.status.success(), "stderr: {}", stderr(&output));
    assert!(stdout(&output).contains("Created: Take out trash (#6)"));

    let tasks = sandbox.tasks();
    let created = &tasks.as_array().unwrap()[5];
    assert_eq!(created["index_id"], 6);
    assert_eq!(created["recur"], "every mon,fri");
    assert_eq!(created["due_date"], "2025-06-09");
}

#[test]
fn test_new_recur_without_due_is_rejected() {
    let sandbox = Sandbox::new(TASKS);
    let before = sandbox.tasks();

    let output = sandbox.run(&["new", "Stretch", "--recur", "daily"]);
    assert!(!output.status.success());
    assert!(stderr(&output).contains("--due"), "stderr: {}", stderr(&output));
    assert_eq!(sandbox.tasks(), before);
}

#[test]
fn test_new_bad_pattern_is_rejected() {
    let sandbox = Sandbox::new(TASKS);
    let before = sandbox.tasks();

    let output = sandbox.run(&[
        "--json",
        "new",
        "Stretch",
        "--due",
        "2025-06-09",
        "--recur",
        "every funday",
    ]);
    assert_eq!(output.status.code(), Some(1));
    let value: Value = serde_json::from_str(&stderr(&output)).unwrap();
    assert_eq!(value["error"]["code"], "PATTERN_ERROR");
    assert!(value["error"]["message"].as_str().unwrap().contains("funday"));
    assert_eq!(sandbox.tasks(), before);
}

#[test]
fn test_update_sets_and_clears_recur() {
    let sandbox = Sandbox::new(TASKS);

    let output = sandbox.run(&["update", "3", "--recur", "Every 2W"]);
    assert!(output.status.success(), "stderr: {}", stderr(&output));
    assert_eq!(sandbox.tasks()[2]["recur"], "every 2w");

    let output = sandbox.run(&["update", "3", "--recur", "none"]);
    assert!(output.status.success(), "stderr: {}", stderr(&output));
    let tasks = sandbox.tasks();
    assert!(tasks[2].get("recur").is_none(), "task: {}", tasks[2]);
    assert_eq!(tasks[2]["due_date"], "2025-06-10");
}

#[test]
fn test_update_bad_values_leave_file_unchanged() {
    let sandbox = Sandbox::new(TASKS);
    let before = sandbox.tasks();

    let output = sandbox.run(&["update", "1", "--recur", "fortnightly"]);
    assert_eq!(output.status.code(), Some(1));
    assert_eq!(sandbox.tasks(), before);

    let output = sandbox.run(&["--json", "update", "1", "--status", "closed"]);
    assert_eq!(output.status.code(), Some(1));
    let value: Value = serde_json::from_str(&stderr(&output)).unwrap();
    assert_eq!(value["error"]["code"], "INVALID_ARGUMENT");
    assert_eq!(sandbox.tasks(), before);
}

#[test]
fn test_update_unknown_id() {
    let sandbox = Sandbox::new(TASKS);
    let output = sandbox.run(&["update", "42", "--area", "home"]);
    assert_eq!(output.status.code(), Some(2));
    assert!(stderr(&output).contains("task not found: 42"));
}

#[test]
fn test_negative_soon_horizon_in_config_file_is_rejected() {
    let sandbox = Sandbox::new(TASKS);
    let config_path = sandbox.config_path();
    fs::create_dir_all(config_path.parent().unwrap()).unwrap();
    fs::write(&config_path, "version = 1\nsoon_horizon = -2\n").unwrap();

    let output = sandbox.run(&["query", "due:soon"]);
    assert_eq!(output.status.code(), Some(5));
    assert!(
        stderr(&output).contains("soon_horizon"),
        "stderr: {}",
        stderr(&output)
    );

    let output = sandbox.run(&["config", "path"]);
    assert!(output.status.success(), "stderr: {}", stderr(&output));
}
