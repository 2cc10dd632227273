//! Output formatting utilities for the atask CLI.
//!
//! This module provides functions for formatting data as tables or JSON:
//!
//! - [`tasks`] - Task list output (query command)
//! - [`helpers`] - Common formatting utilities (truncation, priority, due dates)

pub mod helpers;
mod tasks;

pub use tasks::{format_tasks_json, format_tasks_table};
