//! Query language and recurrence engine for a personal task tracker.
//!
//! This crate provides:
//! - [`query`]: a small boolean query language (`status:open AND due:soon`)
//!   with a tokenizer, a recursive-descent parser and an evaluator over [`Task`]
//! - [`recurrence`]: recurrence pattern validation and next-due-date computation
//! - [`TaskStore`]: JSON persistence of the task list
//!
//! Evaluation and scheduling are pure functions of their inputs; the current
//! date and the [`Config`] are passed in by the caller.

mod config;
pub mod query;
pub mod recurrence;
mod store;
pub mod task;

pub use config::{Config, DEFAULT_SOON_HORIZON};
pub use store::{TaskStore, TaskStoreError};
pub use task::Task;
