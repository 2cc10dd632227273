//! Query language parser and evaluator.
//!
//! Queries select tasks with boolean expressions over field comparisons,
//! for example `status:open AND (priority:p1 OR priority:p2)`.
//!
//! # Supported Syntax
//!
//! ## Comparisons
//! - `field:value` - match (equality, or a sentinel predicate)
//! - `field=value`, `field!=value` - equality and inequality
//! - `field>value`, `field<value` - ordering, integer fields only
//!
//! Field names and values are case-insensitive. Values containing spaces,
//! punctuation, or a keyword spelling must be quoted: `title:"call mom"`,
//! `tag:"and"`.
//!
//! ## Fields
//! `status`, `priority`, `area`, `assignee`, `project_id`, `estimate`,
//! `index_id`, `due`/`due_date`, `start`/`start_date`, `today`/`today_date`,
//! `title`, `tag`/`tags`, `recur`, `content`/`body`/`text`.
//!
//! ## Sentinels (only with `:`)
//! - `empty`, `set` - attribute is blank / non-blank
//! - `due:overdue`, `due:today`, `due:week`, `due:soon`
//! - `today:tagged`, `today:true`
//!
//! ## Boolean Operators
//! - `AND`, `OR`, `NOT` (any case)
//! - `()` - Grouping
//!
//! # Example
//!
//! ```
//! use atask_core_rs::query::QueryParser;
//! use atask_core_rs::{Config, Task};
//!
//! let query = QueryParser::parse("area:work AND NOT status:done").unwrap();
//!
//! let mut task = Task::new(1, "Review budget");
//! task.area = "Work".to_string();
//!
//! assert!(query.evaluate(&task, &Config::default()));
//! ```

mod ast;
mod error;
mod evaluator;
mod fields;
mod lexer;
mod parser;

pub use ast::{Comparison, Operator, Query};
pub use error::{QueryError, QueryResult};
pub use evaluator::{EvalContext, QueryEvaluator};
pub use fields::{suggest_field, Field};
pub use lexer::{Lexer, Token, TokenKind};
pub use parser::{QueryParser, MAX_DEPTH};
