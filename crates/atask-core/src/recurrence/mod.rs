//! Recurrence patterns and next-occurrence scheduling.
//!
//! A recurring task stores a pattern such as `weekly`, `every 2w` or
//! `every mon,thu`. When the task is completed, [`next_occurrence`] computes
//! the due date of the next instance and [`spawn_next`] builds that instance.
//!
//! # Patterns
//! - `daily`, `weekly`, `monthly`, `yearly`
//! - `every <N>d`, `every <N>w`, `every <N>m`, `every <N>y` (N > 0)
//! - `every <day>[,<day>...]` with full names or 3-letter abbreviations
//!
//! # Example
//!
//! ```
//! use atask_core_rs::recurrence::next_occurrence;
//! use chrono::NaiveDate;
//!
//! let due = NaiveDate::from_ymd_opt(2025, 1, 31).unwrap();
//! let today = NaiveDate::from_ymd_opt(2025, 1, 31).unwrap();
//!
//! let next = next_occurrence("monthly", due, today).unwrap();
//! assert_eq!(next, NaiveDate::from_ymd_opt(2025, 2, 28).unwrap());
//! ```

mod error;
mod pattern;
mod schedule;

pub use error::{PatternError, ScheduleError};
pub use pattern::{lookup_weekday, parse_recurrence_pattern, IntervalUnit, Recurrence, WeekdayToken};
pub use schedule::{next_occurrence, spawn_next};

#[cfg(test)]
mod tests;
