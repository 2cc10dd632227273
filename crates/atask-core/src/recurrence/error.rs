//! Error types for recurrence patterns and scheduling.

use chrono::NaiveDate;
use thiserror::Error;

/// A recurrence pattern that failed validation.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum PatternError {
    /// The pattern is empty or whitespace.
    #[error("empty recurrence pattern")]
    Empty,

    /// The pattern is neither a keyword nor an `every ...` form.
    #[error("invalid recurrence pattern: {pattern:?} (expected daily, weekly, monthly, yearly, or every ...)")]
    Unrecognized {
        /// The normalized (trimmed, lowercased) input.
        pattern: String,
    },

    /// Nothing follows `every`.
    #[error("invalid recurrence pattern: {pattern:?} (missing interval after 'every')")]
    MissingInterval {
        /// The normalized input.
        pattern: String,
    },

    /// The interval count is zero or negative.
    #[error("invalid recurrence interval: {value} (must be positive)")]
    NonPositiveInterval {
        /// The parsed count.
        value: i64,
    },

    /// The interval count does not fit in 32 bits.
    #[error("invalid recurrence interval: {value} (too large)")]
    IntervalTooLarge {
        /// The count as written.
        value: String,
    },

    /// A weekday token is not a known day name or abbreviation.
    #[error("invalid recurrence pattern: {pattern:?} (unknown day or interval: {day:?})")]
    UnknownDay {
        /// The normalized input.
        pattern: String,
        /// The offending token.
        day: String,
    },
}

/// A next-occurrence computation that could not be completed.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ScheduleError {
    /// The stored pattern does not parse.
    #[error("cannot compute next occurrence: {0}")]
    Pattern(#[from] PatternError),

    /// Calendar arithmetic left the supported date range.
    #[error("next occurrence after {from} is out of the supported date range")]
    OutOfRange {
        /// The due date the computation started from.
        from: NaiveDate,
    },

    /// A weekday pattern with no days.
    #[error("no weekdays specified")]
    NoWeekdays,
}
