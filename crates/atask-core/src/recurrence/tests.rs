//! Tests for recurrence parsing and scheduling.

use chrono::{Datelike, NaiveDate, Weekday};
use pretty_assertions::assert_eq;

use super::*;
use crate::task::{Task, STATUS_DONE, STATUS_OPEN};

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

/// A Wednesday.
fn today() -> NaiveDate {
    date(2025, 6, 11)
}

fn normalized(input: &str) -> String {
    parse_recurrence_pattern(input).unwrap().to_string()
}

// ==================== Pattern Tests ====================

#[test]
fn test_keywords() {
    assert_eq!(parse_recurrence_pattern("daily").unwrap(), Recurrence::Daily);
    assert_eq!(parse_recurrence_pattern("weekly").unwrap(), Recurrence::Weekly);
    assert_eq!(parse_recurrence_pattern("monthly").unwrap(), Recurrence::Monthly);
    assert_eq!(parse_recurrence_pattern("yearly").unwrap(), Recurrence::Yearly);
}

#[test]
fn test_normalization() {
    assert_eq!(normalized("  Daily "), "daily");
    assert_eq!(normalized("WEEKLY"), "weekly");
    assert_eq!(normalized("every 2d"), "every 2d");
    assert_eq!(normalized("Every 3W"), "every 3w");
    assert_eq!(normalized("every 02d"), "every 2d");
    assert_eq!(normalized("every +6m"), "every 6m");
    assert_eq!(normalized("every 1y"), "every 1y");
    assert_eq!(normalized("every monday"), "every monday");
    assert_eq!(normalized("every Mon, Wed ,FRI"), "every mon,wed,fri");
}

#[test]
fn test_interval_shape() {
    assert_eq!(
        parse_recurrence_pattern("every 10w").unwrap(),
        Recurrence::Every {
            count: 10,
            unit: IntervalUnit::Week
        }
    );
    assert_eq!(
        parse_recurrence_pattern("every 2y").unwrap().interval(),
        Some((2, IntervalUnit::Year))
    );
    assert_eq!(
        parse_recurrence_pattern("monthly").unwrap().interval(),
        Some((1, IntervalUnit::Month))
    );
}

#[test]
fn test_weekday_shape_keeps_order() {
    let Recurrence::Weekdays(days) = parse_recurrence_pattern("every fri,mon").unwrap() else {
        panic!("expected weekday pattern");
    };
    let weekdays: Vec<Weekday> = days.iter().map(WeekdayToken::weekday).collect();
    assert_eq!(weekdays, vec![Weekday::Fri, Weekday::Mon]);
}

#[test]
fn test_words_ending_in_unit_letters_are_weekdays() {
    // "wed" and "monday" end in d and y but carry no number.
    assert_eq!(normalized("every wed"), "every wed");
    assert_eq!(normalized("every sunday"), "every sunday");
}

#[test]
fn test_lookup_weekday() {
    assert_eq!(lookup_weekday("thu"), Some(Weekday::Thu));
    assert_eq!(lookup_weekday("thursday"), Some(Weekday::Thu));
    assert_eq!(lookup_weekday("thurs"), None);
}

#[test]
fn test_rejects_empty() {
    assert_eq!(parse_recurrence_pattern(""), Err(PatternError::Empty));
    assert_eq!(parse_recurrence_pattern("   "), Err(PatternError::Empty));
}

#[test]
fn test_rejects_unrecognized() {
    assert_eq!(
        parse_recurrence_pattern("biweekly"),
        Err(PatternError::Unrecognized {
            pattern: "biweekly".to_string()
        })
    );
    assert_eq!(
        parse_recurrence_pattern("every"),
        Err(PatternError::Unrecognized {
            pattern: "every".to_string()
        })
    );
}

#[test]
fn test_rejects_non_positive_interval() {
    assert_eq!(
        parse_recurrence_pattern("every 0d"),
        Err(PatternError::NonPositiveInterval { value: 0 })
    );
    assert_eq!(
        parse_recurrence_pattern("every -1w"),
        Err(PatternError::NonPositiveInterval { value: -1 })
    );
}

#[test]
fn test_rejects_interval_too_large() {
    assert_eq!(
        parse_recurrence_pattern("every 99999999999d"),
        Err(PatternError::IntervalTooLarge {
            value: "99999999999".to_string()
        })
    );
    assert_eq!(
        parse_recurrence_pattern("every 123456789012345678901234567890m"),
        Err(PatternError::IntervalTooLarge {
            value: "123456789012345678901234567890".to_string()
        })
    );
}

#[test]
fn test_rejects_unknown_day() {
    assert_eq!(
        parse_recurrence_pattern("every funday"),
        Err(PatternError::UnknownDay {
            pattern: "every funday".to_string(),
            day: "funday".to_string()
        })
    );
    assert_eq!(
        parse_recurrence_pattern("every 2x"),
        Err(PatternError::UnknownDay {
            pattern: "every 2x".to_string(),
            day: "2x".to_string()
        })
    );
    assert_eq!(
        parse_recurrence_pattern("every mon,,fri"),
        Err(PatternError::UnknownDay {
            pattern: "every mon,,fri".to_string(),
            day: String::new()
        })
    );
}

#[test]
fn test_error_messages_name_the_fragment() {
    let err = parse_recurrence_pattern("every mon,funday").unwrap_err();
    assert!(err.to_string().contains("funday"));

    let err = parse_recurrence_pattern("every 0d").unwrap_err();
    assert_eq!(err.to_string(), "invalid recurrence interval: 0 (must be positive)");
}

#[test]
fn test_from_str() {
    let recurrence: Recurrence = "every 2w".parse().unwrap();
    assert_eq!(recurrence.to_string(), "every 2w");
    assert!("fortnightly".parse::<Recurrence>().is_err());
}

// ==================== Schedule Tests ====================

#[test]
fn test_daily_far_future() {
    let next = next_occurrence("daily", date(2099, 1, 1), today()).unwrap();
    assert_eq!(next, date(2099, 1, 2));
}

#[test]
fn test_monthly_far_future() {
    let next = next_occurrence("monthly", date(2099, 1, 15), today()).unwrap();
    assert_eq!(next, date(2099, 2, 15));
}

#[test]
fn test_interval_always_moves_forward() {
    // A due date after today still advances by one interval.
    let next = next_occurrence("daily", date(2025, 6, 20), today()).unwrap();
    assert_eq!(next, date(2025, 6, 21));
}

#[test]
fn test_stale_weekly_catches_up() {
    let next = next_occurrence("weekly", date(2020, 1, 1), today()).unwrap();
    assert!(next >= today());
    assert!((next - today()).num_days() < 7);
    assert_eq!(next.weekday(), date(2020, 1, 1).weekday());
}

#[test]
fn test_stale_interval_lands_on_cadence() {
    // 06-04, 06-07, 06-10 are all before today.
    let next = next_occurrence("every 3d", date(2025, 6, 1), today()).unwrap();
    assert_eq!(next, date(2025, 6, 13));
}

#[test]
fn test_interval_may_land_on_today() {
    let next = next_occurrence("every 2d", date(2025, 6, 9), today()).unwrap();
    assert_eq!(next, today());
}

#[test]
fn test_monthly_clamps_to_month_end() {
    let next = next_occurrence("monthly", date(2025, 1, 31), date(2025, 1, 31)).unwrap();
    assert_eq!(next, date(2025, 2, 28));
}

#[test]
fn test_monthly_clamping_does_not_drift() {
    // Skipping February must not leave the series on the 28th.
    let next = next_occurrence("monthly", date(2025, 1, 31), date(2025, 3, 1)).unwrap();
    assert_eq!(next, date(2025, 3, 31));
}

#[test]
fn test_yearly_from_leap_day() {
    let next = next_occurrence("yearly", date(2024, 2, 29), date(2024, 3, 1)).unwrap();
    assert_eq!(next, date(2025, 2, 28));
}

#[test]
fn test_every_two_weeks() {
    let next = next_occurrence("every 2w", date(2025, 6, 2), date(2025, 6, 2)).unwrap();
    assert_eq!(next, date(2025, 6, 16));
}

#[test]
fn test_weekday_list_from_monday() {
    let monday = date(2025, 6, 9);
    let next = next_occurrence("every wed,fri", monday, monday).unwrap();
    assert_eq!(next, date(2025, 6, 11));
    assert_eq!(next.weekday(), Weekday::Wed);
}

#[test]
fn test_weekday_skips_current_due() {
    let monday = date(2025, 6, 9);
    let next = next_occurrence("every monday", monday, monday).unwrap();
    assert_eq!(next, date(2025, 6, 16));
}

#[test]
fn test_weekday_stale_due_starts_from_today() {
    let next = next_occurrence("every wed", date(2025, 1, 6), today()).unwrap();
    assert_eq!(next, today());
}

#[test]
fn test_weekday_wraps_into_next_week() {
    let friday = date(2025, 6, 13);
    let next = next_occurrence("every mon,tue", friday, friday).unwrap();
    assert_eq!(next, date(2025, 6, 16));
}

#[test]
fn test_invalid_pattern_is_schedule_error() {
    let err = next_occurrence("every funday", today(), today()).unwrap_err();
    assert!(matches!(
        err,
        ScheduleError::Pattern(PatternError::UnknownDay { .. })
    ));
}

#[test]
fn test_out_of_range() {
    let err = next_occurrence("daily", NaiveDate::MAX, today()).unwrap_err();
    assert_eq!(err, ScheduleError::OutOfRange { from: NaiveDate::MAX });

    let err = next_occurrence("every mon", NaiveDate::MAX, today()).unwrap_err();
    assert_eq!(err, ScheduleError::OutOfRange { from: NaiveDate::MAX });
}

#[test]
fn test_empty_weekday_list() {
    let err = Recurrence::Weekdays(Vec::new())
        .next_after(today(), today())
        .unwrap_err();
    assert_eq!(err, ScheduleError::NoWeekdays);
}

// ==================== Spawn Tests ====================

fn recurring_task() -> Task {
    let mut task = Task::new(4, "Water plants");
    task.status = STATUS_DONE.to_string();
    task.recur = " Every 3D ".to_string();
    task.due_date = Some(date(2025, 6, 10));
    task.today_date = Some(date(2025, 6, 10));
    task.tags = vec!["home".to_string()];
    task
}

#[test]
fn test_spawn_next_builds_open_instance() {
    let task = recurring_task();
    let next = spawn_next(&task, 9, today()).unwrap().unwrap();

    assert_eq!(next.index_id, 9);
    assert_eq!(next.status, STATUS_OPEN);
    assert_eq!(next.due_date, Some(date(2025, 6, 13)));
    assert_eq!(next.today_date, None);
    assert_eq!(next.recur, "every 3d");
    assert_eq!(next.title, task.title);
    assert_eq!(next.tags, task.tags);
}

#[test]
fn test_spawn_next_leaves_source_untouched() {
    let task = recurring_task();
    let before = task.clone();
    spawn_next(&task, 9, today()).unwrap();
    assert_eq!(task, before);
}

#[test]
fn test_spawn_next_skips_non_recurring() {
    let mut task = recurring_task();
    task.recur = String::new();
    assert_eq!(spawn_next(&task, 9, today()).unwrap(), None);
}

#[test]
fn test_spawn_next_skips_missing_due_date() {
    let mut task = recurring_task();
    task.due_date = None;
    assert_eq!(spawn_next(&task, 9, today()).unwrap(), None);
}

#[test]
fn test_spawn_next_reports_bad_pattern() {
    let mut task = recurring_task();
    task.recur = "biweekly".to_string();
    assert!(matches!(
        spawn_next(&task, 9, today()),
        Err(ScheduleError::Pattern(PatternError::Unrecognized { .. }))
    ));
}
