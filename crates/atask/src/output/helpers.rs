//! Common helper functions for output formatting.

use chrono::NaiveDate;
use owo_colors::OwoColorize;

/// Truncates a string to a maximum number of characters.
pub fn truncate_str(s: &str, max_len: usize) -> String {
    if s.chars().count() > max_len {
        let kept: String = s.chars().take(max_len.saturating_sub(3)).collect();
        format!("{kept}...")
    } else {
        s.to_string()
    }
}

/// Formats priority for display.
pub fn format_priority(priority: &str, use_colors: bool) -> String {
    let label = priority.to_lowercase();

    if use_colors {
        match label.as_str() {
            "p1" => label.red().to_string(),
            "p2" => label.yellow().to_string(),
            "p3" => label.blue().to_string(),
            _ => label.dimmed().to_string(),
        }
    } else {
        label
    }
}

/// Formats a due date relative to `today`.
pub fn format_due(due_date: Option<NaiveDate>, today: NaiveDate, use_colors: bool) -> String {
    let Some(date) = due_date else {
        return String::new();
    };

    let days = (date - today).num_days();
    let display = match days {
        0 => "Today".to_string(),
        1 => "Tomorrow".to_string(),
        -1 => "Yesterday".to_string(),
        d if d < 0 => format!("{} days ago", -d),
        _ => date.format("%b %d").to_string(),
    };

    if use_colors {
        if days < 0 {
            display.red().to_string()
        } else if days == 0 {
            display.yellow().to_string()
        } else {
            display
        }
    } else {
        display
    }
}

/// Formats tags for display.
pub fn format_tags(tags: &[String], max_len: usize) -> String {
    if tags.is_empty() {
        return String::new();
    }

    let formatted: Vec<String> = tags.iter().map(|t| format!("#{t}")).collect();
    truncate_str(&formatted.join(" "), max_len)
}
