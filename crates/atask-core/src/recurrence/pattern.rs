//! Recurrence pattern parsing and normalization.

use std::fmt;
use std::str::FromStr;

use chrono::Weekday;

use super::error::PatternError;

/// Prefix of every non-keyword pattern.
const EVERY_PREFIX: &str = "every ";

/// Accepted weekday spellings: full name, 3-letter abbreviation.
const WEEKDAYS: [(&str, &str, Weekday); 7] = [
    ("sunday", "sun", Weekday::Sun),
    ("monday", "mon", Weekday::Mon),
    ("tuesday", "tue", Weekday::Tue),
    ("wednesday", "wed", Weekday::Wed),
    ("thursday", "thu", Weekday::Thu),
    ("friday", "fri", Weekday::Fri),
    ("saturday", "sat", Weekday::Sat),
];

/// Looks up a lowercase weekday token by full name or abbreviation.
pub fn lookup_weekday(token: &str) -> Option<Weekday> {
    WEEKDAYS
        .iter()
        .find(|(full, short, _)| *full == token || *short == token)
        .map(|(_, _, weekday)| *weekday)
}

/// Unit of an `every <n><unit>` interval.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum IntervalUnit {
    Day,
    Week,
    Month,
    Year,
}

impl IntervalUnit {
    /// Parses a unit suffix (`d`, `w`, `m`, `y`).
    pub fn from_suffix(c: char) -> Option<Self> {
        match c {
            'd' => Some(IntervalUnit::Day),
            'w' => Some(IntervalUnit::Week),
            'm' => Some(IntervalUnit::Month),
            'y' => Some(IntervalUnit::Year),
            _ => None,
        }
    }

    /// The unit suffix used in normalized patterns.
    pub fn suffix(self) -> char {
        match self {
            IntervalUnit::Day => 'd',
            IntervalUnit::Week => 'w',
            IntervalUnit::Month => 'm',
            IntervalUnit::Year => 'y',
        }
    }
}

/// One day of a weekday-list pattern, keeping the spelling it was given in.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WeekdayToken {
    spelling: String,
    weekday: Weekday,
}

impl WeekdayToken {
    /// Resolves a weekday token (case-insensitive, surrounding whitespace ignored).
    pub fn parse(token: &str) -> Option<Self> {
        let spelling = token.trim().to_lowercase();
        let weekday = lookup_weekday(&spelling)?;
        Some(Self { spelling, weekday })
    }

    /// The lowercase spelling as given (`mon` or `monday`).
    pub fn spelling(&self) -> &str {
        &self.spelling
    }

    /// The day this token names.
    pub fn weekday(&self) -> Weekday {
        self.weekday
    }
}

/// A validated recurrence rule.
///
/// The [`Display`](fmt::Display) form is the normalized pattern: the unit of
/// storage and equality. Two inputs with the same meaning display the same.
///
/// # Example
///
/// ```
/// use atask_core_rs::recurrence::parse_recurrence_pattern;
///
/// let pattern = parse_recurrence_pattern("  Every Mon,Wed,Fri ").unwrap();
/// assert_eq!(pattern.to_string(), "every mon,wed,fri");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Recurrence {
    /// `daily` - every day.
    Daily,
    /// `weekly` - every 7 days.
    Weekly,
    /// `monthly` - same day every month.
    Monthly,
    /// `yearly` - same day every year.
    Yearly,
    /// `every <count><unit>`.
    Every {
        /// Number of units between occurrences (positive).
        count: u32,
        /// Interval unit.
        unit: IntervalUnit,
    },
    /// `every <day>[,<day>...]`, in the order given.
    Weekdays(Vec<WeekdayToken>),
}

impl Recurrence {
    /// The fixed interval this rule advances by, if it is interval based.
    pub fn interval(&self) -> Option<(u32, IntervalUnit)> {
        match self {
            Recurrence::Daily => Some((1, IntervalUnit::Day)),
            Recurrence::Weekly => Some((1, IntervalUnit::Week)),
            Recurrence::Monthly => Some((1, IntervalUnit::Month)),
            Recurrence::Yearly => Some((1, IntervalUnit::Year)),
            Recurrence::Every { count, unit } => Some((*count, *unit)),
            Recurrence::Weekdays(_) => None,
        }
    }

    /// The accepted weekdays, empty for interval rules.
    pub fn weekdays(&self) -> &[WeekdayToken] {
        match self {
            Recurrence::Weekdays(days) => days,
            _ => &[],
        }
    }
}

impl fmt::Display for Recurrence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Recurrence::Daily => f.write_str("daily"),
            Recurrence::Weekly => f.write_str("weekly"),
            Recurrence::Monthly => f.write_str("monthly"),
            Recurrence::Yearly => f.write_str("yearly"),
            Recurrence::Every { count, unit } => write!(f, "every {}{}", count, unit.suffix()),
            Recurrence::Weekdays(days) => {
                let spellings: Vec<&str> = days.iter().map(WeekdayToken::spelling).collect();
                write!(f, "every {}", spellings.join(","))
            }
        }
    }
}

impl FromStr for Recurrence {
    type Err = PatternError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_recurrence_pattern(s)
    }
}

/// Validates and normalizes a recurrence pattern.
///
/// Supported patterns:
/// - `daily`, `weekly`, `monthly`, `yearly`
/// - `every <N>d`, `every <N>w`, `every <N>m`, `every <N>y`
/// - `every monday`, `every mon,wed,fri`
///
/// # Errors
///
/// Returns a [`PatternError`] naming the offending fragment.
pub fn parse_recurrence_pattern(input: &str) -> Result<Recurrence, PatternError> {
    let pattern = input.trim().to_lowercase();
    if pattern.is_empty() {
        return Err(PatternError::Empty);
    }

    match pattern.as_str() {
        "daily" => return Ok(Recurrence::Daily),
        "weekly" => return Ok(Recurrence::Weekly),
        "monthly" => return Ok(Recurrence::Monthly),
        "yearly" => return Ok(Recurrence::Yearly),
        _ => {}
    }

    let Some(rule) = pattern.strip_prefix(EVERY_PREFIX) else {
        return Err(PatternError::Unrecognized { pattern });
    };
    let rule = rule.trim();
    if rule.is_empty() {
        return Err(PatternError::MissingInterval { pattern });
    }

    if let Some(recurrence) = parse_interval(rule)? {
        return Ok(recurrence);
    }

    parse_weekdays(rule, &pattern)
}

/// Tries the `<n><unit>` shape. `Ok(None)` means the rule has another shape.
fn parse_interval(rule: &str) -> Result<Option<Recurrence>, PatternError> {
    let Some(suffix) = rule.chars().last() else {
        return Ok(None);
    };
    let Some(unit) = IntervalUnit::from_suffix(suffix) else {
        return Ok(None);
    };
    let digits = &rule[..rule.len() - suffix.len_utf8()];

    let value = match digits.parse::<i64>() {
        Ok(value) => value,
        Err(_) if !digits.is_empty() && digits.bytes().all(|b| b.is_ascii_digit()) => {
            return Err(PatternError::IntervalTooLarge {
                value: digits.to_string(),
            });
        }
        Err(_) => return Ok(None),
    };

    if value <= 0 {
        return Err(PatternError::NonPositiveInterval { value });
    }
    let count = u32::try_from(value).map_err(|_| PatternError::IntervalTooLarge {
        value: digits.to_string(),
    })?;

    Ok(Some(Recurrence::Every { count, unit }))
}

/// Parses the comma-separated weekday shape.
fn parse_weekdays(rule: &str, pattern: &str) -> Result<Recurrence, PatternError> {
    let days = rule
        .split(',')
        .map(|token| {
            WeekdayToken::parse(token).ok_or_else(|| PatternError::UnknownDay {
                pattern: pattern.to_string(),
                day: token.trim().to_string(),
            })
        })
        .collect::<Result<Vec<_>, _>>()?;

    Ok(Recurrence::Weekdays(days))
}
