//! Field names recognized by the query evaluator.

use strsim::levenshtein;

/// Maximum Levenshtein distance to consider a field name as a suggestion.
const MAX_SUGGESTION_DISTANCE: usize = 3;

/// A task attribute a comparison can inspect.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Field {
    Status,
    Priority,
    Area,
    Assignee,
    ProjectId,
    Estimate,
    IndexId,
    Due,
    Start,
    Today,
    Title,
    Tags,
    Recur,
    Content,
}

impl Field {
    /// Every field, in documentation order.
    pub const ALL: [Field; 14] = [
        Field::Status,
        Field::Priority,
        Field::Area,
        Field::Assignee,
        Field::ProjectId,
        Field::Estimate,
        Field::IndexId,
        Field::Due,
        Field::Start,
        Field::Today,
        Field::Title,
        Field::Tags,
        Field::Recur,
        Field::Content,
    ];

    /// Resolves a field name (case-insensitive), including aliases.
    pub fn from_name(name: &str) -> Option<Field> {
        let lower = name.to_lowercase();
        Field::ALL
            .into_iter()
            .find(|field| field.names().contains(&lower.as_str()))
    }

    /// All accepted spellings of this field, canonical name first.
    pub fn names(self) -> &'static [&'static str] {
        match self {
            Field::Status => &["status"],
            Field::Priority => &["priority"],
            Field::Area => &["area"],
            Field::Assignee => &["assignee"],
            Field::ProjectId => &["project_id"],
            Field::Estimate => &["estimate"],
            Field::IndexId => &["index_id"],
            Field::Due => &["due", "due_date"],
            Field::Start => &["start", "start_date"],
            Field::Today => &["today", "today_date"],
            Field::Title => &["title"],
            Field::Tags => &["tag", "tags"],
            Field::Recur => &["recur"],
            Field::Content => &["content", "body", "text"],
        }
    }

    /// The canonical name of this field.
    pub fn name(self) -> &'static str {
        self.names()[0]
    }

    /// Returns true for fields compared as integers.
    pub fn is_integer(self) -> bool {
        matches!(self, Field::Estimate | Field::IndexId)
    }
}

/// Suggests the closest known field name for an unrecognized one.
///
/// Returns `None` when the name is already known or nothing is close enough.
pub fn suggest_field(name: &str) -> Option<&'static str> {
    let lower = name.to_lowercase();

    let (best_match, best_distance) = Field::ALL
        .into_iter()
        .flat_map(|field| field.names().iter().copied())
        .map(|candidate| (candidate, levenshtein(&lower, candidate)))
        .min_by_key(|(_, d)| *d)?;

    // Only suggest if the distance is within threshold and not an exact match
    if best_distance > 0 && best_distance <= MAX_SUGGESTION_DISTANCE {
        Some(best_match)
    } else {
        None
    }
}
