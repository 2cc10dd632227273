//! Evaluation settings shared by the query evaluator.

use serde::{Deserialize, Serialize};

/// Default number of days that count as "due soon".
pub const DEFAULT_SOON_HORIZON: i64 = 3;

/// Settings consumed by query evaluation.
///
/// Callers own the config and pass it to every evaluation; nothing in this
/// crate reads process-wide settings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    /// Number of days ahead (inclusive) matched by the `due:soon` sentinel.
    #[serde(default = "default_soon_horizon")]
    pub soon_horizon: i64,
}

fn default_soon_horizon() -> i64 {
    DEFAULT_SOON_HORIZON
}

impl Default for Config {
    fn default() -> Self {
        Self {
            soon_horizon: DEFAULT_SOON_HORIZON,
        }
    }
}

impl Config {
    /// Creates a config with the given due-soon horizon.
    pub fn with_soon_horizon(soon_horizon: i64) -> Self {
        Self { soon_horizon }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_horizon() {
        assert_eq!(Config::default().soon_horizon, 3);
    }

    #[test]
    fn test_deserialize_missing_horizon_uses_default() {
        let config: Config = serde_json::from_str("{}").unwrap();
        assert_eq!(config, Config::default());
    }
}
