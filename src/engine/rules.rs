//! Game rules.

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Tunable rules shared by both modes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct GameRules {
    /// Number of chambers; a shot has probability `1 / chambers`.
    pub chambers: u32,
    /// Moderation timeout issued on a shot, in seconds.
    pub timeout_seconds: u32,
    /// Shots per user per day before limited mode blocks them.
    pub daily_shot_limit: u8,
}

impl Default for GameRules {
    fn default() -> Self {
        Self {
            chambers: 6,
            timeout_seconds: 10,
            daily_shot_limit: 3,
        }
    }
}

impl GameRules {
    /// Checks that every rule is in range.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidValue`] for the first rule out of range.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.chambers < 2 {
            return Err(invalid("rules.chambers", self.chambers, "at least 2"));
        }
        if self.timeout_seconds == 0 {
            return Err(invalid("rules.timeout_seconds", self.timeout_seconds, "at least 1"));
        }
        if self.daily_shot_limit == 0 {
            return Err(invalid("rules.daily_shot_limit", self.daily_shot_limit, "1..=255"));
        }
        Ok(())
    }
}

fn invalid(field: &str, value: impl ToString, expected: &str) -> ConfigError {
    ConfigError::InvalidValue {
        field: field.to_string(),
        value: value.to_string(),
        expected: expected.to_string(),
    }
}
