//! Per-channel game state and play modes.

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Which variant of the game a play belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Mode {
    /// Unlimited plays; one streak per user.
    Standard,
    /// Capped number of shots per user per day.
    Limited,
}

impl Mode {
    /// Label used in logs, metrics and JSON responses.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Standard => "standard",
            Self::Limited => "limited",
        }
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Mode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "standard" | "normal" => Ok(Self::Standard),
            "limited" => Ok(Self::Limited),
            other => Err(format!("unknown mode '{other}' (expected standard or limited)")),
        }
    }
}

/// Standard-mode streaks of one channel, user → streak.
pub type ChannelCounters = BTreeMap<String, u64>;

/// Limited-mode state of one channel, user → entry.
pub type ChannelLimitedState = BTreeMap<String, LimitedEntry>;

/// Limited-mode state of one user for the current day.
///
/// Serialized as `{"shotsTaken": n, "streak": n}`. Missing fields read as 0.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct LimitedEntry {
    /// Shots drawn today.
    pub shots_taken: u8,
    /// Survivals since the last shot or reset.
    pub streak: u64,
}
