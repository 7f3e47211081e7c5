//! Response rendering.
//!
//! Plays and record queries are rendered either as chat text (a moderation
//! command on a shot) or as a JSON document. Both styles are used by the HTTP
//! routes and the CLI.

use serde::{Deserialize, Serialize};

use crate::engine::{ChannelCounters, ChannelLimitedState, Mode, PlayOutcome, Record};

/// Response style requested by the caller.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum ResponseFormat {
    /// Chat line or moderation command.
    #[default]
    Text,
    /// Structured JSON document.
    Json,
}

/// Text returned by the liveness route.
pub const LIVENESS_TEXT: &str = "Roulette API is running!";

/// Renders a play as a chat line.
///
/// A shot becomes a `/timeout` command for the chat bot to execute.
#[must_use]
pub fn play_text(user: &str, outcome: &PlayOutcome) -> String {
    match *outcome {
        PlayOutcome::Shot {
            timeout_seconds, ..
        } => format!("/timeout {user} {timeout_seconds}"),
        PlayOutcome::Survived {
            streak,
            record_broken: true,
        } => format!(
            "🎉 {user}, you survived and BROKE THE RECORD with {streak} consecutive survivals!"
        ),
        PlayOutcome::Survived { streak, .. } => {
            format!(":) {user}, you survived! Pulls without getting shot: {streak}.")
        }
        PlayOutcome::Blocked { shots_taken } => format!(
            "🚫 {user}, you have already taken {shots_taken} shots today. Come back tomorrow."
        ),
    }
}

/// Renders a record query as a chat line.
///
/// A stored record with a zero streak is reported as no record.
#[must_use]
pub fn record_text(channel: &str, record: Option<&Record>) -> String {
    match displayable(record) {
        Some(record) => format!(
            "🏆 The current record in this channel belongs to {}, with {} consecutive survivals!",
            record.user, record.streak
        ),
        None => format!("There is no record in channel {channel} yet. Be the first to set one!"),
    }
}

fn displayable(record: Option<&Record>) -> Option<&Record> {
    record.filter(|r| !r.user.is_empty() && r.streak > 0)
}

/// JSON document for a play.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PlayResponse<'a> {
    /// Game variant.
    pub mode: Mode,
    /// Channel played in.
    pub channel: &'a str,
    /// Player.
    pub user: &'a str,
    /// The user drew the loaded chamber.
    pub shot: bool,
    /// Limited mode refused the play.
    pub blocked: bool,
    /// Streak after the play.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub streak: Option<u64>,
    /// The play set a new channel record.
    pub record_broken: bool,
    /// Moderation timeout on a shot.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timeout_seconds: Option<u32>,
    /// Shots taken today (limited mode).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub shots_taken: Option<u8>,
    /// This shot exhausted the daily allowance (limited mode).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub blocked_now: Option<bool>,
    /// Chat line for the same outcome.
    pub message: String,
}

impl<'a> PlayResponse<'a> {
    /// Builds the document for `outcome`.
    #[must_use]
    pub fn new(mode: Mode, channel: &'a str, user: &'a str, outcome: &PlayOutcome) -> Self {
        let (timeout_seconds, shots_taken, blocked_now) = match *outcome {
            PlayOutcome::Shot {
                timeout_seconds,
                shots_taken,
                blocked_now,
                ..
            } => (
                Some(timeout_seconds),
                shots_taken,
                shots_taken.map(|_| blocked_now),
            ),
            PlayOutcome::Blocked { shots_taken } => (None, Some(shots_taken), None),
            PlayOutcome::Survived { .. } => (None, None, None),
        };

        Self {
            mode,
            channel,
            user,
            shot: outcome.is_shot(),
            blocked: outcome.is_blocked(),
            streak: outcome.streak(),
            record_broken: outcome.record_broken(),
            timeout_seconds,
            shots_taken,
            blocked_now,
            message: play_text(user, outcome),
        }
    }
}

/// JSON document for a record query.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RecordResponse<'a> {
    /// Channel queried.
    pub channel: &'a str,
    /// Current record, `null` when none is set.
    pub record: Option<&'a Record>,
    /// Chat line for the same record.
    pub message: String,
}

impl<'a> RecordResponse<'a> {
    /// Builds the document for `record`.
    #[must_use]
    pub fn new(channel: &'a str, record: Option<&'a Record>) -> Self {
        Self {
            channel,
            record: displayable(record),
            message: record_text(channel, record),
        }
    }
}

/// JSON document describing everything stored for a channel.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ChannelStatus<'a> {
    /// Channel queried.
    pub channel: &'a str,
    /// Standard-mode streaks.
    pub counters: &'a ChannelCounters,
    /// Limited-mode state.
    pub limited: &'a ChannelLimitedState,
    /// Current record.
    pub record: Option<&'a Record>,
}

/// Renders a channel status as plain text, one line per entry.
#[must_use]
pub fn status_text(status: &ChannelStatus<'_>) -> String {
    let mut lines = vec![record_text(status.channel, status.record)];

    if status.counters.is_empty() {
        lines.push("standard: no plays".to_string());
    }
    for (user, streak) in status.counters {
        lines.push(format!("standard {user}: streak {streak}"));
    }

    if status.limited.is_empty() {
        lines.push("limited: no plays".to_string());
    }
    for (user, entry) in status.limited {
        lines.push(format!(
            "limited {user}: streak {}, shots {}",
            entry.streak, entry.shots_taken
        ));
    }

    lines.join("\n")
}
