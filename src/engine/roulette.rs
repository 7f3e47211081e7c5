//! Roulette engine orchestration
//!
//! The `RouletteEngine` runs every play as one unit per channel: reset check,
//! draw, counter update, record update and persistence all happen while the
//! channel's lock is held. Plays in different channels run in parallel.

use std::sync::{Arc, Mutex, PoisonError};

use chrono::NaiveDate;
use dashmap::DashMap;
use tracing::{debug, info};

use super::clock::{Clock, SystemClock};
use super::outcome::PlayOutcome;
use super::record::{Record, RecordTracker};
use super::reset::DailyReset;
use super::rules::GameRules;
use super::state::{ChannelCounters, ChannelLimitedState, Mode};
use super::trigger::{Draw, RandomTrigger, Trigger};
use crate::observability::metrics;
use crate::store::{DocumentName, Ledger, Store};

/// Game engine shared by every request of the process.
///
/// Coordinates:
/// - Daily reset of each channel's counters, per mode
/// - The 1-in-N draw via the injected [`Trigger`]
/// - Standard and limited counter transitions
/// - Channel records via [`RecordTracker`]
/// - Persistence of all three documents through the shared [`Store`]
pub struct RouletteEngine {
    rules: GameRules,
    clock: Arc<dyn Clock>,
    trigger: Arc<dyn Trigger>,
    resets: DailyReset,
    standard: Ledger<ChannelCounters>,
    limited: Ledger<ChannelLimitedState>,
    records: RecordTracker,
    /// One lock per channel, created on first use and never removed.
    channel_locks: DashMap<String, Arc<Mutex<()>>>,
}

impl RouletteEngine {
    /// Loads all documents from `store` and creates an engine using the
    /// server-local date and a random trigger.
    pub fn new(store: Arc<dyn Store>, rules: GameRules) -> Self {
        Self {
            rules,
            clock: Arc::new(SystemClock::default()),
            trigger: Arc::new(RandomTrigger),
            resets: DailyReset::new(),
            standard: Ledger::open(DocumentName::Counters, Arc::clone(&store)),
            limited: Ledger::open(DocumentName::LimitedCounters, Arc::clone(&store)),
            records: RecordTracker::open(store),
            channel_locks: DashMap::new(),
        }
    }

    /// Replaces the date source.
    #[must_use]
    pub fn with_clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = clock;
        self
    }

    /// Replaces the draw source.
    #[must_use]
    pub fn with_trigger(mut self, trigger: Arc<dyn Trigger>) -> Self {
        self.trigger = trigger;
        self
    }

    /// Returns the rules in effect.
    #[must_use]
    pub const fn rules(&self) -> &GameRules {
        &self.rules
    }

    /// Plays one round for `user` in `channel`.
    ///
    /// Callers are expected to have rejected empty identifiers already.
    pub fn play(&self, mode: Mode, channel: &str, user: &str) -> PlayOutcome {
        let lock = self.channel_lock(channel);
        let _guard = lock.lock().unwrap_or_else(PoisonError::into_inner);

        self.reset_if_due(mode, channel, self.clock.today());

        let outcome = match mode {
            Mode::Standard => self.play_standard(channel, user),
            Mode::Limited => self.play_limited(channel, user),
        };

        debug!(%mode, channel, user, outcome = outcome.label(), streak = ?outcome.streak(), "play");
        metrics::record_play(mode, outcome.label());
        outcome
    }

    /// Clears the counters of `(mode, channel)` if `today` differs from the
    /// last reset date.
    ///
    /// Returns `true` if a reset happened. A second call with the same date is
    /// a no-op. [`play`](Self::play) runs this automatically with the clock's
    /// date.
    pub fn check_reset(&self, mode: Mode, channel: &str, today: NaiveDate) -> bool {
        let lock = self.channel_lock(channel);
        let _guard = lock.lock().unwrap_or_else(PoisonError::into_inner);
        self.reset_if_due(mode, channel, today)
    }

    /// Returns the record of `channel`, if one has been set.
    #[must_use]
    pub fn record(&self, channel: &str) -> Option<Record> {
        self.records.get(channel)
    }

    /// Returns the standard-mode streaks of `channel`.
    #[must_use]
    pub fn counters(&self, channel: &str) -> ChannelCounters {
        self.standard.get(channel).unwrap_or_default()
    }

    /// Returns the limited-mode state of `channel`.
    #[must_use]
    pub fn limited_state(&self, channel: &str) -> ChannelLimitedState {
        self.limited.get(channel).unwrap_or_default()
    }

    fn play_standard(&self, channel: &str, user: &str) -> PlayOutcome {
        let mut counters = self.counters(channel);
        let current = counters.get(user).copied().unwrap_or(0);

        match self.trigger.pull(self.rules.chambers) {
            Draw::Shot => {
                // The streak is offered before it is wiped.
                let record_broken = self.records.update(channel, user, current);
                counters.insert(user.to_owned(), 0);
                self.standard.commit(channel, counters);
                PlayOutcome::Shot {
                    previous_streak: current,
                    timeout_seconds: self.rules.timeout_seconds,
                    record_broken,
                    shots_taken: None,
                    blocked_now: false,
                }
            }
            Draw::Survive => {
                let streak = current.saturating_add(1);
                counters.insert(user.to_owned(), streak);
                self.standard.commit(channel, counters);
                let record_broken = self.records.update(channel, user, streak);
                PlayOutcome::Survived {
                    streak,
                    record_broken,
                }
            }
        }
    }

    fn play_limited(&self, channel: &str, user: &str) -> PlayOutcome {
        let limit = self.rules.daily_shot_limit;
        let mut state = self.limited_state(channel);
        let mut entry = state.get(user).copied().unwrap_or_default();

        if entry.shots_taken >= limit {
            return PlayOutcome::Blocked {
                shots_taken: entry.shots_taken,
            };
        }

        match self.trigger.pull(self.rules.chambers) {
            Draw::Shot => {
                let previous_streak = entry.streak;
                let record_broken = self.records.update(channel, user, previous_streak);
                entry.shots_taken += 1;
                entry.streak = 0;
                state.insert(user.to_owned(), entry);
                self.limited.commit(channel, state);
                PlayOutcome::Shot {
                    previous_streak,
                    timeout_seconds: self.rules.timeout_seconds,
                    record_broken,
                    shots_taken: Some(entry.shots_taken),
                    blocked_now: entry.shots_taken == limit,
                }
            }
            Draw::Survive => {
                entry.streak = entry.streak.saturating_add(1);
                state.insert(user.to_owned(), entry);
                self.limited.commit(channel, state);
                let record_broken = self.records.update(channel, user, entry.streak);
                PlayOutcome::Survived {
                    streak: entry.streak,
                    record_broken,
                }
            }
        }
    }

    /// Must be called with the channel lock held.
    fn reset_if_due(&self, mode: Mode, channel: &str, today: NaiveDate) -> bool {
        if !self.resets.advance(mode, channel, today) {
            return false;
        }

        match mode {
            Mode::Standard => self.standard.commit(channel, ChannelCounters::new()),
            Mode::Limited => self.limited.commit(channel, ChannelLimitedState::new()),
        };
        info!(%mode, channel, %today, "daily counters reset");
        metrics::record_reset(mode);
        true
    }

    fn channel_lock(&self, channel: &str) -> Arc<Mutex<()>> {
        if let Some(lock) = self.channel_locks.get(channel) {
            return Arc::clone(lock.value());
        }
        Arc::clone(
            self.channel_locks
                .entry(channel.to_owned())
                .or_default()
                .value(),
        )
    }
}

impl std::fmt::Debug for RouletteEngine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RouletteEngine")
            .field("rules", &self.rules)
            .field("channels", &self.channel_locks.len())
            .finish_non_exhaustive()
    }
}
