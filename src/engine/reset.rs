//! Daily reset bookkeeping.
//!
//! Tracks, per mode and channel, the date on which that channel's counters
//! were last cleared. The map is not persisted: after a restart
//! it is empty, so the first play per channel and mode clears the counters
//! once more.

use chrono::NaiveDate;
use dashmap::DashMap;
use dashmap::mapref::entry::Entry;

use super::state::Mode;

/// Last reset date per `(mode, channel)`.
#[derive(Debug, Default)]
pub struct DailyReset {
    last_reset: DashMap<(Mode, String), NaiveDate>,
}

impl DailyReset {
    /// Creates a controller with no recorded resets.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Records `today` as the reset date for `(mode, channel)`.
    ///
    /// Returns `true` when the previous date was different or absent, meaning
    /// the caller must clear the channel's counters. Repeated calls on the
    /// same date return `false`.
    pub fn advance(&self, mode: Mode, channel: &str, today: NaiveDate) -> bool {
        match self.last_reset.entry((mode, channel.to_owned())) {
            Entry::Occupied(mut entry) => {
                if *entry.get() == today {
                    false
                } else {
                    entry.insert(today);
                    true
                }
            }
            Entry::Vacant(entry) => {
                entry.insert(today);
                true
            }
        }
    }

    /// Returns the last reset date for `(mode, channel)`, if any.
    #[must_use]
    pub fn last_reset(&self, mode: Mode, channel: &str) -> Option<NaiveDate> {
        self.last_reset
            .get(&(mode, channel.to_owned()))
            .map(|date| *date.value())
    }
}
