//! Calendar date source for the daily reset.

use std::fmt;
use std::sync::{Mutex, PoisonError};

use chrono::{Days, NaiveDate};
use serde::{Deserialize, Serialize};

/// Timezone policy that decides when a new day starts.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum DayBoundary {
    /// Server-local midnight.
    #[default]
    Local,
    /// UTC midnight.
    Utc,
}

/// Supplies today's date.
pub trait Clock: Send + Sync + fmt::Debug {
    /// Returns the current calendar date.
    fn today(&self) -> NaiveDate;
}

/// Wall-clock date under a [`DayBoundary`] policy.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock {
    boundary: DayBoundary,
}

impl SystemClock {
    /// Creates a clock that rolls over at the given boundary.
    #[must_use]
    pub const fn new(boundary: DayBoundary) -> Self {
        Self { boundary }
    }
}

impl Clock for SystemClock {
    fn today(&self) -> NaiveDate {
        match self.boundary {
            DayBoundary::Local => chrono::Local::now().date_naive(),
            DayBoundary::Utc => chrono::Utc::now().date_naive(),
        }
    }
}

/// Manually driven date, for simulating day changes.
#[derive(Debug)]
pub struct FixedClock {
    date: Mutex<NaiveDate>,
}

impl FixedClock {
    /// Creates a clock frozen at `date`.
    #[must_use]
    pub const fn new(date: NaiveDate) -> Self {
        Self {
            date: Mutex::new(date),
        }
    }

    /// Moves the clock to `date`.
    pub fn set(&self, date: NaiveDate) {
        *self.date.lock().unwrap_or_else(PoisonError::into_inner) = date;
    }

    /// Moves the clock forward by `days`; saturates at the last representable date.
    pub fn advance_days(&self, days: u64) {
        let mut date = self.date.lock().unwrap_or_else(PoisonError::into_inner);
        if let Some(next) = date.checked_add_days(Days::new(days)) {
            *date = next;
        }
    }
}

impl Clock for FixedClock {
    fn today(&self) -> NaiveDate {
        *self.date.lock().unwrap_or_else(PoisonError::into_inner)
    }
}
