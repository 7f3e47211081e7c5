//! Roulette state engine
//!
//! Owns every state transition of the game: daily resets, streak counters,
//! the limited-mode shot cap and the channel records.
//!
//! # Architecture
//!
//! - [`RouletteEngine`]: coordinator; one per process, serializes work per channel
//! - [`DailyReset`]: per `(mode, channel)` date of the last counter clear
//! - [`RecordTracker`]: best streak per channel, across both modes
//! - [`Clock`] / [`Trigger`]: injectable calendar date and 1-in-N draw

pub mod clock;
pub mod outcome;
pub mod record;
pub mod reset;
pub mod roulette;
pub mod rules;
pub mod state;
pub mod trigger;

pub use clock::{Clock, DayBoundary, FixedClock, SystemClock};
pub use outcome::PlayOutcome;
pub use record::{Record, RecordTracker};
pub use reset::DailyReset;
pub use roulette::RouletteEngine;
pub use rules::GameRules;
pub use state::{ChannelCounters, ChannelLimitedState, LimitedEntry, Mode};
pub use trigger::{Draw, RandomTrigger, ScriptedTrigger, Trigger};
