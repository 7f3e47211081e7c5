//! The 1-in-N draw.

use std::collections::VecDeque;
use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Mutex, PoisonError};

use rand::Rng;

/// Result of pulling the trigger.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Draw {
    /// The chamber was loaded.
    Shot,
    /// The chamber was empty.
    Survive,
}

/// Source of draws.
pub trait Trigger: Send + Sync + fmt::Debug {
    /// Draws once from a cylinder with `chambers` chambers, one of them loaded.
    fn pull(&self, chambers: u32) -> Draw;
}

/// Uniform draw from the thread-local RNG.
#[derive(Debug, Clone, Copy, Default)]
pub struct RandomTrigger;

impl Trigger for RandomTrigger {
    fn pull(&self, chambers: u32) -> Draw {
        if rand::rng().random_range(0..chambers.max(1)) == 0 {
            Draw::Shot
        } else {
            Draw::Survive
        }
    }
}

/// Replays a fixed sequence of draws.
///
/// Once the script runs out every pull survives.
#[derive(Debug, Default)]
pub struct ScriptedTrigger {
    script: Mutex<VecDeque<Draw>>,
    pulls: AtomicU64,
}

impl ScriptedTrigger {
    /// Creates a trigger that yields `draws` in order.
    #[must_use]
    pub fn new(draws: impl IntoIterator<Item = Draw>) -> Self {
        Self {
            script: Mutex::new(draws.into_iter().collect()),
            pulls: AtomicU64::new(0),
        }
    }

    /// Appends draws to the end of the script.
    pub fn extend(&self, draws: impl IntoIterator<Item = Draw>) {
        self.script
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .extend(draws);
    }

    /// Number of scripted draws not yet consumed.
    #[must_use]
    pub fn remaining(&self) -> usize {
        self.script
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    /// Number of pulls so far.
    #[must_use]
    pub fn pulls(&self) -> u64 {
        self.pulls.load(Ordering::SeqCst)
    }
}

impl Trigger for ScriptedTrigger {
    fn pull(&self, _chambers: u32) -> Draw {
        self.pulls.fetch_add(1, Ordering::SeqCst);
        self.script
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .pop_front()
            .unwrap_or(Draw::Survive)
    }
}
