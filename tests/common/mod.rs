//! Shared integration-test harness: engines with a scripted trigger and a
//! fixed date, and a runner for the `roulette-bot` binary.

#![allow(dead_code)]

use std::path::Path;
use std::process::Output;
use std::sync::Arc;

use chrono::NaiveDate;
use roulette_bot::engine::{Draw, FixedClock, GameRules, RouletteEngine, ScriptedTrigger};
use roulette_bot::store::Store;

/// Date every test engine starts on.
pub fn start_date() -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 6, 1).expect("valid date")
}

/// An engine over `store` with a scripted trigger and a controllable clock.
pub struct TestEngine {
    pub engine: RouletteEngine,
    pub clock: Arc<FixedClock>,
    pub trigger: Arc<ScriptedTrigger>,
}

impl TestEngine {
    /// Builds an engine with default rules.
    pub fn new(store: Arc<dyn Store>, draws: impl IntoIterator<Item = Draw>) -> Self {
        Self::with_rules(store, GameRules::default(), draws)
    }

    /// Builds an engine with `rules`.
    pub fn with_rules(
        store: Arc<dyn Store>,
        rules: GameRules,
        draws: impl IntoIterator<Item = Draw>,
    ) -> Self {
        let clock = Arc::new(FixedClock::new(start_date()));
        let trigger = Arc::new(ScriptedTrigger::new(draws));
        let engine = RouletteEngine::new(store, rules)
            .with_clock(clock.clone())
            .with_trigger(trigger.clone());
        Self {
            engine,
            clock,
            trigger,
        }
    }
}

/// Runs the binary with `args`, pointed at `data_dir`, and waits for it.
#[allow(clippy::missing_panics_doc)]
pub fn run_cli(data_dir: &Path, args: &[&str]) -> Output {
    std::process::Command::new(env!("CARGO_BIN_EXE_roulette-bot"))
        .args(args)
        .arg("--data-dir")
        .arg(data_dir)
        .arg("--quiet")
        .env_remove("ROULETTE_CONFIG")
        .env_remove("ROULETTE_LOG_LEVEL")
        .output()
        .expect("failed to run roulette-bot")
}
