mod common;

use std::sync::Arc;
use std::thread;

use common::TestEngine;
use roulette_bot::engine::Draw::{Shot, Survive};
use roulette_bot::engine::{GameRules, LimitedEntry, Mode, PlayOutcome, Record};
use roulette_bot::store::{DocumentName, MemoryStore};

fn memory() -> Arc<MemoryStore> {
    Arc::new(MemoryStore::new())
}

#[test]
fn three_survivals_then_shot() {
    let t = TestEngine::new(memory(), [Survive, Survive, Survive, Shot]);

    let mut streaks = Vec::new();
    let mut broken = Vec::new();
    for _ in 0..4 {
        let outcome = t.engine.play(Mode::Standard, "C", "U");
        streaks.push(outcome.streak().unwrap());
        broken.push(outcome.record_broken());
    }

    assert_eq!(streaks, [1, 2, 3, 0]);
    assert_eq!(broken, [true, true, true, false]);
    assert_eq!(
        t.engine.record("C"),
        Some(Record {
            user: "U".into(),
            streak: 3
        })
    );
    assert_eq!(t.engine.counters("C").get("U"), Some(&0));
}

#[test]
fn shot_credits_pre_shot_streak_to_record() {
    let t = TestEngine::new(memory(), [Survive, Survive, Shot, Shot]);
    t.engine.play(Mode::Standard, "C", "alice");
    t.engine.play(Mode::Standard, "C", "alice");
    // bob has never played: his shot offers 0, below alice's 2
    let bob = t.engine.play(Mode::Standard, "C", "bob");
    assert!(!bob.record_broken());

    let alice = t.engine.play(Mode::Standard, "C", "alice");
    assert_eq!(
        alice,
        PlayOutcome::Shot {
            previous_streak: 2,
            timeout_seconds: 10,
            record_broken: false,
            shots_taken: None,
            blocked_now: false,
        }
    );
    assert_eq!(t.engine.record("C").unwrap().user, "alice");
}

#[test]
fn tie_keeps_first_holder() {
    let t = TestEngine::new(memory(), [Survive, Survive, Survive, Survive]);
    t.engine.play(Mode::Standard, "C", "first");
    t.engine.play(Mode::Standard, "C", "first");
    t.engine.play(Mode::Standard, "C", "second");
    let tie = t.engine.play(Mode::Standard, "C", "second");

    assert_eq!(tie.streak(), Some(2));
    assert!(!tie.record_broken());
    assert_eq!(t.engine.record("C").unwrap().user, "first");
}

#[test]
fn limited_mode_blocks_after_daily_limit() {
    let t = TestEngine::new(memory(), [Shot, Survive, Shot, Shot]);

    let first = t.engine.play(Mode::Limited, "C", "U");
    assert!(matches!(
        first,
        PlayOutcome::Shot {
            shots_taken: Some(1),
            blocked_now: false,
            ..
        }
    ));
    assert_eq!(t.engine.play(Mode::Limited, "C", "U").streak(), Some(1));
    t.engine.play(Mode::Limited, "C", "U");
    let third = t.engine.play(Mode::Limited, "C", "U");
    assert!(matches!(
        third,
        PlayOutcome::Shot {
            shots_taken: Some(3),
            blocked_now: true,
            ..
        }
    ));

    let pulls = t.trigger.pulls();
    assert_eq!(
        t.engine.play(Mode::Limited, "C", "U"),
        PlayOutcome::Blocked { shots_taken: 3 }
    );
    assert_eq!(t.trigger.pulls(), pulls, "blocked plays never draw");
}

#[test]
fn blocked_user_plays_again_next_day() {
    let rules = GameRules {
        daily_shot_limit: 1,
        ..GameRules::default()
    };
    let t = TestEngine::with_rules(memory(), rules, [Shot, Survive]);
    t.engine.play(Mode::Limited, "C", "U");
    assert!(t.engine.play(Mode::Limited, "C", "U").is_blocked());

    t.clock.advance_days(1);
    assert_eq!(t.engine.play(Mode::Limited, "C", "U").streak(), Some(1));
    assert_eq!(
        t.engine.limited_state("C").get("U"),
        Some(&LimitedEntry {
            shots_taken: 0,
            streak: 1
        })
    );
}

#[test]
fn daily_reset_clears_counters_but_not_records() {
    let t = TestEngine::new(memory(), [Survive, Survive, Survive]);
    t.engine.play(Mode::Standard, "C", "U");
    t.engine.play(Mode::Standard, "C", "U");

    t.clock.advance_days(1);
    let outcome = t.engine.play(Mode::Standard, "C", "U");
    assert_eq!(outcome.streak(), Some(1));
    assert_eq!(t.engine.record("C").unwrap().streak, 2);
}

#[test]
fn modes_reset_independently() {
    let t = TestEngine::new(memory(), [Survive, Survive, Survive]);
    t.engine.play(Mode::Standard, "C", "U");
    t.engine.play(Mode::Limited, "C", "U");
    t.engine.play(Mode::Standard, "C", "U");

    // same day: the limited play did not clear standard counters
    assert_eq!(t.engine.counters("C").get("U"), Some(&2));
    assert_eq!(t.engine.limited_state("C").get("U").unwrap().streak, 1);
}

#[test]
fn modes_keep_separate_streaks_but_share_record() {
    let t = TestEngine::new(memory(), [Survive, Survive, Survive, Survive]);
    t.engine.play(Mode::Standard, "C", "a");
    t.engine.play(Mode::Standard, "C", "a");
    t.engine.play(Mode::Limited, "C", "b");
    let outcome = t.engine.play(Mode::Limited, "C", "b");

    assert_eq!(outcome.streak(), Some(2));
    assert!(!outcome.record_broken());
    assert_eq!(t.engine.record("C").unwrap().user, "a");
}

#[test]
fn channels_are_isolated() {
    let t = TestEngine::new(memory(), [Survive, Survive]);
    t.engine.play(Mode::Standard, "one", "U");
    t.engine.play(Mode::Standard, "two", "U");

    assert_eq!(t.engine.counters("one").get("U"), Some(&1));
    assert_eq!(t.engine.counters("two").get("U"), Some(&1));
    assert!(t.engine.record("three").is_none());
}

#[test]
fn record_query_has_no_side_effects() {
    let store = memory();
    let t = TestEngine::new(store.clone(), [Survive]);
    let saves = store.saves();
    assert!(t.engine.record("C").is_none());
    assert_eq!(store.saves(), saves);
    assert!(store.document(DocumentName::Records).is_none());
}

#[test]
fn concurrent_plays_on_one_channel_lose_no_updates() {
    const USERS: usize = 8;
    const PLAYS: usize = 50;

    let t = Arc::new(TestEngine::new(
        memory(),
        std::iter::repeat_n(Survive, USERS * PLAYS),
    ));

    let handles: Vec<_> = (0..USERS)
        .map(|i| {
            let t = Arc::clone(&t);
            thread::spawn(move || {
                let user = format!("user{i}");
                for _ in 0..PLAYS {
                    t.engine.play(Mode::Standard, "busy", &user);
                }
            })
        })
        .collect();
    for handle in handles {
        handle.join().unwrap();
    }

    let counters = t.engine.counters("busy");
    assert_eq!(counters.len(), USERS);
    assert!(counters.values().all(|&streak| streak == PLAYS as u64));
    assert_eq!(t.engine.record("busy").unwrap().streak, PLAYS as u64);
}

#[test]
fn concurrent_limited_plays_respect_cap() {
    const THREADS: usize = 6;

    let t = Arc::new(TestEngine::new(
        memory(),
        std::iter::repeat_n(Shot, THREADS),
    ));

    let handles: Vec<_> = (0..THREADS)
        .map(|_| {
            let t = Arc::clone(&t);
            thread::spawn(move || t.engine.play(Mode::Limited, "C", "same-user"))
        })
        .collect();
    let outcomes: Vec<_> = handles.into_iter().map(|h| h.join().unwrap()).collect();

    assert_eq!(outcomes.iter().filter(|o| o.is_shot()).count(), 3);
    assert_eq!(outcomes.iter().filter(|o| o.is_blocked()).count(), 3);
    assert_eq!(
        t.engine.limited_state("C").get("same-user").unwrap().shots_taken,
        3
    );
}
