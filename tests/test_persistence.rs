mod common;

use std::sync::Arc;

use common::TestEngine;
use roulette_bot::engine::Draw::{Shot, Survive};
use roulette_bot::engine::Mode;
use roulette_bot::store::{DocumentName, JsonFileStore};

fn file_store(dir: &tempfile::TempDir) -> Arc<JsonFileStore> {
    Arc::new(JsonFileStore::new(dir.path()))
}

fn read_json(dir: &tempfile::TempDir, name: DocumentName) -> serde_json::Value {
    let text = std::fs::read_to_string(dir.path().join(name.file_name())).unwrap();
    serde_json::from_str(&text).unwrap()
}

#[test]
fn plays_are_written_to_the_three_documents() {
    let dir = tempfile::tempdir().unwrap();
    let t = TestEngine::new(file_store(&dir), [Survive, Survive, Shot]);
    t.engine.play(Mode::Standard, "chan", "alice");
    t.engine.play(Mode::Standard, "chan", "alice");
    t.engine.play(Mode::Limited, "chan", "bob");

    let counters = read_json(&dir, DocumentName::Counters);
    assert_eq!(counters["chan"]["alice"], 2);

    let limited = read_json(&dir, DocumentName::LimitedCounters);
    assert_eq!(limited["chan"]["bob"]["shotsTaken"], 1);
    assert_eq!(limited["chan"]["bob"]["streak"], 0);

    let records = read_json(&dir, DocumentName::Records);
    assert_eq!(records["chan"]["user"], "alice");
    assert_eq!(records["chan"]["streak"], 2);
}

#[test]
fn state_survives_restart() {
    let dir = tempfile::tempdir().unwrap();
    {
        let t = TestEngine::new(file_store(&dir), [Survive, Survive]);
        t.engine.play(Mode::Standard, "chan", "alice");
        t.engine.play(Mode::Standard, "chan", "alice");
    }

    let t = TestEngine::new(file_store(&dir), [Survive]);
    assert_eq!(t.engine.counters("chan").get("alice"), Some(&2));
    assert_eq!(t.engine.record("chan").unwrap().streak, 2);
}

#[test]
fn first_play_after_restart_resets_counters() {
    let dir = tempfile::tempdir().unwrap();
    {
        let t = TestEngine::new(file_store(&dir), [Survive, Survive]);
        t.engine.play(Mode::Standard, "chan", "alice");
        t.engine.play(Mode::Standard, "chan", "alice");
    }

    // The last reset date lives in memory only.
    let t = TestEngine::new(file_store(&dir), [Survive]);
    assert_eq!(t.engine.play(Mode::Standard, "chan", "alice").streak(), Some(1));
    assert_eq!(t.engine.record("chan").unwrap().streak, 2);
}

#[test]
fn malformed_document_starts_empty_and_is_rewritten() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join("counters.json"), "{ not json").unwrap();
    std::fs::write(
        dir.path().join("record.json"),
        r#"{"chan":{"user":"old","streak":7}}"#,
    )
    .unwrap();

    let t = TestEngine::new(file_store(&dir), [Survive]);
    assert!(t.engine.counters("chan").is_empty());
    assert_eq!(t.engine.record("chan").unwrap().user, "old");

    t.engine.play(Mode::Standard, "chan", "alice");
    let counters = read_json(&dir, DocumentName::Counters);
    assert_eq!(counters["chan"]["alice"], 1);
}

#[test]
fn legacy_documents_with_missing_fields_load() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(
        dir.path().join("limited_counters.json"),
        r#"{"chan":{"bob":{"shotsTaken":2}}}"#,
    )
    .unwrap();

    let t = TestEngine::new(file_store(&dir), [Survive]);
    let entry = t.engine.limited_state("chan")["bob"];
    assert_eq!(entry.shots_taken, 2);
    assert_eq!(entry.streak, 0);
}

#[test]
fn missing_data_dir_is_created_on_first_save() {
    let dir = tempfile::tempdir().unwrap();
    let nested = dir.path().join("a").join("b");
    let store = Arc::new(JsonFileStore::new(&nested));

    let t = TestEngine::new(store, [Survive]);
    t.engine.play(Mode::Standard, "chan", "alice");
    assert!(nested.join("counters.json").exists());
    assert!(!nested.join(".counters.json.tmp").exists());
}
