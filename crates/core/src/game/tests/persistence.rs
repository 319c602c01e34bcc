//! Tests for snapshot restore, the repair rule, and file-backed save/load.

use std::fs;

use tempfile::tempdir;

use super::support::*;
use crate::save::write_save_file;

/// A few moves in, standing on an emptied tile so the repair rule has nothing to do.
fn played_engine() -> Engine {
    let mut engine = cleared_engine(41);
    place(&mut engine, ABOVE_START, CellKind::Gold);
    place(&mut engine, ABOVE_START.offset(1, 0), CellKind::MeleeMonster);
    place(&mut engine, Pos { y: 4, x: 6 }, CellKind::Trap);
    place(&mut engine, Pos { y: 6, x: 8 }, CellKind::RangedMonster);
    for direction in [Direction::Up, Direction::Right, Direction::Up] {
        assert!(engine.move_player(direction));
    }
    engine
}

#[test]
fn restore_reproduces_captured_state() {
    let engine = played_engine();
    let snapshot = engine.snapshot();

    let restored = Engine::restore(snapshot, None).expect("snapshot restores");

    assert_eq!(restored.grid(), engine.grid());
    assert_eq!(restored.player(), engine.player());
    assert_eq!(restored.level(), engine.level());
    assert_eq!(restored.difficulty(), engine.difficulty());
    assert_eq!(restored.steps_remaining(), engine.steps_remaining());
    assert_eq!(restored.status(), engine.status());
    assert_eq!(restored.snapshot_hash(), engine.snapshot_hash());
    assert!(restored.events().is_empty());
}

#[test]
fn restore_clears_a_special_cell_under_the_player() {
    let mut engine = cleared_engine(42);
    place(&mut engine, PLAYER_START, CellKind::Trap);

    let restored = Engine::restore(engine.snapshot(), None).expect("snapshot restores");

    let mut expected = engine.grid().clone();
    expected.set_kind(PLAYER_START, CellKind::Empty);
    assert_eq!(restored.grid(), &expected);
}

#[test]
fn restore_keeps_a_ladder_under_the_player() {
    let mut engine = cleared_engine(43);
    place(&mut engine, PLAYER_START, CellKind::Ladder);

    let restored = Engine::restore(engine.snapshot(), None).expect("snapshot restores");

    assert_eq!(restored.grid().kind_at(PLAYER_START), CellKind::Ladder);
}

#[test]
fn restored_runs_replay_identically() {
    let snapshot = played_engine().snapshot();
    let mut first = Engine::restore(snapshot.clone(), None).expect("snapshot restores");
    let mut second = Engine::restore(snapshot, None).expect("snapshot restores");

    for direction in [Direction::Right, Direction::Right, Direction::Up, Direction::Left] {
        assert_eq!(first.move_player(direction), second.move_player(direction));
        assert_eq!(first.snapshot_hash(), second.snapshot_hash());
    }
}

#[test]
fn restored_finished_run_stays_finished() {
    let mut engine = cleared_engine(44);
    engine.steps_remaining = 1;
    assert!(engine.move_player(Direction::Up));

    let mut restored = Engine::restore(engine.snapshot(), None).expect("snapshot restores");
    assert!(restored.is_over());
    assert!(!restored.move_player(Direction::Up));
}

#[test]
fn save_then_load_round_trips_through_a_file() {
    let dir = tempdir().expect("temp dir");
    let path = dir.path().join("run.json");
    let mut engine = played_engine();

    assert!(engine.save_game(&path));
    assert_eq!(engine.events().last(), Some(&LogEvent::GameSaved));

    let loaded = Engine::load_game(&path, None).expect("save loads");
    assert_eq!(loaded.snapshot_hash(), engine.snapshot_hash());
    assert_eq!(loaded.event_log(), vec!["Game loaded successfully".to_string()]);
}

#[test]
fn unwritable_destination_reports_failure_in_the_log() {
    let dir = tempdir().expect("temp dir");
    let blocker = dir.path().join("blocker");
    fs::write(&blocker, "a file, not a directory").expect("write blocker");
    let mut engine = played_engine();
    let before = engine.snapshot_hash();

    assert!(!engine.save_game(&blocker.join("run.json")));

    assert_eq!(engine.snapshot_hash(), before);
    let last = engine.event_log().last().cloned().unwrap_or_default();
    assert!(last.starts_with("Save failed: "), "unexpected log line {last:?}");
}

#[test]
fn unreadable_or_foreign_saves_load_as_none() {
    let dir = tempdir().expect("temp dir");
    assert!(Engine::load_game(&dir.path().join("missing.json"), None).is_none());

    let garbage = dir.path().join("garbage.json");
    fs::write(&garbage, "[1, 2, 3]").expect("write garbage");
    assert!(Engine::load_game(&garbage, None).is_none());

    let tampered = dir.path().join("tampered.json");
    let mut engine = played_engine();
    assert!(engine.save_game(&tampered));
    let content = fs::read_to_string(&tampered).expect("read save");
    fs::write(&tampered, content.replace("\"MDSV\"", "\"XXXX\"")).expect("rewrite save");
    assert!(Engine::load_game(&tampered, None).is_none());
}

#[test]
fn impossible_counters_in_a_checksummed_save_are_rejected() {
    let dir = tempdir().expect("temp dir");
    let path = dir.path().join("crafted.json");

    let mut endless = played_engine().snapshot();
    endless.moves_taken = u64::MAX;
    write_save_file(&endless, &path).expect("write save");
    assert!(Engine::load_game(&path, None).is_none());

    let mut engine = cleared_engine(45);
    place(&mut engine, ABOVE_START, CellKind::Ladder);
    let mut overdriven = engine.snapshot();
    overdriven.difficulty = u32::MAX;
    write_save_file(&overdriven, &path).expect("write save");
    assert!(Engine::load_game(&path, None).is_none());

    let mut early_win = engine.snapshot();
    early_win.status = RunStatus::Won;
    write_save_file(&early_win, &path).expect("write save");
    assert!(Engine::load_game(&path, None).is_none());
}

#[test]
fn hardest_reachable_save_still_loads_and_plays() {
    let dir = tempdir().expect("temp dir");
    let path = dir.path().join("hard.json");
    let mut engine = cleared_engine(46);
    place(&mut engine, ABOVE_START, CellKind::Ladder);
    let mut snapshot = engine.snapshot();
    snapshot.difficulty = 12;
    write_save_file(&snapshot, &path).expect("write save");

    let mut loaded = Engine::load_game(&path, None).expect("save loads");
    assert!(loaded.move_player(Direction::Up));
    assert_eq!(loaded.level(), FINAL_LEVEL);
    assert_eq!(loaded.difficulty(), 12 + DIFFICULTY_STEP);
}
