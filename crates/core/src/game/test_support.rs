//! Shared fixtures for the `game` test suites.
//! This module exists to avoid repeating level setup across many tests.
//! It does not own production gameplay logic.

use super::*;

/// Top-right interior corner, far from the start tile.
pub(super) const CORNER_LADDER: Pos = Pos { y: INTERIOR_MIN, x: INTERIOR_MAX };

/// The tile one step up from the start tile.
pub(super) const ABOVE_START: Pos = Pos { y: PLAYER_START.y - 1, x: PLAYER_START.x };

/// A difficulty-0 run whose level has been wiped down to the entry marker and one ladder.
pub(super) fn cleared_engine(seed: u64) -> Engine {
    let mut engine = Engine::new(0, Some(seed));
    engine.grid = Grid::walled();
    engine.grid.set_kind(ENTRY_TILE, CellKind::Entry);
    engine.grid.set_kind(CORNER_LADDER, CellKind::Ladder);
    engine.clear_event_log();
    engine
}

pub(super) fn place(engine: &mut Engine, pos: Pos, kind: CellKind) {
    engine.grid.set_kind(pos, kind);
}

/// What the next ranged roll will be, without consuming it.
pub(super) fn peek_rolls(engine: &Engine, count: usize) -> Vec<bool> {
    let mut rng = engine.rng.clone();
    (0..count).map(|_| coin_flip(&mut rng)).collect()
}

/// First seed at or after `start` whose next ranged roll hits.
pub(super) fn cleared_engine_with_next_hit(start: u64) -> Engine {
    (start..)
        .map(cleared_engine)
        .find(|engine| peek_rolls(engine, 1) == [true])
        .expect("some seed rolls a hit")
}

pub(super) fn ranged_events(engine: &Engine) -> usize {
    engine
        .events()
        .iter()
        .filter(|event| matches!(event, LogEvent::RangedHit { .. } | LogEvent::RangedMiss))
        .count()
}
