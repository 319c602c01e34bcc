//! Level construction: wall ring, fixed markers, then quota draws from a shared free list.

use rand_chacha::ChaCha8Rng;
use tracing::debug;

use crate::seed::random_index;
use crate::state::Grid;
use crate::types::{CellKind, ENTRY_TILE, GRID_SIZE, PLAYER_START, Pos};

use super::model::{GeneratedLevel, Placement};
use super::progression::{has_entry_marker, quotas};

pub(super) fn generate(level: u8, difficulty: u32, rng: &mut ChaCha8Rng) -> GeneratedLevel {
    let mut grid = Grid::walled();
    let mut free = interior_free_list(PLAYER_START);

    if has_entry_marker(level) {
        grid.set_kind(ENTRY_TILE, CellKind::Entry);
    }

    let ladder = take_free(&mut free, rng);
    if let Some(pos) = ladder {
        grid.set_kind(pos, CellKind::Ladder);
    }

    let placements = quotas(difficulty)
        .into_iter()
        .map(|(kind, requested)| place_quota(&mut grid, &mut free, kind, requested, rng))
        .collect::<Vec<_>>();

    for placement in placements.iter().filter(|placement| placement.is_under_filled()) {
        debug!(
            kind = ?placement.kind,
            requested = placement.requested,
            placed = placement.placed,
            "free list exhausted before quota"
        );
    }

    GeneratedLevel { level, grid, player_start: PLAYER_START, ladder, placements }
}

/// Every interior coordinate in row-major order, minus the reserved tile.
pub(super) fn interior_free_list(reserved: Pos) -> Vec<Pos> {
    let inner = 1..GRID_SIZE as i32 - 1;
    inner
        .clone()
        .flat_map(|y| inner.clone().map(move |x| Pos { y, x }))
        .filter(|pos| *pos != reserved)
        .collect()
}

fn take_free(free: &mut Vec<Pos>, rng: &mut ChaCha8Rng) -> Option<Pos> {
    if free.is_empty() {
        return None;
    }
    let idx = random_index(rng, free.len());
    Some(free.remove(idx))
}

/// Places up to `requested` cells of `kind`; stops quietly when the free list runs out.
pub(super) fn place_quota(
    grid: &mut Grid,
    free: &mut Vec<Pos>,
    kind: CellKind,
    requested: usize,
    rng: &mut ChaCha8Rng,
) -> Placement {
    let mut placed = 0;
    while placed < requested {
        let Some(pos) = take_free(free, rng) else {
            break;
        };
        grid.set_kind(pos, kind);
        placed += 1;
    }
    Placement { kind, requested, placed }
}
