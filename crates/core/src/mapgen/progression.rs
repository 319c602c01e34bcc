//! Placement quotas per level and difficulty.

use crate::types::{CellKind, FINAL_LEVEL, STARTING_LEVEL};

const GOLD_COUNT: usize = 5;
const TRAP_COUNT: usize = 5;
const MELEE_MONSTER_COUNT: usize = 3;
const HEALTH_POTION_COUNT: usize = 2;

/// Placement order matters: each category draws from whatever the previous ones left.
pub(super) fn quotas(difficulty: u32) -> [(CellKind, usize); 5] {
    [
        (CellKind::Gold, GOLD_COUNT),
        (CellKind::Trap, TRAP_COUNT),
        (CellKind::MeleeMonster, MELEE_MONSTER_COUNT),
        (CellKind::RangedMonster, difficulty as usize),
        (CellKind::HealthPotion, HEALTH_POTION_COUNT),
    ]
}

pub(super) fn has_entry_marker(level: u8) -> bool {
    level == STARTING_LEVEL
}

pub fn is_final_level(level: u8) -> bool {
    level >= FINAL_LEVEL
}
