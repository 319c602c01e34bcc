//! Per-kind cell behaviour as a static effect table.
//! This module exists so every on-enter rule lives in one `match` instead of being spread
//! across the movement code. It does not decide narration or consumption timing.

use serde::{Deserialize, Serialize};

use crate::state::Player;
use crate::types::{CellKind, Pos};

const GOLD_REWARD: u32 = 2;
const MONSTER_REWARD: u32 = 2;
const TRAP_DAMAGE: i32 = 2;
const MELEE_DAMAGE: i32 = 2;
const POTION_HEAL: i32 = 4;

/// Damage a ranged monster deals when its attack roll succeeds.
pub const RANGED_DAMAGE: i32 = 2;

/// A grid position and what it holds. Cells are values: changing what sits on a tile means
/// replacing the cell, never editing its kind.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Cell {
    kind: CellKind,
    pos: Pos,
}

impl Cell {
    pub fn new(kind: CellKind, pos: Pos) -> Self {
        Self { kind, pos }
    }

    pub fn kind(&self) -> CellKind {
        self.kind
    }

    pub fn pos(&self) -> Pos {
        self.pos
    }
}

/// What entering a cell does to the player. Damage and reward apply together.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Effect {
    pub damage: i32,
    pub heal: i32,
    pub score: u32,
}

impl CellKind {
    pub fn effect(self) -> Effect {
        match self {
            CellKind::Gold => Effect { score: GOLD_REWARD, ..Effect::default() },
            CellKind::Trap => Effect { damage: TRAP_DAMAGE, ..Effect::default() },
            CellKind::HealthPotion => Effect { heal: POTION_HEAL, ..Effect::default() },
            CellKind::MeleeMonster => {
                Effect { damage: MELEE_DAMAGE, score: MONSTER_REWARD, ..Effect::default() }
            }
            CellKind::RangedMonster => Effect { score: MONSTER_REWARD, ..Effect::default() },
            CellKind::Wall | CellKind::Entry | CellKind::Ladder | CellKind::Empty => {
                Effect::default()
            }
        }
    }

    /// One-shot kinds turn into `Empty` once their effect has fired.
    pub fn is_consumed(self) -> bool {
        matches!(
            self,
            CellKind::Gold | CellKind::HealthPotion | CellKind::MeleeMonster | CellKind::RangedMonster
        )
    }

    pub fn blocks_movement(self) -> bool {
        matches!(self, CellKind::Wall | CellKind::Entry)
    }

    pub fn glyph(self) -> char {
        match self {
            CellKind::Wall => '#',
            CellKind::Entry => 'E',
            CellKind::Ladder => 'L',
            CellKind::Trap => 'T',
            CellKind::Gold => 'G',
            CellKind::MeleeMonster => 'M',
            CellKind::RangedMonster => 'R',
            CellKind::HealthPotion => 'H',
            CellKind::Empty => '.',
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            CellKind::Wall => "wall",
            CellKind::Entry => "entry",
            CellKind::Ladder => "ladder",
            CellKind::Trap => "trap",
            CellKind::Gold => "gold pile",
            CellKind::MeleeMonster => "melee monster",
            CellKind::RangedMonster => "ranged monster",
            CellKind::HealthPotion => "health potion",
            CellKind::Empty => "empty floor",
        }
    }
}

/// Applies the entered kind's effect through the player's own mutators.
pub fn apply_effect(kind: CellKind, player: &mut Player) {
    let effect = kind.effect();
    if effect.damage > 0 {
        player.take_damage(effect.damage);
    }
    if effect.heal > 0 {
        player.heal(effect.heal);
    }
    if effect.score > 0 {
        player.add_score(effect.score);
    }
}
