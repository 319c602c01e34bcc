//! Ranged monster attacks against the player after each accepted move.

use super::*;
use crate::cell::RANGED_DAMAGE;

const RANGED_REACH: i32 = 2;

/// Row- or column-aligned at exactly the reach distance.
pub(super) fn in_ranged_reach(monster: Pos, player: Pos) -> bool {
    (monster.y == player.y && (monster.x - player.x).abs() == RANGED_REACH)
        || (monster.x == player.x && (monster.y - player.y).abs() == RANGED_REACH)
}

impl Engine {
    /// Each aligned monster rolls once, in row-major order.
    pub(super) fn resolve_ranged_attacks(&mut self) {
        let player_pos = self.player.pos();
        let attackers: Vec<Pos> = self
            .grid
            .positions_of(CellKind::RangedMonster)
            .filter(|&pos| in_ranged_reach(pos, player_pos))
            .collect();

        for monster in attackers {
            if coin_flip(&mut self.rng) {
                self.player.take_damage(RANGED_DAMAGE);
                self.log.push(LogEvent::RangedHit { damage: RANGED_DAMAGE });
                debug!(?monster, health = self.player.health(), "ranged hit");
            } else {
                self.log.push(LogEvent::RangedMiss);
            }
        }
    }
}
