//! Player steps: validation, the entered cell's effect, narration, and consumption.
//! This module exists to own the fixed per-move sequence. It does not decide ranged hits or
//! run termination; those run afterwards from `threat` and `progression`.

use super::*;

impl Engine {
    /// Attempts one step. Returns whether the move was accepted.
    pub fn move_player(&mut self, direction: Direction) -> bool {
        if self.status.is_terminal() {
            self.log.push(LogEvent::RunAlreadyOver);
            return false;
        }

        let (dx, dy) = direction.delta();
        let target = self.player.pos().offset(dx, dy);
        if !target.is_interior() || self.grid.kind_at(target).blocks_movement() {
            self.log.push(LogEvent::BumpedWall);
            return false;
        }

        self.steps_remaining = self.steps_remaining.saturating_sub(1);
        self.moves_taken = self.moves_taken.saturating_add(1);
        self.player.set_position(target);
        self.log.push(LogEvent::Moved { direction });

        self.resolve_interaction(target);
        self.resolve_ranged_attacks();
        self.evaluate_progression();
        true
    }

    /// Delta form of [`Engine::move_player`]. Anything but a unit step is not a move.
    pub fn move_by(&mut self, dx: i32, dy: i32) -> bool {
        match Direction::from_delta(dx, dy) {
            Some(direction) => self.move_player(direction),
            None => false,
        }
    }

    fn resolve_interaction(&mut self, pos: Pos) {
        let kind = self.grid.kind_at(pos);
        let health_before = self.player.health();
        let score_before = self.player.score();

        apply_effect(kind, &mut self.player);

        let health_after = self.player.health();
        let score_gained = self.player.score() - score_before;
        let narration = match kind {
            CellKind::Gold if score_gained > 0 => {
                Some(LogEvent::GoldPickedUp { amount: score_gained })
            }
            CellKind::Trap if health_after < health_before => {
                Some(LogEvent::TrapTriggered { damage: health_before - health_after })
            }
            CellKind::HealthPotion if health_after > health_before => {
                Some(LogEvent::PotionDrunk { restored: health_after - health_before })
            }
            CellKind::MeleeMonster | CellKind::RangedMonster => {
                Some(LogEvent::MonsterDefeated { kind, wounded: health_after < health_before })
            }
            _ => None,
        };
        self.log.extend(narration);

        if kind.is_consumed() {
            self.grid.set_kind(pos, CellKind::Empty);
        }
    }
}
