//! End-of-turn run status: defeat, level advance, or victory.
//! This module exists to keep the priority order of terminal checks in one place.
//! It does not own ledger formatting; it only records and persists.

use tracing::{info, warn};

use super::*;
use crate::mapgen::is_final_level;

impl Engine {
    /// Depletion beats the ladder: a player who dies on the ladder still loses.
    pub(super) fn evaluate_progression(&mut self) {
        if self.player.health() <= 0 || self.steps_remaining == 0 {
            self.finish(RunStatus::Lost);
        } else if self.grid.kind_at(self.player.pos()) == CellKind::Ladder {
            if is_final_level(self.level) {
                self.finish(RunStatus::Won);
            } else {
                self.advance_level();
            }
        }
    }

    fn advance_level(&mut self) {
        self.level = self.level.saturating_add(1);
        self.difficulty = self.difficulty.saturating_add(DIFFICULTY_STEP);
        self.log.push(LogEvent::LevelAdvanced { level: self.level });
        info!(level = self.level, difficulty = self.difficulty, "advanced level");
        self.load_level();
    }

    fn finish(&mut self, status: RunStatus) {
        self.status = status;
        let score = self.player.score();
        match status {
            RunStatus::Won => {
                self.ledger.record(score);
                self.log.push(LogEvent::Victory);
                self.log.push(LogEvent::FinalScore { score });
            }
            RunStatus::Lost => self.log.push(LogEvent::Defeat),
            RunStatus::Ongoing => return,
        }
        info!(?status, score, moves = self.moves_taken, "run finished");
        self.persist_ledger();
    }

    fn persist_ledger(&self) {
        let Some(path) = self.score_path.as_deref() else {
            return;
        };
        if let Err(err) = self.ledger.save(path) {
            warn!(path = %path.display(), error = %err, "failed to save score store");
        }
    }
}
