//! Capture and restore of a run, plus the best-effort save/load entry points.

use std::path::Path;

use tracing::warn;

use super::*;
use crate::save::{EngineSnapshot, SaveError, read_save_file, write_save_file};
use crate::seed::resume_seed;

impl Engine {
    pub fn snapshot(&self) -> EngineSnapshot {
        EngineSnapshot {
            seed: self.seed,
            grid: self.grid.clone(),
            player: self.player.clone(),
            level: self.level,
            difficulty: self.difficulty,
            steps_remaining: self.steps_remaining,
            moves_taken: self.moves_taken,
            status: self.status,
        }
    }

    /// Rebuilds a run from a snapshot. The only repair: whatever sits under the player
    /// becomes `Empty`, unless it is the ladder.
    pub fn restore(
        snapshot: EngineSnapshot,
        score_path: Option<PathBuf>,
    ) -> Result<Self, SaveError> {
        snapshot.validate()?;
        let EngineSnapshot {
            seed,
            mut grid,
            player,
            level,
            difficulty,
            steps_remaining,
            moves_taken,
            status,
        } = snapshot;

        let pos = player.pos();
        if grid.kind_at(pos) != CellKind::Ladder {
            grid.set_kind(pos, CellKind::Empty);
        }

        let ledger =
            score_path.as_deref().map_or_else(ScoreLedger::new, ScoreLedger::load_or_default);
        Ok(Self {
            seed,
            rng: ChaCha8Rng::seed_from_u64(resume_seed(seed, moves_taken)),
            grid,
            player,
            steps_remaining,
            moves_taken,
            level,
            difficulty,
            status,
            log: Vec::new(),
            ledger,
            score_path,
        })
    }

    /// Writes the run to `path`. Failure is narrated, never raised.
    pub fn save_game(&mut self, path: &Path) -> bool {
        match write_save_file(&self.snapshot(), path) {
            Ok(()) => {
                self.log.push(LogEvent::GameSaved);
                true
            }
            Err(err) => {
                warn!(path = %path.display(), error = %err, "failed to save game");
                self.log.push(LogEvent::SaveFailed { reason: err.to_string() });
                false
            }
        }
    }

    /// Reads a run back from `path`; any read, format, or validation failure yields `None`.
    pub fn load_game(path: &Path, score_path: Option<PathBuf>) -> Option<Self> {
        let restored = read_save_file(path).and_then(|snapshot| Self::restore(snapshot, score_path));
        match restored {
            Ok(mut engine) => {
                engine.log.push(LogEvent::GameLoaded);
                Some(engine)
            }
            Err(err) => {
                warn!(path = %path.display(), error = %err, "failed to load game");
                None
            }
        }
    }
}
