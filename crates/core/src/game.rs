use std::path::PathBuf;

use rand_chacha::ChaCha8Rng;
use rand_chacha::rand_core::SeedableRng;
use tracing::debug;

use crate::cell::apply_effect;
use crate::config::EngineConfig;
use crate::ledger::ScoreLedger;
use crate::mapgen::generate_level;
use crate::seed::{clock_seed, coin_flip};
use crate::state::{Grid, Player};
use crate::types::*;

mod hash;
mod movement;
mod progression;
mod render;
mod snapshot;
mod threat;

#[cfg(test)]
mod test_support;

/// One run of the dungeon: grid, player, counters, and the narration log.
///
/// The engine owns its generator, so every random draw (generation and ranged rolls) is
/// reproducible from [`Engine::seed`].
pub struct Engine {
    seed: u64,
    rng: ChaCha8Rng,
    grid: Grid,
    player: Player,
    steps_remaining: u32,
    moves_taken: u64,
    level: u8,
    difficulty: u32,
    status: RunStatus,
    log: Vec<LogEvent>,
    ledger: ScoreLedger,
    score_path: Option<PathBuf>,
}

impl Engine {
    /// Starts a run with an in-memory ledger. Difficulty is clamped to `[0, 10]`.
    pub fn new(difficulty: i32, seed: Option<u64>) -> Self {
        Self::from_config(EngineConfig { difficulty, seed, score_path: None })
    }

    pub fn from_config(config: EngineConfig) -> Self {
        let difficulty = config.clamped_difficulty();
        let seed = config.seed.unwrap_or_else(clock_seed);
        let ledger = config
            .score_path
            .as_deref()
            .map_or_else(ScoreLedger::new, ScoreLedger::load_or_default);
        debug!(seed, difficulty, "starting run");

        let mut engine = Self {
            seed,
            rng: ChaCha8Rng::seed_from_u64(seed),
            grid: Grid::walled(),
            player: Player::new(PLAYER_START),
            steps_remaining: STARTING_STEPS,
            moves_taken: 0,
            level: STARTING_LEVEL,
            difficulty,
            status: RunStatus::Ongoing,
            log: Vec::new(),
            ledger,
            score_path: config.score_path,
        };
        engine.load_level();
        engine.log.push(LogEvent::GameStarted { difficulty });
        engine
    }

    /// Replaces the grid with a freshly generated one and puts the player on the start tile.
    fn load_level(&mut self) {
        let generated = generate_level(self.level, self.difficulty, &mut self.rng);
        self.grid = generated.grid;
        self.player.set_position(generated.player_start);
        self.log.push(LogEvent::LevelGenerated { level: self.level });
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn grid_size(&self) -> usize {
        self.grid.size()
    }

    pub fn player(&self) -> &Player {
        &self.player
    }

    pub fn steps_remaining(&self) -> u32 {
        self.steps_remaining
    }

    pub fn moves_taken(&self) -> u64 {
        self.moves_taken
    }

    pub fn level(&self) -> u8 {
        self.level
    }

    pub fn difficulty(&self) -> u32 {
        self.difficulty
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    pub fn status(&self) -> RunStatus {
        self.status
    }

    /// True once the run has been won or lost.
    pub fn is_over(&self) -> bool {
        self.status.is_terminal()
    }

    pub fn is_won(&self) -> bool {
        self.status == RunStatus::Won
    }

    pub fn events(&self) -> &[LogEvent] {
        &self.log
    }

    pub fn event_log(&self) -> Vec<String> {
        self.log.iter().map(ToString::to_string).collect()
    }

    pub fn clear_event_log(&mut self) {
        self.log.clear();
    }

    pub fn ledger(&self) -> &ScoreLedger {
        &self.ledger
    }

    pub fn top_five(&self) -> Vec<String> {
        self.ledger.top_five()
    }
}
