use std::path::PathBuf;

use serde::Deserialize;

pub const DEFAULT_DIFFICULTY: i32 = 3;
pub const MAX_DIFFICULTY: i32 = 10;

/// Construction parameters for a run. Missing fields fall back to [`EngineConfig::default`].
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    pub difficulty: i32,
    pub seed: Option<u64>,
    pub score_path: Option<PathBuf>,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self { difficulty: DEFAULT_DIFFICULTY, seed: None, score_path: None }
    }
}

impl EngineConfig {
    pub fn clamped_difficulty(&self) -> u32 {
        self.difficulty.clamp(0, MAX_DIFFICULTY) as u32
    }
}
