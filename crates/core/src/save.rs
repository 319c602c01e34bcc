//! Save file format: versioned header, SHA-256 checksum, and the engine snapshot.

use std::fs;
use std::io;
use std::path::Path;
use std::time::{SystemTime, UNIX_EPOCH};

use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use thiserror::Error;

use crate::config::MAX_DIFFICULTY;
use crate::state::{Grid, Player};
use crate::types::{DIFFICULTY_STEP, FINAL_LEVEL, RunStatus, STARTING_LEVEL, STARTING_STEPS};

pub const SAVE_VERSION: u32 = 1;

/// Highest difficulty a run can reach: the clamp ceiling plus one step per advance.
const MAX_REACHABLE_DIFFICULTY: u32 =
    MAX_DIFFICULTY as u32 + DIFFICULTY_STEP * (FINAL_LEVEL - STARTING_LEVEL) as u32;

#[derive(Debug, Error)]
pub enum SaveError {
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Invalid save file header")]
    InvalidHeader,

    #[error("Incompatible save version: expected {expected}, found {found}")]
    IncompatibleVersion { expected: u32, found: u32 },

    #[error("Save file checksum mismatch")]
    ChecksumMismatch,

    #[error("Save file corrupted: {0}")]
    Corrupted(String),
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SaveHeader {
    pub magic: String,
    pub format_version: u32,
    pub saved_at_unix_secs: u64,
}

impl SaveHeader {
    const MAGIC: &'static str = "MDSV";

    pub fn new() -> Self {
        Self {
            magic: Self::MAGIC.to_string(),
            format_version: SAVE_VERSION,
            saved_at_unix_secs: SystemTime::now()
                .duration_since(UNIX_EPOCH)
                .map(|d| d.as_secs())
                .unwrap_or(0),
        }
    }

    pub fn validate(&self) -> Result<(), SaveError> {
        if self.magic != Self::MAGIC {
            return Err(SaveError::InvalidHeader);
        }
        if self.format_version != SAVE_VERSION {
            return Err(SaveError::IncompatibleVersion {
                expected: SAVE_VERSION,
                found: self.format_version,
            });
        }
        Ok(())
    }
}

impl Default for SaveHeader {
    fn default() -> Self {
        Self::new()
    }
}

/// Everything needed to resume a run. The event log and generator state are not part of it.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct EngineSnapshot {
    pub seed: u64,
    pub grid: Grid,
    pub player: Player,
    pub level: u8,
    pub difficulty: u32,
    pub steps_remaining: u32,
    pub moves_taken: u64,
    pub status: RunStatus,
}

impl EngineSnapshot {
    /// Rejects snapshots no engine could have produced.
    pub fn validate(&self) -> Result<(), SaveError> {
        if !self.grid.is_well_formed() {
            return Err(SaveError::Corrupted("grid is not 12x12".to_string()));
        }
        let pos = self.player.pos();
        if !pos.is_interior() {
            return Err(SaveError::Corrupted(format!("player outside interior at {pos:?}")));
        }
        if self.grid.kind_at(pos).blocks_movement() {
            return Err(SaveError::Corrupted(format!("player inside a wall at {pos:?}")));
        }
        if !self.player.has_valid_health() {
            return Err(SaveError::Corrupted(format!("health {}", self.player.health())));
        }
        if !(STARTING_LEVEL..=FINAL_LEVEL).contains(&self.level) {
            return Err(SaveError::Corrupted(format!("level {}", self.level)));
        }
        if self.steps_remaining > STARTING_STEPS {
            return Err(SaveError::Corrupted(format!("steps {}", self.steps_remaining)));
        }
        // Every accepted move spends exactly one step.
        if self.moves_taken > u64::from(STARTING_STEPS - self.steps_remaining) {
            return Err(SaveError::Corrupted(format!(
                "{} moves taken with {} steps left",
                self.moves_taken, self.steps_remaining
            )));
        }
        if self.difficulty > MAX_REACHABLE_DIFFICULTY {
            return Err(SaveError::Corrupted(format!("difficulty {}", self.difficulty)));
        }
        if self.status == RunStatus::Won && self.level != FINAL_LEVEL {
            return Err(SaveError::Corrupted(format!("won on level {}", self.level)));
        }
        Ok(())
    }

    pub fn checksum_hex(&self) -> Result<String, SaveError> {
        let json = serde_json::to_string(self)?;
        let digest = Sha256::digest(json.as_bytes());
        Ok(format!("{digest:064x}"))
    }
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct SaveFile {
    pub header: SaveHeader,
    pub sha256_hex: String,
    pub snapshot: EngineSnapshot,
}

pub fn write_save_file(snapshot: &EngineSnapshot, path: &Path) -> Result<(), SaveError> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }

    let file = SaveFile {
        header: SaveHeader::new(),
        sha256_hex: snapshot.checksum_hex()?,
        snapshot: snapshot.clone(),
    };
    let json = serde_json::to_string_pretty(&file)?;

    let tmp_path = path.with_extension("json.tmp");
    fs::write(&tmp_path, json)?;
    fs::rename(&tmp_path, path)?;
    Ok(())
}

/// Reads and fully validates a save file. The snapshot is returned unrepaired.
pub fn read_save_file(path: &Path) -> Result<EngineSnapshot, SaveError> {
    let content = fs::read_to_string(path)?;
    let file: SaveFile = serde_json::from_str(&content)?;
    file.header.validate()?;
    if file.snapshot.checksum_hex()? != file.sha256_hex {
        return Err(SaveError::ChecksumMismatch);
    }
    file.snapshot.validate()?;
    Ok(file.snapshot)
}
