//! Top-five score ledger and its on-disk store.
//!
//! This module exists to keep completed-run scores ordered and bounded, and to move that list
//! to and from a JSON file. It does not decide when a run is finished; the engine calls
//! [`ScoreLedger::record`] on victory.
//!
//! The store is a pretty-printed JSON document written through a `.json.tmp` sibling and a
//! rename, so a crash mid-write leaves the previous list intact.

use std::fs;
use std::io;
use std::path::Path;

use chrono::{Local, NaiveDate};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, warn};

pub const LEDGER_CAPACITY: usize = 5;
pub const SCORE_FILE_VERSION: u32 = 1;

#[derive(Debug, Error)]
pub enum ScoreFileError {
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Unsupported score store version: expected {expected}, found {found}")]
    UnsupportedVersion { expected: u32, found: u32 },
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoreEntry {
    pub score: u32,
    pub date: NaiveDate,
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ScoreLedger {
    entries: Vec<ScoreEntry>,
}

impl ScoreLedger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a ledger from arbitrary entries, enforcing ordering and capacity.
    pub fn from_entries(entries: impl IntoIterator<Item = ScoreEntry>) -> Self {
        let mut ledger = Self::new();
        for entry in entries {
            ledger.record_on(entry.score, entry.date);
        }
        ledger
    }

    /// Records a score dated today. Returns whether it was inserted at all.
    pub fn record(&mut self, score: u32) -> bool {
        self.record_on(score, Local::now().date_naive())
    }

    pub fn record_on(&mut self, score: u32, date: NaiveDate) -> bool {
        if score == 0 {
            return false;
        }
        self.entries.push(ScoreEntry { score, date });
        // Stable: equal scores keep insertion order.
        self.entries.sort_by(|a, b| b.score.cmp(&a.score));
        self.entries.truncate(LEDGER_CAPACITY);
        true
    }

    pub fn entries(&self) -> &[ScoreEntry] {
        &self.entries
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn top_five(&self) -> Vec<String> {
        self.entries
            .iter()
            .enumerate()
            .map(|(rank, entry)| format!("#{}: {} points ({})", rank + 1, entry.score, entry.date))
            .collect()
    }

    /// Missing or unreadable stores yield an empty ledger.
    pub fn load_or_default(path: &Path) -> Self {
        match ScoreFile::load(path) {
            Ok(file) => Self::from_entries(file.entries),
            Err(ScoreFileError::Io(err)) if err.kind() == io::ErrorKind::NotFound => {
                debug!(path = %path.display(), "no score store yet");
                Self::new()
            }
            Err(err) => {
                warn!(path = %path.display(), error = %err, "unreadable score store, starting empty");
                Self::new()
            }
        }
    }

    pub fn save(&self, path: &Path) -> Result<(), ScoreFileError> {
        ScoreFile::from_ledger(self).write_atomic(path)
    }
}

/// Persisted shape of the ledger.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoreFile {
    pub format_version: u32,
    pub entries: Vec<ScoreEntry>,
}

impl ScoreFile {
    pub fn from_ledger(ledger: &ScoreLedger) -> Self {
        Self { format_version: SCORE_FILE_VERSION, entries: ledger.entries.clone() }
    }

    pub fn write_atomic(&self, path: &Path) -> Result<(), ScoreFileError> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }

        let tmp_path = path.with_extension("json.tmp");
        let json = serde_json::to_string_pretty(self)?;

        fs::write(&tmp_path, json)?;
        fs::rename(&tmp_path, path)?;

        Ok(())
    }

    pub fn load(path: &Path) -> Result<Self, ScoreFileError> {
        let content = fs::read_to_string(path)?;
        let file: Self = serde_json::from_str(&content)?;
        if file.format_version != SCORE_FILE_VERSION {
            return Err(ScoreFileError::UnsupportedVersion {
                expected: SCORE_FILE_VERSION,
                found: file.format_version,
            });
        }
        Ok(file)
    }
}
