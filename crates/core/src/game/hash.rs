//! Stable state hashing for deterministic verification.
//! This module exists to keep hashing concerns separate from turn resolution.
//! It does not cover the event log or the ledger.

use std::hash::Hasher;

use super::*;
use xxhash_rust::xxh3::Xxh3;

impl Engine {
    pub fn snapshot_hash(&self) -> u64 {
        let mut hasher = Xxh3::new();
        hasher.write_u64(self.seed);
        hasher.write_u64(self.moves_taken);
        hasher.write_u32(self.steps_remaining);
        hasher.write_u8(self.level);
        hasher.write_u32(self.difficulty);
        hasher.write_u8(match self.status {
            RunStatus::Ongoing => 0,
            RunStatus::Won => 1,
            RunStatus::Lost => 2,
        });
        let pos = self.player.pos();
        hasher.write_i32(pos.x);
        hasher.write_i32(pos.y);
        hasher.write_i32(self.player.health());
        hasher.write_u32(self.player.score());
        for cell in self.grid.cells() {
            hasher.write_u8(cell.kind() as u8);
        }
        hasher.finish()
    }
}
