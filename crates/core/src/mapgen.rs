//! Level generation split into quota tables, the free-list generator, and its report types.

pub mod model;
pub mod progression;

mod generator;

use rand_chacha::ChaCha8Rng;
use tracing::info;

pub use model::{GeneratedLevel, Placement};
pub use progression::is_final_level;

/// Builds a fresh level. All randomness comes from `rng`, so a seeded generator reproduces
/// the same grid.
pub fn generate_level(level: u8, difficulty: u32, rng: &mut ChaCha8Rng) -> GeneratedLevel {
    let generated = generator::generate(level, difficulty, rng);
    info!(
        level,
        difficulty,
        ladder = ?generated.ladder,
        placed = generated.placements.iter().map(|p| p.placed).sum::<usize>(),
        "generated level"
    );
    generated
}
