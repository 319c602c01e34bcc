//! Seed mixing and the small set of draws the engine takes from its generator.

use std::time::{SystemTime, UNIX_EPOCH};

use rand_chacha::ChaCha8Rng;
use rand_chacha::rand_core::Rng;

/// Uniform index in `0..len`. `len` must be non-zero.
pub(crate) fn random_index(rng: &mut ChaCha8Rng, len: usize) -> usize {
    debug_assert!(len > 0);
    (rng.next_u64() % len as u64) as usize
}

/// Fair coin: one draw per call.
pub(crate) fn coin_flip(rng: &mut ChaCha8Rng) -> bool {
    rng.next_u32() & 1 == 0
}

pub fn mix_seed_stream(seed: u64, stream: u64) -> u64 {
    let mut mixed = seed ^ stream.wrapping_mul(0xD6E8_FD9A_5B89_7A4D);
    mixed ^= mixed >> 33;
    mixed = mixed.wrapping_mul(0xFF51_AFD7_ED55_8CCD);
    mixed ^= mixed >> 33;
    mixed = mixed.wrapping_mul(0xC4CE_B9FE_1A85_EC53);
    mixed ^ (mixed >> 33)
}

/// Seed for runs constructed without one.
pub(crate) fn clock_seed() -> u64 {
    let nanos = SystemTime::now().duration_since(UNIX_EPOCH).map(|d| d.as_nanos()).unwrap_or(0);
    mix_seed_stream(nanos as u64, (nanos >> 64) as u64)
}

/// Generator state after a restore: derived from the run seed and how far the run got.
pub(crate) fn resume_seed(run_seed: u64, moves_taken: u64) -> u64 {
    mix_seed_stream(run_seed, moves_taken.wrapping_add(1))
}

#[cfg(test)]
mod tests {
    use rand_chacha::rand_core::SeedableRng;

    use super::*;

    #[test]
    fn random_index_stays_inside_requested_bounds() {
        let mut rng = ChaCha8Rng::seed_from_u64(12_345);
        for len in 1..100 {
            assert!(random_index(&mut rng, len) < len);
        }
    }

    #[test]
    fn coin_flip_is_roughly_fair() {
        let mut rng = ChaCha8Rng::seed_from_u64(7);
        let heads = (0..2_000).filter(|_| coin_flip(&mut rng)).count();
        assert!((850..=1_150).contains(&heads), "heads = {heads}");
    }

    #[test]
    fn resume_seed_changes_when_inputs_change() {
        let baseline = resume_seed(99, 2);
        assert_ne!(baseline, resume_seed(98, 2));
        assert_ne!(baseline, resume_seed(99, 3));
        assert_eq!(baseline, resume_seed(99, 2));
    }
}
