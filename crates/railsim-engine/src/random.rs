//! Seeded dwell-time randomness.

use std::ops::Range;

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use railsim_core::{DrawKey, RandomSource};

/// Deterministic [`RandomSource`] backed by ChaCha8.
///
/// Every draw reseeds from `seed` mixed with the draw key, so the value a
/// train gets depends only on `(seed, tick, train)` and not on which
/// worker performs the draw or in which order.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ChaChaSource {
    seed: u64,
}

impl ChaChaSource {
    /// Source for the given seed.
    pub fn new(seed: u64) -> Self {
        Self { seed }
    }

    /// The configured seed.
    pub fn seed(&self) -> u64 {
        self.seed
    }
}

fn mix(key: DrawKey) -> u64 {
    key.tick.0.wrapping_mul(0x9E37_79B9_7F4A_7C15) ^ key.train.packed().wrapping_mul(0xC2B2_AE3D_27D4_EB4F)
}

impl RandomSource for ChaChaSource {
    fn uniform(&self, key: DrawKey, range: Range<u32>) -> u32 {
        if range.is_empty() {
            return range.start;
        }
        let mut rng = ChaCha8Rng::seed_from_u64(self.seed ^ mix(key));
        rng.random_range(range)
    }
}
