//! Seeded jitter source for the presets.

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

/// Deterministic random numbers for effect jitter.
pub struct EffectRng {
    rng: ChaCha8Rng,
}

impl EffectRng {
    /// Creates a generator from a seed.
    #[must_use]
    pub fn new(seed: u64) -> Self {
        Self {
            rng: ChaCha8Rng::seed_from_u64(seed),
        }
    }

    /// Restarts the sequence from `seed`.
    pub fn reseed(&mut self, seed: u64) {
        self.rng = ChaCha8Rng::seed_from_u64(seed);
    }

    /// Uniform in `[0, 1)`.
    #[inline]
    pub fn random(&mut self) -> f32 {
        self.rng.gen::<f32>()
    }

    /// Uniform in `[-1, 1)`.
    #[inline]
    pub fn crandom(&mut self) -> f32 {
        2.0 * (self.random() - 0.5)
    }

    /// Uniform integer in `[0, bound)`. `bound` must be non-zero.
    #[inline]
    pub fn below(&mut self, bound: u32) -> u32 {
        self.rng.gen_range(0..bound)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ranges() {
        let mut rng = EffectRng::new(3);
        for _ in 0..1000 {
            let r = rng.random();
            assert!((0.0..1.0).contains(&r));
            let c = rng.crandom();
            assert!((-1.0..1.0).contains(&c));
            assert!(rng.below(8) < 8);
        }
    }

    #[test]
    fn test_reseed_repeats_sequence() {
        let mut rng = EffectRng::new(42);
        let first: Vec<f32> = (0..8).map(|_| rng.random()).collect();
        rng.reseed(42);
        let second: Vec<f32> = (0..8).map(|_| rng.random()).collect();
        assert_eq!(first, second);
    }
}
