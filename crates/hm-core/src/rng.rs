//! Random number generation for placement
//!
//! Uses a seeded ChaCha RNG so episodes are reproducible from a seed.
//! Each environment owns one instance; nothing here is process-global.

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

use crate::position::Position;

/// Environment random number generator
///
/// Wraps ChaCha8Rng. Reseeding restarts the stream; otherwise the stream
/// continues across resets.
#[derive(Debug, Clone)]
pub struct GameRng {
    rng: ChaCha8Rng,
    seed: u64,
}

impl GameRng {
    /// Create a new RNG with the given seed
    pub fn new(seed: u64) -> Self {
        Self {
            rng: ChaCha8Rng::seed_from_u64(seed),
            seed,
        }
    }

    /// Create a new RNG with a random seed
    pub fn from_entropy() -> Self {
        let seed = rand::random();
        Self::new(seed)
    }

    /// Get the seed the current stream started from
    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Restart the stream from `seed`.
    pub fn reseed(&mut self, seed: u64) {
        *self = Self::new(seed);
    }

    /// Returns 0..n-1
    ///
    /// Returns 0 if n is 0.
    pub fn rn2(&mut self, n: u32) -> u32 {
        if n == 0 {
            return 0;
        }
        self.rng.gen_range(0..n)
    }

    /// Uniform cell over an `size` x `size` grid. `x` is drawn before `y`.
    pub fn random_cell(&mut self, size: i32) -> Position {
        let n = size.max(0) as u32;
        let x = self.rn2(n) as i32;
        let y = self.rn2(n) as i32;
        Position::new(x, y)
    }
}

impl Default for GameRng {
    fn default() -> Self {
        Self::from_entropy()
    }
}
