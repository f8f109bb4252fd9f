//! Injectable uniform random source
//!
//! The projector never reaches for an ambient RNG; it is handed a
//! [`UniformDraw`] capability so tests can seed or force the draws and
//! reproduce exact paths.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Source of uniform draws in [0, 1), one per projected period
pub trait UniformDraw {
    fn next_uniform(&mut self) -> f64;
}

/// Seedable pseudo-random source backed by `StdRng`
///
/// Same seed, same sequence. Critical for reproducing a simulation path when
/// debugging or validating results.
#[derive(Debug, Clone)]
pub struct SeededUniform {
    rng: StdRng,
}

impl SeededUniform {
    /// Create from an explicit seed
    pub fn from_seed(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }

    /// Create from OS entropy (non-reproducible)
    pub fn from_entropy() -> Self {
        Self {
            rng: StdRng::from_entropy(),
        }
    }
}

impl UniformDraw for SeededUniform {
    fn next_uniform(&mut self) -> f64 {
        self.rng.gen::<f64>()
    }
}
