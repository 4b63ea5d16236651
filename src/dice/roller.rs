//! The shared random source threaded through every battle phase
//!
//! All randomness in a run is drawn from one seedable generator, in
//! deterministic call order, so a fixed seed and fleet reproduce an
//! identical roll sequence.

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

use crate::core::error::Result;
use crate::dice::expr::{DiceExpr, DiceRoll};

/// Random collaborator consumed by the battle phases
///
/// Every roll is consumed exactly once; there are no retries.
pub trait Roller {
    /// Evaluate a dice expression string into (total, explanation)
    fn roll(&mut self, expr: &str) -> Result<DiceRoll>;

    /// Uniform index into a collection of `len` items
    ///
    /// Callers must guarantee `len > 0`.
    fn pick(&mut self, len: usize) -> usize;

    /// Bernoulli trial with the given probability
    fn chance(&mut self, probability: f32) -> bool;
}

/// Production roller backed by a seedable ChaCha generator
pub struct SeededRoller {
    rng: ChaCha8Rng,
}

impl SeededRoller {
    pub fn seed_from_u64(seed: u64) -> Self {
        Self {
            rng: ChaCha8Rng::seed_from_u64(seed),
        }
    }
}

impl Roller for SeededRoller {
    fn roll(&mut self, expr: &str) -> Result<DiceRoll> {
        Ok(DiceExpr::parse(expr)?.roll(&mut self.rng))
    }

    fn pick(&mut self, len: usize) -> usize {
        self.rng.gen_range(0..len)
    }

    fn chance(&mut self, probability: f32) -> bool {
        self.rng.gen::<f32>() < probability
    }
}
