//! The run-level deterministic RNG.
//!
//! # Determinism strategy
//!
//! A run owns exactly one `SimRng`, seeded from `RunConfig::seed`, and every
//! stochastic draw goes through it in a fixed order:
//!
//! 1. the arrival count for the tick,
//! 2. go-around draws, one per landing attempt, in fairness order.
//!
//! Nothing else consumes randomness, so the same seed and configuration always
//! produce the same arrival sequence, the same transitions and the same
//! metrics.

use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};
use rand_distr::{Distribution, Poisson};

/// Simulation-level RNG threaded explicitly through a run.
///
/// Used only from the single tick worker; it is deliberately not shared.
pub struct SimRng(SmallRng);

impl SimRng {
    pub fn new(seed: u64) -> Self {
        SimRng(SmallRng::seed_from_u64(seed))
    }

    /// Seed for replication `index` of a sweep rooted at `base_seed`.
    ///
    /// Consecutive seeds keep a sweep reproducible from its base seed alone,
    /// and replication `i` of one λ is directly comparable with replication
    /// `i` of another.
    pub fn replication_seed(base_seed: u64, index: u64) -> u64 {
        base_seed.wrapping_add(index)
    }

    /// `true` with probability `p` (clamped to [0, 1]).
    #[inline]
    pub fn gen_bool(&mut self, p: f64) -> bool {
        self.0.gen_bool(p.clamp(0.0, 1.0))
    }

    /// Draw a count from a prepared Poisson distribution.
    #[inline]
    pub fn poisson(&mut self, dist: &Poisson<f64>) -> u64 {
        dist.sample(&mut self.0) as u64
    }
}
