//! Deterministic RNG wrapper for the control core.
//!
//! # Determinism strategy
//!
//! The supervisory loop is otherwise fully deterministic given its input
//! streams; the only place randomness is allowed is test-mode synthetic
//! brain simulation and reproducible test fixtures. `ControlRng` wraps
//! `SmallRng`, but there is only ever one instance per loop (no per-agent
//! mixing is needed — the control core has no agent population to spread
//! seeds over).

use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

/// Seeded RNG for test-mode brain simulation and reproducible fixtures.
pub struct ControlRng(SmallRng);

impl ControlRng {
    pub fn new(seed: u64) -> Self {
        ControlRng(SmallRng::seed_from_u64(seed))
    }

    #[inline]
    pub fn inner(&mut self) -> &mut SmallRng {
        &mut self.0
    }

    /// Generate a value uniformly in `range`.
    #[inline]
    pub fn gen_range<T, R>(&mut self, range: R) -> T
    where
        T: rand::distributions::uniform::SampleUniform,
        R: rand::distributions::uniform::SampleRange<T>,
    {
        self.0.gen_range(range)
    }

    /// `true` with probability `p` (clamped to [0, 1]).
    #[inline]
    pub fn gen_bool(&mut self, p: f64) -> bool {
        self.0.gen_bool(p.clamp(0.0, 1.0))
    }
}
