//! Deterministic RNG for scenario generation.
//!
//! The dispatch engine itself never draws random numbers; randomness only
//! enters through generated scenarios.  The same seed always yields the same
//! network, teams, disasters and road events.
//!
//! Independent sub-streams (one for the network, one for teams, …) are
//! derived with [`ScenarioRng::child`] so that changing how many disasters
//! are generated does not reshuffle the network.

use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

/// 64-bit fractional golden-ratio constant for seed mixing.
const MIXING_CONSTANT: u64 = 0x9e37_79b9_7f4a_7c15;

/// Seeded scenario RNG.  Single-threaded use only.
pub struct ScenarioRng(SmallRng);

impl ScenarioRng {
    pub fn new(seed: u64) -> Self {
        ScenarioRng(SmallRng::seed_from_u64(seed))
    }

    /// Derive an independent child stream keyed by `offset`.
    pub fn child(&mut self, offset: u64) -> ScenarioRng {
        let child_seed: u64 = self.0.r#gen::<u64>() ^ offset.wrapping_mul(MIXING_CONSTANT);
        ScenarioRng(SmallRng::seed_from_u64(child_seed))
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

    /// Choose a random element from a slice.  `None` if the slice is empty.
    #[inline]
    pub fn choose<'a, T>(&mut self, slice: &'a [T]) -> Option<&'a T> {
        use rand::seq::SliceRandom;
        slice.choose(&mut self.0)
    }
}
