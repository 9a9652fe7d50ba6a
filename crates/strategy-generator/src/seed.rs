//! Deterministic seed management.
//!
//! Every draw in a generation pass goes through a [`SeedSource`], which is
//! passed explicitly to each generation call. Identical seeds and identical
//! call sequences produce bit-identical output.

use rand::rngs::StdRng;
use rand::SeedableRng;

/// Seeded randomness state for a generation pass.
#[derive(Debug, Clone)]
pub struct SeedSource {
    /// Seed the PRNG was (or will be) seeded from
    seed: u64,
    /// Whether the seed was set explicitly or adopted by `refresh_seed`
    fixed: bool,
    /// Whether the seed has been reported to the operator yet
    reported: bool,
    /// Seeded random number generator
    rng: StdRng,
}

impl SeedSource {
    /// Create a source with no fixed seed.
    ///
    /// A provisional seed is drawn from OS entropy; call
    /// [`refresh_seed`](Self::refresh_seed) at the start of a run to adopt
    /// and report it.
    pub fn new() -> Self {
        let seed = rand::random::<u64>();
        Self {
            seed,
            fixed: false,
            reported: false,
            rng: StdRng::seed_from_u64(seed),
        }
    }

    /// Create a source with a fixed seed.
    pub fn from_seed(seed: u64) -> Self {
        Self {
            seed,
            fixed: true,
            reported: false,
            rng: StdRng::seed_from_u64(seed),
        }
    }

    /// Fix the seed and reset the PRNG to its start state.
    pub fn seed(&mut self, seed: u64) {
        self.seed = seed;
        self.fixed = true;
        self.reported = false;
        self.rng = StdRng::seed_from_u64(seed);
    }

    /// Get the current seed.
    pub fn get_seed(&self) -> u64 {
        self.seed
    }

    /// Whether the seed was fixed (explicitly or by a previous refresh).
    pub fn is_fixed(&self) -> bool {
        self.fixed
    }

    /// Reset the PRNG to the start of the current seed's stream.
    ///
    /// If no seed was fixed, fresh entropy is drawn first and adopted as the
    /// run's seed, so later refreshes in the same run replay the same stream.
    /// The seed is logged once so that a failing run can be reproduced.
    pub fn refresh_seed(&mut self) -> u64 {
        if !self.fixed {
            self.seed = rand::random::<u64>();
            self.fixed = true;
        }
        self.rng = StdRng::seed_from_u64(self.seed);

        if !self.reported {
            tracing::info!(seed = self.seed, "Using seed {}", self.seed);
            self.reported = true;
        }

        self.seed
    }

    /// Borrow the seeded random number generator.
    pub fn rng(&mut self) -> &mut StdRng {
        &mut self.rng
    }
}

impl Default for SeedSource {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::Rng;

    fn draw(source: &mut SeedSource, n: usize) -> Vec<i64> {
        (0..n).map(|_| source.rng().gen_range(0..=100)).collect()
    }

    #[test]
    fn test_seed_setting() {
        let mut source = SeedSource::new();
        source.seed(42);
        assert_eq!(source.get_seed(), 42);
        assert!(source.is_fixed());
    }

    #[test]
    fn test_seed_reproducibility() {
        let mut a = SeedSource::from_seed(42);
        let mut b = SeedSource::from_seed(42);
        assert_eq!(draw(&mut a, 10), draw(&mut b, 10));
    }

    #[test]
    fn test_different_seeds_different_values() {
        let mut a = SeedSource::from_seed(42);
        let mut b = SeedSource::from_seed(99);
        assert_ne!(draw(&mut a, 10), draw(&mut b, 10));
    }

    #[test]
    fn test_refresh_replays_fixed_seed() {
        let mut source = SeedSource::from_seed(42);
        let first = draw(&mut source, 5);
        assert_eq!(source.refresh_seed(), 42);
        assert_eq!(draw(&mut source, 5), first);
    }

    #[test]
    fn test_refresh_adopts_fresh_seed_once() {
        let mut source = SeedSource::new();
        assert!(!source.is_fixed());

        let seed = source.refresh_seed();
        assert!(source.is_fixed());
        let first = draw(&mut source, 5);

        // A second refresh in the same run keeps the adopted seed
        assert_eq!(source.refresh_seed(), seed);
        assert_eq!(draw(&mut source, 5), first);
    }
}
