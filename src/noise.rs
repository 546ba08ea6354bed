//! Perturbation sources for the rule scorers
//!
//! Rule scorers add a small random perturbation to every score. The source is
//! passed in per call so production draws from a uniform generator while
//! tests pin it to a constant.

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

/// Half-width of the production perturbation interval
pub const DEFAULT_NOISE_AMPLITUDE: f64 = 0.1;

/// Supplies the perturbation added to a rule score
pub trait NoiseSource {
    fn perturbation(&mut self) -> f64;
}

/// Uniform perturbation in `[-amplitude, amplitude]`
#[derive(Debug, Clone)]
pub struct UniformNoise<R> {
    rng: R,
    amplitude: f64,
}

impl<R: Rng> UniformNoise<R> {
    pub fn new(rng: R, amplitude: f64) -> Self {
        Self {
            rng,
            amplitude: amplitude.abs(),
        }
    }
}

impl UniformNoise<ChaCha8Rng> {
    /// Reproducible source for a given seed
    pub fn seeded(seed: u64, amplitude: f64) -> Self {
        Self::new(ChaCha8Rng::seed_from_u64(seed), amplitude)
    }

    /// Source seeded from OS entropy
    pub fn from_entropy(amplitude: f64) -> Self {
        Self::new(ChaCha8Rng::from_entropy(), amplitude)
    }

    /// Source for the request at position `sequence` in the input.
    ///
    /// With a base seed the request uses `seed + sequence`, so replaying the
    /// same input gives the same perturbations regardless of scheduling.
    pub fn for_request(seed: Option<u64>, sequence: u64, amplitude: f64) -> Self {
        match seed {
            Some(seed) => Self::seeded(seed.wrapping_add(sequence), amplitude),
            None => Self::from_entropy(amplitude),
        }
    }
}

impl<R: Rng> NoiseSource for UniformNoise<R> {
    fn perturbation(&mut self) -> f64 {
        if self.amplitude == 0.0 {
            return 0.0;
        }
        self.rng.gen_range(-self.amplitude..=self.amplitude)
    }
}

/// Constant perturbation, mostly for tests and deterministic replays
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct FixedNoise(pub f64);

impl NoiseSource for FixedNoise {
    fn perturbation(&mut self) -> f64 {
        self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_uniform_noise_stays_in_bounds() {
        let mut noise = UniformNoise::seeded(3, DEFAULT_NOISE_AMPLITUDE);
        for _ in 0..10_000 {
            let p = noise.perturbation();
            assert!((-0.1..=0.1).contains(&p), "perturbation {p} out of range");
        }
    }

    #[test]
    fn test_seeded_noise_is_reproducible() {
        let mut a = UniformNoise::seeded(99, 0.1);
        let mut b = UniformNoise::seeded(99, 0.1);
        for _ in 0..100 {
            assert_eq!(a.perturbation(), b.perturbation());
        }
    }

    #[test]
    fn test_request_noise_follows_sequence() {
        let first = |seed, seq| UniformNoise::for_request(Some(seed), seq, 0.1).perturbation();

        assert_eq!(first(42, 7), first(42, 7));
        assert_ne!(first(42, 7), first(42, 8));
        // Offsets are additive: request 1 of seed 41 is request 0 of seed 42
        assert_eq!(first(41, 1), first(42, 0));
        assert_eq!(first(u64::MAX, 1), first(0, 0));

        let unseeded = UniformNoise::for_request(None, 0, 0.1).perturbation();
        assert!((-0.1..=0.1).contains(&unseeded));
    }

    #[test]
    fn test_zero_amplitude_and_fixed() {
        let mut silent = UniformNoise::seeded(1, 0.0);
        assert_eq!(silent.perturbation(), 0.0);

        let mut fixed = FixedNoise(-0.05);
        assert_eq!(fixed.perturbation(), -0.05);
        assert_eq!(fixed.perturbation(), -0.05);
    }
}
