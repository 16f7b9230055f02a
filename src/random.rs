//! Random number generation helpers.
//!
//! Every stochastic operation in the crate receives its generator
//! explicitly. Algorithms own one [`SearchRng`], created from the
//! configured seed or from entropy when no seed is given.

use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};

/// Generator type owned by each algorithm instance.
pub type SearchRng = StdRng;

/// Creates a deterministic generator from a seed.
pub fn create_rng(seed: u64) -> SearchRng {
    StdRng::seed_from_u64(seed)
}

/// Creates a generator from an optional seed, falling back to entropy.
pub fn rng_from_seed(seed: Option<u64>) -> SearchRng {
    match seed {
        Some(seed) => create_rng(seed),
        None => create_rng(rand::random()),
    }
}

/// Shuffles a slice in place (Fisher-Yates).
pub fn shuffle<T, R: Rng + ?Sized>(items: &mut [T], rng: &mut R) {
    items.shuffle(rng);
}

/// Returns `true` with probability `p` (clamped to `[0, 1]`).
pub fn chance<R: Rng + ?Sized>(p: f64, rng: &mut R) -> bool {
    if p <= 0.0 {
        false
    } else if p >= 1.0 {
        true
    } else {
        rng.random::<f64>() < p
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_same_seed_same_stream() {
        let mut a = create_rng(7);
        let mut b = create_rng(7);
        for _ in 0..10 {
            assert_eq!(a.random::<u64>(), b.random::<u64>());
        }
    }

    #[test]
    fn test_shuffle_keeps_elements() {
        let mut rng = create_rng(3);
        let mut items: Vec<usize> = (0..20).collect();
        shuffle(&mut items, &mut rng);
        let mut sorted = items.clone();
        sorted.sort_unstable();
        assert_eq!(sorted, (0..20).collect::<Vec<_>>());
    }

    #[test]
    fn test_chance_extremes() {
        let mut rng = create_rng(1);
        assert!((0..100).all(|_| !chance(0.0, &mut rng)));
        assert!((0..100).all(|_| chance(1.0, &mut rng)));
    }
}
