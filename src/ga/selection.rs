//! Selection strategies for the GA.
//!
//! The same [`Selection`] type serves two roles: choosing which offspring
//! (or offspring and parents) survive into the next population, and any
//! other "pick n of these" decision a caller needs.
//!
//! # References
//!
//! - Baker (1985), "Adaptive Selection Methods for Genetic Algorithms"
//! - Blickle & Thiele (1996), "A Comparison of Selection Schemes used in
//!   Evolutionary Algorithms"
//! - Goldberg & Deb (1991), "A Comparative Analysis of Selection Schemes
//!   Used in Genetic Algorithms"

use crate::error::{Result, SearchError};
use crate::problem::Direction;
use crate::solution::Solution;
use rand::seq::index;
use rand::Rng;

/// Floor applied to minimized values before inversion.
const FITNESS_EPSILON: f64 = 1e-12;

/// Default linear ranking pressure.
pub const DEFAULT_RANK_PRESSURE: f64 = 2.0;

/// Cumulative distribution used by roulette selection.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Cdf {
    /// Fitness-proportionate.
    ///
    /// Maximizing: weight = value, for finite positive values.
    /// Minimizing: weight = 1 / value, for finite non-negative values
    /// (zero is floored to a tiny epsilon). Other members get weight zero;
    /// when no member has a usable weight the distribution is uniform.
    Fitness,

    /// Linear ranking with selection pressure `S` in `[1, 2]`.
    ///
    /// The best member (rank 0) gets probability `S/n` and the worst
    /// `(2 − S)/n`, linearly in between:
    /// `P(r) = (2 − S)/n + 2(n − 1 − r)(S − 1)/(n(n − 1))`.
    Rank {
        /// `S`: 1 is uniform, 2 gives the worst member nothing.
        pressure: f64,
    },
}

impl Default for Cdf {
    fn default() -> Self {
        Cdf::Fitness
    }
}

impl Cdf {
    /// Selection probability of each member, in pool order.
    pub fn probabilities(&self, pool: &[Solution], direction: Direction) -> Vec<f64> {
        let n = pool.len();
        if n == 0 {
            return Vec::new();
        }
        match *self {
            Cdf::Fitness => {
                let weights: Vec<f64> = pool
                    .iter()
                    .map(|s| fitness_weight(direction.value_of(s), direction))
                    .collect();
                let total: f64 = weights.iter().sum();
                if total > 0.0 && total.is_finite() {
                    weights.into_iter().map(|w| w / total).collect()
                } else {
                    vec![1.0 / n as f64; n]
                }
            }
            Cdf::Rank { pressure } => {
                if n == 1 {
                    return vec![1.0];
                }
                let mut order: Vec<usize> = (0..n).collect();
                order.sort_by(|&a, &b| {
                    direction.best_first(direction.value_of(&pool[a]), direction.value_of(&pool[b]))
                });
                let nf = n as f64;
                let mut probs = vec![0.0; n];
                for (rank, &i) in order.iter().enumerate() {
                    let from_worst = (n - 1 - rank) as f64;
                    probs[i] = (2.0 - pressure) / nf
                        + 2.0 * from_worst * (pressure - 1.0) / (nf * (nf - 1.0));
                }
                probs
            }
        }
    }

    /// Cumulative probabilities in pool order. The last entry is exactly 1.0.
    pub fn compute(&self, pool: &[Solution], direction: Direction) -> Vec<f64> {
        let mut cumulative = self.probabilities(pool, direction);
        let mut acc = 0.0;
        for p in cumulative.iter_mut() {
            acc += *p;
            *p = acc;
        }
        if let Some(last) = cumulative.last_mut() {
            *last = 1.0;
        }
        cumulative
    }

    pub fn validate(&self) -> Result<()> {
        if let Cdf::Rank { pressure } = *self {
            if !(1.0..=2.0).contains(&pressure) {
                return Err(SearchError::config(format!(
                    "rank pressure S must be in [1, 2], got {pressure}"
                )));
            }
        }
        Ok(())
    }
}

fn fitness_weight(value: f64, direction: Direction) -> f64 {
    if !value.is_finite() {
        return 0.0;
    }
    match direction {
        Direction::Maximize if value > 0.0 => value,
        Direction::Minimize if value >= 0.0 => 1.0 / value.max(FITNESS_EPSILON),
        _ => 0.0,
    }
}

/// Index of the bucket `u` falls into.
fn sample_index(cumulative: &[f64], u: f64) -> usize {
    cumulative
        .partition_point(|&c| c <= u)
        .min(cumulative.len() - 1)
}

/// Strategy choosing `n` members of a pool.
///
/// Every strategy returns clones; the pool is never modified.
///
/// # Examples
///
/// ```
/// use u_metabench::ga::{Cdf, Selection};
///
/// let roulette = Selection::Roulette(Cdf::Rank { pressure: 1.5 });
/// let tournament = Selection::Tournament { k: 3 };
/// assert!(roulette.validate().is_ok());
/// assert!(tournament.validate().is_ok());
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Selection {
    /// Uniform draws with replacement.
    Random,

    /// The `n` best members, deterministically.
    Best,

    /// Draws with replacement from a [`Cdf`].
    ///
    /// **Warning**: with [`Cdf::Fitness`] a super-individual quickly takes
    /// over the pool.
    Roulette(Cdf),

    /// `n` rounds; each round draws `k` distinct members and keeps the best.
    ///
    /// Higher `k` = stronger selection pressure. `k` equal to the pool
    /// size always returns the best member.
    ///
    /// # Complexity
    /// O(k) per round
    Tournament { k: usize },
}

impl Default for Selection {
    fn default() -> Self {
        Selection::Random
    }
}

impl Selection {
    /// Selects `n` clones from `pool`.
    ///
    /// # Panics
    /// Panics if `pool` is empty and `n > 0`.
    pub fn select<R: Rng + ?Sized>(
        &self,
        pool: &[Solution],
        n: usize,
        direction: Direction,
        rng: &mut R,
    ) -> Vec<Solution> {
        if n == 0 {
            return Vec::new();
        }
        assert!(!pool.is_empty(), "cannot select from empty population");

        match *self {
            Selection::Random => (0..n)
                .map(|_| pool[rng.random_range(0..pool.len())].clone())
                .collect(),
            Selection::Best => {
                let mut order: Vec<usize> = (0..pool.len()).collect();
                order.sort_by(|&a, &b| {
                    direction.best_first(direction.value_of(&pool[a]), direction.value_of(&pool[b]))
                });
                order.iter().cycle().take(n).map(|&i| pool[i].clone()).collect()
            }
            Selection::Roulette(cdf) => {
                let cumulative = cdf.compute(pool, direction);
                (0..n)
                    .map(|_| pool[sample_index(&cumulative, rng.random::<f64>())].clone())
                    .collect()
            }
            Selection::Tournament { k } => {
                let k = k.clamp(1, pool.len());
                (0..n)
                    .map(|_| {
                        let contestants = index::sample(rng, pool.len(), k);
                        let mut winner = contestants.index(0);
                        for i in contestants.iter().skip(1) {
                            if direction.strictly_better(
                                direction.value_of(&pool[i]),
                                direction.value_of(&pool[winner]),
                            ) {
                                winner = i;
                            }
                        }
                        pool[winner].clone()
                    })
                    .collect()
            }
        }
    }

    /// Validates strategy parameters that do not depend on the pool size.
    pub fn validate(&self) -> Result<()> {
        match self {
            Selection::Roulette(cdf) => cdf.validate(),
            Selection::Tournament { k } if *k == 0 => {
                Err(SearchError::config("tournament size k must be at least 1"))
            }
            _ => Ok(()),
        }
    }

    /// Short name used in variant names.
    pub fn name(&self) -> &'static str {
        match self {
            Selection::Random => "random",
            Selection::Best => "best",
            Selection::Roulette(Cdf::Fitness) => "roulette",
            Selection::Roulette(Cdf::Rank { .. }) => "rank",
            Selection::Tournament { .. } => "tournament",
        }
    }
}
