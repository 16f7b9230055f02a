//! GA configuration.
//!
//! [`GaConfig`] holds all parameters that control the evolutionary loop.

use super::operators::{Crossover, Mutation};
use super::selection::{Cdf, Selection, DEFAULT_RANK_PRESSURE};
use crate::error::{Result, SearchError};
use crate::params::AlgorithmParams;
use crate::solution::SolutionKind;

/// Which pool the survivors are selected from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Replacement {
    /// (µ, λ): survivors come from the offspring only.
    #[default]
    Comma,
    /// (µ + λ): survivors come from offspring and current population.
    Plus,
}

/// Configuration for the Genetic Algorithm.
///
/// # Defaults
///
/// ```
/// use u_metabench::ga::GaConfig;
///
/// let config = GaConfig::default();
/// assert_eq!(config.mu, 5);
/// assert_eq!(config.lambda, 10);
/// ```
///
/// # Builder Pattern
///
/// ```
/// use u_metabench::ga::{Cdf, GaConfig, Replacement, Selection};
///
/// let config = GaConfig::default()
///     .with_mu(10)
///     .with_lambda(40)
///     .with_selection(Selection::Roulette(Cdf::Rank { pressure: 1.8 }))
///     .with_replacement(Replacement::Plus)
///     .with_mutation_rate(0.2);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GaConfig {
    /// Population size µ.
    pub mu: usize,

    /// Offspring per generation λ.
    pub lambda: usize,

    /// Probability `pc` of recombining a pair of parents (0.0–1.0).
    ///
    /// When crossover is not applied, the children are the parent clones.
    pub crossover_rate: f64,

    /// Probability `pm` of mutating a child (0.0–1.0).
    ///
    /// Drawn independently for each child, so the two children of a pair
    /// may differ in whether they are mutated.
    pub mutation_rate: f64,

    pub crossover: Crossover,

    pub mutation: Mutation,

    /// Survivor selection.
    pub selection: Selection,

    pub replacement: Replacement,

    /// Random seed for reproducibility.
    ///
    /// `None` uses a random seed.
    pub seed: Option<u64>,
}

impl Default for GaConfig {
    fn default() -> Self {
        Self::mu_comma_lambda()
    }
}

impl GaConfig {
    /// (µ, λ) GA: µ = 5, λ = 10, pc = pm = 0.5, one-point crossover,
    /// bit-flip mutation, random survivors.
    pub fn mu_comma_lambda() -> Self {
        Self {
            mu: 5,
            lambda: 10,
            crossover_rate: 0.5,
            mutation_rate: 0.5,
            crossover: Crossover::OnePoint,
            mutation: Mutation::BitFlip,
            selection: Selection::Random,
            replacement: Replacement::Comma,
            seed: None,
        }
    }

    /// RandomGA: always recombine, always mutate, keep the µ best offspring.
    pub fn random_ga() -> Self {
        Self {
            crossover_rate: 1.0,
            mutation_rate: 1.0,
            selection: Selection::Best,
            ..Self::mu_comma_lambda()
        }
    }

    /// Uniform crossover and uniform mutation.
    pub fn uniform() -> Self {
        Self {
            crossover: Crossover::Uniform,
            mutation: Mutation::Uniform,
            ..Self::mu_comma_lambda()
        }
    }

    /// Fitness-proportionate survivors drawn from offspring and parents.
    pub fn roulette() -> Self {
        Self {
            selection: Selection::Roulette(Cdf::Fitness),
            replacement: Replacement::Plus,
            ..Self::mu_comma_lambda()
        }
    }

    /// Order crossover and swap mutation for permutation problems.
    pub fn permutation() -> Self {
        Self {
            crossover: Crossover::Order,
            mutation: Mutation::Swap,
            ..Self::mu_comma_lambda()
        }
    }

    /// Default configuration overridden by the keys present in `params`.
    pub fn from_params(params: &AlgorithmParams) -> Result<Self> {
        Self::default().with_params(params)
    }

    /// Overrides fields from `mu`, `lambda`, `pc`, `pm`, `xover`,
    /// `mutation`, `selection_population`, `k`, `cdf`, `S`, `replacement`
    /// and `seed`.
    ///
    /// A tournament selected without `k` uses `k = µ`.
    pub fn with_params(mut self, params: &AlgorithmParams) -> Result<Self> {
        if let Some(mu) = params.count("mu")? {
            self.mu = mu;
        }
        if let Some(lambda) = params.count("lambda")? {
            self.lambda = lambda;
        }
        if let Some(pc) = params.number("pc")? {
            self = self.with_crossover_rate(pc);
        }
        if let Some(pm) = params.number("pm")? {
            self = self.with_mutation_rate(pm);
        }
        if let Some(name) = params.text("xover")? {
            self.crossover = match name {
                "onepoint" => Crossover::OnePoint,
                "uniform" => Crossover::Uniform,
                "order" | "ox" => Crossover::Order,
                other => {
                    return Err(SearchError::config(format!(
                        "unknown crossover '{other}' (onepoint, uniform, order)"
                    )))
                }
            };
        }
        if let Some(name) = params.text("mutation")? {
            self.mutation = match name {
                "bitflip" => Mutation::BitFlip,
                "uniform" => Mutation::Uniform,
                "swap" => Mutation::Swap,
                other => {
                    return Err(SearchError::config(format!(
                        "unknown mutation '{other}' (bitflip, uniform, swap)"
                    )))
                }
            };
        }

        let k = params.count("k")?;
        let pressure = params.number("S")?;
        let cdf = match params.text("cdf")? {
            None => None,
            Some("fitness") => Some(Cdf::Fitness),
            Some("rank") => Some(Cdf::Rank {
                pressure: pressure.unwrap_or(DEFAULT_RANK_PRESSURE),
            }),
            Some(other) => {
                return Err(SearchError::config(format!(
                    "unknown cdf '{other}' (fitness, rank)"
                )))
            }
        };
        if let Some(name) = params.text("selection_population")? {
            self.selection = match name {
                "random" | "aleatoire" => Selection::Random,
                "best" | "deterministe" => Selection::Best,
                "roulette" => Selection::Roulette(cdf.unwrap_or_default()),
                "tournament" | "tournoi" => Selection::Tournament {
                    k: k.unwrap_or(self.mu),
                },
                other => {
                    return Err(SearchError::config(format!(
                        "unknown selection '{other}' (random, best, roulette, tournament)"
                    )))
                }
            };
        }
        match &mut self.selection {
            Selection::Tournament { k: current } => {
                if let Some(k) = k {
                    *current = k;
                }
            }
            Selection::Roulette(current) => {
                if let Some(cdf) = cdf {
                    *current = cdf;
                }
                if let (Cdf::Rank { pressure: current }, Some(s)) = (current, pressure) {
                    *current = s;
                }
            }
            Selection::Random | Selection::Best => {}
        }

        if let Some(name) = params.text("replacement")? {
            self.replacement = match name {
                "comma" => Replacement::Comma,
                "plus" => Replacement::Plus,
                other => {
                    return Err(SearchError::config(format!(
                        "unknown replacement '{other}' (comma, plus)"
                    )))
                }
            };
        }
        if let Some(seed) = params.seed()? {
            self.seed = Some(seed);
        }
        Ok(self)
    }

    pub fn with_mu(mut self, mu: usize) -> Self {
        self.mu = mu;
        self
    }

    pub fn with_lambda(mut self, lambda: usize) -> Self {
        self.lambda = lambda;
        self
    }

    /// Sets the crossover rate.
    pub fn with_crossover_rate(mut self, rate: f64) -> Self {
        self.crossover_rate = rate.clamp(0.0, 1.0);
        self
    }

    /// Sets the mutation rate.
    pub fn with_mutation_rate(mut self, rate: f64) -> Self {
        self.mutation_rate = rate.clamp(0.0, 1.0);
        self
    }

    pub fn with_crossover(mut self, crossover: Crossover) -> Self {
        self.crossover = crossover;
        self
    }

    pub fn with_mutation(mut self, mutation: Mutation) -> Self {
        self.mutation = mutation;
        self
    }

    /// Sets the survivor selection strategy.
    pub fn with_selection(mut self, selection: Selection) -> Self {
        self.selection = selection;
        self
    }

    pub fn with_replacement(mut self, replacement: Replacement) -> Self {
        self.replacement = replacement;
        self
    }

    /// Sets the random seed for reproducibility.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Size of the pool survivors are selected from.
    pub fn pool_size(&self) -> usize {
        match self.replacement {
            Replacement::Comma => self.lambda,
            Replacement::Plus => self.lambda + self.mu,
        }
    }

    /// Display name, e.g. `"(5,10)-GA/tournament"`.
    pub fn name(&self) -> String {
        let sep = match self.replacement {
            Replacement::Comma => ',',
            Replacement::Plus => '+',
        };
        format!(
            "({}{}{})-GA/{}",
            self.mu,
            sep,
            self.lambda,
            self.selection.name()
        )
    }

    /// Validates the configuration independently of any problem.
    pub fn validate(&self) -> Result<()> {
        if self.mu == 0 {
            return Err(SearchError::config("mu must be at least 1"));
        }
        if self.lambda == 0 {
            return Err(SearchError::config("lambda must be at least 1"));
        }
        for (name, rate) in [("pc", self.crossover_rate), ("pm", self.mutation_rate)] {
            if !(0.0..=1.0).contains(&rate) {
                return Err(SearchError::config(format!(
                    "{name} must be in [0, 1], got {rate}"
                )));
            }
        }
        if self.crossover.kind() != self.mutation.kind() {
            return Err(SearchError::config(format!(
                "{:?} crossover works on {} solutions but {:?} mutation on {}",
                self.crossover,
                self.crossover.kind(),
                self.mutation,
                self.mutation.kind()
            )));
        }
        self.selection.validate()?;
        let pool = self.pool_size();
        match self.selection {
            Selection::Tournament { k } if k > pool => Err(SearchError::config(format!(
                "tournament size {k} exceeds the selection pool of {pool}"
            ))),
            Selection::Best if pool < self.mu => Err(SearchError::config(format!(
                "best selection needs at least mu={} candidates, pool has {pool}",
                self.mu
            ))),
            _ => Ok(()),
        }
    }

    /// [`validate`](Self::validate) plus operator/encoding compatibility.
    pub fn validate_for(&self, kind: SolutionKind) -> Result<()> {
        self.validate()?;
        if self.crossover.kind() != kind {
            return Err(SearchError::TypeMismatch {
                expected: self.crossover.kind(),
                found: kind,
            });
        }
        Ok(())
    }
}
