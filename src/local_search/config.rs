//! Local search configuration.
//!
//! A local search variant is the pairing of a [`NeighborSelection`] (which
//! feasible neighbor to propose) with an [`Acceptance`] rule (whether the
//! proposal replaces the current solution).

use crate::error::{Result, SearchError};
use crate::params::AlgorithmParams;

/// Default probability of a random move in randomized hill climbing.
pub const DEFAULT_ALPHA: f64 = 0.45;
/// Default initial temperature of simulated annealing.
pub const DEFAULT_INITIAL_TEMPERATURE: f64 = 100.0;
/// Default cooling factor of simulated annealing.
pub const DEFAULT_GAMMA: f64 = 0.99;
/// Default tabu list capacity.
pub const DEFAULT_TABU_CAPACITY: usize = 10;

/// How the next candidate is picked among the feasible neighbors.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum NeighborSelection {
    /// Uniformly random neighbor. Only that neighbor is evaluated.
    Random,
    /// Best neighbor after evaluating all of them.
    Best,
    /// First neighbor (in shuffled order) strictly better than the current
    /// solution. Evaluates neighbors until one is found.
    FirstImprovement,
    /// With probability `alpha` a random neighbor, otherwise the best one.
    Randomized {
        /// Probability of a random move, in `[0, 1]`.
        alpha: f64,
    },
    /// Best neighbor that is not in the tabu list.
    BestNonTabu,
}

/// Whether a selected candidate replaces the current solution.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Acceptance {
    /// Every candidate is accepted.
    Always,
    /// Accepted if at least as good as the current solution.
    NotWorse,
    /// Accepted only if strictly better.
    Improving,
    /// Metropolis criterion: accepted if at least as good, otherwise with
    /// probability `exp(-|Δ| / T)`. `T` starts at `initial_temperature` and
    /// is multiplied by `gamma` after every decision.
    Metropolis { initial_temperature: f64, gamma: f64 },
    /// Always accepted; the accepted solution enters a FIFO tabu list of
    /// fixed `capacity`.
    Tabu { capacity: usize },
}

/// Configuration of a [`LocalSearch`](super::LocalSearch) run.
///
/// # Examples
///
/// ```
/// use u_metabench::local_search::{Acceptance, LocalSearchConfig};
///
/// let config = LocalSearchConfig::simulated_annealing()
///     .with_acceptance(Acceptance::Metropolis {
///         initial_temperature: 50.0,
///         gamma: 0.95,
///     })
///     .with_seed(7);
/// assert!(config.validate().is_ok());
/// assert_eq!(config.name(), "SimulatedAnnealing");
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct LocalSearchConfig {
    pub selection: NeighborSelection,
    pub acceptance: Acceptance,
    /// Random seed. `None` seeds from entropy.
    pub seed: Option<u64>,
}

impl Default for LocalSearchConfig {
    fn default() -> Self {
        Self::hill_climbing()
    }
}

impl LocalSearchConfig {
    /// RandomLS: random neighbor, always accepted.
    pub fn random_walk() -> Self {
        Self {
            selection: NeighborSelection::Random,
            acceptance: Acceptance::Always,
            seed: None,
        }
    }

    /// Best neighbor, accepted if not worse.
    pub fn hill_climbing() -> Self {
        Self {
            selection: NeighborSelection::Best,
            acceptance: Acceptance::NotWorse,
            seed: None,
        }
    }

    /// First strictly improving neighbor.
    pub fn first_improvement() -> Self {
        Self {
            selection: NeighborSelection::FirstImprovement,
            acceptance: Acceptance::Improving,
            seed: None,
        }
    }

    /// Random neighbor with probability α = 0.45, best otherwise; always accepted.
    pub fn randomized_hill_climbing() -> Self {
        Self {
            selection: NeighborSelection::Randomized {
                alpha: DEFAULT_ALPHA,
            },
            acceptance: Acceptance::Always,
            seed: None,
        }
    }

    /// Random neighbor under the Metropolis criterion, T0 = 100, γ = 0.99.
    pub fn simulated_annealing() -> Self {
        Self {
            selection: NeighborSelection::Random,
            acceptance: Acceptance::Metropolis {
                initial_temperature: DEFAULT_INITIAL_TEMPERATURE,
                gamma: DEFAULT_GAMMA,
            },
            seed: None,
        }
    }

    /// Best non-tabu neighbor, tabu list of 10.
    pub fn tabu() -> Self {
        Self {
            selection: NeighborSelection::BestNonTabu,
            acceptance: Acceptance::Tabu {
                capacity: DEFAULT_TABU_CAPACITY,
            },
            seed: None,
        }
    }

    pub fn with_selection(mut self, selection: NeighborSelection) -> Self {
        self.selection = selection;
        self
    }

    pub fn with_acceptance(mut self, acceptance: Acceptance) -> Self {
        self.acceptance = acceptance;
        self
    }

    /// Sets α if the selection is [`NeighborSelection::Randomized`].
    pub fn with_alpha(mut self, alpha: f64) -> Self {
        if let NeighborSelection::Randomized { .. } = self.selection {
            self.selection = NeighborSelection::Randomized { alpha };
        }
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Overrides the variant parameters present in `params`: `alpha` for
    /// randomized selection, `T0` and `gamma` for Metropolis acceptance,
    /// `t` for tabu acceptance, and `seed`.
    pub fn with_params(mut self, params: &AlgorithmParams) -> Result<Self> {
        if let Some(alpha) = params.number("alpha")? {
            self = self.with_alpha(alpha);
        }
        let t0 = params.number("T0")?;
        let g = params.number("gamma")?;
        if let Acceptance::Metropolis {
            initial_temperature,
            gamma,
        } = &mut self.acceptance
        {
            if let Some(t0) = t0 {
                *initial_temperature = t0;
            }
            if let Some(g) = g {
                *gamma = g;
            }
        }
        let t = params.count("t")?;
        if let (Acceptance::Tabu { capacity }, Some(t)) = (&mut self.acceptance, t) {
            *capacity = t;
        }
        if let Some(seed) = params.seed()? {
            self.seed = Some(seed);
        }
        Ok(self)
    }

    /// Display name of the variant.
    pub fn name(&self) -> String {
        use Acceptance as A;
        use NeighborSelection as S;
        let name = match (self.selection, self.acceptance) {
            (S::Random, A::Always) => "RandomLS",
            (S::Best, A::NotWorse) => "HillClimbing",
            (S::FirstImprovement, A::Improving) => "FIHillClimbing",
            (S::Randomized { .. }, A::Always) => "RHillClimbing",
            (S::Random, A::Metropolis { .. }) => "SimulatedAnnealing",
            (S::BestNonTabu, A::Tabu { .. }) => "Tabu",
            (s, a) => return format!("LocalSearch({s:?}, {a:?})"),
        };
        name.to_string()
    }

    /// Validates the configuration.
    pub fn validate(&self) -> Result<()> {
        if let NeighborSelection::Randomized { alpha } = self.selection {
            if !(0.0..=1.0).contains(&alpha) {
                return Err(SearchError::config(format!(
                    "alpha must be in [0, 1], got {alpha}"
                )));
            }
        }
        match self.acceptance {
            Acceptance::Metropolis {
                initial_temperature,
                gamma,
            } => {
                if initial_temperature <= 0.0 || !initial_temperature.is_finite() {
                    return Err(SearchError::config(format!(
                        "initial temperature must be positive, got {initial_temperature}"
                    )));
                }
                if gamma <= 0.0 || gamma > 1.0 {
                    return Err(SearchError::config(format!(
                        "gamma must be in (0, 1], got {gamma}"
                    )));
                }
            }
            Acceptance::Tabu { capacity } => {
                if capacity == 0 {
                    return Err(SearchError::config("tabu capacity must be at least 1"));
                }
            }
            Acceptance::Always | Acceptance::NotWorse | Acceptance::Improving => {}
        }
        if self.selection == NeighborSelection::BestNonTabu
            && !matches!(self.acceptance, Acceptance::Tabu { .. })
        {
            return Err(SearchError::config(
                "best-non-tabu selection requires tabu acceptance",
            ));
        }
        Ok(())
    }
}
