//! Local search execution.
//!
//! # Algorithm
//!
//! 1. Start from a random feasible solution, evaluated
//! 2. At each step:
//!    a. Generate the full neighborhood of the current solution
//!    b. Drop infeasible neighbors
//!    c. Select one candidate ([`NeighborSelection`])
//!    d. Accept or reject it ([`Acceptance`])
//!    e. Offer the current solution to the incumbent
//! 3. Stop when no candidate was selected, the candidate was rejected, or
//!    the evaluation budget is exhausted

use super::config::{Acceptance, LocalSearchConfig, NeighborSelection};
use super::tabu::TabuList;
use crate::algorithm::{Incumbent, SearchAlgorithm, StepRecord};
use crate::error::{Result, SearchError};
use crate::problem::{Direction, InitialSolution, Problem};
use crate::random::{chance, rng_from_seed, SearchRng};
use crate::solution::{Solution, SolutionKind};
use rand::Rng;

/// A single-solution local search bound to a problem.
///
/// # Examples
///
/// ```
/// use u_metabench::algorithm::SearchAlgorithm;
/// use u_metabench::local_search::{LocalSearch, LocalSearchConfig};
/// use u_metabench::problem::{InstanceSize, Knapsack};
///
/// let mut problem = Knapsack::instance(InstanceSize::Small, 1000);
/// let config = LocalSearchConfig::hill_climbing().with_seed(42);
/// let mut search = LocalSearch::new(&mut problem, config).unwrap();
/// while !search.step().unwrap() {}
/// assert!(search.best_value() > 0.0);
/// ```
pub struct LocalSearch<'p, P: Problem + ?Sized> {
    problem: &'p mut P,
    config: LocalSearchConfig,
    rng: SearchRng,
    current: Solution,
    incumbent: Incumbent,
    temperature: Option<f64>,
    tabu: Option<TabuList>,
    finished: bool,
}

impl<'p, P: Problem + ?Sized> LocalSearch<'p, P> {
    /// Validates the configuration and initializes the search.
    ///
    /// # Errors
    /// - [`SearchError::Config`] for an invalid configuration
    /// - [`SearchError::Unsupported`] for real-valued problems, which have
    ///   no neighborhood
    pub fn new(problem: &'p mut P, config: LocalSearchConfig) -> Result<Self> {
        config.validate()?;
        if problem.solution_kind() == SolutionKind::Real {
            return Err(SearchError::Unsupported(format!(
                "{} needs a neighborhood, {} has real-valued solutions",
                config.name(),
                problem.name()
            )));
        }

        let mut rng = rng_from_seed(config.seed);
        let mut current = problem.generate_initial_solution(InitialSolution::Random, &mut rng)?;
        problem.evaluate(&mut current)?;
        let incumbent = Incumbent::new(&current, problem.direction());

        let temperature = match config.acceptance {
            Acceptance::Metropolis {
                initial_temperature,
                ..
            } => Some(initial_temperature),
            _ => None,
        };
        let tabu = match config.acceptance {
            Acceptance::Tabu { capacity } => Some(TabuList::new(capacity)),
            _ => None,
        };

        log::debug!(
            "{} on {}: initial value {}",
            config.name(),
            problem.name(),
            problem.direction().value_of(&current)
        );

        Ok(Self {
            problem,
            config,
            rng,
            current,
            incumbent,
            temperature,
            tabu,
            finished: false,
        })
    }

    pub fn config(&self) -> &LocalSearchConfig {
        &self.config
    }

    pub fn current_solution(&self) -> &Solution {
        &self.current
    }

    /// Current temperature, for Metropolis acceptance.
    pub fn temperature(&self) -> Option<f64> {
        self.temperature
    }

    /// Tabu list, for tabu acceptance.
    pub fn tabu_list(&self) -> Option<&TabuList> {
        self.tabu.as_ref()
    }

    pub fn is_finished(&self) -> bool {
        self.finished
    }

    fn select(&mut self, mut candidates: Vec<Solution>) -> Result<Option<Solution>> {
        if candidates.is_empty() {
            return Ok(None);
        }
        match self.config.selection {
            NeighborSelection::Random => Ok(Some(self.pick_random(candidates))),
            NeighborSelection::Best => self.pick_best(candidates),
            NeighborSelection::FirstImprovement => {
                let current = self.direction().value_of(&self.current);
                for mut candidate in candidates {
                    let value = ensure_evaluated(&mut *self.problem, &mut candidate)?;
                    if self.direction().strictly_better(value, current) {
                        return Ok(Some(candidate));
                    }
                }
                Ok(None)
            }
            NeighborSelection::Randomized { alpha } => {
                if chance(alpha, &mut self.rng) {
                    Ok(Some(self.pick_random(candidates)))
                } else {
                    self.pick_best(candidates)
                }
            }
            NeighborSelection::BestNonTabu => {
                if let Some(tabu) = &self.tabu {
                    candidates.retain(|c| !tabu.contains(c));
                }
                self.pick_best(candidates)
            }
        }
    }

    fn pick_random(&mut self, mut candidates: Vec<Solution>) -> Solution {
        let i = self.rng.random_range(0..candidates.len());
        candidates.swap_remove(i)
    }

    fn pick_best(&mut self, mut candidates: Vec<Solution>) -> Result<Option<Solution>> {
        for candidate in candidates.iter_mut() {
            ensure_evaluated(&mut *self.problem, candidate)?;
        }
        Ok(self
            .direction()
            .best_index(&candidates)
            .map(|i| candidates.swap_remove(i)))
    }

    fn accept(&mut self, candidate: &Solution) -> bool {
        let direction = self.direction();
        let new = direction.value_of(candidate);
        let current = direction.value_of(&self.current);
        match self.config.acceptance {
            Acceptance::Always => true,
            Acceptance::NotWorse => direction.better(new, current),
            Acceptance::Improving => direction.strictly_better(new, current),
            Acceptance::Metropolis { gamma, .. } => {
                let t = self
                    .temperature
                    .unwrap_or(super::config::DEFAULT_INITIAL_TEMPERATURE);
                let accepted = direction.better(new, current)
                    || self.rng.random::<f64>() < (-(new - current).abs() / t).exp();
                self.temperature = Some(t * gamma);
                accepted
            }
            Acceptance::Tabu { .. } => {
                if let Some(tabu) = self.tabu.as_mut() {
                    tabu.push(candidate.clone());
                }
                true
            }
        }
    }
}

/// Evaluates `solution` unless it already carries a value.
fn ensure_evaluated<P: Problem + ?Sized>(problem: &mut P, solution: &mut Solution) -> Result<f64> {
    match solution.value() {
        Some(value) => Ok(value),
        None => problem.evaluate(solution),
    }
}

impl<P: Problem + ?Sized> SearchAlgorithm for LocalSearch<'_, P> {
    fn name(&self) -> String {
        self.config.name()
    }

    fn direction(&self) -> Direction {
        self.problem.direction()
    }

    fn step(&mut self) -> Result<bool> {
        if self.finished {
            return Ok(true);
        }

        let neighbors = self.current.neighbors(&mut self.rng)?;
        let mut candidates = Vec::with_capacity(neighbors.len());
        for neighbor in neighbors {
            if self.problem.feasible(&neighbor)? {
                candidates.push(neighbor);
            }
        }

        let mut moved = false;
        if let Some(mut candidate) = self.select(candidates)? {
            ensure_evaluated(&mut *self.problem, &mut candidate)?;
            if self.accept(&candidate) {
                self.current = candidate;
                moved = true;
            }
        }
        self.incumbent.offer(&self.current);

        self.finished = !moved || self.problem.no_more_evals();
        log::trace!(
            "{}: eval {} val {} best {}",
            self.config.name(),
            self.problem.evaluations_used(),
            self.current_value(),
            self.incumbent.value()
        );
        if self.finished {
            log::debug!(
                "{} finished after {} evaluations, best {}",
                self.config.name(),
                self.problem.evaluations_used(),
                self.incumbent.value()
            );
        }
        Ok(self.finished)
    }

    fn best_solution(&self) -> &Solution {
        self.incumbent.best()
    }

    fn current_value(&self) -> f64 {
        self.direction().value_of(&self.current)
    }

    fn evaluations(&self) -> usize {
        self.problem.evaluations_used()
    }

    fn record(&self, iteration: usize) -> StepRecord {
        let mut record = StepRecord::new(
            iteration,
            self.evaluations(),
            self.current_value(),
            self.best_value(),
        );
        if let NeighborSelection::Randomized { alpha } = self.config.selection {
            record = record.with("alpha", alpha);
        }
        if let Some(t) = self.temperature {
            record = record.with("temperature", t);
        }
        if let Some(tabu) = &self.tabu {
            record = record.with("tabu_size", tabu.len() as f64);
        }
        record
    }
}
