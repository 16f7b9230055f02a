//! GA evolutionary loop execution.
//!
//! [`GeneticAlgorithm`] orchestrates one generation per step:
//! variation → evaluation → survivor selection → statistics.

use super::config::{GaConfig, Replacement};
use crate::algorithm::{Incumbent, PopulationStats, SearchAlgorithm, StepRecord};
use crate::error::Result;
use crate::problem::{Direction, InitialSolution, Problem};
use crate::random::{chance, rng_from_seed, SearchRng};
use crate::solution::Solution;
use rand::Rng;

/// A (µ, λ) or (µ + λ) genetic algorithm bound to a problem.
///
/// # Examples
///
/// ```
/// use u_metabench::algorithm::SearchAlgorithm;
/// use u_metabench::ga::{GaConfig, GeneticAlgorithm};
/// use u_metabench::problem::{BinaryFunction, BinaryFunctionKind, InstanceSize};
///
/// let mut onemax = BinaryFunction::instance(BinaryFunctionKind::OneMax, InstanceSize::Small, 500);
/// let mut ga = GeneticAlgorithm::new(&mut onemax, GaConfig::random_ga().with_seed(42)).unwrap();
/// while !ga.step().unwrap() {}
/// assert!(ga.best_value() >= 9.0);
/// ```
pub struct GeneticAlgorithm<'p, P: Problem + ?Sized> {
    problem: &'p mut P,
    config: GaConfig,
    rng: SearchRng,
    population: Vec<Solution>,
    stats: PopulationStats,
    incumbent: Incumbent,
    generation: usize,
    finished: bool,
}

impl<'p, P: Problem + ?Sized> GeneticAlgorithm<'p, P> {
    /// Validates the configuration against the problem and builds an
    /// evaluated initial population of µ random feasible solutions.
    ///
    /// # Errors
    /// - [`SearchError::Config`](crate::SearchError::Config) for an invalid configuration
    /// - [`SearchError::TypeMismatch`](crate::SearchError::TypeMismatch) when the
    ///   operators do not fit the problem encoding
    pub fn new(problem: &'p mut P, config: GaConfig) -> Result<Self> {
        config.validate_for(problem.solution_kind())?;

        let mut rng = rng_from_seed(config.seed);
        let mut population = Vec::with_capacity(config.mu);
        for _ in 0..config.mu {
            let mut x = problem.generate_initial_solution(InitialSolution::Random, &mut rng)?;
            problem.evaluate(&mut x)?;
            population.push(x);
        }

        let direction = problem.direction();
        let mut incumbent = Incumbent::new(&population[0], direction);
        if let Some(best) = direction.best_index(&population) {
            incumbent.offer(&population[best]);
        }
        let mut stats = PopulationStats::default();
        stats.update(&population);

        log::debug!(
            "{} on {}: initial best {}, average {}",
            config.name(),
            problem.name(),
            incumbent.value(),
            stats.average
        );

        Ok(Self {
            problem,
            config,
            rng,
            population,
            stats,
            incumbent,
            generation: 0,
            finished: false,
        })
    }

    pub fn config(&self) -> &GaConfig {
        &self.config
    }

    /// Current population (µ members, all evaluated).
    pub fn population(&self) -> &[Solution] {
        &self.population
    }

    pub fn stats(&self) -> &PopulationStats {
        &self.stats
    }

    /// Generations completed so far.
    pub fn generation(&self) -> usize {
        self.generation
    }

    pub fn is_finished(&self) -> bool {
        self.finished
    }

    /// Produces exactly λ unevaluated-or-cloned offspring.
    fn evolve(&mut self) -> Result<Vec<Solution>> {
        let lambda = self.config.lambda;
        let mut offspring = Vec::with_capacity(lambda + 1);
        while offspring.len() < lambda {
            let n = self.population.len();
            let a = self.population[self.rng.random_range(0..n)].clone();
            let b = self.population[self.rng.random_range(0..n)].clone();

            let mut children = if chance(self.config.crossover_rate, &mut self.rng) {
                self.config.crossover.apply(&a, &b, &mut self.rng)?
            } else {
                vec![a, b]
            };
            for child in children.iter_mut() {
                if chance(self.config.mutation_rate, &mut self.rng) {
                    self.config.mutation.apply(child, &mut self.rng)?;
                }
            }
            offspring.extend(children);
        }
        offspring.truncate(lambda);
        Ok(offspring)
    }
}

impl<P: Problem + ?Sized> SearchAlgorithm for GeneticAlgorithm<'_, P> {
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

        let mut pool = self.evolve()?;
        for child in pool.iter_mut() {
            self.problem.evaluate(child)?;
        }
        if self.config.replacement == Replacement::Plus {
            pool.append(&mut self.population);
        }

        let direction = self.direction();
        if let Some(best) = direction.best_index(&pool) {
            self.incumbent.offer(&pool[best]);
        }
        self.population = self
            .config
            .selection
            .select(&pool, self.config.mu, direction, &mut self.rng);
        self.stats.update(&self.population);
        self.generation += 1;

        self.finished = self.problem.no_more_evals();
        log::trace!(
            "{}: gen {} eval {} min {} max {} avg {}",
            self.config.name(),
            self.generation,
            self.problem.evaluations_used(),
            self.stats.min,
            self.stats.max,
            self.stats.average
        );
        if self.finished {
            log::debug!(
                "{} finished after {} generations, best {}",
                self.config.name(),
                self.generation,
                self.incumbent.value()
            );
        }
        Ok(self.finished)
    }

    fn best_solution(&self) -> &Solution {
        self.incumbent.best()
    }

    fn current_value(&self) -> f64 {
        let direction = self.direction();
        direction
            .best_index(&self.population)
            .map(|i| direction.value_of(&self.population[i]))
            .unwrap_or_else(|| direction.worst())
    }

    fn evaluations(&self) -> usize {
        self.problem.evaluations_used()
    }

    fn record(&self, iteration: usize) -> StepRecord {
        StepRecord::new(
            iteration,
            self.evaluations(),
            self.current_value(),
            self.best_value(),
        )
        .with("average", self.stats.average)
        .with("min", self.stats.min)
        .with("max", self.stats.max)
        .with("min_ever", self.stats.min_ever)
        .with("max_ever", self.stats.max_ever)
        .with("pc", self.config.crossover_rate)
        .with("pm", self.config.mutation_rate)
    }
}
