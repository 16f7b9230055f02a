//! Evolution strategy execution.
//!
//! # Algorithm
//!
//! 1. Start from a random point `m`, evaluated
//! 2. Each generation:
//!    a. Sample λ points `m + σ·z`, `z ~ N(0, I)`
//!    b. Evaluate them and sort best first
//!    c. Update σ ([`StepSizeRule`])
//!    d. Move the mean ([`MeanUpdate`])
//! 3. Stop when the evaluation budget is exhausted

use super::config::{EsConfig, MeanUpdate, StepSizeRule};
use crate::algorithm::{Incumbent, SearchAlgorithm, StepRecord};
use crate::error::{Result, SearchError};
use crate::problem::{Direction, InitialSolution, Problem};
use crate::random::{rng_from_seed, SearchRng};
use crate::solution::{Solution, SolutionKind};
use rand::Rng;
use rand_distr::StandardNormal;

/// Isotropic Gaussian evolution strategy on a real-valued problem.
///
/// # Examples
///
/// ```
/// use u_metabench::algorithm::SearchAlgorithm;
/// use u_metabench::es::{EsConfig, EvolutionStrategy};
/// use u_metabench::problem::{ContinuousFunction, ContinuousFunctionKind};
///
/// let mut sphere = ContinuousFunction::new(ContinuousFunctionKind::Sphere, 2, 500);
/// let mut es = EvolutionStrategy::new(&mut sphere, EsConfig::random_es().with_seed(1)).unwrap();
/// let start = es.best_value();
/// while !es.step().unwrap() {}
/// assert!(es.best_value() <= start);
/// ```
pub struct EvolutionStrategy<'p, P: Problem + ?Sized> {
    problem: &'p mut P,
    config: EsConfig,
    rng: SearchRng,
    mean: Solution,
    sigma: f64,
    samples: Vec<Solution>,
    incumbent: Incumbent,
    finished: bool,
}

impl<'p, P: Problem + ?Sized> EvolutionStrategy<'p, P> {
    /// Validates the configuration and samples the initial mean.
    ///
    /// # Errors
    /// - [`SearchError::Config`] for an invalid configuration
    /// - [`SearchError::TypeMismatch`] unless the problem is real-valued
    pub fn new(problem: &'p mut P, config: EsConfig) -> Result<Self> {
        config.validate()?;
        if problem.solution_kind() != SolutionKind::Real {
            return Err(SearchError::TypeMismatch {
                expected: SolutionKind::Real,
                found: problem.solution_kind(),
            });
        }

        let mut rng = rng_from_seed(config.seed);
        let mut mean = problem.generate_initial_solution(InitialSolution::Random, &mut rng)?;
        problem.evaluate(&mut mean)?;
        let incumbent = Incumbent::new(&mean, problem.direction());

        log::debug!(
            "{} on {}: initial value {}, sigma {}",
            config.name(),
            problem.name(),
            problem.direction().value_of(&mean),
            config.sigma
        );

        Ok(Self {
            problem,
            sigma: config.sigma,
            config,
            rng,
            mean,
            samples: Vec::new(),
            incumbent,
            finished: false,
        })
    }

    pub fn config(&self) -> &EsConfig {
        &self.config
    }

    /// Current mean of the search distribution.
    pub fn mean(&self) -> &Solution {
        &self.mean
    }

    /// Current mutation strength.
    pub fn sigma(&self) -> f64 {
        self.sigma
    }

    /// Samples of the last generation, best first.
    pub fn samples(&self) -> &[Solution] {
        &self.samples
    }

    pub fn is_finished(&self) -> bool {
        self.finished
    }

    fn sample(&mut self) -> Solution {
        let center = self.mean.as_reals().unwrap_or_default();
        let point = center
            .iter()
            .map(|&m| {
                let z: f64 = self.rng.sample(StandardNormal);
                m + self.sigma * z
            })
            .collect();
        Solution::real(point)
    }

    fn centroid(&self) -> Solution {
        let parents = &self.samples[..self.config.mu.min(self.samples.len())];
        let mut sum = vec![0.0; self.mean.dimension()];
        for parent in parents {
            for (acc, x) in sum.iter_mut().zip(parent.as_reals().unwrap_or_default()) {
                *acc += x;
            }
        }
        let n = parents.len().max(1) as f64;
        Solution::real(sum.into_iter().map(|s| s / n).collect())
    }

    fn update_mean(&mut self) -> Result<()> {
        let direction = self.direction();
        match self.config.mean_update {
            MeanUpdate::RandomSample => {
                let i = self.rng.random_range(0..self.samples.len());
                if direction.better_solution(&self.samples[i], &self.mean) {
                    self.mean = self.samples[i].clone();
                }
            }
            MeanUpdate::BestSample => {
                if direction.better_solution(&self.samples[0], &self.mean) {
                    self.mean = self.samples[0].clone();
                }
            }
            MeanUpdate::Recombination => {
                let mut centroid = self.centroid();
                self.problem.evaluate(&mut centroid)?;
                self.mean = centroid;
            }
        }
        Ok(())
    }
}

impl<P: Problem + ?Sized> SearchAlgorithm for EvolutionStrategy<'_, P> {
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

        let mut samples = Vec::with_capacity(self.config.lambda);
        for _ in 0..self.config.lambda {
            let mut x = self.sample();
            self.problem.evaluate(&mut x)?;
            samples.push(x);
        }
        let direction = self.direction();
        samples.sort_by(|a, b| direction.best_first(direction.value_of(a), direction.value_of(b)));
        self.samples = samples;

        if let StepSizeRule::Geometric { factor } = self.config.step_size {
            self.sigma *= factor;
        }
        self.update_mean()?;
        self.incumbent.offer(&self.mean);

        self.finished = self.problem.no_more_evals();
        log::trace!(
            "{}: eval {} val {} sigma {}",
            self.config.name(),
            self.problem.evaluations_used(),
            self.current_value(),
            self.sigma
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
        self.direction().value_of(&self.mean)
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
        .with("sigma", self.sigma)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::problem::{
        BinaryFunction, BinaryFunctionKind, ContinuousFunction, ContinuousFunctionKind,
        InstanceSize,
    };

    #[test]
    fn test_random_es_on_sphere() {
        let mut sphere = ContinuousFunction::new(ContinuousFunctionKind::Sphere, 2, 2000);
        let mut es = EvolutionStrategy::new(&mut sphere, EsConfig::random_es().with_seed(42)).unwrap();
        let mut last = es.best_value();
        let mut steps = 0;
        while !es.step().unwrap() {
            let best = es.best_value();
            assert!(best <= last, "best value went up: {last} -> {best}");
            last = best;
            steps += 1;
        }
        assert!(steps > 100);
        assert!(es.best_value() < 1.0, "sphere best {}", es.best_value());
        assert_eq!(es.record(steps).get("sigma"), Some(1.0));
    }

    #[test]
    fn test_generation_evaluates_lambda_samples() {
        let mut sphere = ContinuousFunction::new(ContinuousFunctionKind::Sphere, 3, 1000);
        let config = EsConfig::best_sample_es().with_lambda(7).with_seed(3);
        let mut es = EvolutionStrategy::new(&mut sphere, config).unwrap();
        assert_eq!(es.evaluations(), 1);
        es.step().unwrap();
        assert_eq!(es.evaluations(), 8);
        assert_eq!(es.samples().len(), 7);
        let values: Vec<f64> = es.samples().iter().filter_map(Solution::value).collect();
        assert!(values.windows(2).all(|w| w[0] <= w[1]), "samples sorted best first");
    }

    #[test]
    fn test_best_sample_never_worsens_mean() {
        let mut problem =
            ContinuousFunction::instance(ContinuousFunctionKind::Tablet, InstanceSize::Small, 3000);
        let mut es =
            EvolutionStrategy::new(&mut problem, EsConfig::best_sample_es().with_seed(9)).unwrap();
        let mut last = es.current_value();
        while !es.step().unwrap() {
            assert!(es.current_value() <= last);
            last = es.current_value();
        }
    }

    #[test]
    fn test_recombination_moves_mean_to_centroid() {
        let mut sphere = ContinuousFunction::new(ContinuousFunctionKind::Sphere, 2, 1000);
        let config = EsConfig::recombination_es().with_mu(2).with_lambda(4).with_seed(5);
        let mut es = EvolutionStrategy::new(&mut sphere, config).unwrap();
        es.step().unwrap();
        let a = es.samples()[0].as_reals().unwrap().to_vec();
        let b = es.samples()[1].as_reals().unwrap().to_vec();
        let mean = es.mean().as_reals().unwrap();
        for d in 0..2 {
            assert!((mean[d] - (a[d] + b[d]) / 2.0).abs() < 1e-12);
        }
        assert!(es.mean().is_evaluated());
        assert_eq!(es.evaluations(), 1 + 4 + 1, "centroid costs one evaluation");
    }

    #[test]
    fn test_geometric_step_size() {
        let mut sphere = ContinuousFunction::new(ContinuousFunctionKind::Sphere, 2, 1000);
        let config = EsConfig::default()
            .with_step_size(StepSizeRule::Geometric { factor: 0.5 })
            .with_seed(1);
        let mut es = EvolutionStrategy::new(&mut sphere, config).unwrap();
        es.step().unwrap();
        es.step().unwrap();
        assert!((es.sigma() - 0.25).abs() < 1e-12);
    }

    #[test]
    fn test_binary_problem_rejected() {
        let mut problem =
            BinaryFunction::instance(BinaryFunctionKind::OneMax, InstanceSize::Small, 100);
        let result = EvolutionStrategy::new(&mut problem, EsConfig::default());
        assert!(matches!(
            result,
            Err(SearchError::TypeMismatch {
                expected: SolutionKind::Real,
                found: SolutionKind::Binary
            })
        ));
    }
}
