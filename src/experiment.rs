//! Experiment harness.
//!
//! Drives algorithms to completion and aggregates repeated runs:
//!
//! - [`run_algorithm`]: step until finished or `max_iterations`, keeping a
//!   [`StepRecord`] per step
//! - [`multiple_runs`]: reset the problem, rebuild the algorithm with a
//!   per-run seed, run, repeat
//! - [`RunSeries::summary`]: mean, standard deviation, extremes and median
//!   of the final best values
//!
//! With the `parallel` feature, `par_multiple_runs` spreads runs over the
//! rayon thread pool, one freshly built problem per run.

use crate::algorithm::{SearchAlgorithm, StepRecord};
use crate::error::Result;
use crate::params::{build_algorithm, AlgorithmKind, AlgorithmParams};
use crate::problem::Problem;
use crate::solution::Solution;

/// Result of driving one algorithm to completion.
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RunOutcome {
    /// Display name of the algorithm variant.
    pub algorithm: String,
    /// Steps performed.
    pub iterations: usize,
    /// Evaluations consumed, including initialization.
    pub evaluations: usize,
    /// Best solution found.
    pub best: Solution,
    /// Value of `best`.
    pub best_value: f64,
    /// One record for the initial state, then one per step.
    pub records: Vec<StepRecord>,
}

/// Steps `algorithm` until it reports completion or `max_iterations`
/// steps have been performed.
pub fn run_algorithm<A: SearchAlgorithm + ?Sized>(
    algorithm: &mut A,
    max_iterations: usize,
) -> Result<RunOutcome> {
    let mut records = vec![algorithm.record(0)];
    let mut iterations = 0;
    while iterations < max_iterations {
        iterations += 1;
        let finished = algorithm.step()?;
        records.push(algorithm.record(iterations));
        if finished {
            break;
        }
    }

    Ok(RunOutcome {
        algorithm: algorithm.name(),
        iterations,
        evaluations: algorithm.evaluations(),
        best: algorithm.best_solution().clone(),
        best_value: algorithm.best_value(),
        records,
    })
}

/// Outcomes of repeated runs of one algorithm on one problem.
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RunSeries {
    pub algorithm: String,
    pub problem: String,
    pub runs: Vec<RunOutcome>,
}

impl RunSeries {
    /// Best value of each run, in run order.
    pub fn final_values(&self) -> Vec<f64> {
        self.runs.iter().map(|r| r.best_value).collect()
    }

    /// Summary statistics of [`final_values`](Self::final_values), or
    /// `None` for an empty series.
    pub fn summary(&self) -> Option<RunSummary> {
        RunSummary::from_values(&self.final_values())
    }
}

/// Descriptive statistics over the final values of a series.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RunSummary {
    pub runs: usize,
    pub mean: f64,
    /// Population standard deviation.
    pub std_dev: f64,
    pub min: f64,
    pub max: f64,
    pub median: f64,
}

impl RunSummary {
    pub fn from_values(values: &[f64]) -> Option<Self> {
        if values.is_empty() {
            return None;
        }
        let n = values.len() as f64;
        let mean = values.iter().sum::<f64>() / n;
        let variance = values.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / n;

        let mut sorted = values.to_vec();
        sorted.sort_by(|a, b| a.total_cmp(b));
        let mid = sorted.len() / 2;
        let median = if sorted.len() % 2 == 0 {
            (sorted[mid - 1] + sorted[mid]) / 2.0
        } else {
            sorted[mid]
        };

        Some(Self {
            runs: values.len(),
            mean,
            std_dev: variance.sqrt(),
            min: sorted[0],
            max: sorted[sorted.len() - 1],
            median,
        })
    }
}

impl std::fmt::Display for RunSummary {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "runs:{} mean:{:.4} std:{:.4} min:{} median:{} max:{}",
            self.runs, self.mean, self.std_dev, self.min, self.median, self.max
        )
    }
}

/// Parameters for run `run`: the base `seed` shifted by the run index.
fn run_params(params: &AlgorithmParams, run: usize) -> Result<AlgorithmParams> {
    let mut params = params.clone();
    if let Some(base) = params.seed()? {
        params.set("seed", base.wrapping_add(run as u64));
    }
    Ok(params)
}

/// Runs `kind` `runs` times on `problem`.
///
/// The evaluation budget is reset before every run. When `params` carries
/// a `seed`, run `r` uses `seed + r`; otherwise each run seeds from entropy.
pub fn multiple_runs<P: Problem + ?Sized>(
    kind: AlgorithmKind,
    problem: &mut P,
    params: &AlgorithmParams,
    runs: usize,
    max_iterations: usize,
) -> Result<RunSeries> {
    let mut outcomes = Vec::with_capacity(runs);
    let problem_name = problem.name().to_string();
    for run in 0..runs {
        problem.reset();
        let params = run_params(params, run)?;
        let mut algorithm = build_algorithm(kind, &mut *problem, &params)?;
        let outcome = run_algorithm(algorithm.as_mut(), max_iterations)?;
        log::info!(
            "{} on {} run {}/{}: best {} after {} evaluations",
            outcome.algorithm,
            problem_name,
            run + 1,
            runs,
            outcome.best_value,
            outcome.evaluations
        );
        outcomes.push(outcome);
    }

    Ok(RunSeries {
        algorithm: outcomes
            .first()
            .map(|o| o.algorithm.clone())
            .unwrap_or_else(|| kind.to_string()),
        problem: problem_name,
        runs: outcomes,
    })
}

/// Parallel version of [`multiple_runs`]: each run builds its own problem
/// with `factory` on a rayon worker.
#[cfg(feature = "parallel")]
pub fn par_multiple_runs<F>(
    kind: AlgorithmKind,
    factory: F,
    params: &AlgorithmParams,
    runs: usize,
    max_iterations: usize,
) -> Result<RunSeries>
where
    F: Fn() -> Result<Box<dyn Problem>> + Sync,
{
    use rayon::prelude::*;

    let results: Vec<(String, RunOutcome)> = (0..runs)
        .into_par_iter()
        .map(|run| -> Result<(String, RunOutcome)> {
            let mut problem = factory()?;
            let params = run_params(params, run)?;
            let mut algorithm = build_algorithm(kind, problem.as_mut(), &params)?;
            let outcome = run_algorithm(algorithm.as_mut(), max_iterations)?;
            drop(algorithm);
            log::info!(
                "{} on {} run {}/{}: best {}",
                outcome.algorithm,
                problem.name(),
                run + 1,
                runs,
                outcome.best_value
            );
            Ok((problem.name().to_string(), outcome))
        })
        .collect::<Result<_>>()?;

    let problem = results.first().map(|(p, _)| p.clone()).unwrap_or_default();
    let runs: Vec<RunOutcome> = results.into_iter().map(|(_, o)| o).collect();
    Ok(RunSeries {
        algorithm: runs
            .first()
            .map(|o| o.algorithm.clone())
            .unwrap_or_else(|| kind.to_string()),
        problem,
        runs,
    })
}
