//! The step-wise algorithm protocol.

use crate::error::Result;
use crate::problem::Direction;
use crate::solution::Solution;

/// A search algorithm bound to one problem instance.
///
/// The driver calls [`step`](Self::step) repeatedly; each call performs one
/// iteration and reports whether the algorithm has finished. Construction
/// performs initialization (initial solution or population, evaluated), so
/// [`best_solution`](Self::best_solution) is valid from the start.
pub trait SearchAlgorithm {
    /// Display name of the configured variant (e.g. `"HillClimbing"`).
    fn name(&self) -> String;

    /// Direction of the underlying problem.
    fn direction(&self) -> Direction;

    /// Performs one iteration. Returns `Ok(true)` once the algorithm is done.
    fn step(&mut self) -> Result<bool>;

    /// Best solution seen so far (an owned clone, never an alias).
    fn best_solution(&self) -> &Solution;

    /// Value of [`best_solution`](Self::best_solution).
    fn best_value(&self) -> f64 {
        self.direction().value_of(self.best_solution())
    }

    /// Value of the current solution, or of the best population member.
    fn current_value(&self) -> f64;

    /// Evaluations consumed on the problem so far.
    fn evaluations(&self) -> usize;

    /// Snapshot of the state after `iteration` steps.
    fn record(&self, iteration: usize) -> StepRecord {
        StepRecord::new(
            iteration,
            self.evaluations(),
            self.current_value(),
            self.best_value(),
        )
    }
}

/// One line of per-step output.
///
/// `extras` carries algorithm-specific quantities by name (`sigma`,
/// `temperature`, `tabu_size`, `min`, `max`, ...).
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct StepRecord {
    pub iteration: usize,
    pub evaluations: usize,
    pub value: f64,
    pub best: f64,
    pub extras: Vec<(String, f64)>,
}

impl StepRecord {
    pub fn new(iteration: usize, evaluations: usize, value: f64, best: f64) -> Self {
        Self {
            iteration,
            evaluations,
            value,
            best,
            extras: Vec::new(),
        }
    }

    /// Appends a named extra.
    pub fn with(mut self, name: &str, value: f64) -> Self {
        self.extras.push((name.to_string(), value));
        self
    }

    /// Looks up a named extra.
    pub fn get(&self, name: &str) -> Option<f64> {
        self.extras
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, v)| *v)
    }
}

impl std::fmt::Display for StepRecord {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "iter:{} eval:{} val:{} best:{}",
            self.iteration, self.evaluations, self.value, self.best
        )?;
        for (name, value) in &self.extras {
            write!(f, " {name}:{value}")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_record_extras() {
        let r = StepRecord::new(3, 40, 1.5, 1.0)
            .with("sigma", 0.5)
            .with("temperature", 97.0);
        assert_eq!(r.get("sigma"), Some(0.5));
        assert_eq!(r.get("temperature"), Some(97.0));
        assert_eq!(r.get("alpha"), None);
        assert_eq!(
            r.to_string(),
            "iter:3 eval:40 val:1.5 best:1 sigma:0.5 temperature:97"
        );
    }
}
