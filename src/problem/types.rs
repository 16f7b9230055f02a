//! Core problem contract.
//!
//! [`Problem`] ties an objective function, a feasibility predicate and an
//! evaluation budget to one optimization [`Direction`]. Algorithms only
//! talk to problems through this trait, so any benchmark can be plugged
//! into any algorithm whose encoding matches.

use crate::error::{Result, SearchError};
use crate::solution::{Solution, SolutionKind};
use rand::RngCore;
use std::cmp::Ordering;

/// Rejected draws between two warnings during rejection sampling.
const REJECTION_WARN_INTERVAL: u64 = 100_000;

/// Optimization direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Direction {
    Minimize,
    Maximize,
}

impl Direction {
    /// `v1` is at least as good as `v2`.
    ///
    /// Ties are "better" both ways: `better(a, a)` is `true`.
    pub fn better(self, v1: f64, v2: f64) -> bool {
        match self {
            Direction::Maximize => v1 >= v2,
            Direction::Minimize => v1 <= v2,
        }
    }

    /// `v1` is strictly better than `v2`.
    pub fn strictly_better(self, v1: f64, v2: f64) -> bool {
        match self {
            Direction::Maximize => v1 > v2,
            Direction::Minimize => v1 < v2,
        }
    }

    /// The worst possible value: `-inf` when maximizing, `+inf` when minimizing.
    pub fn worst(self) -> f64 {
        match self {
            Direction::Maximize => f64::NEG_INFINITY,
            Direction::Minimize => f64::INFINITY,
        }
    }

    /// Cached value of a solution, or [`worst`](Self::worst) if unevaluated.
    pub fn value_of(self, solution: &Solution) -> f64 {
        solution.value().unwrap_or_else(|| self.worst())
    }

    /// [`better`](Self::better) applied to the cached values of two solutions.
    pub fn better_solution(self, a: &Solution, b: &Solution) -> bool {
        self.better(self.value_of(a), self.value_of(b))
    }

    /// Ordering that sorts best values first. NaN compares equal.
    pub fn best_first(self, a: f64, b: f64) -> Ordering {
        let ord = a.partial_cmp(&b).unwrap_or(Ordering::Equal);
        match self {
            Direction::Maximize => ord.reverse(),
            Direction::Minimize => ord,
        }
    }

    /// Index of the best solution in a slice (first one on ties).
    ///
    /// Returns `None` for an empty slice.
    pub fn best_index(self, solutions: &[Solution]) -> Option<usize> {
        let mut best: Option<usize> = None;
        for (i, s) in solutions.iter().enumerate() {
            match best {
                None => best = Some(i),
                Some(b) => {
                    if self.strictly_better(self.value_of(s), self.value_of(&solutions[b])) {
                        best = Some(i);
                    }
                }
            }
        }
        best
    }
}

/// Consumable evaluation counter.
///
/// Exhaustion is advisory: the counter keeps growing past the limit and
/// algorithms poll [`exhausted`](Self::exhausted) to stop.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct EvaluationBudget {
    max_evaluations: usize,
    used: usize,
}

impl EvaluationBudget {
    pub fn new(max_evaluations: usize) -> Self {
        Self {
            max_evaluations,
            used: 0,
        }
    }

    pub fn max_evaluations(&self) -> usize {
        self.max_evaluations
    }

    pub fn used(&self) -> usize {
        self.used
    }

    /// Records one evaluation.
    pub fn consume(&mut self) {
        self.used += 1;
    }

    /// `used > max_evaluations`.
    pub fn exhausted(&self) -> bool {
        self.used > self.max_evaluations
    }

    pub fn reset(&mut self) {
        self.used = 0;
    }
}

/// How [`Problem::generate_initial_solution`] builds its result.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InitialSolution {
    /// Problem-specific deterministic starting point, not checked for feasibility.
    Empty,
    /// Random feasible solution (rejection sampling).
    Random,
}

/// An optimization problem with an evaluation budget.
///
/// Implementors provide the objective, the feasibility predicate and the
/// budget storage; evaluation bookkeeping, kind checking and initial
/// solution sampling are provided.
///
/// The trait is object-safe so heterogeneous benchmark suites can be held
/// as `Box<dyn Problem>`.
pub trait Problem: Send {
    /// Short display name.
    fn name(&self) -> &str;

    fn direction(&self) -> Direction;

    /// Encoding this problem understands.
    fn solution_kind(&self) -> SolutionKind;

    /// Length of the encoding.
    fn dimension(&self) -> usize;

    fn budget(&self) -> &EvaluationBudget;

    fn budget_mut(&mut self) -> &mut EvaluationBudget;

    /// Raw objective value. Pure: does not touch the budget.
    ///
    /// Only called on solutions that passed [`check_solution`](Self::check_solution)
    /// and [`feasible`](Self::feasible).
    fn objective(&self, solution: &Solution) -> Result<f64>;

    /// Whether the solution satisfies every constraint. Pure.
    fn feasible(&self, solution: &Solution) -> Result<bool>;

    /// Deterministic starting point used by [`InitialSolution::Empty`].
    fn empty_solution(&self) -> Solution {
        Solution::empty(self.solution_kind(), self.dimension())
    }

    /// Human-readable summary of an evaluated solution.
    fn describe(&self, solution: &Solution) -> String {
        match solution.value() {
            Some(v) => format!("val:{v} sol:{solution}"),
            None => format!("val:- sol:{solution}"),
        }
    }

    /// Rejects solutions with the wrong encoding or length.
    fn check_solution(&self, solution: &Solution) -> Result<()> {
        if solution.kind() != self.solution_kind() {
            return Err(SearchError::TypeMismatch {
                expected: self.solution_kind(),
                found: solution.kind(),
            });
        }
        if solution.dimension() != self.dimension() {
            return Err(SearchError::DimensionMismatch {
                expected: self.dimension(),
                found: solution.dimension(),
            });
        }
        Ok(())
    }

    /// Evaluates a solution, caches the value in it and consumes one
    /// evaluation.
    ///
    /// Infeasible solutions receive [`Direction::worst`]. The budget is
    /// not enforced here; see [`no_more_evals`](Self::no_more_evals).
    fn evaluate(&mut self, solution: &mut Solution) -> Result<f64> {
        self.check_solution(solution)?;
        let value = if self.feasible(solution)? {
            self.objective(solution)?
        } else {
            self.direction().worst()
        };
        self.budget_mut().consume();
        solution.set_value(value);
        Ok(value)
    }

    /// Builds a starting solution.
    ///
    /// `Random` resamples until a feasible solution comes up. There is no
    /// attempt limit: a constraint set with (almost) no feasible random
    /// points will keep this loop spinning.
    fn generate_initial_solution(
        &self,
        init: InitialSolution,
        rng: &mut dyn RngCore,
    ) -> Result<Solution> {
        let template = self.empty_solution();
        match init {
            InitialSolution::Empty => Ok(template),
            InitialSolution::Random => {
                let mut attempts: u64 = 0;
                loop {
                    let candidate = template.random(rng);
                    if self.feasible(&candidate)? {
                        return Ok(candidate);
                    }
                    attempts += 1;
                    if attempts % REJECTION_WARN_INTERVAL == 0 {
                        log::warn!(
                            "{}: {attempts} random draws rejected while looking for a feasible start",
                            self.name()
                        );
                    }
                }
            }
        }
    }

    /// `true` once more evaluations than allowed have been consumed.
    fn no_more_evals(&self) -> bool {
        self.budget().exhausted()
    }

    fn evaluations_used(&self) -> usize {
        self.budget().used()
    }

    fn max_evaluations(&self) -> usize {
        self.budget().max_evaluations()
    }

    /// Zeroes the evaluation counter. Live solutions are unaffected.
    fn reset(&mut self) {
        self.budget_mut().reset();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_better_maximize() {
        let d = Direction::Maximize;
        assert!(d.better(5.0, 3.0));
        assert!(!d.better(3.0, 5.0));
        assert!(d.better(4.0, 4.0));
    }

    #[test]
    fn test_better_minimize() {
        let d = Direction::Minimize;
        assert!(!d.better(5.0, 3.0));
        assert!(d.better(3.0, 5.0));
        assert!(d.better(4.0, 4.0));
        assert!(!d.strictly_better(4.0, 4.0));
    }

    #[test]
    fn test_worst_loses_to_everything() {
        for d in [Direction::Minimize, Direction::Maximize] {
            assert!(d.strictly_better(1e300, d.worst()));
            assert!(d.strictly_better(-1e300, d.worst()));
        }
    }

    #[test]
    fn test_best_first_sorting() {
        let mut values = vec![3.0, 1.0, 2.0];
        values.sort_by(|a, b| Direction::Minimize.best_first(*a, *b));
        assert_eq!(values, vec![1.0, 2.0, 3.0]);
        values.sort_by(|a, b| Direction::Maximize.best_first(*a, *b));
        assert_eq!(values, vec![3.0, 2.0, 1.0]);
    }

    #[test]
    fn test_best_index() {
        let mut pop: Vec<Solution> = (0..4).map(|_| Solution::binary(vec![true])).collect();
        for (s, v) in pop.iter_mut().zip([2.0, 7.0, 7.0, 1.0]) {
            s.set_value(v);
        }
        assert_eq!(Direction::Maximize.best_index(&pop), Some(1));
        assert_eq!(Direction::Minimize.best_index(&pop), Some(3));
        assert_eq!(Direction::Minimize.best_index(&[]), None);
    }

    #[test]
    fn test_budget() {
        let mut b = EvaluationBudget::new(2);
        b.consume();
        b.consume();
        assert!(!b.exhausted(), "reaching the limit is not exhausting it");
        b.consume();
        assert!(b.exhausted());
        b.reset();
        assert_eq!(b.used(), 0);
        assert!(!b.exhausted());
    }
}
