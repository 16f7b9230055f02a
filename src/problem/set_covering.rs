//! Set covering.
//!
//! Bit `i` selects subset `i`. The selected subsets must cover the whole
//! universe `0..n`; the objective is the number of selected subsets,
//! minimized.

use super::catalog::InstanceSize;
use super::types::{Direction, EvaluationBudget, Problem};
use crate::error::{Result, SearchError};
use crate::solution::{Solution, SolutionKind};
use rand::Rng;

const SMALL: &[&[usize]] = &[
    &[0, 1, 5, 6],
    &[0, 1, 6],
    &[0, 1, 2],
    &[4, 5, 6],
    &[5, 6],
    &[3, 5],
    &[3],
];

const MEDIUM: &[&[usize]] = &[
    &[0, 2, 3, 4, 8, 9, 10, 16, 17, 23, 26, 28],
    &[1, 19, 13, 22, 15],
    &[0, 6, 8, 10, 13, 19, 22, 25, 27],
    &[4, 8, 9, 11, 15, 19, 23, 26],
    &[11],
    &[3, 7, 8, 11, 12, 16, 19, 20],
    &[4, 5, 7, 9, 10, 14, 18, 20, 28],
    &[10, 13, 17, 20, 21, 22],
    &[0, 9, 19],
    &[2, 3, 4, 12, 17, 18],
    &[25, 2, 4, 29, 23],
    &[3, 10, 12, 22, 23, 25],
    &[16],
    &[0, 3, 5, 6, 7, 8, 13, 20, 22, 24, 26, 29],
];

const LARGE: &[&[usize]] = &[
    &[40, 42, 3, 20, 31],
    &[34, 4, 40, 14, 48, 46, 36, 29, 30],
    &[49, 7],
    &[32, 38, 39, 42, 20, 24, 29],
    &[27, 9, 43, 46, 14],
    &[0],
    &[16, 35, 37, 6, 43, 46, 26, 30, 31],
    &[0, 2, 35, 49, 43, 26, 30, 31],
    &[32, 33, 35, 4, 5, 11, 46, 48, 29],
    &[16, 45, 23],
    &[3, 46],
    &[32, 27, 7],
    &[6, 7, 41, 45, 17, 18, 21, 23],
    &[32],
    &[17, 15, 9],
    &[32, 35, 4, 8, 41, 11, 44, 13, 22, 28],
    &[18, 45, 46],
    &[16, 3, 39, 10, 11, 5, 27, 30],
    &[24, 17, 31],
    &[9],
    &[34, 5, 6, 42, 13, 48, 26, 38],
    &[40, 23],
    &[8, 48, 35, 30, 15],
    &[8, 7, 39],
    &[6, 44, 13, 49, 18, 22, 24],
    &[45],
    &[41, 42, 3, 21, 38],
    &[4, 44],
    &[43, 40, 11, 13, 14, 25],
    &[32, 3, 39, 8, 28, 30],
    &[1, 37, 39, 10, 7, 13, 23, 25, 29, 30],
    &[40, 43, 47],
    &[34, 36, 5, 42, 11, 2, 48],
    &[1, 34, 4],
    &[32, 36, 5, 9, 44, 45, 46, 48, 14, 26],
    &[33, 2, 35, 7, 13, 15, 34, 22, 27, 28],
    &[17, 44, 21, 7],
    &[19, 12],
];

/// Set covering instance over the universe `0..universe_size`.
#[derive(Debug, Clone)]
pub struct SetCovering {
    universe_size: usize,
    subsets: Vec<Vec<usize>>,
    budget: EvaluationBudget,
}

impl SetCovering {
    /// Builds an instance.
    ///
    /// # Errors
    /// [`SearchError::Config`] if a subset names an element outside the
    /// universe or if the union of all subsets misses an element.
    pub fn new(
        universe_size: usize,
        subsets: Vec<Vec<usize>>,
        max_evaluations: usize,
    ) -> Result<Self> {
        let mut covered = vec![false; universe_size];
        for (i, subset) in subsets.iter().enumerate() {
            for &e in subset {
                if e >= universe_size {
                    return Err(SearchError::config(format!(
                        "subset {i} contains {e}, outside the universe 0..{universe_size}"
                    )));
                }
                covered[e] = true;
            }
        }
        if let Some(missing) = covered.iter().position(|&c| !c) {
            return Err(SearchError::config(format!(
                "the union of the subsets must be the universe (element {missing} is never covered)"
            )));
        }
        Ok(Self {
            universe_size,
            subsets,
            budget: EvaluationBudget::new(max_evaluations),
        })
    }

    /// Built-in instance over a universe of 7, 30 or 50 elements.
    pub fn instance(size: InstanceSize, max_evaluations: usize) -> Result<Self> {
        let (n, data) = match size {
            InstanceSize::Small => (7, SMALL),
            InstanceSize::Medium => (30, MEDIUM),
            InstanceSize::Large => (50, LARGE),
        };
        Self::new(
            n,
            data.iter().map(|s| s.to_vec()).collect(),
            max_evaluations,
        )
    }

    /// Random instance.
    ///
    /// Draws `subset_count - 1` random subsets of size `1..universe_size/4`
    /// and appends one subset with the elements they missed, if any.
    pub fn random<R: Rng + ?Sized>(
        universe_size: usize,
        subset_count: usize,
        max_evaluations: usize,
        rng: &mut R,
    ) -> Result<Self> {
        if universe_size == 0 || subset_count == 0 {
            return Err(SearchError::config(
                "a random set covering instance needs a non-empty universe and at least one subset",
            ));
        }
        let max_size = (universe_size / 4).max(2);
        let mut covered = vec![false; universe_size];
        let mut subsets = Vec::with_capacity(subset_count);
        for _ in 0..subset_count - 1 {
            let len = rng.random_range(1..max_size).min(universe_size);
            let subset: Vec<usize> = rand::seq::index::sample(rng, universe_size, len).into_vec();
            for &e in &subset {
                covered[e] = true;
            }
            subsets.push(subset);
        }
        let rest: Vec<usize> = (0..universe_size).filter(|&e| !covered[e]).collect();
        if !rest.is_empty() {
            subsets.push(rest);
        }
        Self::new(universe_size, subsets, max_evaluations)
    }

    pub fn universe_size(&self) -> usize {
        self.universe_size
    }

    pub fn subsets(&self) -> &[Vec<usize>] {
        &self.subsets
    }

    fn bits<'a>(&self, solution: &'a Solution) -> Result<&'a [bool]> {
        solution.as_bits().ok_or(SearchError::TypeMismatch {
            expected: SolutionKind::Binary,
            found: solution.kind(),
        })
    }
}

impl Problem for SetCovering {
    fn name(&self) -> &str {
        "SetCovering"
    }

    fn direction(&self) -> Direction {
        Direction::Minimize
    }

    fn solution_kind(&self) -> SolutionKind {
        SolutionKind::Binary
    }

    fn dimension(&self) -> usize {
        self.subsets.len()
    }

    fn budget(&self) -> &EvaluationBudget {
        &self.budget
    }

    fn budget_mut(&mut self) -> &mut EvaluationBudget {
        &mut self.budget
    }

    fn objective(&self, solution: &Solution) -> Result<f64> {
        let bits = self.bits(solution)?;
        Ok(bits.iter().filter(|&&b| b).count() as f64)
    }

    fn feasible(&self, solution: &Solution) -> Result<bool> {
        let bits = self.bits(solution)?;
        let mut covered = vec![false; self.universe_size];
        for (subset, _) in self.subsets.iter().zip(bits).filter(|(_, &on)| on) {
            for &e in subset {
                covered[e] = true;
            }
        }
        Ok(covered.into_iter().all(|c| c))
    }

    /// Every subset selected: always feasible.
    fn empty_solution(&self) -> Solution {
        Solution::binary(vec![true; self.subsets.len()])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::problem::InitialSolution;
    use crate::random::create_rng;

    #[test]
    fn test_builtin_instances_cover() {
        for size in [InstanceSize::Small, InstanceSize::Medium, InstanceSize::Large] {
            let p = SetCovering::instance(size, 10).unwrap();
            let all = p.empty_solution();
            assert!(p.feasible(&all).unwrap(), "{size:?}: all subsets must cover");
        }
    }

    #[test]
    fn test_uncoverable_universe_rejected() {
        let err = SetCovering::new(4, vec![vec![0, 1], vec![2]], 10).unwrap_err();
        assert!(matches!(err, SearchError::Config(_)));
        assert!(SetCovering::new(2, vec![vec![0, 5]], 10).is_err());
    }

    #[test]
    fn test_small_evaluation() {
        let mut p = SetCovering::instance(InstanceSize::Small, 10).unwrap();
        // {0,1,5,6} {0,1,2} {3,5} plus {4,5,6}
        let mut s = Solution::binary(vec![true, false, true, true, false, true, false]);
        assert!(p.feasible(&s).unwrap());
        assert_eq!(p.evaluate(&mut s).unwrap(), 4.0);

        let mut missing_four = Solution::binary(vec![true, false, true, false, false, true, false]);
        assert!(!p.feasible(&missing_four).unwrap());
        assert_eq!(p.evaluate(&mut missing_four).unwrap(), f64::INFINITY);
        assert_eq!(p.evaluations_used(), 2);
    }

    #[test]
    fn test_empty_initial_selects_everything() {
        let p = SetCovering::instance(InstanceSize::Medium, 10).unwrap();
        let mut rng = create_rng(0);
        let s = p
            .generate_initial_solution(InitialSolution::Empty, &mut rng)
            .unwrap();
        assert!(s.as_bits().unwrap().iter().all(|&b| b));
        let r = p
            .generate_initial_solution(InitialSolution::Random, &mut rng)
            .unwrap();
        assert!(p.feasible(&r).unwrap());
    }

    #[test]
    fn test_random_instance_covers() {
        let mut rng = create_rng(21);
        for _ in 0..10 {
            let p = SetCovering::random(40, 12, 10, &mut rng).unwrap();
            assert!(p.feasible(&p.empty_solution()).unwrap());
            assert!(p.dimension() >= 11);
        }
    }
}
