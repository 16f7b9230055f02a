//! 0/1 knapsack.
//!
//! Bit `i` selects item `i`. The total volume of the selected items must
//! not exceed the capacity; the objective is their total value, maximized.

use super::catalog::InstanceSize;
use super::types::{Direction, EvaluationBudget, Problem};
use crate::error::{Result, SearchError};
use crate::solution::{Solution, SolutionKind};
use rand::Rng;

/// A knapsack item.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Item {
    pub volume: f64,
    pub value: f64,
}

impl Item {
    pub fn new(volume: f64, value: f64) -> Self {
        Self { volume, value }
    }

    /// Value per unit of volume.
    pub fn density(&self) -> f64 {
        self.value / self.volume
    }
}

fn items(pairs: &[(u32, u32)]) -> Vec<Item> {
    pairs
        .iter()
        .map(|&(vol, val)| Item::new(f64::from(vol), f64::from(val)))
        .collect()
}

// Optimum 70 (volume 40): 1000101111
const SMALL: &[(u32, u32)] = &[
    (5, 4),
    (9, 8),
    (2, 3),
    (1, 1),
    (7, 12),
    (8, 4),
    (9, 13),
    (10, 20),
    (4, 7),
    (5, 14),
];

const MEDIUM: &[(u32, u32)] = &[
    (5, 4),
    (9, 8),
    (2, 3),
    (2, 2),
    (7, 12),
    (8, 4),
    (9, 13),
    (26, 22),
    (4, 7),
    (5, 14),
    (3, 3),
    (9, 7),
    (12, 2),
    (6, 9),
    (5, 3),
    (14, 5),
    (7, 4),
    (1, 6),
    (6, 5),
    (5, 12),
];

const LARGE: &[(u32, u32)] = &[
    (5, 4),
    (9, 8),
    (2, 3),
    (2, 1),
    (7, 12),
    (8, 4),
    (9, 13),
    (26, 20),
    (4, 7),
    (5, 14),
    (3, 3),
    (9, 7),
    (12, 2),
    (6, 9),
    (5, 3),
    (14, 5),
    (24, 24),
    (1, 6),
    (6, 5),
    (5, 12),
    (11, 2),
    (9, 4),
    (1, 3),
    (3, 9),
    (7, 5),
];

/// Knapsack instance.
#[derive(Debug, Clone)]
pub struct Knapsack {
    capacity: f64,
    items: Vec<Item>,
    budget: EvaluationBudget,
}

impl Knapsack {
    pub fn new(capacity: f64, items: Vec<Item>, max_evaluations: usize) -> Self {
        Self {
            capacity,
            items,
            budget: EvaluationBudget::new(max_evaluations),
        }
    }

    /// Built-in instance: 10, 20 or 25 items with capacity 40, 50 or 103.
    pub fn instance(size: InstanceSize, max_evaluations: usize) -> Self {
        let (capacity, data) = match size {
            InstanceSize::Small => (40.0, SMALL),
            InstanceSize::Medium => (50.0, MEDIUM),
            InstanceSize::Large => (103.0, LARGE),
        };
        Self::new(capacity, items(data), max_evaluations)
    }

    /// Random instance: volumes in `1..30`, values in `1..10`.
    pub fn random<R: Rng + ?Sized>(
        size: usize,
        capacity: f64,
        max_evaluations: usize,
        rng: &mut R,
    ) -> Self {
        let items = (0..size)
            .map(|_| {
                Item::new(
                    f64::from(rng.random_range(1u32..30)),
                    f64::from(rng.random_range(1u32..10)),
                )
            })
            .collect();
        Self::new(capacity, items, max_evaluations)
    }

    pub fn capacity(&self) -> f64 {
        self.capacity
    }

    pub fn items(&self) -> &[Item] {
        &self.items
    }

    fn bits<'a>(&self, solution: &'a Solution) -> Result<&'a [bool]> {
        solution.as_bits().ok_or(SearchError::TypeMismatch {
            expected: SolutionKind::Binary,
            found: solution.kind(),
        })
    }

    fn selected<'a>(&'a self, bits: &'a [bool]) -> impl Iterator<Item = &'a Item> + 'a {
        self.items
            .iter()
            .zip(bits)
            .filter_map(|(item, &on)| on.then_some(item))
    }

    /// Total volume of the selected items.
    pub fn volume(&self, solution: &Solution) -> Result<f64> {
        let bits = self.bits(solution)?;
        Ok(self.selected(bits).map(|item| item.volume).sum())
    }
}

impl Problem for Knapsack {
    fn name(&self) -> &str {
        "Knapsack"
    }

    fn direction(&self) -> Direction {
        Direction::Maximize
    }

    fn solution_kind(&self) -> SolutionKind {
        SolutionKind::Binary
    }

    fn dimension(&self) -> usize {
        self.items.len()
    }

    fn budget(&self) -> &EvaluationBudget {
        &self.budget
    }

    fn budget_mut(&mut self) -> &mut EvaluationBudget {
        &mut self.budget
    }

    fn objective(&self, solution: &Solution) -> Result<f64> {
        let bits = self.bits(solution)?;
        Ok(self.selected(bits).map(|item| item.value).sum())
    }

    fn feasible(&self, solution: &Solution) -> Result<bool> {
        Ok(self.volume(solution)? <= self.capacity)
    }

    fn describe(&self, solution: &Solution) -> String {
        let val = solution
            .value()
            .map_or_else(|| "-".to_string(), |v| v.to_string());
        match self.volume(solution) {
            Ok(vol) => format!("val:{val} vol:{vol} sol:{solution}"),
            Err(_) => format!("val:{val} sol:{solution}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::problem::InitialSolution;
    use crate::random::create_rng;

    fn from_str(bits: &str) -> Solution {
        Solution::binary(bits.chars().map(|c| c == '1').collect())
    }

    #[test]
    fn test_small_optimum() {
        let mut p = Knapsack::instance(InstanceSize::Small, 100);
        let mut s = from_str("1000101111");
        let v = p.evaluate(&mut s).unwrap();
        assert_eq!(v, 70.0);
        assert_eq!(p.volume(&s).unwrap(), 40.0);
        assert_eq!(s.value(), Some(70.0));
        assert_eq!(p.evaluations_used(), 1);
    }

    #[test]
    fn test_small_optimum_is_global() {
        let p = Knapsack::instance(InstanceSize::Small, 0);
        let n = p.dimension();
        let mut best = 0.0f64;
        for mask in 0u32..(1 << n) {
            let s = Solution::binary((0..n).map(|i| mask & (1 << i) != 0).collect());
            if p.feasible(&s).unwrap() {
                best = best.max(p.objective(&s).unwrap());
            }
        }
        assert_eq!(best, 70.0);
    }

    #[test]
    fn test_instance_sizes() {
        let medium = Knapsack::instance(InstanceSize::Medium, 1);
        assert_eq!((medium.dimension(), medium.capacity()), (20, 50.0));
        let large = Knapsack::instance(InstanceSize::Large, 1);
        assert_eq!((large.dimension(), large.capacity()), (25, 103.0));
        assert!(large.items().iter().all(|i| i.density() > 0.0));
    }

    #[test]
    fn test_infeasible_gets_worst() {
        let mut p = Knapsack::instance(InstanceSize::Small, 100);
        let mut s = from_str("1111111111");
        assert!(!p.feasible(&s).unwrap());
        assert_eq!(p.evaluate(&mut s).unwrap(), f64::NEG_INFINITY);
        assert_eq!(p.evaluations_used(), 1);
    }

    #[test]
    fn test_type_mismatch() {
        let mut p = Knapsack::instance(InstanceSize::Small, 100);
        let mut s = Solution::real(vec![0.0; 10]);
        assert!(matches!(
            p.evaluate(&mut s),
            Err(SearchError::TypeMismatch { .. })
        ));
        let mut s = Solution::empty(SolutionKind::Binary, 3);
        assert!(matches!(
            p.evaluate(&mut s),
            Err(SearchError::DimensionMismatch { expected: 10, found: 3 })
        ));
        assert_eq!(p.evaluations_used(), 0, "rejected calls consume nothing");
    }

    #[test]
    fn test_random_initial_is_feasible() {
        let p = Knapsack::instance(InstanceSize::Large, 100);
        let mut rng = create_rng(5);
        for _ in 0..20 {
            let s = p
                .generate_initial_solution(InitialSolution::Random, &mut rng)
                .unwrap();
            assert!(p.feasible(&s).unwrap());
        }
        assert_eq!(p.evaluations_used(), 0, "sampling is free");
    }

    #[test]
    fn test_budget_exhaustion() {
        let mut p = Knapsack::instance(InstanceSize::Small, 2);
        let mut s = from_str("0000000000");
        for _ in 0..2 {
            p.evaluate(&mut s).unwrap();
        }
        assert!(!p.no_more_evals());
        p.evaluate(&mut s).unwrap();
        assert!(p.no_more_evals());
        p.reset();
        assert!(!p.no_more_evals());
        assert_eq!(s.value(), Some(0.0));
    }

    #[test]
    fn test_random_instance() {
        let mut rng = create_rng(9);
        let p = Knapsack::random(15, 60.0, 100, &mut rng);
        assert_eq!(p.dimension(), 15);
        assert!(p
            .items()
            .iter()
            .all(|i| (1.0..30.0).contains(&i.volume) && (1.0..10.0).contains(&i.value)));
    }

    #[test]
    fn test_describe_shows_volume() {
        let mut p = Knapsack::instance(InstanceSize::Small, 10);
        let mut s = from_str("1000101111");
        p.evaluate(&mut s).unwrap();
        assert_eq!(p.describe(&s), "val:70 vol:40 sol:1000101111");
    }
}
