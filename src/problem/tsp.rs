//! Euclidean travelling salesman.

use super::catalog::InstanceSize;
use super::types::{Direction, EvaluationBudget, Problem};
use crate::error::{Result, SearchError};
use crate::solution::{Solution, SolutionKind};
use rand::Rng;

/// Closed-tour TSP over points in the plane.
///
/// The distance matrix is computed once at construction.
#[derive(Debug, Clone)]
pub struct Tsp {
    cities: Vec<(f64, f64)>,
    distances: Vec<Vec<f64>>,
    budget: EvaluationBudget,
}

impl Tsp {
    pub fn new(cities: Vec<(f64, f64)>, max_evaluations: usize) -> Self {
        let distances = cities
            .iter()
            .map(|&(x1, y1)| {
                cities
                    .iter()
                    .map(|&(x2, y2)| ((x1 - x2).powi(2) + (y1 - y2).powi(2)).sqrt())
                    .collect()
            })
            .collect();
        Self {
            cities,
            distances,
            budget: EvaluationBudget::new(max_evaluations),
        }
    }

    /// `side × side` cities evenly spaced on the unit square.
    pub fn grid(side: usize, max_evaluations: usize) -> Self {
        let coord = |i: usize| {
            if side <= 1 {
                0.0
            } else {
                i as f64 / (side - 1) as f64
            }
        };
        let cities = (0..side)
            .flat_map(|i| (0..side).map(move |j| (coord(i), coord(j))))
            .collect();
        Self::new(cities, max_evaluations)
    }

    /// Built-in instance: 4×4, 6×6 or 7×7 grid.
    pub fn instance(size: InstanceSize, max_evaluations: usize) -> Self {
        let side = match size {
            InstanceSize::Small => 4,
            InstanceSize::Medium => 6,
            InstanceSize::Large => 7,
        };
        Self::grid(side, max_evaluations)
    }

    /// `size` cities drawn uniformly from the unit square.
    pub fn random<R: Rng + ?Sized>(size: usize, max_evaluations: usize, rng: &mut R) -> Self {
        let cities = (0..size)
            .map(|_| (rng.random::<f64>(), rng.random::<f64>()))
            .collect();
        Self::new(cities, max_evaluations)
    }

    pub fn cities(&self) -> &[(f64, f64)] {
        &self.cities
    }

    pub fn distance(&self, a: usize, b: usize) -> f64 {
        self.distances[a][b]
    }

    /// Length of the closed tour, including the edge back to the start.
    pub fn tour_length(&self, order: &[usize]) -> f64 {
        if order.len() < 2 {
            return 0.0;
        }
        let closing = self.distance(order[order.len() - 1], order[0]);
        order
            .windows(2)
            .map(|w| self.distance(w[0], w[1]))
            .sum::<f64>()
            + closing
    }
}

impl Problem for Tsp {
    fn name(&self) -> &str {
        "TSP"
    }

    fn direction(&self) -> Direction {
        Direction::Minimize
    }

    fn solution_kind(&self) -> SolutionKind {
        SolutionKind::Permutation
    }

    fn dimension(&self) -> usize {
        self.cities.len()
    }

    fn budget(&self) -> &EvaluationBudget {
        &self.budget
    }

    fn budget_mut(&mut self) -> &mut EvaluationBudget {
        &mut self.budget
    }

    fn objective(&self, solution: &Solution) -> Result<f64> {
        let order = solution
            .as_permutation()
            .ok_or(SearchError::TypeMismatch {
                expected: SolutionKind::Permutation,
                found: solution.kind(),
            })?;
        Ok(self.tour_length(order))
    }

    fn feasible(&self, _solution: &Solution) -> Result<bool> {
        Ok(true)
    }
}
