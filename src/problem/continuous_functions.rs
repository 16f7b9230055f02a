//! Unconstrained continuous test functions (minimized).

use super::catalog::InstanceSize;
use super::types::{Direction, EvaluationBudget, Problem};
use crate::error::{Result, SearchError};
use crate::solution::{Solution, SolutionKind};

/// Which continuous function to minimize.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ContinuousFunctionKind {
    /// `Σ xᵢ²`
    Sphere,
    /// `Σ 100(xᵢ² − xᵢ₊₁)² + (1 − xᵢ)²`
    Rosenbrock,
    /// `−x₀ + 100·√(Σ_{i≥1} xᵢ²)`, unbounded below.
    SharpRidge,
    /// `10⁶·x₀² + Σ_{i≥1} xᵢ²`
    Tablet,
}

impl ContinuousFunctionKind {
    pub fn name(self) -> &'static str {
        match self {
            ContinuousFunctionKind::Sphere => "Sphere",
            ContinuousFunctionKind::Rosenbrock => "Rosenbrock",
            ContinuousFunctionKind::SharpRidge => "SharpRidge",
            ContinuousFunctionKind::Tablet => "Tablet",
        }
    }

    pub fn value(self, x: &[f64]) -> f64 {
        let tail_squares = || x.iter().skip(1).map(|v| v * v).sum::<f64>();
        match self {
            ContinuousFunctionKind::Sphere => x.iter().map(|v| v * v).sum(),
            ContinuousFunctionKind::Rosenbrock => x
                .windows(2)
                .map(|w| 100.0 * (w[0] * w[0] - w[1]).powi(2) + (1.0 - w[0]).powi(2))
                .sum(),
            ContinuousFunctionKind::SharpRidge => match x.first() {
                Some(x0) => -x0 + 100.0 * tail_squares().sqrt(),
                None => 0.0,
            },
            ContinuousFunctionKind::Tablet => match x.first() {
                Some(x0) => 1e6 * x0 * x0 + tail_squares(),
                None => 0.0,
            },
        }
    }
}

/// A continuous function over `size` coordinates.
#[derive(Debug, Clone)]
pub struct ContinuousFunction {
    kind: ContinuousFunctionKind,
    size: usize,
    budget: EvaluationBudget,
}

impl ContinuousFunction {
    pub fn new(kind: ContinuousFunctionKind, size: usize, max_evaluations: usize) -> Self {
        Self {
            kind,
            size,
            budget: EvaluationBudget::new(max_evaluations),
        }
    }

    /// 10, 30 or 100 coordinates.
    pub fn instance(
        kind: ContinuousFunctionKind,
        size: InstanceSize,
        max_evaluations: usize,
    ) -> Self {
        Self::new(kind, size.function_dimension(), max_evaluations)
    }

    pub fn kind(&self) -> ContinuousFunctionKind {
        self.kind
    }
}

impl Problem for ContinuousFunction {
    fn name(&self) -> &str {
        self.kind.name()
    }

    fn direction(&self) -> Direction {
        Direction::Minimize
    }

    fn solution_kind(&self) -> SolutionKind {
        SolutionKind::Real
    }

    fn dimension(&self) -> usize {
        self.size
    }

    fn budget(&self) -> &EvaluationBudget {
        &self.budget
    }

    fn budget_mut(&mut self) -> &mut EvaluationBudget {
        &mut self.budget
    }

    fn objective(&self, solution: &Solution) -> Result<f64> {
        let x = solution.as_reals().ok_or(SearchError::TypeMismatch {
            expected: SolutionKind::Real,
            found: solution.kind(),
        })?;
        Ok(self.kind.value(x))
    }

    fn feasible(&self, _solution: &Solution) -> Result<bool> {
        Ok(true)
    }
}
