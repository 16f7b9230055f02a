//! Unconstrained pseudo-boolean test functions (maximized).

use super::catalog::InstanceSize;
use super::types::{Direction, EvaluationBudget, Problem};
use crate::error::{Result, SearchError};
use crate::solution::{Solution, SolutionKind};

/// Which pseudo-boolean function to maximize.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum BinaryFunctionKind {
    /// Number of ones.
    OneMax,
    /// Length of the run of ones starting at position 0.
    LeadingOnes,
    /// Bits read as an unsigned number, bit `i` weighing `2^i`.
    BinVal,
}

impl BinaryFunctionKind {
    pub fn name(self) -> &'static str {
        match self {
            BinaryFunctionKind::OneMax => "OneMax",
            BinaryFunctionKind::LeadingOnes => "LeadingOnes",
            BinaryFunctionKind::BinVal => "BinVal",
        }
    }

    pub fn value(self, bits: &[bool]) -> f64 {
        match self {
            BinaryFunctionKind::OneMax => bits.iter().filter(|&&b| b).count() as f64,
            BinaryFunctionKind::LeadingOnes => bits.iter().take_while(|&&b| b).count() as f64,
            BinaryFunctionKind::BinVal => bits
                .iter()
                .enumerate()
                .filter(|(_, &b)| b)
                .map(|(i, _)| 2f64.powi(i as i32))
                .sum(),
        }
    }
}

/// A pseudo-boolean function over `size` bits.
#[derive(Debug, Clone)]
pub struct BinaryFunction {
    kind: BinaryFunctionKind,
    size: usize,
    budget: EvaluationBudget,
}

impl BinaryFunction {
    pub fn new(kind: BinaryFunctionKind, size: usize, max_evaluations: usize) -> Self {
        Self {
            kind,
            size,
            budget: EvaluationBudget::new(max_evaluations),
        }
    }

    /// 10, 30 or 100 bits.
    pub fn instance(kind: BinaryFunctionKind, size: InstanceSize, max_evaluations: usize) -> Self {
        Self::new(kind, size.function_dimension(), max_evaluations)
    }

    pub fn kind(&self) -> BinaryFunctionKind {
        self.kind
    }
}

impl Problem for BinaryFunction {
    fn name(&self) -> &str {
        self.kind.name()
    }

    fn direction(&self) -> Direction {
        Direction::Maximize
    }

    fn solution_kind(&self) -> SolutionKind {
        SolutionKind::Binary
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
        let bits = solution.as_bits().ok_or(SearchError::TypeMismatch {
            expected: SolutionKind::Binary,
            found: solution.kind(),
        })?;
        Ok(self.kind.value(bits))
    }

    fn feasible(&self, _solution: &Solution) -> Result<bool> {
        Ok(true)
    }
}
