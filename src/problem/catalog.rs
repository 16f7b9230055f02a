//! Built-in benchmark instances.

use super::binary_functions::{BinaryFunction, BinaryFunctionKind};
use super::continuous_functions::{ContinuousFunction, ContinuousFunctionKind};
use super::knapsack::Knapsack;
use super::set_covering::SetCovering;
use super::tsp::Tsp;
use super::types::Problem;
use crate::error::{Result, SearchError};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

/// Size class of a built-in instance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum InstanceSize {
    Small,
    Medium,
    Large,
}

impl InstanceSize {
    /// Dimension of the test functions: 10, 30 or 100.
    pub fn function_dimension(self) -> usize {
        match self {
            InstanceSize::Small => 10,
            InstanceSize::Medium => 30,
            InstanceSize::Large => 100,
        }
    }
}

impl FromStr for InstanceSize {
    type Err = SearchError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "small" => Ok(InstanceSize::Small),
            "medium" => Ok(InstanceSize::Medium),
            "large" => Ok(InstanceSize::Large),
            other => Err(SearchError::config(format!("unknown instance size '{other}'"))),
        }
    }
}

/// Identifier of a benchmark problem.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ProblemId {
    Knapsack,
    SetCovering,
    Tsp,
    OneMax,
    LeadingOnes,
    BinVal,
    Sphere,
    Rosenbrock,
    SharpRidge,
    Tablet,
}

impl ProblemId {
    pub const ALL: [ProblemId; 10] = [
        ProblemId::Knapsack,
        ProblemId::SetCovering,
        ProblemId::Tsp,
        ProblemId::OneMax,
        ProblemId::LeadingOnes,
        ProblemId::BinVal,
        ProblemId::Sphere,
        ProblemId::Rosenbrock,
        ProblemId::SharpRidge,
        ProblemId::Tablet,
    ];

    /// Lowercase key used by [`setup_problems`].
    pub fn key(self) -> &'static str {
        match self {
            ProblemId::Knapsack => "knapsack",
            ProblemId::SetCovering => "set_covering",
            ProblemId::Tsp => "tsp",
            ProblemId::OneMax => "onemax",
            ProblemId::LeadingOnes => "leadingones",
            ProblemId::BinVal => "binval",
            ProblemId::Sphere => "sphere",
            ProblemId::Rosenbrock => "rosenbrock",
            ProblemId::SharpRidge => "sharpridge",
            ProblemId::Tablet => "tablet",
        }
    }

    /// Builds the built-in instance of this problem.
    pub fn build(self, size: InstanceSize, max_evaluations: usize) -> Result<Box<dyn Problem>> {
        let problem: Box<dyn Problem> = match self {
            ProblemId::Knapsack => Box::new(Knapsack::instance(size, max_evaluations)),
            ProblemId::SetCovering => Box::new(SetCovering::instance(size, max_evaluations)?),
            ProblemId::Tsp => Box::new(Tsp::instance(size, max_evaluations)),
            ProblemId::OneMax => binary(BinaryFunctionKind::OneMax, size, max_evaluations),
            ProblemId::LeadingOnes => binary(BinaryFunctionKind::LeadingOnes, size, max_evaluations),
            ProblemId::BinVal => binary(BinaryFunctionKind::BinVal, size, max_evaluations),
            ProblemId::Sphere => continuous(ContinuousFunctionKind::Sphere, size, max_evaluations),
            ProblemId::Rosenbrock => {
                continuous(ContinuousFunctionKind::Rosenbrock, size, max_evaluations)
            }
            ProblemId::SharpRidge => {
                continuous(ContinuousFunctionKind::SharpRidge, size, max_evaluations)
            }
            ProblemId::Tablet => continuous(ContinuousFunctionKind::Tablet, size, max_evaluations),
        };
        Ok(problem)
    }
}

fn binary(kind: BinaryFunctionKind, size: InstanceSize, max_evaluations: usize) -> Box<dyn Problem> {
    Box::new(BinaryFunction::instance(kind, size, max_evaluations))
}

fn continuous(
    kind: ContinuousFunctionKind,
    size: InstanceSize,
    max_evaluations: usize,
) -> Box<dyn Problem> {
    Box::new(ContinuousFunction::instance(kind, size, max_evaluations))
}

impl fmt::Display for ProblemId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

impl FromStr for ProblemId {
    type Err = SearchError;

    fn from_str(s: &str) -> Result<Self> {
        let key = s.to_ascii_lowercase();
        if key == "knapsac" {
            return Ok(ProblemId::Knapsack);
        }
        ProblemId::ALL
            .into_iter()
            .find(|id| id.key() == key)
            .ok_or_else(|| SearchError::config(format!("unknown problem '{s}'")))
    }
}

/// Every built-in problem at one size, keyed by [`ProblemId::key`].
pub fn setup_problems(
    size: InstanceSize,
    max_evaluations: usize,
) -> Result<BTreeMap<&'static str, Box<dyn Problem>>> {
    ProblemId::ALL
        .into_iter()
        .map(|id| Ok((id.key(), id.build(size, max_evaluations)?)))
        .collect()
}
