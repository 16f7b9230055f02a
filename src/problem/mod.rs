//! Optimization problems.
//!
//! # Problems
//!
//! | Problem | Encoding | Direction | Constraint |
//! |---------|----------|-----------|------------|
//! | [`Knapsack`] | binary | maximize | total volume ≤ capacity |
//! | [`SetCovering`] | binary | minimize | union of chosen subsets = universe |
//! | [`Tsp`] | permutation | minimize | none |
//! | [`BinaryFunction`] (OneMax, LeadingOnes, BinVal) | binary | maximize | none |
//! | [`ContinuousFunction`] (Sphere, Rosenbrock, SharpRidge, Tablet) | real | minimize | none |
//!
//! Every problem carries its own [`EvaluationBudget`]; algorithms stop once
//! [`Problem::no_more_evals`] turns true.

mod binary_functions;
mod catalog;
mod continuous_functions;
mod knapsack;
mod set_covering;
mod tsp;
mod types;

pub use binary_functions::{BinaryFunction, BinaryFunctionKind};
pub use catalog::{setup_problems, InstanceSize, ProblemId};
pub use continuous_functions::{ContinuousFunction, ContinuousFunctionKind};
pub use knapsack::{Item, Knapsack};
pub use set_covering::SetCovering;
pub use tsp::Tsp;
pub use types::{Direction, EvaluationBudget, InitialSolution, Problem};
