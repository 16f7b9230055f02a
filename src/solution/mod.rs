//! Candidate solutions.
//!
//! A [`Solution`] is a tagged [`Encoding`] (binary, real or permutation)
//! plus the objective value cached by the last evaluation. Solutions know
//! how to resample themselves ([`Solution::random`]) and how to enumerate
//! their one-move neighborhood ([`Solution::neighbors`]).

mod neighbors;
mod types;

pub use types::{Encoding, Solution, SolutionKind, REAL_LOWER, REAL_UPPER};
