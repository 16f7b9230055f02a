//! Genetic Algorithm framework.
//!
//! A population search over binary or permutation problems. Each
//! generation draws random parent pairs from the population, recombines
//! them with probability `pc`, mutates each child with probability `pm`,
//! evaluates the λ offspring and selects µ survivors.
//!
//! # Key Types
//!
//! - [`GaConfig`]: µ, λ, rates, operators, survivor selection, presets
//! - [`GeneticAlgorithm`]: Executes the evolutionary loop step by step
//! - [`Selection`] / [`Cdf`]: Random, best, roulette (fitness or rank), tournament
//! - [`Crossover`] / [`Mutation`]: Encoding-checked operator dispatch
//!
//! # Submodules
//!
//! - [`operators`]: Slice-level crossover and mutation operators
//!
//! # References
//!
//! - Holland (1975), *Adaptation in Natural and Artificial Systems*
//! - Goldberg (1989), *Genetic Algorithms in Search, Optimization, and Machine Learning*
//! - De Jong (2006), *Evolutionary Computation: A Unified Approach*

mod config;
pub mod operators;
mod runner;
mod selection;

pub use config::{GaConfig, Replacement};
pub use operators::{Crossover, Mutation};
pub use runner::GeneticAlgorithm;
pub use selection::{Cdf, Selection, DEFAULT_RANK_PRESSURE};
