//! Evolution strategies for real-valued problems.
//!
//! [`EvolutionStrategy`] keeps a single mean `m` and a scalar step size σ.
//! Each generation samples λ points from `N(m, σ²I)`; the
//! [`MeanUpdate`] rule decides how `m` moves and the [`StepSizeRule`]
//! how σ evolves.
//!
//! # References
//!
//! - Rechenberg (1973), *Evolutionsstrategie*
//! - Schwefel (1981), *Numerical Optimization of Computer Models*
//! - Beyer & Schwefel (2002), "Evolution strategies: A comprehensive introduction"

mod config;
mod runner;

pub use config::{EsConfig, MeanUpdate, StepSizeRule};
pub use runner::EvolutionStrategy;
