//! Benchmark framework for stochastic optimization.
//!
//! Pairs a small set of classic test problems with the metaheuristics
//! usually taught on them, behind one step-wise protocol:
//!
//! - **Solutions**: binary, real and permutation encodings with cached
//!   objective values, random sampling and one-move neighborhoods.
//! - **Problems**: knapsack, set covering, TSP, OneMax, LeadingOnes,
//!   BinVal, Sphere, Rosenbrock, SharpRidge and Tablet, each with an
//!   optimization direction and an evaluation budget.
//! - **Local search**: random walk, hill climbing (best, first-improvement
//!   and randomized), simulated annealing and tabu search.
//! - **Evolution strategy**: isotropic Gaussian sampling around a mean
//!   for real-valued problems.
//! - **Genetic algorithm**: (µ, λ) and (µ + λ) populations with random,
//!   best, roulette and tournament selection.
//! - **Experiments**: string-keyed hyperparameters, an algorithm registry,
//!   repeated seeded runs and summary statistics.
//!
//! # Example
//!
//! ```
//! use u_metabench::experiment::multiple_runs;
//! use u_metabench::params::{AlgorithmKind, AlgorithmParams};
//! use u_metabench::problem::{InstanceSize, Knapsack};
//!
//! let mut problem = Knapsack::instance(InstanceSize::Small, 2000);
//! let params: AlgorithmParams = "selection_population=tournament,k=3,seed=1".parse().unwrap();
//! let series = multiple_runs(AlgorithmKind::MuCommaLambdaGa, &mut problem, &params, 5, 1000).unwrap();
//! let summary = series.summary().unwrap();
//! assert!(summary.max <= 70.0);
//! ```

pub mod algorithm;
pub mod error;
pub mod es;
pub mod experiment;
pub mod ga;
pub mod local_search;
pub mod params;
pub mod problem;
pub mod random;
pub mod solution;

pub use error::{Result, SearchError};
