//! Single-solution local search.
//!
//! One engine, [`LocalSearch`], covers the classic trajectory methods. A
//! variant is a [`NeighborSelection`] paired with an [`Acceptance`] rule:
//!
//! | Preset | Selection | Acceptance |
//! |--------|-----------|------------|
//! | `random_walk` (RandomLS) | random | always |
//! | `hill_climbing` | best | not worse |
//! | `first_improvement` | first improving | improving |
//! | `randomized_hill_climbing` | random w.p. α, else best | always |
//! | `simulated_annealing` | random | Metropolis, geometric cooling |
//! | `tabu` | best non-tabu | always, FIFO tabu list |
//!
//! Neighborhoods come from [`Solution::neighbors`](crate::solution::Solution::neighbors),
//! so only binary and permutation problems are supported.
//!
//! # References
//!
//! - Kirkpatrick, Gelatt & Vecchi (1983), "Optimization by Simulated Annealing"
//! - Glover (1989), "Tabu Search, Part I"
//! - Hoos & Stützle (2004), *Stochastic Local Search: Foundations and Applications*

mod config;
mod runner;
mod tabu;

pub use config::{
    Acceptance, LocalSearchConfig, NeighborSelection, DEFAULT_ALPHA, DEFAULT_GAMMA,
    DEFAULT_INITIAL_TEMPERATURE, DEFAULT_TABU_CAPACITY,
};
pub use runner::LocalSearch;
pub use tabu::TabuList;
