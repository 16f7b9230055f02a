//! Algorithm protocol shared by every search template.
//!
//! - [`SearchAlgorithm`]: one `step()` per iteration, best-so-far access
//! - [`Incumbent`]: owned clone of the best adopted solution
//! - [`StepRecord`]: per-step report with named extras
//! - [`PopulationStats`]: min/max/average of a population

mod incumbent;
mod stats;
mod types;

pub use incumbent::Incumbent;
pub use stats::PopulationStats;
pub use types::{SearchAlgorithm, StepRecord};
