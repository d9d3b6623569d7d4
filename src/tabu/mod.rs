//! Tabu Search (TS).
//!
//! A single-solution trajectory metaheuristic that remembers recently
//! visited solutions (the tabu list) and refuses to return to them,
//! preventing cycling and encouraging exploration of new regions of the
//! search space.
//!
//! # References
//!
//! - Glover, F. (1989). "Tabu Search - Part I", *ORSA Journal on Computing* 1(3), 190-206.
//! - Glover, F. (1990). "Tabu Search - Part II", *ORSA Journal on Computing* 2(1), 4-32.

mod config;
mod list;
mod runner;
mod types;

pub use config::TabuConfig;
pub use list::TabuList;
pub use runner::{Improvement, TabuResult, TabuRunner};
pub use types::TabuProblem;
