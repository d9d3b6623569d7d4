//! Anytime metaheuristic optimization framework.
//!
//! A family of time-budgeted search drivers that minimize or maximize an
//! arbitrary quality function over an arbitrary solution representation.
//! Every driver returns the best solution observed before its wall-clock
//! budget runs out.
//!
//! - **Local Search (LS)**: Hill climbing, iterated local search with a
//!   perturbed home base, or random restarts.
//! - **Simulated Annealing (SA)**: Single-solution trajectory optimization
//!   with pluggable cooling schedules.
//! - **Tabu Search (TS)**: Single-solution trajectory optimization using
//!   short-term memory (tabu list) to escape local optima.
//! - **Genetic Algorithm (GA)**: Population-based evolutionary optimization
//!   with pluggable selection, crossover, and mutation operators.
//!
//! # Architecture
//!
//! Drivers know nothing about the problems they solve. A problem plugs in
//! by implementing the driver's trait ([`ls::LsProblem`],
//! [`sa::SaProblem`], [`tabu::TabuProblem`], [`ga::GaProblem`]). The
//! [`problems`] module ships reference adapters (continuous benchmark
//! functions, travelling salesman, maze path-finding, word scoring) that
//! the `anytime` binary exposes on the command line.

pub mod budget;
pub mod direction;
pub mod error;
pub mod ga;
pub mod ls;
pub mod operators;
pub mod problems;
pub mod random;
pub mod sa;
pub mod tabu;

pub use budget::TimeBudget;
pub use direction::Direction;
pub use error::{MetaheurError, Result};
