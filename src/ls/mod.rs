//! Local Search / Iterated Local Search (ILS).
//!
//! Repeated short hill climbs separated by perturbations of the best-known
//! home base. With [`Perturbation::RandomRestart`] it becomes hill climbing
//! with random restarts, and [`LsConfig::hill_climbing`] gives a single
//! uninterrupted climb.

mod config;
mod runner;
mod types;

pub use config::{InnerBudget, LsConfig, Perturbation};
pub use runner::{LsResult, LsRunner};
pub use types::LsProblem;
