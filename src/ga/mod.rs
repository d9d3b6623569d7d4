//! Genetic Algorithm framework.
//!
//! A generic, domain-agnostic GA built on trait-based abstractions.
//! Users define their problem by implementing [`GaProblem`], which specifies
//! how to evaluate, recombine, mutate and (optionally) select individuals,
//! and pass the first generation to [`GaRunner::run`].
//!
//! # Key Types
//!
//! - [`GaConfig`]: Population and elite sizes, selection, mode, budget
//! - [`GaMode`]: Elitist (steady-state) or pure generational replacement
//! - [`GaRunner`]: Executes the evolutionary loop
//! - [`GaResult`]: Final optimization result with statistics
//!
//! # References
//!
//! - Holland (1975), *Adaptation in Natural and Artificial Systems*
//! - Goldberg (1989), *Genetic Algorithms in Search, Optimization, and Machine Learning*
//! - De Jong (2006), *Evolutionary Computation: A Unified Approach*

mod config;
mod runner;
mod selection;
mod types;

pub use config::{GaConfig, GaMode};
pub use runner::{GaResult, GaRunner};
pub use selection::Selection;
pub use types::{GaProblem, Scored};
