//! Reference problem adapters.
//!
//! Each adapter implements the problem traits of the drivers it suits:
//!
//! | Adapter | LS | SA | Tabu | GA |
//! |---|---|---|---|---|
//! | [`continuous::ContinuousProblem`] | yes | yes | | |
//! | [`blocks::BlockImageProblem`] | | yes | | |
//! | [`tsp::TspProblem`] | | yes | yes | yes |
//! | [`maze::MazeProblem`] | | yes | yes | yes |
//! | [`words::WordsProblem`] | | | | yes |
//!
//! They depend on the drivers, never the other way round.

pub mod blocks;
pub mod continuous;
pub mod maze;
pub mod tsp;
pub mod words;
