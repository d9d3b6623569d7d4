//! Core trait for Tabu Search problems.

use rand::Rng;

/// Defines an optimization problem for Tabu Search.
///
/// Users implement this trait to specify:
/// - How to create an initial solution
/// - How to evaluate a solution's quality
/// - How to generate a random neighbor (the tweak)
///
/// Solutions themselves are remembered in the tabu list, so they must be
/// comparable with `PartialEq`.
///
/// # Type Parameters
///
/// * `Solution`: the solution representation (must be `Clone + PartialEq`)
pub trait TabuProblem {
    /// The solution type.
    type Solution: Clone + PartialEq;

    /// Creates the starting solution.
    fn initial_solution<R: Rng>(&self, rng: &mut R) -> Self::Solution;

    /// Evaluates a solution. The direction is set in the config.
    fn quality(&self, solution: &Self::Solution) -> f64;

    /// Produces a neighbor from an owned copy of the current solution.
    fn tweak<R: Rng>(&self, solution: Self::Solution, rng: &mut R) -> Self::Solution;
}
