//! Core trait for Local Search / Iterated Local Search.

use rand::Rng;

/// Defines a problem for (iterated) local search.
///
/// Two neighborhoods are needed: a small tweak used by the inner
/// hill-climbing loop, and a large tweak used to escape a local optimum by
/// perturbing the home base. Both receive owned copies.
pub trait LsProblem {
    /// The solution representation type.
    type Solution: Clone;

    /// Creates a starting solution. Also used for random restarts.
    fn initial_solution<R: Rng>(&self, rng: &mut R) -> Self::Solution;

    /// Evaluates a solution. The direction is set in the config.
    fn quality(&self, solution: &Self::Solution) -> f64;

    /// Small perturbation for hill climbing.
    fn small_tweak<R: Rng>(&self, solution: Self::Solution, rng: &mut R) -> Self::Solution;

    /// Large perturbation applied to the home base between climbs.
    ///
    /// Defaults to the small tweak.
    fn large_tweak<R: Rng>(&self, solution: Self::Solution, rng: &mut R) -> Self::Solution {
        self.small_tweak(solution, rng)
    }
}
