//! Core traits for Simulated Annealing.

use rand::Rng;

/// Defines a Simulated Annealing problem.
///
/// The user implements the initial solution, the quality function and the
/// tweak. The SA framework handles temperature management, the acceptance
/// criterion, cooling and the time budget.
///
/// # Ownership
///
/// [`tweak`](SaProblem::tweak) receives an owned clone of the current
/// solution, so it is free to mutate it in place and return it.
///
/// # Examples
///
/// ```ignore
/// struct TourProblem { distances: Vec<Vec<f64>> }
///
/// impl SaProblem for TourProblem {
///     type Solution = Vec<usize>;
///
///     fn initial_solution<R: Rng>(&self, _rng: &mut R) -> Vec<usize> {
///         (0..self.distances.len()).collect()
///     }
///
///     fn quality(&self, tour: &Vec<usize>) -> f64 {
///         tour.windows(2).map(|w| self.distances[w[0]][w[1]]).sum()
///     }
///
///     fn tweak<R: Rng>(&self, mut tour: Vec<usize>, rng: &mut R) -> Vec<usize> {
///         let i = rng.random_range(0..tour.len());
///         let j = rng.random_range(0..tour.len());
///         tour.swap(i, j);
///         tour
///     }
/// }
/// ```
pub trait SaProblem {
    /// The solution representation type.
    type Solution: Clone;

    /// Creates the starting solution.
    fn initial_solution<R: Rng>(&self, rng: &mut R) -> Self::Solution;

    /// Evaluates a solution. The direction is set in the config.
    fn quality(&self, solution: &Self::Solution) -> f64;

    /// Produces a neighbor from an owned copy of the current solution.
    fn tweak<R: Rng>(&self, solution: Self::Solution, rng: &mut R) -> Self::Solution;
}

/// A cooling schedule: maps the current temperature and the 1-based
/// iteration index to the next temperature.
///
/// Closures of the form `Fn(f64, usize) -> f64` are schedules too.
pub trait Cooling {
    /// Returns the temperature to use after `iteration`.
    fn next_temperature(&self, temperature: f64, iteration: usize) -> f64;
}

impl<F> Cooling for F
where
    F: Fn(f64, usize) -> f64,
{
    fn next_temperature(&self, temperature: f64, iteration: usize) -> f64 {
        self(temperature, iteration)
    }
}
