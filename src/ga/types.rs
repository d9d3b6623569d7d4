//! Core trait definitions for the GA framework.
//!
//! [`GaProblem`] defines the contract between the generic GA engine and
//! domain-specific problem implementations. [`Scored`] pairs an individual
//! with its cached fitness so the engine evaluates each individual once.

use rand::Rng;

use super::selection::Selection;
use crate::direction::Direction;

/// An individual together with its evaluated fitness.
#[derive(Debug, Clone, PartialEq)]
pub struct Scored<I> {
    /// The individual.
    pub individual: I,
    /// Its fitness, as returned by [`GaProblem::fitness`].
    pub fitness: f64,
}

/// Defines a GA optimization problem.
///
/// This is the main trait that users implement to plug their domain-specific
/// logic into the generic GA framework. It covers:
///
/// 1. **Evaluation**: How to compute fitness
/// 2. **Crossover**: How to recombine two parents into two children
/// 3. **Mutation**: How to perturb a child
/// 4. **Selection** (optional): How to pick a parent
///
/// The first generation is passed to the runner directly.
///
/// # Ownership
///
/// Crossover and mutation receive owned clones; they may consume and
/// modify their inputs freely.
///
/// # Equality
///
/// Individuals must be comparable: elitist runs collapse structurally
/// equal individuals and require two *distinct* parents per crossover.
pub trait GaProblem {
    /// The individual (solution) type for this problem.
    type Individual: Clone + PartialEq;

    /// Evaluates an individual. The direction is set in the config.
    fn fitness(&self, individual: &Self::Individual) -> f64;

    /// Recombines two parents into two children.
    ///
    /// The default implementation returns the parents unchanged.
    fn crossover<R: Rng>(
        &self,
        parents: [Self::Individual; 2],
        _rng: &mut R,
    ) -> [Self::Individual; 2] {
        parents
    }

    /// Mutates an owned child and returns it.
    ///
    /// The default implementation is the identity.
    fn mutate<R: Rng>(&self, individual: Self::Individual, _rng: &mut R) -> Self::Individual {
        individual
    }

    /// Picks the index of one parent.
    ///
    /// The default implementation applies the configured [`Selection`]
    /// strategy. Overrides must return a valid index; `population` is never
    /// empty.
    fn select<R: Rng>(
        &self,
        population: &[Scored<Self::Individual>],
        selection: Selection,
        direction: Direction,
        rng: &mut R,
    ) -> usize {
        selection.select(population, direction, rng)
    }

    /// Called at the end of each generation.
    ///
    /// Useful for logging or checking invariants. The default
    /// implementation is a no-op.
    fn on_generation(
        &self,
        _generation: usize,
        _population: &[Scored<Self::Individual>],
        _best_fitness: f64,
    ) {
    }
}
