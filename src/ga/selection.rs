//! Selection strategies for the GA.
//!
//! Selection determines which individuals are chosen as parents for
//! crossover. Different strategies provide different selection pressure.
//! All strategies work on indices, so duplicate individuals are harmless.
//!
//! # References
//!
//! - Blickle & Thiele (1996), "A Comparison of Selection Schemes used in
//!   Evolutionary Algorithms"
//! - Goldberg & Deb (1991), "A Comparative Analysis of Selection Schemes
//!   Used in Genetic Algorithms"

use rand::Rng;

use super::types::Scored;
use crate::direction::Direction;

/// Selection strategy for choosing parents.
///
/// All strategies honour the configured [`Direction`].
///
/// # Examples
///
/// ```
/// use anytime_metaheur::ga::Selection;
///
/// // Tournament with size 4 (moderate selection pressure)
/// let sel = Selection::Tournament(4);
///
/// // Roulette wheel (fitness-proportionate)
/// let sel = Selection::Roulette;
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Selection {
    /// Tournament selection: pick `k` individuals at random (with
    /// replacement), select the best.
    ///
    /// Higher `k` = stronger selection pressure.
    ///
    /// # Complexity
    /// O(k) per selection
    Tournament(usize),

    /// Fitness-proportionate (roulette wheel) selection.
    ///
    /// Weights are the distance from the worst fitness in the population,
    /// plus a small epsilon so that every individual stays selectable.
    ///
    /// # Complexity
    /// O(n) per selection
    Roulette,

    /// Rank-based selection.
    ///
    /// Individuals are sorted by fitness and selection probability is
    /// proportional to rank position, not raw fitness value.
    ///
    /// Reference: Baker (1985), "Adaptive Selection Methods for Genetic
    /// Algorithms"
    ///
    /// # Complexity
    /// O(n log n) per selection
    Rank,
}

impl Default for Selection {
    fn default() -> Self {
        Selection::Tournament(4)
    }
}

impl Selection {
    /// Select a parent index from the population.
    ///
    /// # Panics
    /// Panics if `population` is empty.
    pub fn select<I, R: Rng>(
        &self,
        population: &[Scored<I>],
        direction: Direction,
        rng: &mut R,
    ) -> usize {
        assert!(
            !population.is_empty(),
            "cannot select from empty population"
        );

        match self {
            Selection::Tournament(k) => tournament(population, *k, direction, rng),
            Selection::Roulette => roulette(population, direction, rng),
            Selection::Rank => rank(population, direction, rng),
        }
    }
}

/// Tournament selection: pick k random individuals, return best.
fn tournament<I, R: Rng>(
    population: &[Scored<I>],
    k: usize,
    direction: Direction,
    rng: &mut R,
) -> usize {
    let k = k.max(1);
    let n = population.len();

    let mut best_idx = rng.random_range(0..n);
    for _ in 1..k {
        let idx = rng.random_range(0..n);
        if direction.is_better(population[idx].fitness, population[best_idx].fitness) {
            best_idx = idx;
        }
    }
    best_idx
}

/// Roulette wheel selection on the distance from the worst individual.
fn roulette<I, R: Rng>(population: &[Scored<I>], direction: Direction, rng: &mut R) -> usize {
    let n = population.len();
    if n == 1 {
        return 0;
    }

    let worst = population
        .iter()
        .map(|s| s.fitness)
        .filter(|f| f.is_finite())
        .fold(None, |acc: Option<f64>, f| match acc {
            Some(w) if direction.is_at_least_as_good(f, w) => Some(w),
            _ => Some(f),
        });
    let Some(worst) = worst else {
        return rng.random_range(0..n);
    };

    let epsilon = 1e-10;
    let weights: Vec<f64> = population
        .iter()
        .map(|s| {
            let w = direction.gain(worst, s.fitness) + epsilon;
            if w.is_finite() && w > 0.0 {
                w
            } else {
                epsilon
            }
        })
        .collect();

    let total: f64 = weights.iter().sum();
    if !(total > 0.0) || !total.is_finite() {
        return rng.random_range(0..n);
    }

    let threshold = rng.random_range(0.0..total);
    let mut cumulative = 0.0;
    for (i, &w) in weights.iter().enumerate() {
        cumulative += w;
        if cumulative > threshold {
            return i;
        }
    }

    n - 1 // floating-point fallback
}

/// Rank-based selection using linear ranking.
///
/// Individuals are sorted by fitness (best first), then selection
/// probability is proportional to `n - rank`.
fn rank<I, R: Rng>(population: &[Scored<I>], direction: Direction, rng: &mut R) -> usize {
    let n = population.len();
    if n == 1 {
        return 0;
    }

    let mut indexed: Vec<(usize, f64)> = population
        .iter()
        .enumerate()
        .map(|(i, s)| (i, s.fitness))
        .collect();
    indexed.sort_by(|a, b| direction.best_first(a.1, b.1));

    let total: f64 = (n * (n + 1)) as f64 / 2.0;
    let threshold = rng.random_range(0.0..total);
    let mut cumulative = 0.0;

    for (rank, &(original_idx, _)) in indexed.iter().enumerate() {
        let weight = (n - rank) as f64;
        cumulative += weight;
        if cumulative > threshold {
            return original_idx;
        }
    }

    indexed[n - 1].0 // floating-point fallback
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::random::create_rng;

    fn make_population(fitnesses: &[f64]) -> Vec<Scored<()>> {
        fitnesses
            .iter()
            .map(|&f| Scored {
                individual: (),
                fitness: f,
            })
            .collect()
    }

    fn tally(selection: Selection, pop: &[Scored<()>], direction: Direction) -> Vec<u32> {
        let mut rng = create_rng(42);
        let mut counts = vec![0u32; pop.len()];
        for _ in 0..10000 {
            counts[selection.select(pop, direction, &mut rng)] += 1;
        }
        counts
    }

    #[test]
    fn test_tournament_favors_best() {
        let pop = make_population(&[10.0, 5.0, 1.0, 8.0]);
        let counts = tally(Selection::Tournament(4), &pop, Direction::Minimize);
        assert!(
            counts[2] > 6000,
            "expected best to be selected >60% of the time, got {counts:?}"
        );
    }

    #[test]
    fn test_tournament_maximize_favors_highest() {
        let pop = make_population(&[10.0, 5.0, 1.0, 8.0]);
        let counts = tally(Selection::Tournament(4), &pop, Direction::Maximize);
        assert!(counts[0] > 6000, "got {counts:?}");
    }

    #[test]
    fn test_tournament_size_1_is_random() {
        let pop = make_population(&[10.0, 5.0, 1.0, 8.0]);
        let counts = tally(Selection::Tournament(1), &pop, Direction::Minimize);
        for &c in &counts {
            assert!(c > 1500, "expected uniform, got counts: {counts:?}");
        }
    }

    #[test]
    fn test_roulette_favors_best() {
        let pop = make_population(&[100.0, 50.0, 1.0, 80.0]);
        let counts = tally(Selection::Roulette, &pop, Direction::Minimize);
        assert!(counts[2] > counts[0], "got {counts:?}");

        let counts = tally(Selection::Roulette, &pop, Direction::Maximize);
        assert!(counts[0] > counts[2], "got {counts:?}");
    }

    #[test]
    fn test_rank_favors_best() {
        let pop = make_population(&[100.0, 50.0, 1.0, 80.0]);
        let counts = tally(Selection::Rank, &pop, Direction::Minimize);
        assert!(counts[2] > counts[0], "got {counts:?}");
    }

    #[test]
    fn test_single_individual() {
        let pop = make_population(&[5.0]);
        let mut rng = create_rng(42);
        let d = Direction::Minimize;

        assert_eq!(Selection::Tournament(3).select(&pop, d, &mut rng), 0);
        assert_eq!(Selection::Roulette.select(&pop, d, &mut rng), 0);
        assert_eq!(Selection::Rank.select(&pop, d, &mut rng), 0);
    }

    #[test]
    fn test_equal_fitness_duplicates() {
        let pop = make_population(&[5.0, 5.0, 5.0, 5.0]);
        for selection in [Selection::Tournament(2), Selection::Roulette] {
            let counts = tally(selection, &pop, Direction::Minimize);
            for &c in &counts {
                assert!(c > 1500, "expected roughly uniform, got {counts:?}");
            }
        }
    }

    #[test]
    #[should_panic(expected = "cannot select from empty population")]
    fn test_empty_population_panics() {
        let pop: Vec<Scored<()>> = vec![];
        let mut rng = create_rng(42);
        Selection::Tournament(3).select(&pop, Direction::Minimize, &mut rng);
    }
}
