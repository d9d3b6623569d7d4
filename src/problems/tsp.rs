//! Closed-tour travelling salesman over a cost matrix.
//!
//! A tour starts and ends at city 0 and visits every other city once, so a
//! tour over `n` cities has `n + 1` entries. Only the interior cities are
//! ever permuted.

use rand::seq::SliceRandom;
use rand::Rng;

use crate::error::{MetaheurError, Result};
use crate::ga::GaProblem;
use crate::operators::{invert_mutation, order_crossover, swap_mutation};
use crate::sa::SaProblem;
use crate::tabu::TabuProblem;

/// A closed tour, `[0, .., 0]`.
pub type Tour = Vec<usize>;

/// Probability that a tweak swaps two cities rather than reversing a segment.
const SWAP_PROBABILITY: f64 = 0.7;

/// Square, possibly asymmetric travel cost matrix.
#[derive(Debug, Clone, PartialEq)]
pub struct CostMatrix {
    costs: Vec<Vec<f64>>,
}

impl CostMatrix {
    /// Builds a matrix, rejecting empty or non-square input.
    pub fn new(costs: Vec<Vec<f64>>) -> Result<Self> {
        if costs.is_empty() {
            return Err(MetaheurError::InvalidInput("cost matrix is empty".into()));
        }
        let n = costs.len();
        if let Some((row, _)) = costs.iter().enumerate().find(|(_, r)| r.len() != n) {
            return Err(MetaheurError::InvalidInput(format!(
                "cost matrix row {row} has {} entries, expected {n}",
                costs[row].len()
            )));
        }
        Ok(Self { costs })
    }

    /// Number of cities.
    pub fn len(&self) -> usize {
        self.costs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.costs.is_empty()
    }

    pub fn cost(&self, from: usize, to: usize) -> f64 {
        self.costs[from][to]
    }

    /// Sum of consecutive leg costs.
    pub fn path_cost(&self, tour: &[usize]) -> f64 {
        tour.windows(2).map(|leg| self.cost(leg[0], leg[1])).sum()
    }

    /// Nearest-neighbor tour from city 0.
    pub fn greedy_tour(&self) -> Tour {
        let n = self.len();
        let mut visited = vec![false; n];
        let mut tour = Vec::with_capacity(n + 1);
        let mut city = 0;
        visited[0] = true;
        tour.push(0);

        while tour.len() < n {
            let next = (0..n)
                .filter(|&c| !visited[c])
                .min_by(|&a, &b| self.cost(city, a).total_cmp(&self.cost(city, b)));
            let Some(next) = next else { break };
            visited[next] = true;
            tour.push(next);
            city = next;
        }
        tour.push(0);
        tour
    }

    /// Uniformly random tour from city 0.
    pub fn random_tour<R: Rng>(&self, rng: &mut R) -> Tour {
        let mut tour: Tour = (0..=self.len()).map(|c| c % self.len()).collect();
        let last = tour.len() - 1;
        if last > 1 {
            tour[1..last].shuffle(rng);
        }
        tour
    }

    /// Swaps two interior cities (70%) or reverses an interior segment.
    pub fn tweak<R: Rng>(&self, mut tour: Tour, rng: &mut R) -> Tour {
        let Some(interior) = interior_mut(&mut tour) else {
            return tour;
        };
        if rng.random_bool(SWAP_PROBABILITY) {
            swap_mutation(interior, rng);
        } else {
            invert_mutation(interior, rng);
        }
        tour
    }
}

fn interior_mut(tour: &mut [usize]) -> Option<&mut [usize]> {
    let len = tour.len();
    (len > 2).then(|| &mut tour[1..len - 1])
}

/// Tour search with a greedy start.
#[derive(Debug, Clone)]
pub struct TspProblem {
    matrix: CostMatrix,
    random_start: bool,
}

impl TspProblem {
    pub fn new(matrix: CostMatrix) -> Self {
        Self {
            matrix,
            random_start: false,
        }
    }

    /// Starts from a random tour instead of the nearest-neighbor tour.
    pub fn with_random_start(mut self) -> Self {
        self.random_start = true;
        self
    }

    pub fn matrix(&self) -> &CostMatrix {
        &self.matrix
    }

    fn start<R: Rng>(&self, rng: &mut R) -> Tour {
        if self.random_start {
            self.matrix.random_tour(rng)
        } else {
            self.matrix.greedy_tour()
        }
    }

    /// `population` random tours, the greedy tour first.
    pub fn first_generation<R: Rng>(&self, population: usize, rng: &mut R) -> Vec<Tour> {
        let mut tours = Vec::with_capacity(population);
        if population > 0 {
            tours.push(self.matrix.greedy_tour());
        }
        while tours.len() < population {
            tours.push(self.matrix.random_tour(rng));
        }
        tours
    }
}

impl TabuProblem for TspProblem {
    type Solution = Tour;

    fn initial_solution<R: Rng>(&self, rng: &mut R) -> Tour {
        self.start(rng)
    }

    fn quality(&self, tour: &Tour) -> f64 {
        self.matrix.path_cost(tour)
    }

    fn tweak<R: Rng>(&self, tour: Tour, rng: &mut R) -> Tour {
        self.matrix.tweak(tour, rng)
    }
}

impl SaProblem for TspProblem {
    type Solution = Tour;

    fn initial_solution<R: Rng>(&self, rng: &mut R) -> Tour {
        self.start(rng)
    }

    fn quality(&self, tour: &Tour) -> f64 {
        self.matrix.path_cost(tour)
    }

    fn tweak<R: Rng>(&self, tour: Tour, rng: &mut R) -> Tour {
        self.matrix.tweak(tour, rng)
    }
}

impl GaProblem for TspProblem {
    type Individual = Tour;

    fn fitness(&self, tour: &Tour) -> f64 {
        self.matrix.path_cost(tour)
    }

    /// Order crossover on the interior cities.
    fn crossover<R: Rng>(&self, [a, b]: [Tour; 2], rng: &mut R) -> [Tour; 2] {
        if a.len() != b.len() || a.len() < 4 {
            return [a, b];
        }
        let last = a.len() - 1;
        let (c1, c2) = order_crossover(&a[1..last], &b[1..last], rng);
        let close = |interior: Vec<usize>| {
            let mut tour = Vec::with_capacity(last + 1);
            tour.push(0);
            tour.extend(interior);
            tour.push(0);
            tour
        };
        [close(c1), close(c2)]
    }

    fn mutate<R: Rng>(&self, tour: Tour, rng: &mut R) -> Tour {
        self.matrix.tweak(tour, rng)
    }
}
