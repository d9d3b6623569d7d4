//! GA evolutionary loop execution.
//!
//! [`GaRunner`] orchestrates the complete evolutionary process:
//! evaluation → best tracking → elitism → selection → crossover → mutation
//! → truncation → repeat, until the time budget or the stagnation window
//! runs out.

use std::time::Duration;

use rand::Rng;
use tracing::{debug, info, trace};

use super::config::{GaConfig, GaMode};
use super::types::{GaProblem, Scored};
use crate::budget::TimeBudget;
use crate::direction::Direction;
use crate::error::{MetaheurError, Result};
use crate::random::rng_from;

/// Selection draws for parent B before falling back to a uniform pick
/// among the other individuals.
const MAX_PARENT_DRAWS: usize = 64;

/// Result of a GA optimization run.
///
/// Contains the best solution found, along with statistics about the
/// evolutionary process.
#[derive(Debug, Clone)]
pub struct GaResult<I> {
    /// The best individual observed during the entire run.
    pub best: I,

    /// Fitness of the best individual.
    pub best_fitness: f64,

    /// Total number of completed generations.
    pub generations: usize,

    /// Whether the run stopped because the stagnation window elapsed.
    pub stagnated: bool,

    /// Wall-clock time actually spent.
    pub elapsed: Duration,

    /// Best fitness at the start and at the end of each generation.
    pub fitness_history: Vec<f64>,

    /// The population when the run stopped.
    pub final_population: Vec<Scored<I>>,
}

/// Executes the GA evolutionary loop.
///
/// # Usage
///
/// ```ignore
/// let problem = MyProblem::new();
/// let config = GaConfig::default().with_seed(42);
/// let result = GaRunner::run(&problem, &config, first_generation)?;
/// println!("Best fitness: {}", result.best_fitness);
/// ```
pub struct GaRunner;

impl GaRunner {
    /// Runs the GA optimization starting from `first_generation`.
    ///
    /// # Errors
    ///
    /// - [`MetaheurError::InvalidConfig`] if the configuration is invalid.
    /// - [`MetaheurError::PopulationTooSmall`] if `first_generation` is
    ///   empty, or if an elitist generation must breed but fewer than two
    ///   distinct individuals exist.
    pub fn run<P: GaProblem>(
        problem: &P,
        config: &GaConfig,
        first_generation: Vec<P::Individual>,
    ) -> Result<GaResult<P::Individual>> {
        config.validate()?;
        if first_generation.is_empty() {
            return Err(MetaheurError::PopulationTooSmall { distinct: 0 });
        }

        let budget = TimeBudget::start(config.timeout);
        let mut rng = rng_from(config.seed);
        let direction = config.direction;

        let mut population = evaluate(problem, first_generation);
        let mut best = population[best_index(&population, direction)].clone();
        let mut last_improvement = budget.elapsed();
        let mut fitness_history = vec![best.fitness];
        let mut generations = 0usize;
        let mut stagnated = false;

        debug!(
            event = "ga_start",
            population = population.len(),
            initial_best = best.fitness,
            mode = ?config.mode,
        );

        loop {
            if budget.expired() {
                break;
            }
            if let Some(window) = config.stagnation_window {
                if budget.elapsed().saturating_sub(last_improvement) >= window {
                    stagnated = true;
                    break;
                }
            }

            // 1. Track best
            for scored in &population {
                if direction.is_better(scored.fitness, best.fitness) {
                    best = scored.clone();
                    last_improvement = budget.elapsed();
                }
            }

            // 2-5. Breed the next generation
            population = match config.mode {
                GaMode::Elitist => elitist_generation(problem, config, population, &mut rng)?,
                GaMode::Generational => {
                    generational_generation(problem, config, &population, &mut rng)
                }
            };
            generations += 1;

            fitness_history.push(best.fitness);
            problem.on_generation(generations, &population, best.fitness);
            trace!(
                event = "ga_generation",
                generation = generations,
                population = population.len(),
                best_fitness = best.fitness,
            );
        }

        // Offspring of the last generation have not been scanned yet.
        for scored in &population {
            if direction.is_better(scored.fitness, best.fitness) {
                best = scored.clone();
            }
        }
        if fitness_history.last() != Some(&best.fitness) {
            fitness_history.push(best.fitness);
        }

        let elapsed = budget.elapsed();
        info!(
            event = "ga_end",
            best_fitness = best.fitness,
            generations,
            stagnated,
            duration_ms = elapsed.as_millis() as u64,
        );

        Ok(GaResult {
            best_fitness: best.fitness,
            best: best.individual,
            generations,
            stagnated,
            elapsed,
            fitness_history,
            final_population: population,
        })
    }
}

/// One elitist generation.
fn elitist_generation<P: GaProblem, R: Rng>(
    problem: &P,
    config: &GaConfig,
    population: Vec<Scored<P::Individual>>,
    rng: &mut R,
) -> Result<Vec<Scored<P::Individual>>> {
    let direction = config.direction;

    let mut population = dedup(population);
    sort_best_first(&mut population, direction);

    let elite = config.elite_size.min(population.len());
    let mut next_generation: Vec<Scored<P::Individual>> = population[..elite].to_vec();

    let offspring = config.offspring_per_generation();
    if offspring > 0 {
        if population.len() < 2 {
            return Err(MetaheurError::PopulationTooSmall {
                distinct: population.len(),
            });
        }

        let mut produced = 0usize;
        while produced < offspring {
            let (a, b) = distinct_parents(problem, config, &population, rng);
            let children = problem.crossover(
                [
                    population[a].individual.clone(),
                    population[b].individual.clone(),
                ],
                rng,
            );
            for child in children {
                if produced >= offspring {
                    break;
                }
                let child = problem.mutate(child, rng);
                let fitness = problem.fitness(&child);
                next_generation.push(Scored {
                    individual: child,
                    fitness,
                });
                produced += 1;
            }
        }
    }

    population.extend(next_generation);
    let mut merged = dedup(population);
    sort_best_first(&mut merged, direction);
    merged.truncate(config.population_size);
    Ok(merged)
}

/// One generational replacement: the offspring become the population.
fn generational_generation<P: GaProblem, R: Rng>(
    problem: &P,
    config: &GaConfig,
    population: &[Scored<P::Individual>],
    rng: &mut R,
) -> Vec<Scored<P::Individual>> {
    let offspring = config.offspring_per_generation();
    let mut next_generation = Vec::with_capacity(offspring + 1);

    while next_generation.len() < offspring {
        let a = problem.select(population, config.selection, config.direction, rng);
        let b = problem.select(population, config.selection, config.direction, rng);
        let children = problem.crossover(
            [
                population[a].individual.clone(),
                population[b].individual.clone(),
            ],
            rng,
        );
        for child in children {
            let child = problem.mutate(child, rng);
            let fitness = problem.fitness(&child);
            next_generation.push(Scored {
                individual: child,
                fitness,
            });
        }
    }

    next_generation.truncate(offspring);
    next_generation
}

/// Selects two parents with different indices.
///
/// `population` must be deduplicated and hold at least two individuals, so
/// different indices mean structurally different parents.
fn distinct_parents<P: GaProblem, R: Rng>(
    problem: &P,
    config: &GaConfig,
    population: &[Scored<P::Individual>],
    rng: &mut R,
) -> (usize, usize) {
    let a = problem.select(population, config.selection, config.direction, rng);
    for _ in 0..MAX_PARENT_DRAWS {
        let b = problem.select(population, config.selection, config.direction, rng);
        if b != a {
            return (a, b);
        }
    }
    let r = rng.random_range(0..population.len() - 1);
    (a, if r >= a { r + 1 } else { r })
}

fn evaluate<P: GaProblem>(problem: &P, individuals: Vec<P::Individual>) -> Vec<Scored<P::Individual>> {
    individuals
        .into_iter()
        .map(|individual| {
            let fitness = problem.fitness(&individual);
            Scored {
                individual,
                fitness,
            }
        })
        .collect()
}

/// Drops structurally equal individuals, keeping the first occurrence.
fn dedup<I: PartialEq>(population: Vec<Scored<I>>) -> Vec<Scored<I>> {
    let mut unique: Vec<Scored<I>> = Vec::with_capacity(population.len());
    for scored in population {
        if !unique.iter().any(|u| u.individual == scored.individual) {
            unique.push(scored);
        }
    }
    unique
}

fn sort_best_first<I>(population: &mut [Scored<I>], direction: Direction) {
    population.sort_by(|a, b| direction.best_first(a.fitness, b.fitness));
}

/// Index of the best individual; the first one wins ties.
fn best_index<I>(population: &[Scored<I>], direction: Direction) -> usize {
    let mut best = 0;
    for (i, scored) in population.iter().enumerate().skip(1) {
        if direction.is_better(scored.fitness, population[best].fitness) {
            best = i;
        }
    }
    best
}

// ============================================================================
// Tests
// ============================================================================
