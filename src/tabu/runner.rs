//! Tabu Search execution engine.
//!
//! # Algorithm
//!
//! 1. Start from the initial solution and remember it as tabu
//! 2. At each iteration:
//!    a. Tweak a copy of the current solution into a first candidate
//!    b. Tweak further copies; a non-tabu candidate replaces the selected
//!    one if the selected one is tabu or the new one is strictly better
//!    c. Move to the selected candidate unless it is tabu, and remember it
//!    d. Update the global best if strictly improved
//! 3. Terminate when the time budget expires
//!
//! A non-tabu candidate is always preferred over a tabu one regardless of
//! quality. When every candidate of an iteration is tabu the search stalls
//! in place for that iteration.
//!
//! # Reference
//!
//! Glover, F. (1989). "Tabu Search - Part I", *ORSA Journal on Computing* 1(3), 190-206.

use std::time::Duration;

use tracing::{debug, info};

use super::config::TabuConfig;
use super::list::TabuList;
use super::types::TabuProblem;
use crate::budget::TimeBudget;
use crate::random::rng_from;

/// A new global best found during the run.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Improvement {
    /// Quality of the new best solution.
    pub quality: f64,
    /// Time since the start of the run.
    pub elapsed: Duration,
    /// Iteration in which it was found (1-based).
    pub iteration: usize,
}

/// Result of a Tabu Search run.
#[derive(Debug, Clone)]
pub struct TabuResult<S: Clone> {
    /// Best solution found.
    pub best: S,
    /// Quality of the best solution.
    pub best_quality: f64,
    /// Total iterations executed.
    pub iterations: usize,
    /// Iterations in which every candidate was tabu.
    pub stalls: usize,
    /// Every strict improvement of the global best, in order.
    pub improvements: Vec<Improvement>,
    /// Wall-clock time actually spent.
    pub elapsed: Duration,
}

/// Tabu Search runner.
pub struct TabuRunner;

impl TabuRunner {
    /// Executes Tabu Search on the given problem.
    ///
    /// # Examples
    ///
    /// ```no_run
    /// use anytime_metaheur::tabu::{TabuProblem, TabuConfig, TabuRunner};
    /// use rand::Rng;
    ///
    /// struct Walk;
    /// impl TabuProblem for Walk {
    ///     type Solution = i32;
    ///     fn initial_solution<R: Rng>(&self, _rng: &mut R) -> i32 { 40 }
    ///     fn quality(&self, x: &i32) -> f64 { (*x as f64 - 5.0).abs() }
    ///     fn tweak<R: Rng>(&self, x: i32, rng: &mut R) -> i32 {
    ///         if rng.random_bool(0.5) { x + 1 } else { x - 1 }
    ///     }
    /// }
    ///
    /// let result = TabuRunner::run(&Walk, &TabuConfig::default());
    /// println!("{} -> {}", result.best, result.best_quality);
    /// ```
    pub fn run<P: TabuProblem>(problem: &P, config: &TabuConfig) -> TabuResult<P::Solution> {
        let budget = TimeBudget::start(config.timeout);
        let mut rng = rng_from(config.seed);
        let direction = config.direction;

        let mut current = problem.initial_solution(&mut rng);
        let mut current_quality = problem.quality(&current);
        let mut best = current.clone();
        let mut best_quality = current_quality;

        let mut tabu = TabuList::new(config.tabu_capacity);
        tabu.push(current.clone());

        let mut improvements = Vec::new();
        let mut iterations = 0usize;
        let mut stalls = 0usize;

        debug!(
            event = "tabu_start",
            initial_quality = current_quality,
            tabu_capacity = config.tabu_capacity,
            candidates = config.candidates_per_iteration,
        );

        while !budget.expired() {
            iterations += 1;

            let mut selected = problem.tweak(current.clone(), &mut rng);
            let mut selected_quality = problem.quality(&selected);
            let mut selected_is_tabu = tabu.contains(&selected);

            for _ in 0..config.candidates_per_iteration {
                if budget.expired() {
                    break;
                }
                let candidate = problem.tweak(current.clone(), &mut rng);
                if tabu.contains(&candidate) {
                    continue;
                }
                let candidate_quality = problem.quality(&candidate);
                if selected_is_tabu || direction.is_better(candidate_quality, selected_quality) {
                    selected = candidate;
                    selected_quality = candidate_quality;
                    selected_is_tabu = false;
                }
            }

            if selected_is_tabu {
                stalls += 1;
            } else {
                tabu.push(selected.clone());
                current = selected;
                current_quality = selected_quality;
            }

            if direction.is_better(current_quality, best_quality) {
                best = current.clone();
                best_quality = current_quality;
                let elapsed = budget.elapsed();
                info!(
                    event = "tabu_new_best",
                    quality = best_quality,
                    elapsed_s = elapsed.as_secs_f64(),
                    iteration = iterations,
                );
                improvements.push(Improvement {
                    quality: best_quality,
                    elapsed,
                    iteration: iterations,
                });
            }
        }

        let elapsed = budget.elapsed();
        info!(
            event = "tabu_end",
            best_quality,
            iterations,
            stalls,
            duration_ms = elapsed.as_millis() as u64,
        );

        TabuResult {
            best,
            best_quality,
            iterations,
            stalls,
            improvements,
            elapsed,
        }
    }
}
