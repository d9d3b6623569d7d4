//! SA execution loop.

use std::time::Duration;

use rand::Rng;
use tracing::{debug, info};

use super::config::SaConfig;
use super::types::{Cooling, SaProblem};
use crate::budget::TimeBudget;
use crate::direction::Direction;
use crate::error::Result;
use crate::random::rng_from;

/// Result of a Simulated Annealing run.
#[derive(Debug, Clone)]
pub struct SaResult<S: Clone> {
    /// The best solution found.
    pub best: S,

    /// Quality of the best solution.
    pub best_quality: f64,

    /// Total number of iterations (tweak + evaluation).
    pub iterations: usize,

    /// Temperature when the budget expired.
    pub final_temperature: f64,

    /// Number of accepted moves (including improvements).
    pub accepted_moves: usize,

    /// Number of strictly improving moves.
    pub improving_moves: usize,

    /// Wall-clock time actually spent.
    pub elapsed: Duration,

    /// Best quality after every update of the best solution, starting with
    /// the initial quality.
    pub quality_history: Vec<f64>,
}

/// Executes the Simulated Annealing algorithm.
pub struct SaRunner;

impl SaRunner {
    /// Runs SA with the cooling schedule from the config.
    pub fn run<P: SaProblem>(problem: &P, config: &SaConfig) -> Result<SaResult<P::Solution>> {
        Self::run_with_cooling(problem, config, &config.cooling)
    }

    /// Runs SA with a custom cooling schedule.
    ///
    /// `config.cooling` is ignored; `cooling` is applied after every
    /// iteration with a 1-based iteration index.
    pub fn run_with_cooling<P, C>(
        problem: &P,
        config: &SaConfig,
        cooling: &C,
    ) -> Result<SaResult<P::Solution>>
    where
        P: SaProblem,
        C: Cooling + ?Sized,
    {
        config.validate()?;

        let budget = TimeBudget::start(config.timeout);
        let mut rng = rng_from(config.seed);
        let direction = config.direction;

        let mut current = problem.initial_solution(&mut rng);
        let mut current_quality = problem.quality(&current);
        let mut best = current.clone();
        let mut best_quality = current_quality;
        let mut quality_history = vec![best_quality];

        let mut temperature = config.initial_temperature;
        let mut iterations = 0usize;
        let mut accepted_moves = 0usize;
        let mut improving_moves = 0usize;

        debug!(
            event = "sa_start",
            initial_quality = current_quality,
            initial_temperature = temperature,
            timeout_ms = config.timeout.as_millis() as u64,
        );

        while !budget.expired() {
            iterations += 1;

            let candidate = problem.tweak(current.clone(), &mut rng);
            let candidate_quality = problem.quality(&candidate);

            let accept = if direction.is_at_least_as_good(candidate_quality, current_quality) {
                if direction.is_better(candidate_quality, current_quality) {
                    improving_moves += 1;
                }
                true
            } else {
                metropolis_accept(
                    direction,
                    current_quality,
                    candidate_quality,
                    temperature,
                    &mut rng,
                )
            };

            if accept {
                current = candidate;
                current_quality = candidate_quality;
                accepted_moves += 1;

                if direction.is_at_least_as_good(current_quality, best_quality) {
                    if direction.is_better(current_quality, best_quality) {
                        quality_history.push(current_quality);
                    }
                    best = current.clone();
                    best_quality = current_quality;
                }
            }

            temperature = cooling.next_temperature(temperature, iterations);
        }

        let elapsed = budget.elapsed();
        info!(
            event = "sa_end",
            best_quality,
            iterations,
            accepted_moves,
            final_temperature = temperature,
            duration_ms = elapsed.as_millis() as u64,
        );

        Ok(SaResult {
            best,
            best_quality,
            iterations,
            final_temperature: temperature,
            accepted_moves,
            improving_moves,
            elapsed,
            quality_history,
        })
    }
}

/// Probability of accepting a move from `current` to `candidate` at
/// `temperature` (Metropolis criterion).
///
/// Non-worsening moves have probability 1. For worsening moves the result
/// is `exp(gain / temperature)` where `gain` is negative; a non-positive
/// temperature, a NaN quality or a non-finite exponential all yield 0.
pub fn acceptance_probability(
    direction: Direction,
    current: f64,
    candidate: f64,
    temperature: f64,
) -> f64 {
    let gain = direction.gain(current, candidate);
    if gain >= 0.0 {
        return 1.0;
    }
    if !(temperature > 0.0) {
        return 0.0;
    }
    let probability = (gain / temperature).exp();
    if probability.is_finite() {
        probability
    } else {
        0.0
    }
}

/// Draws one uniform number and applies the Metropolis criterion to a
/// worsening move.
pub fn metropolis_accept<R: Rng>(
    direction: Direction,
    current: f64,
    candidate: f64,
    temperature: f64,
    rng: &mut R,
) -> bool {
    let draw: f64 = rng.random();
    draw < acceptance_probability(direction, current, candidate, temperature)
}
