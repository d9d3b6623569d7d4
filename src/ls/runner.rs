//! Iterated local search loop.
//!
//! # Algorithm
//!
//! 1. Hill-climb from `current` for a short inner budget, accepting only
//!    strictly better small tweaks
//! 2. Record `current` as best and as home base when at least as good
//! 3. Restart from `large_tweak(homebase)` (or a fresh random solution)
//! 4. Repeat until the outer budget expires
//!
//! # Reference
//!
//! Lourenço, Martin & Stützle (2003), "Iterated Local Search",
//! *Handbook of Metaheuristics*, 320-353.

use std::time::Duration;

use rand::Rng;
use tracing::{debug, info};

use super::config::{InnerBudget, LsConfig, Perturbation};
use super::types::LsProblem;
use crate::budget::TimeBudget;
use crate::error::Result;
use crate::random::rng_from;

/// Result of a local search run.
#[derive(Debug, Clone)]
pub struct LsResult<S: Clone> {
    /// Best solution found.
    pub best: S,
    /// Quality of the best solution.
    pub best_quality: f64,
    /// Number of completed hill-climbing phases.
    pub climbs: usize,
    /// Number of small-tweak evaluations.
    pub evaluations: usize,
    /// Wall-clock time actually spent.
    pub elapsed: Duration,
    /// Best quality after every strict improvement, starting with the
    /// initial quality.
    pub quality_history: Vec<f64>,
}

/// Local search runner.
pub struct LsRunner;

impl LsRunner {
    /// Runs (iterated) local search.
    pub fn run<P: LsProblem>(problem: &P, config: &LsConfig) -> Result<LsResult<P::Solution>> {
        config.validate()?;

        let budget = TimeBudget::start(config.timeout);
        let mut rng = rng_from(config.seed);
        let direction = config.direction;

        let mut current = problem.initial_solution(&mut rng);
        let mut current_quality = problem.quality(&current);
        let mut best = current.clone();
        let mut best_quality = current_quality;
        let mut homebase_quality = current_quality;
        let mut homebase = current.clone();
        let mut quality_history = vec![best_quality];

        let mut climbs = 0usize;
        let mut evaluations = 0usize;

        debug!(
            event = "ls_start",
            initial_quality = current_quality,
            perturbation = ?config.perturbation,
        );

        while !budget.expired() {
            let inner = budget.sub_budget(inner_duration(config.inner_budget, &mut rng));
            while !inner.expired() {
                let candidate = problem.small_tweak(current.clone(), &mut rng);
                let candidate_quality = problem.quality(&candidate);
                evaluations += 1;
                if direction.is_better(candidate_quality, current_quality) {
                    current = candidate;
                    current_quality = candidate_quality;
                }
            }
            climbs += 1;

            if direction.is_at_least_as_good(current_quality, best_quality) {
                if direction.is_better(current_quality, best_quality) {
                    quality_history.push(current_quality);
                }
                best = current.clone();
                best_quality = current_quality;
            }
            if direction.is_at_least_as_good(current_quality, homebase_quality) {
                homebase = current.clone();
                homebase_quality = current_quality;
            }

            current = match config.perturbation {
                Perturbation::Homebase => problem.large_tweak(homebase.clone(), &mut rng),
                Perturbation::RandomRestart => problem.initial_solution(&mut rng),
            };
            current_quality = problem.quality(&current);
        }

        let elapsed = budget.elapsed();
        info!(
            event = "ls_end",
            best_quality,
            climbs,
            evaluations,
            duration_ms = elapsed.as_millis() as u64,
        );

        Ok(LsResult {
            best,
            best_quality,
            climbs,
            evaluations,
            elapsed,
            quality_history,
        })
    }
}

fn inner_duration<R: Rng>(inner: InnerBudget, rng: &mut R) -> Duration {
    match inner {
        InnerBudget::Fixed(d) => d,
        InnerBudget::Random { max } => {
            Duration::from_secs_f64(rng.random_range(0.0..max.as_secs_f64()))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::direction::Direction;
    use rand_distr::{Distribution, Normal};

    // ---- f(x) = x^2 from x = 5 ----

    struct Parabola {
        sigma: f64,
    }

    impl LsProblem for Parabola {
        type Solution = f64;

        fn initial_solution<R: Rng>(&self, _rng: &mut R) -> f64 {
            5.0
        }

        fn quality(&self, x: &f64) -> f64 {
            x * x
        }

        fn small_tweak<R: Rng>(&self, x: f64, rng: &mut R) -> f64 {
            let noise = Normal::new(0.0, self.sigma).map(|n| n.sample(rng)).unwrap_or(0.0);
            x + noise
        }

        fn large_tweak<R: Rng>(&self, x: f64, rng: &mut R) -> f64 {
            x + rng.random_range(-0.5..0.5)
        }
    }

    fn config() -> LsConfig {
        LsConfig::default()
            .with_timeout(Duration::from_millis(100))
            .with_seed(42)
    }

    #[test]
    fn test_ils_improves_parabola() {
        let result = LsRunner::run(&Parabola { sigma: 0.05 }, &config()).unwrap();
        assert!(result.best_quality < 25.0);
        assert!(result.best.abs() < 1.0, "expected x near 0, got {}", result.best);
        assert!(result.climbs >= 2);
    }

    #[test]
    fn test_quality_history_non_increasing() {
        let result = LsRunner::run(&Parabola { sigma: 0.05 }, &config()).unwrap();
        for window in result.quality_history.windows(2) {
            assert!(window[1] < window[0]);
        }
    }

    #[test]
    fn test_zero_timeout_returns_initial() {
        let result = LsRunner::run(
            &Parabola { sigma: 0.05 },
            &config().with_timeout(Duration::ZERO),
        )
        .unwrap();
        assert_eq!(result.best, 5.0);
        assert_eq!(result.best_quality, 25.0);
        assert_eq!(result.climbs, 0);
    }

    #[test]
    fn test_random_restart_variant() {
        let config = config()
            .with_perturbation(Perturbation::RandomRestart)
            .with_inner_budget(InnerBudget::Random {
                max: Duration::from_millis(20),
            });
        let result = LsRunner::run(&Parabola { sigma: 0.05 }, &config).unwrap();
        assert!(result.best_quality < 25.0);
    }

    #[test]
    fn test_maximize_moves_away() {
        let config = config().with_direction(Direction::Maximize);
        let result = LsRunner::run(&Parabola { sigma: 0.05 }, &config).unwrap();
        assert!(result.best_quality > 25.0);
    }

    #[test]
    fn test_plain_hill_climbing_single_climb() {
        let config = LsConfig::hill_climbing(Duration::from_millis(30)).with_seed(1);
        let result = LsRunner::run(&Parabola { sigma: 0.05 }, &config).unwrap();
        assert_eq!(result.climbs, 1);
        assert!(result.best_quality < 25.0);
    }
}
