//! End-to-end driver scenarios against small hand-built problems.

use std::cell::Cell;
use std::time::{Duration, Instant};

use anytime_metaheur::ga::{GaConfig, GaProblem, GaRunner};
use anytime_metaheur::ls::{LsConfig, LsProblem, LsRunner};
use anytime_metaheur::problems::tsp::{CostMatrix, TspProblem};
use anytime_metaheur::sa::{SaConfig, SaProblem, SaRunner};
use anytime_metaheur::tabu::{TabuConfig, TabuProblem, TabuRunner};
use anytime_metaheur::MetaheurError;
use rand::Rng;
use rand_distr::{Distribution, Normal};

/// Slack allowed past the deadline: one unit of work plus scheduling noise.
const DEADLINE_SLACK: Duration = Duration::from_millis(250);

// ---- x^2 starting from 5 ----

struct Parabola {
    noise: Normal<f64>,
}

impl Parabola {
    fn new(sigma: f64) -> Self {
        Self {
            noise: Normal::new(0.0, sigma).unwrap(),
        }
    }
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
        x + self.noise.sample(rng)
    }
}

impl SaProblem for Parabola {
    type Solution = f64;

    fn initial_solution<R: Rng>(&self, _rng: &mut R) -> f64 {
        5.0
    }

    fn quality(&self, x: &f64) -> f64 {
        x * x
    }

    fn tweak<R: Rng>(&self, x: f64, rng: &mut R) -> f64 {
        x + self.noise.sample(rng)
    }
}

// ---- A tweak that never changes anything ----

struct Frozen;

impl SaProblem for Frozen {
    type Solution = Vec<u8>;

    fn initial_solution<R: Rng>(&self, _rng: &mut R) -> Vec<u8> {
        vec![3, 1, 4]
    }

    fn quality(&self, s: &Vec<u8>) -> f64 {
        s.iter().map(|&v| f64::from(v)).sum()
    }

    fn tweak<R: Rng>(&self, s: Vec<u8>, _rng: &mut R) -> Vec<u8> {
        s
    }
}

impl TabuProblem for Frozen {
    type Solution = Vec<u8>;

    fn initial_solution<R: Rng>(&self, _rng: &mut R) -> Vec<u8> {
        vec![3, 1, 4]
    }

    fn quality(&self, s: &Vec<u8>) -> f64 {
        s.iter().map(|&v| f64::from(v)).sum()
    }

    fn tweak<R: Rng>(&self, s: Vec<u8>, _rng: &mut R) -> Vec<u8> {
        s
    }
}

// ---- A tweak that always worsens ----

struct Uphill;

impl SaProblem for Uphill {
    type Solution = i64;

    fn initial_solution<R: Rng>(&self, _rng: &mut R) -> i64 {
        0
    }

    fn quality(&self, x: &i64) -> f64 {
        *x as f64
    }

    fn tweak<R: Rng>(&self, x: i64, rng: &mut R) -> i64 {
        x + rng.random_range(1..10)
    }
}

// ---- GA that counts operator calls ----

#[derive(Default)]
struct CountingGa {
    crossovers: Cell<usize>,
    mutations: Cell<usize>,
}

impl GaProblem for CountingGa {
    type Individual = u32;

    fn fitness(&self, x: &u32) -> f64 {
        f64::from(*x)
    }

    fn crossover<R: Rng>(&self, parents: [u32; 2], _rng: &mut R) -> [u32; 2] {
        self.crossovers.set(self.crossovers.get() + 1);
        parents
    }

    fn mutate<R: Rng>(&self, x: u32, _rng: &mut R) -> u32 {
        self.mutations.set(self.mutations.get() + 1);
        x + 1
    }
}

fn assert_within_deadline(elapsed: Duration, timeout: Duration) {
    assert!(elapsed >= timeout, "stopped early: {elapsed:?} < {timeout:?}");
    assert!(
        elapsed <= timeout + DEADLINE_SLACK,
        "overran: {elapsed:?} > {timeout:?} + slack"
    );
}

#[test]
fn ils_descends_parabola_from_five() {
    let config = LsConfig::default()
        .with_timeout(Duration::from_millis(500))
        .with_seed(17);
    let result = LsRunner::run(&Parabola::new(1e-4), &config).unwrap();

    assert!(result.best_quality < 25.0);
    assert!(result.best.abs() < 1e-3, "x = {}", result.best);
    assert!(result
        .quality_history
        .windows(2)
        .all(|w| w[1] < w[0]));
}

#[test]
fn tabu_on_uniform_matrix_costs_city_count() {
    let n = 4;
    let costs = (0..n)
        .map(|i| (0..n).map(|j| if i == j { 0.0 } else { 1.0 }).collect())
        .collect();
    let problem = TspProblem::new(CostMatrix::new(costs).unwrap());
    let config = TabuConfig::scaled(n)
        .with_timeout(Duration::from_millis(50))
        .with_seed(1);

    let result = TabuRunner::run(&problem, &config);
    assert_eq!(result.best_quality, 4.0);
    assert_eq!(result.best.first(), Some(&0));
    assert_eq!(result.best.last(), Some(&0));
}

#[test]
fn sa_at_zero_temperature_never_worsens() {
    let config = SaConfig::default()
        .with_initial_temperature(0.0)
        .with_timeout(Duration::from_millis(30))
        .with_seed(2);
    let result = SaRunner::run(&Uphill, &config).unwrap();

    assert!(result.iterations > 0);
    assert_eq!(result.accepted_moves, 0);
    assert_eq!(result.best, 0);
    assert_eq!(result.best_quality, 0.0);
}

#[test]
fn identity_tweak_returns_initial_solution() {
    let timeout = Duration::from_millis(30);

    let sa = SaRunner::run(&Frozen, &SaConfig::default().with_timeout(timeout)).unwrap();
    assert_eq!(sa.best, vec![3, 1, 4]);
    assert_eq!(sa.best_quality, 8.0);

    let tabu = TabuRunner::run(&Frozen, &TabuConfig::default().with_timeout(timeout));
    assert_eq!(tabu.best, vec![3, 1, 4]);
    assert_eq!(tabu.best_quality, 8.0);
    assert!(tabu.improvements.is_empty());
    assert_eq!(tabu.stalls, tabu.iterations);
}

#[test]
fn ga_full_elite_only_reports_first_generation() {
    let problem = CountingGa::default();
    let config = GaConfig::default()
        .with_population_size(4)
        .with_elite_size(4)
        .with_timeout(Duration::from_millis(20))
        .with_seed(3);

    let result = GaRunner::run(&problem, &config, vec![9, 4, 7, 6]).unwrap();
    assert_eq!(result.best, 4);
    assert_eq!(result.best_fitness, 4.0);
    assert_eq!(problem.crossovers.get(), 0);
    assert_eq!(problem.mutations.get(), 0);
}

#[test]
fn ga_rejects_clone_population() {
    let config = GaConfig::default()
        .with_population_size(4)
        .with_elite_size(2)
        .with_timeout(Duration::from_millis(20));

    let err = GaRunner::run(&CountingGa::default(), &config, vec![5, 5, 5]).unwrap_err();
    assert_eq!(err, MetaheurError::PopulationTooSmall { distinct: 1 });
}

#[test]
fn every_driver_respects_its_deadline() {
    let timeout = Duration::from_millis(80);

    let started = Instant::now();
    let ls = LsRunner::run(
        &Parabola::new(0.1),
        &LsConfig::default().with_timeout(timeout).with_seed(1),
    )
    .unwrap();
    assert_within_deadline(ls.elapsed, timeout);
    assert!(started.elapsed() <= timeout + DEADLINE_SLACK);

    let sa = SaRunner::run(
        &Parabola::new(0.1),
        &SaConfig::default().with_timeout(timeout).with_seed(1),
    )
    .unwrap();
    assert_within_deadline(sa.elapsed, timeout);

    let tsp = TspProblem::new(CostMatrix::new(vec![vec![1.0; 12]; 12]).unwrap());
    let tabu = TabuRunner::run(&tsp, &TabuConfig::scaled(12).with_timeout(timeout).with_seed(1));
    assert_within_deadline(tabu.elapsed, timeout);

    let ga = GaRunner::run(
        &CountingGa::default(),
        &GaConfig::default().with_timeout(timeout).with_seed(1),
        (0..10).collect(),
    )
    .unwrap();
    assert_within_deadline(ga.elapsed, timeout);
}

#[test]
fn zero_budget_returns_initial_quality_everywhere() {
    let sa = SaRunner::run(&Parabola::new(0.1), &SaConfig::default().with_timeout_secs(0.0))
        .unwrap();
    assert_eq!(sa.best_quality, 25.0);
    assert_eq!(sa.iterations, 0);

    let ls = LsRunner::run(&Parabola::new(0.1), &LsConfig::default().with_timeout_secs(-1.0))
        .unwrap();
    assert_eq!(ls.best_quality, 25.0);

    let tabu = TabuRunner::run(&Frozen, &TabuConfig::default().with_timeout(Duration::ZERO));
    assert_eq!(tabu.iterations, 0);
    assert_eq!(tabu.best_quality, 8.0);

    let ga = GaRunner::run(
        &CountingGa::default(),
        &GaConfig::default().with_timeout(Duration::ZERO),
        vec![3, 2, 8],
    )
    .unwrap();
    assert_eq!(ga.best_fitness, 2.0);
    assert_eq!(ga.generations, 0);
}
