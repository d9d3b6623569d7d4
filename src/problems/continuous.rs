//! Continuous benchmark functions over `Vec<f64>`.
//!
//! [`ContinuousProblem`] couples a [`Benchmark`] with a Gaussian
//! neighborhood and plugs into local search and simulated annealing.

use rand::Rng;
use rand_distr::{Distribution, Normal};

use crate::error::{MetaheurError, Result};
use crate::ls::LsProblem;
use crate::sa::SaProblem;

/// A point in n-dimensional space.
pub type Point = Vec<f64>;

/// Benchmark objective functions. All have their global minimum at 0.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Benchmark {
    /// HappyCat (Beyer & Finck, 2012); minimum at `(-1, ..., -1)`.
    HappyCat,
    /// Griewank (1981); minimum at the origin.
    Griewank,
    /// Salomon (1996); minimum at the origin, rippled by `cos(2π‖x‖)`.
    Salomon,
    /// Sum of squares.
    Sphere,
}

impl Benchmark {
    /// Evaluates the function at `x`.
    pub fn evaluate(self, x: &[f64]) -> f64 {
        match self {
            Benchmark::HappyCat => happy_cat(x),
            Benchmark::Griewank => griewank(x),
            Benchmark::Salomon => salomon(x),
            Benchmark::Sphere => squared_norm(x),
        }
    }
}

fn squared_norm(x: &[f64]) -> f64 {
    x.iter().map(|v| v * v).sum()
}

/// `((‖x‖² - n)²)^(1/8) + (0.5‖x‖² + Σx) / n + 0.5` with `n = 4` folded in.
pub fn happy_cat(x: &[f64]) -> f64 {
    let sq = squared_norm(x);
    let sum: f64 = x.iter().sum();
    ((sq - 4.0).powi(2)).powf(0.125) + 0.25 * (0.5 * sq + sum) + 0.5
}

/// `1 + Σ x²/4000 - Π cos(x_i / √(i+1))`.
pub fn griewank(x: &[f64]) -> f64 {
    let sum: f64 = x.iter().map(|v| v * v / 4000.0).sum();
    let prod: f64 = x
        .iter()
        .enumerate()
        .map(|(i, v)| (v / ((i + 1) as f64).sqrt()).cos())
        .product();
    1.0 + sum - prod
}

/// `1 - cos(2π‖x‖) + 0.1‖x‖`.
pub fn salomon(x: &[f64]) -> f64 {
    let norm = squared_norm(x).sqrt();
    1.0 - (2.0 * std::f64::consts::PI * norm).cos() + 0.1 * norm
}

/// Gaussian neighborhood on every coordinate.
#[derive(Debug, Clone, Copy)]
pub enum GaussianTweak {
    /// `x_i + N(0, σ)`.
    Additive(Normal<f64>),
    /// `x_i · N(1, σ)`. Scale-free, but cannot leave zero coordinates.
    Multiplicative(Normal<f64>),
}

impl GaussianTweak {
    pub fn additive(sigma: f64) -> Result<Self> {
        Ok(GaussianTweak::Additive(normal(0.0, sigma)?))
    }

    pub fn multiplicative(sigma: f64) -> Result<Self> {
        Ok(GaussianTweak::Multiplicative(normal(1.0, sigma)?))
    }

    /// Perturbs every coordinate of an owned point.
    pub fn apply<R: Rng>(&self, mut x: Point, rng: &mut R) -> Point {
        match self {
            GaussianTweak::Additive(noise) => {
                for v in x.iter_mut() {
                    *v += noise.sample(rng);
                }
            }
            GaussianTweak::Multiplicative(factor) => {
                for v in x.iter_mut() {
                    *v *= factor.sample(rng);
                }
            }
        }
        x
    }
}

fn normal(mean: f64, sigma: f64) -> Result<Normal<f64>> {
    Normal::new(mean, sigma).map_err(|err| {
        MetaheurError::InvalidConfig(format!("gaussian sigma {sigma} rejected: {err}"))
    })
}

#[derive(Debug, Clone)]
enum Start {
    Fixed(Point),
    Random { dims: usize, spread: Normal<f64> },
}

/// Minimization of a [`Benchmark`] with Gaussian tweaks.
#[derive(Debug, Clone)]
pub struct ContinuousProblem {
    benchmark: Benchmark,
    start: Start,
    small: GaussianTweak,
    large: GaussianTweak,
}

impl ContinuousProblem {
    /// Starts every run from `point`. The large tweak defaults to `tweak`.
    pub fn from_point(benchmark: Benchmark, point: Point, tweak: GaussianTweak) -> Self {
        Self {
            benchmark,
            start: Start::Fixed(point),
            small: tweak,
            large: tweak,
        }
    }

    /// Draws starting points (and random restarts) from `N(0, sigma)^dims`.
    pub fn random_start(
        benchmark: Benchmark,
        dims: usize,
        sigma: f64,
        tweak: GaussianTweak,
    ) -> Result<Self> {
        Ok(Self {
            benchmark,
            start: Start::Random {
                dims,
                spread: normal(0.0, sigma)?,
            },
            small: tweak,
            large: tweak,
        })
    }

    /// Sets the perturbation applied between hill climbs.
    pub fn with_large_tweak(mut self, tweak: GaussianTweak) -> Self {
        self.large = tweak;
        self
    }

    /// Iterated local search preset: 4 dimensions around the origin, with
    /// step sizes tuned per function.
    pub fn ils_preset(benchmark: Benchmark) -> Result<Self> {
        let (small, large) = match benchmark {
            Benchmark::Griewank => (1e-6, 1e-8),
            _ => (1e-4, 1e-5),
        };
        Ok(
            Self::random_start(benchmark, 4, 1e-3, GaussianTweak::additive(small)?)?
                .with_large_tweak(GaussianTweak::additive(large)?),
        )
    }

    /// Annealing preset for Salomon: multiplicative `N(1, 0.1)` tweaks from
    /// a given point.
    pub fn salomon_preset(point: Point) -> Result<Self> {
        Ok(Self::from_point(
            Benchmark::Salomon,
            point,
            GaussianTweak::multiplicative(0.1)?,
        ))
    }

    pub fn benchmark(&self) -> Benchmark {
        self.benchmark
    }

    fn start_point<R: Rng>(&self, rng: &mut R) -> Point {
        match &self.start {
            Start::Fixed(point) => point.clone(),
            Start::Random { dims, spread } => (0..*dims).map(|_| spread.sample(rng)).collect(),
        }
    }
}

impl LsProblem for ContinuousProblem {
    type Solution = Point;

    fn initial_solution<R: Rng>(&self, rng: &mut R) -> Point {
        self.start_point(rng)
    }

    fn quality(&self, x: &Point) -> f64 {
        self.benchmark.evaluate(x)
    }

    fn small_tweak<R: Rng>(&self, x: Point, rng: &mut R) -> Point {
        self.small.apply(x, rng)
    }

    fn large_tweak<R: Rng>(&self, x: Point, rng: &mut R) -> Point {
        self.large.apply(x, rng)
    }
}

impl SaProblem for ContinuousProblem {
    type Solution = Point;

    fn initial_solution<R: Rng>(&self, rng: &mut R) -> Point {
        self.start_point(rng)
    }

    fn quality(&self, x: &Point) -> f64 {
        self.benchmark.evaluate(x)
    }

    fn tweak<R: Rng>(&self, x: Point, rng: &mut R) -> Point {
        self.small.apply(x, rng)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ls::{LsConfig, LsRunner};
    use crate::random::create_rng;
    use crate::sa::{SaConfig, SaRunner};
    use std::time::Duration;

    #[test]
    fn test_global_minima() {
        assert!(happy_cat(&[-1.0; 4]).abs() < 1e-12);
        assert!(griewank(&[0.0; 4]).abs() < 1e-12);
        assert!(salomon(&[0.0; 4]).abs() < 1e-12);
        assert_eq!(Benchmark::Sphere.evaluate(&[0.0, 0.0]), 0.0);
    }

    #[test]
    fn test_known_values() {
        // ‖x‖ = 1: 1 - cos(2π) + 0.1
        assert!((salomon(&[1.0, 0.0, 0.0, 0.0]) - 0.1).abs() < 1e-12);
        assert!((Benchmark::Sphere.evaluate(&[1.0, 2.0]) - 5.0).abs() < 1e-12);
        assert!(griewank(&[10.0, 0.0]) > 0.0);
    }

    #[test]
    fn test_invalid_sigma_rejected() {
        assert!(GaussianTweak::additive(-1.0).is_err());
        assert!(GaussianTweak::multiplicative(f64::NAN).is_err());
        assert!(ContinuousProblem::random_start(
            Benchmark::Sphere,
            2,
            -0.5,
            GaussianTweak::additive(0.1).unwrap()
        )
        .is_err());
    }

    #[test]
    fn test_multiplicative_keeps_zero() {
        let tweak = GaussianTweak::multiplicative(0.5).unwrap();
        let mut rng = create_rng(4);
        let x = tweak.apply(vec![0.0, 2.0], &mut rng);
        assert_eq!(x[0], 0.0);
        assert_ne!(x[1], 2.0);
    }

    #[test]
    fn test_random_start_dims() {
        let problem = ContinuousProblem::ils_preset(Benchmark::HappyCat).unwrap();
        let mut rng = create_rng(1);
        let x = LsProblem::initial_solution(&problem, &mut rng);
        assert_eq!(x.len(), 4);
        assert!(x.iter().all(|v| v.abs() < 0.01));
    }

    #[test]
    fn test_ils_improves_happy_cat() {
        let problem = ContinuousProblem::ils_preset(Benchmark::HappyCat).unwrap();
        let config = LsConfig::default()
            .with_timeout(Duration::from_millis(100))
            .with_seed(11);
        let result = LsRunner::run(&problem, &config).unwrap();
        assert!(result.best_quality <= result.quality_history[0]);
    }

    #[test]
    fn test_sa_improves_salomon() {
        let problem = ContinuousProblem::salomon_preset(vec![3.2, -1.7, 2.4, 0.9]).unwrap();
        let start = salomon(&[3.2, -1.7, 2.4, 0.9]);
        let config = SaConfig::default()
            .with_initial_temperature(1e5)
            .with_timeout(Duration::from_millis(100))
            .with_seed(5);
        let result = SaRunner::run(&problem, &config).unwrap();
        assert!(result.best_quality <= start);
        assert_eq!(result.best.len(), 4);
    }
}
