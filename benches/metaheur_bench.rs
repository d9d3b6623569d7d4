//! Criterion benchmarks for the anytime drivers.
//!
//! Drivers run until their deadline, so wall time per run is fixed by the
//! budget. These benchmarks measure the per-iteration primitives that
//! decide how much search fits in a budget: tabu membership, move
//! evaluation, neighborhood tweaks and SA acceptance.

use std::time::Duration;

use anytime_metaheur::direction::Direction;
use anytime_metaheur::problems::maze::{Maze, Move};
use anytime_metaheur::problems::tsp::CostMatrix;
use anytime_metaheur::random::create_rng;
use anytime_metaheur::sa::{acceptance_probability, SaConfig, SaProblem, SaRunner};
use anytime_metaheur::tabu::TabuList;
use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use rand::Rng;

// ===========================================================================
// Sphere for SA
// ===========================================================================

struct SphereSa {
    dim: usize,
}

impl SaProblem for SphereSa {
    type Solution = Vec<f64>;

    fn initial_solution<R: Rng>(&self, rng: &mut R) -> Vec<f64> {
        (0..self.dim).map(|_| rng.random_range(-5.0..5.0)).collect()
    }

    fn quality(&self, sol: &Vec<f64>) -> f64 {
        sol.iter().map(|x| x * x).sum()
    }

    fn tweak<R: Rng>(&self, mut sol: Vec<f64>, rng: &mut R) -> Vec<f64> {
        let i = rng.random_range(0..self.dim);
        sol[i] += rng.random_range(-0.5..0.5);
        sol
    }
}

fn random_matrix(n: usize) -> CostMatrix {
    let mut rng = create_rng(42);
    let costs = (0..n)
        .map(|_| (0..n).map(|_| rng.random_range(1.0..100.0)).collect())
        .collect();
    CostMatrix::new(costs).expect("square matrix")
}

fn open_maze(n: usize) -> Maze {
    let mut rows = vec!["0".repeat(n); n];
    rows[0].replace_range(0..1, "5");
    rows[n - 1].replace_range(n - 1..n, "8");
    Maze::from_rows(&rows).expect("valid maze")
}

// ===========================================================================
// Benchmarks
// ===========================================================================

fn bench_tabu_list(c: &mut Criterion) {
    let mut group = c.benchmark_group("tabu_list_contains");

    for &capacity in &[10usize, 100, 1000] {
        let mut list = TabuList::new(capacity);
        for i in 0..capacity {
            list.push(vec![i; 16]);
        }
        let probe = vec![usize::MAX; 16];
        group.bench_with_input(BenchmarkId::from_parameter(capacity), &list, |b, l| {
            b.iter(|| black_box(l.contains(black_box(&probe))))
        });
    }
    group.finish();
}

fn bench_tsp(c: &mut Criterion) {
    let mut group = c.benchmark_group("tsp");

    for &n in &[20usize, 100, 500] {
        let matrix = random_matrix(n);
        let tour = matrix.greedy_tour();
        group.bench_with_input(BenchmarkId::new("path_cost", n), &tour, |b, t| {
            b.iter(|| black_box(matrix.path_cost(black_box(t))))
        });
        group.bench_with_input(BenchmarkId::new("tweak", n), &tour, |b, t| {
            let mut rng = create_rng(7);
            b.iter(|| black_box(matrix.tweak(t.clone(), &mut rng)))
        });
    }
    group.finish();
}

fn bench_maze_cost(c: &mut Criterion) {
    let mut group = c.benchmark_group("maze_path_cost");

    for &n in &[10usize, 50, 200] {
        let maze = open_maze(n);
        let mut path = vec![Move::R; n - 1];
        path.extend(vec![Move::D; n - 1]);
        group.bench_with_input(BenchmarkId::from_parameter(n), &path, |b, p| {
            b.iter(|| black_box(maze.path_cost(black_box(p))))
        });
    }
    group.finish();
}

fn bench_acceptance(c: &mut Criterion) {
    c.bench_function("sa_acceptance_probability", |b| {
        b.iter(|| {
            black_box(acceptance_probability(
                Direction::Minimize,
                black_box(10.0),
                black_box(12.5),
                black_box(3.0),
            ))
        })
    });
}

fn bench_sa_short_budget(c: &mut Criterion) {
    let mut group = c.benchmark_group("sa_sphere_2ms");
    group.sample_size(10);

    for &dim in &[10usize, 100] {
        let problem = SphereSa { dim };
        let config = SaConfig::default()
            .with_timeout(Duration::from_millis(2))
            .with_seed(42);
        group.bench_with_input(BenchmarkId::from_parameter(dim), &(problem, config), |b, (p, c)| {
            b.iter(|| black_box(SaRunner::run(black_box(p), black_box(c))))
        });
    }
    group.finish();
}

criterion_group!(
    benches,
    bench_tabu_list,
    bench_tsp,
    bench_maze_cost,
    bench_acceptance,
    bench_sa_short_budget
);
criterion_main!(benches);
