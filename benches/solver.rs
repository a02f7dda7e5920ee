//! Benchmarks for the cube solver.

use criterion::{black_box, criterion_group, criterion_main, Criterion};

use cube_solver::catalog::random_scramble_with;
use cube_solver::{PuzzleState, Solver, ALL_MOVES};

fn scrambled(tokens: &str) -> PuzzleState {
    let mut state = PuzzleState::solved();
    state
        .scramble(tokens)
        .expect("benchmark scrambles are valid");
    state
}

/// Benchmark applying every move in the catalog once.
fn bench_apply_all_moves(c: &mut Criterion) {
    let state = scrambled("R U F' L2 D B'");

    c.bench_function("apply_all_moves", |b| {
        b.iter(|| {
            let mut state = black_box(&state).clone();
            for mv in ALL_MOVES {
                state.apply(mv);
            }
            state
        })
    });
}

/// Benchmark parsing and applying a move string.
fn bench_scramble_string(c: &mut Criterion) {
    c.bench_function("scramble_string", |b| {
        b.iter(|| scrambled(black_box("R U R' U' F2 L D' B2 U2 R'")))
    });
}

/// Benchmark computing the fingerprint used for deduplication.
fn bench_fingerprint(c: &mut Criterion) {
    let state = scrambled("R U F' L2 D B'");

    c.bench_function("fingerprint", |b| {
        b.iter(|| black_box(&state).fingerprint())
    });
}

/// Benchmark a search that succeeds at depth three.
fn bench_solve_shallow(c: &mut Criterion) {
    let state = scrambled("R U F");
    let solver = Solver::default();

    c.bench_function("solve_depth_3", |b| {
        b.iter(|| solver.solve(black_box(&state)))
    });
}

/// Benchmark a search that exhausts its budget and falls back.
fn bench_solve_exhausted(c: &mut Criterion) {
    let state = scrambled("U R2 F' L2");
    let solver = Solver::default();

    let mut group = c.benchmark_group("exhausted");
    group.sample_size(10);
    group.bench_function("solve_full_budget", |b| {
        b.iter(|| solver.solve(black_box(&state)))
    });
    group.finish();
}

/// Benchmark generating a seeded scramble.
fn bench_random_scramble(c: &mut Criterion) {
    c.bench_function("random_scramble_25", |b| {
        let mut rng = fastrand::Rng::with_seed(7);
        b.iter(|| random_scramble_with(&mut rng, black_box(25)))
    });
}

criterion_group!(
    benches,
    bench_apply_all_moves,
    bench_scramble_string,
    bench_fingerprint,
    bench_solve_shallow,
    bench_solve_exhausted,
    bench_random_scramble
);
criterion_main!(benches);
