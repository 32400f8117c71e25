//! Value iteration benchmarks.
//!
//! Run with: `cargo bench -p value-iteration`
//!
//! These benchmarks measure:
//! - Compiling the dice game's transition table
//! - Full solves for growing dice counts
//! - In-place versus synchronous sweeps

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use engine_core::Mdp;
use games_dice::{DiceConfig, DiceGame};
use value_iteration::{solve, value_iteration, CompiledModel, SolverConfig, SweepMode};

fn dice(count: u8) -> DiceGame {
    DiceGame::with_seed(DiceConfig::default().with_dice(count), 0).unwrap()
}

// =============================================================================
// Compilation
// =============================================================================

fn bench_compile(c: &mut Criterion) {
    let mut group = c.benchmark_group("compile");

    for count in [2u8, 3, 4] {
        let game = dice(count);
        let pairs = (game.states().len() * game.actions().len()) as u64;
        group.throughput(Throughput::Elements(pairs));
        group.bench_with_input(BenchmarkId::new("dice", count), &game, |b, game| {
            b.iter(|| CompiledModel::compile(black_box(game), 1e-9).unwrap());
        });
    }

    group.finish();
}

// =============================================================================
// Full Solve
// =============================================================================

fn bench_solve(c: &mut Criterion) {
    let mut group = c.benchmark_group("solve");
    let config = SolverConfig::default();

    for count in [2u8, 3, 4] {
        let game = dice(count);
        group.throughput(Throughput::Elements(game.states().len() as u64));
        group.bench_with_input(BenchmarkId::new("dice", count), &game, |b, game| {
            b.iter(|| solve(black_box(game), &config).unwrap());
        });
    }

    group.finish();
}

// =============================================================================
// Sweep Modes
// =============================================================================

fn bench_sweep_modes(c: &mut Criterion) {
    let mut group = c.benchmark_group("sweep_mode");
    let model = CompiledModel::compile(&dice(3), 1e-9).unwrap();

    for mode in [SweepMode::InPlace, SweepMode::Synchronous] {
        let config = SolverConfig::default()
            .with_threshold(1e-6)
            .with_sweep_mode(mode);
        group.bench_function(mode.to_string(), |b| {
            b.iter(|| value_iteration(black_box(&model), &config).unwrap());
        });
    }

    group.finish();
}

criterion_group!(benches, bench_compile, bench_solve, bench_sweep_modes);
criterion_main!(benches);
