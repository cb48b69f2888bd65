//! Search benchmarks for performance profiling.
//!
//! Run with: `cargo bench -p mcts`
//!
//! These benchmarks measure:
//! - Full searches with varying cycle counts
//! - Searches from different game phases (opening, midgame, near-terminal)
//! - Single random rollouts
//! - Tree operations (expansion, selection, backpropagation)

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use game_board::{GameState, Side};
use mcts::{run_search, CycleLimit, RolloutPolicy, SearchConfig, SearchTree, UniformRollout};
use rand::SeedableRng;
use rand_chacha::ChaCha20Rng;

/// Empty 6x7 board with the forbidden cell in the middle.
fn opening() -> GameState {
    GameState::empty(6, 7, Some((2, 3)), Side::Computer).unwrap()
}

/// Helper to create a game state after playing a sequence of columns.
fn play_columns(columns: &[usize]) -> GameState {
    let mut state = opening();
    for &col in columns {
        state.apply_move(col);
    }
    state
}

// =============================================================================
// Full Search Benchmarks
// =============================================================================

fn bench_search_cycles(c: &mut Criterion) {
    let mut group = c.benchmark_group("search_cycles");

    for cycles in [100u64, 500, 1000, 5000] {
        group.throughput(Throughput::Elements(cycles));
        group.bench_with_input(BenchmarkId::new("opening", cycles), &cycles, |b, &cycles| {
            let state = opening();
            let config = SearchConfig::default();

            b.iter(|| {
                let mut rng = ChaCha20Rng::seed_from_u64(42);
                black_box(
                    run_search(state.clone(), config.clone(), CycleLimit::new(cycles), &mut rng)
                        .unwrap(),
                )
            });
        });
    }

    group.finish();
}

fn bench_game_phases(c: &mut Criterion) {
    let mut group = c.benchmark_group("search_game_phases");
    let cycles = 1000u64;

    let phases = [
        ("opening", Vec::new()),
        ("midgame", vec![3, 3, 2, 4, 4, 2, 5, 1, 0, 6, 3, 2]),
        (
            "late",
            vec![
                0, 1, 0, 1, 1, 0, 2, 3, 2, 3, 3, 2, 4, 5, 4, 5, 5, 4, 6, 6, 6, 0, 1, 6,
            ],
        ),
    ];

    for (name, columns) in phases {
        let state = play_columns(&columns);
        let config = SearchConfig::default();

        group.bench_function(name, |b| {
            b.iter(|| {
                let mut rng = ChaCha20Rng::seed_from_u64(42);
                black_box(
                    run_search(state.clone(), config.clone(), CycleLimit::new(cycles), &mut rng)
                        .unwrap(),
                )
            });
        });
    }

    group.finish();
}

// =============================================================================
// Rollout Benchmarks
// =============================================================================

fn bench_rollout(c: &mut Criterion) {
    let mut group = c.benchmark_group("rollout");

    group.bench_function("uniform_from_opening", |b| {
        let state = opening();
        let policy = UniformRollout::new();
        let mut rng = ChaCha20Rng::seed_from_u64(42);

        b.iter(|| black_box(policy.rollout(&state, &mut rng)));
    });

    group.finish();
}

// =============================================================================
// Tree Operation Benchmarks
// =============================================================================

fn bench_tree_operations(c: &mut Criterion) {
    let mut group = c.benchmark_group("tree_operations");

    group.bench_function("expand_root", |b| {
        b.iter(|| {
            let mut rng = ChaCha20Rng::seed_from_u64(42);
            let mut tree = SearchTree::new(opening());
            let root = tree.root();
            while tree.get(root).is_expandable() {
                black_box(tree.expand(root, &mut rng));
            }
            tree
        });
    });

    group.bench_function("select_best_child", |b| {
        let mut rng = ChaCha20Rng::seed_from_u64(42);
        let mut tree = SearchTree::new(opening());
        let root = tree.root();
        for i in 0..7 {
            let child = tree.expand(root, &mut rng);
            tree.backup(child, if i % 2 == 0 { 1.0 } else { -1.0 });
        }

        b.iter(|| black_box(tree.select_best_child(root, 0.8, &mut rng)));
    });

    group.bench_function("backup_depth_20", |b| {
        let mut rng = ChaCha20Rng::seed_from_u64(42);
        let mut tree = SearchTree::new(GameState::empty(6, 7, None, Side::Computer).unwrap());
        let mut leaf = tree.root();
        for _ in 0..20 {
            leaf = tree.expand(leaf, &mut rng);
            if tree.get(leaf).is_terminal() {
                break;
            }
        }

        b.iter(|| tree.backup(black_box(leaf), 1.0));
    });

    group.finish();
}

criterion_group!(
    benches,
    bench_search_cycles,
    bench_game_phases,
    bench_rollout,
    bench_tree_operations,
);
criterion_main!(benches);
