//! Criterion benchmarks for the player registry and full runs.
//!
//! Benchmarks:
//!   - insert of a full 100-player roster
//!   - find over every roster name
//!   - remove of every roster name
//!   - parse + run of a generated 1000-action script
//!
//! Run with: cargo bench --bench registry

use criterion::{black_box, criterion_group, criterion_main, Criterion};

use wizard_league::{run_script, Limits, Player, PlayerRegistry, ScenarioBuilder};

fn roster() -> Vec<Player> {
    ScenarioBuilder::new(42)
        .teams(10)
        .players(100)
        .actions(0)
        .build()
        .map(|script| script.roster)
        .unwrap_or_default()
}

fn filled(players: &[Player]) -> PlayerRegistry {
    let mut registry = PlayerRegistry::new();
    for player in players {
        let _ = registry.insert(player.clone());
    }
    registry
}

// ---------------------------------------------------------------------------
// Benchmark: registry operations
// ---------------------------------------------------------------------------

fn bench_registry(c: &mut Criterion) {
    let mut group = c.benchmark_group("registry");
    let players = roster();
    let names: Vec<String> = players.iter().map(|p| p.name().to_string()).collect();

    group.bench_function("insert_100", |b| {
        b.iter(|| black_box(filled(black_box(&players))));
    });

    let registry = filled(&players);
    group.bench_function("find_100", |b| {
        b.iter(|| {
            for name in &names {
                black_box(registry.find(black_box(name)));
            }
        });
    });

    group.bench_function("remove_100", |b| {
        b.iter_batched(
            || registry.clone(),
            |mut registry| {
                for name in &names {
                    black_box(registry.remove(name));
                }
            },
            criterion::BatchSize::SmallInput,
        );
    });

    group.finish();
}

// ---------------------------------------------------------------------------
// Benchmark: end-to-end run
// ---------------------------------------------------------------------------

fn bench_full_run(c: &mut Criterion) {
    let text = ScenarioBuilder::new(7)
        .teams(4)
        .players(60)
        .actions(1000)
        .build()
        .map(|script| script.to_text())
        .unwrap_or_default();
    let limits = Limits::default();

    c.bench_function("run_1000_actions", |b| {
        b.iter(|| black_box(run_script(black_box(&text), &limits)));
    });
}

criterion_group!(benches, bench_registry, bench_full_run);
criterion_main!(benches);
