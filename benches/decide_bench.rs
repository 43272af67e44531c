//! Criterion benchmarks for the decision path.
//!
//! Run with:
//!   cargo bench
//!
//! Results are saved to target/criterion/

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};

use cheese_chase::agent::DecisionService;
use cheese_chase::core::types::Position;
use cheese_chase::sensing::{Direction, SensorySnapshot};
use cheese_chase::server::SenseRequest;

fn crowded_snapshot(mice: usize, cheeses: usize) -> SensorySnapshot {
    let mut snapshot = SensorySnapshot::new(1, Position::new(0, 0))
        .with_free(&[Direction::North, Direction::East, Direction::West]);
    for i in 0..cheeses {
        snapshot = snapshot.with_cheese(Position::new(i as i32 * 3 - 20, 7 - i as i32));
    }
    for i in 0..mice {
        snapshot = snapshot.with_agent(format!("m{}", i), Position::new(i as i32, i as i32 % 5));
    }
    snapshot
}

/// Benchmark one decision against growing rosters and cheese lists.
fn bench_decide_sizes(c: &mut Criterion) {
    let mut group = c.benchmark_group("decide_size");

    for size in [1usize, 8, 64, 256].iter() {
        group.throughput(Throughput::Elements(1));
        group.bench_with_input(BenchmarkId::new("navigator", size), size, |b, &size| {
            let service = DecisionService::with_seed(42);
            let snapshot = crowded_snapshot(size, size);
            b.iter(|| black_box(service.decide(black_box(&snapshot)).direction));
        });
    }

    group.finish();
}

/// Benchmark parsing a request body into a snapshot.
fn bench_parse(c: &mut Criterion) {
    let body = br#"{
        "turn": 12,
        "me": {"x": 1, "y": 2, "health": 10},
        "neighbors": [
            {"dir": "N", "free": false},
            {"dir": "S", "free": true},
            {"dir": "W", "free": true},
            {"dir": "E", "free": true}
        ],
        "cheeses": [{"x": 4, "y": 2}, {"x": 9, "y": 9}],
        "mice": [{"id": "m-1", "x": 1, "y": 2}, {"id": "m-2", "x": 0, "y": 0}]
    }"#;

    c.bench_function("parse_request", |b| {
        b.iter(|| black_box(SenseRequest::parse(black_box(body)).is_ok()))
    });
}

criterion_group!(benches, bench_decide_sizes, bench_parse);
criterion_main!(benches);
