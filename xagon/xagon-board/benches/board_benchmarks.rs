//! Benchmarks for board operations.
//!
//! Run with: cargo bench -p xagon-board
//!
//! To compare against baseline:
//! 1. First run: cargo bench -p xagon-board -- --save-baseline main
//! 2. After changes: cargo bench -p xagon-board -- --baseline main

#![allow(missing_docs, clippy::unwrap_used, clippy::cast_possible_truncation)]

use criterion::{BenchmarkId, Criterion, Throughput, black_box, criterion_group, criterion_main};
use xagon_board::{AdjacencyIndex, BoardParams, EdgeMatching, Icosahedron, PlayerId, TriangleState};
use xagon_subdivide::StrategyKind;

fn build_board(kind: StrategyKind, levels: u32) -> Icosahedron {
    let mut board = Icosahedron::new(kind.build()).unwrap();
    board.subdivide(levels).unwrap();
    board
}

// =============================================================================
// Subdivision Benchmarks
// =============================================================================

fn bench_subdivide(c: &mut Criterion) {
    let mut group = c.benchmark_group("Subdivide");

    for kind in [StrategyKind::Naive, StrategyKind::OneToFour] {
        for levels in [2_u32, 3, 4] {
            group.throughput(Throughput::Elements(20 * 4_u64.pow(levels)));
            group.bench_with_input(
                BenchmarkId::new(kind.to_string(), levels),
                &levels,
                |b, &levels| {
                    b.iter(|| {
                        let mut board = Icosahedron::with_params(kind.build(), BoardParams::new())
                            .unwrap();
                        board.subdivide(black_box(levels)).unwrap();
                        board
                    });
                },
            );
        }
    }

    group.finish();
}

// =============================================================================
// Adjacency Benchmarks
// =============================================================================

fn bench_adjacency(c: &mut Criterion) {
    let mut group = c.benchmark_group("Adjacency");

    let test_cases = [
        ("exact_1to4_1280tri", StrategyKind::OneToFour, EdgeMatching::Exact),
        ("tolerance_1to4_1280tri", StrategyKind::OneToFour, EdgeMatching::default()),
        ("tolerance_naive_1280tri", StrategyKind::Naive, EdgeMatching::default()),
    ];

    for (name, kind, matching) in test_cases {
        let board = build_board(kind, 3);
        group.throughput(Throughput::Elements(board.len() as u64));
        group.bench_with_input(BenchmarkId::new("build", name), board.triangles(), |b, tris| {
            b.iter(|| AdjacencyIndex::build(black_box(tris), matching).unwrap());
        });
    }

    group.finish();
}

// =============================================================================
// Hexagon Benchmarks
// =============================================================================

fn bench_hexagons(c: &mut Criterion) {
    let mut group = c.benchmark_group("Hexagons");

    for levels in [2_u32, 4] {
        let mut board = build_board(StrategyKind::OneToFour, levels);
        let ids: Vec<_> = board.triangles().iter().map(|t| t.id()).collect();
        board
            .set_state(&ids, TriangleState::claimed_by(PlayerId(0)))
            .unwrap();

        group.throughput(Throughput::Elements(ids.len() as u64));
        group.bench_with_input(BenchmarkId::new("around_every_face", levels), &ids, |b, ids| {
            b.iter(|| {
                let mut found = 0;
                for &id in ids {
                    found += board.hexagons_around(black_box(id)).unwrap().len();
                }
                found
            });
        });
        group.bench_with_input(BenchmarkId::new("completed_every_face", levels), &ids, |b, ids| {
            b.iter(|| {
                let mut found = 0;
                for &id in ids {
                    found += board.completed_hexagons(black_box(id)).unwrap().len();
                }
                found
            });
        });
    }

    group.finish();
}

criterion_group!(benches, bench_subdivide, bench_adjacency, bench_hexagons);
criterion_main!(benches);
