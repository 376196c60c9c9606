// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

#![cfg(feature = "compare_rstar")]

use criterion::{BatchSize, Criterion, Throughput, black_box, criterion_group, criterion_main};
use understory_point_tree::{Bounds2D, Point2D, PointTree};

use rstar::RTree;

fn gen_grid_points(n: i32, step: i32) -> Vec<Point2D> {
    let mut out = Vec::with_capacity((n * n) as usize);
    for y in 0..n {
        for x in 0..n {
            // Stagger rows so no query sits equidistant from a whole column.
            out.push(Point2D::new(x * step + (y % 3), y * step));
        }
    }
    out
}

fn bench_rstar_nearest_compare(c: &mut Criterion) {
    let mut group = c.benchmark_group("rstar_nearest_compare");
    for &n in &[64i32, 128] {
        let step = 8;
        let points = gen_grid_points(n, step);
        let side = n * step + 4;
        let queries: Vec<Point2D> = (0..256)
            .map(|i| Point2D::new((i * 37) % side, (i * 91) % side))
            .collect();
        group.throughput(Throughput::Elements(queries.len() as u64));

        group.bench_function(format!("understory_build_query_n{}", n), |b| {
            b.iter_batched(
                || points.clone(),
                |points| {
                    let mut tree = PointTree::new(Bounds2D::new(0, 0, side, side));
                    for p in points {
                        tree.insert(p);
                    }
                    for q in &queries {
                        tree.reset_visited_marks();
                        black_box(tree.closest_point(*q));
                    }
                },
                BatchSize::SmallInput,
            )
        });

        group.bench_function(format!("rstar_build_query_bulk_n{}", n), |b| {
            b.iter_batched(
                || points.iter().map(|p| [p.x, p.y]).collect::<Vec<_>>(),
                |raw| {
                    let tree = RTree::bulk_load(raw);
                    for q in &queries {
                        black_box(tree.nearest_neighbor(&[q.x, q.y]));
                    }
                },
                BatchSize::SmallInput,
            )
        });
    }
    group.finish();
}

criterion_group!(benches, bench_rstar_nearest_compare);
criterion_main!(benches);
