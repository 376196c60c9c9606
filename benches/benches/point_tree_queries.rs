// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use criterion::{BatchSize, Criterion, Throughput, black_box, criterion_group, criterion_main};
use understory_point_tree::{Bounds2D, Point2D, PointTree, TreeConfig, closest_in_slice};

const SIDE: i32 = 2048;

#[derive(Clone)]
struct Rng(u64);

impl Rng {
    fn new(seed: u64) -> Self {
        Self(seed)
    }
    fn next_u64(&mut self) -> u64 {
        let mut x = self.0;
        x ^= x << 13;
        x ^= x >> 7;
        x ^= x << 17;
        self.0 = x;
        x
    }
    fn next_coord(&mut self, side: i32) -> i32 {
        (self.next_u64() % side as u64) as i32
    }
}

fn gen_uniform_points(count: usize, side: i32) -> Vec<Point2D> {
    let mut rng = Rng::new(0xCAFE_F00D_DEAD_BEEF);
    (0..count)
        .map(|_| Point2D::new(rng.next_coord(side), rng.next_coord(side)))
        .collect()
}

fn gen_clustered_points(n_clusters: usize, per_cluster: usize, spread: i32) -> Vec<Point2D> {
    let mut rng = Rng::new(0xC1A5_7E55_9999_ABCD);
    let mut out = Vec::with_capacity(n_clusters * per_cluster);
    for _ in 0..n_clusters {
        let cx = rng.next_coord(SIDE - spread);
        let cy = rng.next_coord(SIDE - spread);
        for _ in 0..per_cluster {
            out.push(Point2D::new(
                cx + rng.next_coord(spread),
                cy + rng.next_coord(spread),
            ));
        }
    }
    out
}

fn build(points: &[Point2D], config: TreeConfig) -> PointTree {
    let mut tree = PointTree::with_config(Bounds2D::new(0, 0, SIDE, SIDE), config);
    for p in points {
        tree.insert(*p);
    }
    tree
}

fn bench_build(c: &mut Criterion) {
    let mut group = c.benchmark_group("point_tree_build");
    for &n in &[1_000usize, 10_000, 100_000] {
        let points = gen_uniform_points(n, SIDE);
        group.throughput(Throughput::Elements(n as u64));
        for capacity in [4usize, 16] {
            let config = TreeConfig::default().with_max_points(capacity);
            group.bench_function(format!("uniform_n{}_cap{}", n, capacity), |b| {
                b.iter(|| black_box(build(&points, config)));
            });
        }
    }
    group.finish();
}

fn bench_nearest(c: &mut Criterion) {
    let mut group = c.benchmark_group("point_tree_nearest");
    let queries = gen_uniform_points(256, SIDE);
    let sets = [
        ("uniform_n10000", gen_uniform_points(10_000, SIDE)),
        ("clustered_n10000", gen_clustered_points(40, 250, 64)),
    ];
    group.throughput(Throughput::Elements(queries.len() as u64));
    for (name, points) in &sets {
        group.bench_function(format!("tree_{}", name), |b| {
            b.iter_batched_ref(
                || build(points, TreeConfig::default()),
                |tree| {
                    for q in &queries {
                        tree.reset_visited_marks();
                        black_box(tree.closest_point(*q));
                    }
                },
                BatchSize::LargeInput,
            );
        });

        group.bench_function(format!("linear_{}", name), |b| {
            b.iter(|| {
                for q in &queries {
                    black_box(closest_in_slice(*q, points));
                }
            });
        });
    }
    group.finish();
}

criterion_group!(benches, bench_build, bench_nearest);
criterion_main!(benches);
