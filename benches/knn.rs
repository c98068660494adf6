use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};
use point_index::kdtree::KDTree;
use point_index::quadtree::PRQuadTree;
use point_index::{Point, PointIndex};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

fn generate_points(n: usize) -> Vec<Point<f64>> {
    let mut rng = StdRng::seed_from_u64(42);
    (0..n)
        .map(|_| {
            Point::from_xy(
                rng.gen_range(-512.0..512.0),
                rng.gen_range(-512.0..512.0),
            )
        })
        .collect()
}

fn build_trees(points: &[Point<f64>]) -> (KDTree<f64>, PRQuadTree<f64>) {
    let mut kdtree = KDTree::new(2).unwrap();
    let mut quadtree = PRQuadTree::new(10, 8).unwrap();
    for p in points {
        kdtree.insert(p.clone()).unwrap();
        quadtree.insert(p.clone()).unwrap();
    }
    (kdtree, quadtree)
}

fn bench_queries(c: &mut Criterion) {
    for n in [1_000, 10_000] {
        let points = generate_points(n);
        let (kdtree, quadtree) = build_trees(&points);
        let anchor = Point::from_xy(13.7, -42.1);

        let mut group = c.benchmark_group("nearest_neighbor");
        group.bench_with_input(BenchmarkId::new("kdtree", n), &kdtree, |b, tree| {
            b.iter(|| tree.nearest_neighbor(&anchor).unwrap())
        });
        group.bench_with_input(BenchmarkId::new("quadtree", n), &quadtree, |b, tree| {
            b.iter(|| tree.nearest_neighbor(&anchor).unwrap())
        });
        group.finish();

        let mut group = c.benchmark_group("k_nearest_neighbors");
        group.bench_with_input(BenchmarkId::new("kdtree", n), &kdtree, |b, tree| {
            b.iter(|| tree.k_nearest_neighbors(10, &anchor).unwrap())
        });
        group.bench_with_input(BenchmarkId::new("quadtree", n), &quadtree, |b, tree| {
            b.iter(|| tree.k_nearest_neighbors(10, &anchor).unwrap())
        });
        group.finish();

        let mut group = c.benchmark_group("range");
        group.bench_with_input(BenchmarkId::new("kdtree", n), &kdtree, |b, tree| {
            b.iter(|| tree.range(&anchor, 50.).unwrap())
        });
        group.bench_with_input(BenchmarkId::new("quadtree", n), &quadtree, |b, tree| {
            b.iter(|| tree.range(&anchor, 50.).unwrap())
        });
        group.finish();
    }
}

fn bench_build(c: &mut Criterion) {
    for n in [1_000, 10_000] {
        let points = generate_points(n);

        let mut group = c.benchmark_group("build");
        group.bench_with_input(BenchmarkId::new("kdtree", n), &points, |b, points| {
            b.iter(|| {
                let mut tree = KDTree::new(2).unwrap();
                for p in points {
                    tree.insert(p.clone()).unwrap();
                }
                tree
            })
        });
        group.bench_with_input(BenchmarkId::new("quadtree", n), &points, |b, points| {
            b.iter(|| {
                let mut tree = PRQuadTree::new(10, 8).unwrap();
                for p in points {
                    tree.insert(p.clone()).unwrap();
                }
                tree
            })
        });
        group.finish();
    }
}

criterion_group!(benches, bench_queries, bench_build);
criterion_main!(benches);
