use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use nalgebra::Point3;
use octant::Octree;
use rand::{rngs::StdRng, Rng, SeedableRng};

type PointTree = Octree<Point3<f64>, 10, 8>;

fn points(count: usize, seed: u64) -> Vec<Point3<f64>> {
    let mut rng = StdRng::seed_from_u64(seed);
    (0..count)
        .map(|_| {
            Point3::new(
                rng.gen_range(0.0..100.0),
                rng.gen_range(0.0..100.0),
                rng.gen_range(0.0..100.0),
            )
        })
        .collect()
}

fn build(points: &[Point3<f64>]) -> PointTree {
    PointTree::with_elements(
        Point3::origin(),
        Point3::new(100.0, 100.0, 100.0),
        points.iter().copied(),
    )
}

fn insert(c: &mut Criterion) {
    let mut group = c.benchmark_group("insert");
    for &count in &[1_000, 10_000, 100_000] {
        let input = points(count, 0);
        group.bench_with_input(BenchmarkId::from_parameter(count), &input, |b, input| {
            b.iter(|| build(black_box(input)));
        });
    }
    group.finish();
}

fn closest(c: &mut Criterion) {
    let mut group = c.benchmark_group("closest_to");
    let queries = points(256, 1);
    for &count in &[1_000, 10_000, 100_000] {
        let tree = build(&points(count, 0));
        group.bench_with_input(BenchmarkId::new("octree", count), &tree, |b, tree| {
            let mut queries = queries.iter().cycle();
            b.iter(|| tree.closest_to(black_box(queries.next().unwrap())));
        });
        group.bench_with_input(BenchmarkId::new("linear", count), &tree, |b, tree| {
            let mut queries = queries.iter().cycle();
            b.iter(|| {
                let query = black_box(queries.next().unwrap());
                tree.iter()
                    .map(|p| (p - query).norm())
                    .fold(f64::INFINITY, f64::min)
            });
        });
    }
    group.finish();
}

criterion_group!(benches, insert, closest);
criterion_main!(benches);
