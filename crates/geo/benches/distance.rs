//! Benchmarks for distance calculation and proximity ranking.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use recycling_geo::{distance_km, rank, CollectionPoint, GeoCoordinate, MaterialType, PointId};

fn create_points(count: usize) -> Vec<CollectionPoint> {
    (0..count)
        .map(|i| {
            // Grid of points around São Paulo
            let lat = -24.0 + (i as f64 * 0.01) % 1.0;
            let lng = -47.0 + (i as f64 * 0.013) % 1.0;
            CollectionPoint {
                id: PointId(i as u64),
                name: format!("Point {i}"),
                address: format!("Street {i}"),
                materials: [MaterialType::Plastic, MaterialType::Paper].into_iter().collect(),
                coordinate: GeoCoordinate::new(lat, lng).unwrap(),
            }
        })
        .collect()
}

fn bench_single_distance(c: &mut Criterion) {
    let a = GeoCoordinate::new(-23.5505, -46.6833).unwrap();
    let b = GeoCoordinate::new(-23.5489, -46.6388).unwrap();

    c.bench_function("haversine_single", |bench| {
        bench.iter(|| distance_km(black_box(&a), black_box(&b)))
    });
}

fn bench_rank(c: &mut Criterion) {
    let mut group = c.benchmark_group("rank");
    let reference = GeoCoordinate::new(-23.55, -46.63).unwrap();

    for size in [10, 100, 1000, 10000].iter() {
        let points = create_points(*size);

        group.bench_with_input(BenchmarkId::new("with_reference", size), size, |b, _| {
            b.iter(|| rank(black_box(Some(&reference)), black_box(&points)))
        });
    }

    group.finish();
}

criterion_group!(benches, bench_single_distance, bench_rank);
criterion_main!(benches);
