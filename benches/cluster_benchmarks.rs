use criterion::{BenchmarkId, Criterion, black_box, criterion_group, criterion_main};
use geocluster::{
    CacheKey, ClusterReducer, GeocodeCache, MediaPoint, PlaceRecord, distance_between_coordinates,
};

/// `n` photos scattered over a ~100 m square.
fn photo_grid(n: u32) -> Vec<MediaPoint<u32>> {
    let side = (n as f64).sqrt().ceil() as u32;
    (0..n)
        .map(|i| {
            let row = (i / side) as f64;
            let col = (i % side) as f64;
            MediaPoint::new(
                41.9028 + row * 100.0 / side as f64 * 9e-6,
                12.4964 + col * 100.0 / side as f64 * 1.2e-5,
                i,
            )
        })
        .collect()
}

fn benchmark_distance(c: &mut Criterion) {
    c.bench_function("haversine_distance", |b| {
        b.iter(|| {
            distance_between_coordinates(
                black_box(41.9028),
                black_box(12.4964),
                black_box(45.4642),
                black_box(9.1900),
            )
        })
    });
}

fn benchmark_reduce(c: &mut Criterion) {
    let mut group = c.benchmark_group("reduce_clusters");

    for size in [100u32, 1_000, 5_000] {
        let media = photo_grid(size);
        let reducer = ClusterReducer::new(50);
        group.bench_with_input(BenchmarkId::from_parameter(size), &media, |b, media| {
            b.iter(|| reducer.reduce(black_box(media.clone()), black_box(200.0)))
        });
    }

    group.finish();
}

fn benchmark_cache_lookup(c: &mut Criterion) {
    let mut group = c.benchmark_group("cache_lookup");

    for entries in [10u32, 1_000] {
        let cache = GeocodeCache::new();
        // one entry every ~100 m, so entries never cover each other
        for i in 0..entries {
            cache.insert(
                CacheKey::new(41.0 + i as f64 * 1e-3, 12.0, Some("P"), None),
                PlaceRecord::default(),
            );
        }

        let last = 41.0 + (entries - 1) as f64 * 1e-3;
        let hit = CacheKey::new(last + 1e-5, 12.0, Some("P"), None);
        group.bench_with_input(BenchmarkId::new("hit_last", entries), &hit, |b, key| {
            b.iter(|| cache.get_nearby(black_box(key)))
        });

        let miss = CacheKey::new(0.0, 0.0, Some("P"), None);
        group.bench_with_input(BenchmarkId::new("miss", entries), &miss, |b, key| {
            b.iter(|| cache.get_nearby(black_box(key)))
        });
    }

    group.finish();
}

criterion_group!(
    benches,
    benchmark_distance,
    benchmark_reduce,
    benchmark_cache_lookup
);

criterion_main!(benches);
