//! Benchmarks for the sphere packer.

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use spherepack_core::{overlaps_any, Config, Solver, Sphere, StopCriterion};
use spherepack_d3::SpherePacker;

fn packer_benchmark(c: &mut Criterion) {
    let config = Config::new()
        .with_dimensions(30.0, 30.0, 30.0)
        .with_radius_set(vec![1.0, 1.5, 2.0])
        .with_min_throat(0.2)
        .with_loop_limit(20_000)
        .with_progress_interval(0)
        .with_seed(42);
    let packer = SpherePacker::new(config);

    c.bench_function("pack_200_polydisperse", |b| {
        b.iter(|| {
            let result = packer.solve(black_box(StopCriterion::Count(200)));
            black_box(result)
        })
    });

    c.bench_function("pack_porosity_0_8", |b| {
        b.iter(|| {
            let result = packer.solve(black_box(StopCriterion::Porosity(0.8)));
            black_box(result)
        })
    });
}

fn overlap_benchmark(c: &mut Criterion) {
    let placed: Vec<Sphere> = (0..1000)
        .map(|i| {
            let f = i as f64;
            Sphere::new(f % 10.0 * 3.0, (f / 10.0) % 10.0 * 3.0, f / 100.0 * 3.0, 1.0)
        })
        .collect();
    let candidate = Sphere::new(100.0, 100.0, 100.0, 1.0);

    c.bench_function("overlaps_any_1000", |b| {
        b.iter(|| overlaps_any(black_box(&candidate), black_box(&placed), 0.0))
    });
}

criterion_group!(benches, packer_benchmark, overlap_benchmark);
criterion_main!(benches);
