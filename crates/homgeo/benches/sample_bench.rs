//! Criterion microbenches for the samplers and the transform hot paths.
//!
//! - sample: spherical cap, clipped cap, truncated normal, uniform ball (n = 1000).
//! - geom3: rotfrom, from_pd, compose + apply.
//!
//! Results live under `target/criterion`.

use criterion::{black_box, criterion_group, criterion_main, BatchSize, BenchmarkId, Criterion};
use homgeo::{ClipBounds, FrameTransform, Point3D, Sampler, Vector3D};

fn bench_sample(c: &mut Criterion) {
    let mut group = c.benchmark_group("sample");
    let center = Vector3D::new(0.2, -0.1, 1.0);
    let origin = Point3D::origin();
    let bounds = ClipBounds {
        max_alpha: 0.5,
        max_beta: 0.3,
        max_theta: 0.2,
    };
    group.bench_function(BenchmarkId::new("spherical_uniform", "1000"), |b| {
        b.iter_batched(
            || Sampler::seeded(42),
            |mut s| {
                let _ = s.spherical_uniform(&center, 0.6, 1000).unwrap();
            },
            BatchSize::SmallInput,
        )
    });
    group.bench_function(BenchmarkId::new("clipped_spherical_uniform", "1000"), |b| {
        b.iter_batched(
            || Sampler::seeded(43),
            |mut s| {
                let _ = s.clipped_spherical_uniform(&center, &bounds, 1000).unwrap();
            },
            BatchSize::SmallInput,
        )
    });
    group.bench_function(BenchmarkId::new("normal_truncated", "1000"), |b| {
        b.iter_batched(
            || Sampler::seeded(44),
            |mut s| {
                let _ = s.normal(&origin, 1.0, Some(1.5), 1000).unwrap();
            },
            BatchSize::SmallInput,
        )
    });
    group.bench_function(BenchmarkId::new("uniform_ball", "1000"), |b| {
        b.iter_batched(
            || Sampler::seeded(45),
            |mut s| {
                let _ = s.uniform(&origin, 2.0, 1000).unwrap();
            },
            BatchSize::SmallInput,
        )
    });
    group.finish();
}

fn bench_geom3(c: &mut Criterion) {
    let mut group = c.benchmark_group("geom3");
    let u = Vector3D::new(0.0, 0.0, 1.0);
    let v = Vector3D::new(0.3, -0.7, 0.2);
    group.bench_function("rotfrom", |b| {
        b.iter(|| black_box(v).rotfrom(black_box(&u)).unwrap())
    });
    let a = Point3D::new(1.0, 2.0, 3.0);
    let p = Point3D::new(4.0, 5.0, 6.0);
    group.bench_function("from_pd", |b| {
        b.iter(|| FrameTransform::from_pd(black_box(a), black_box(p - a)).unwrap())
    });
    let f1 = FrameTransform::from_pd(a, p - a).unwrap();
    let f2 = FrameTransform::from_pd(p, v).unwrap();
    group.bench_function("compose_apply", |b| {
        b.iter(|| (black_box(f2) * black_box(f1)).inverse() * black_box(p))
    });
    group.finish();
}

criterion_group!(benches, bench_sample, bench_geom3);
criterion_main!(benches);
