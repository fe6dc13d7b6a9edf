use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use minspan::{Backend, MinSpan, Point};
use rand::prelude::*;

fn random_points(rng: &mut StdRng, n: usize) -> Vec<Point> {
    (0..n)
        .map(|_| Point::new(rng.random_range(4..1596), rng.random_range(20..896)))
        .collect()
}

fn bench_min_span(c: &mut Criterion) {
    let mut group = c.benchmark_group("min_span");
    group.sample_size(10);

    let mut rng = StdRng::seed_from_u64(42);
    let mut backends = vec![Backend::Managed];
    if cfg!(feature = "native") {
        backends.push(Backend::Native);
    }

    for n in [25, 50, 100, 200] {
        let points = random_points(&mut rng, n);
        for &backend in &backends {
            let span = MinSpan::new(backend).unwrap();
            group.bench_with_input(
                BenchmarkId::new(backend.as_str(), n),
                &points,
                |b, points| b.iter(|| span.compute(black_box(points)).unwrap()),
            );
        }
    }

    group.finish();
}

criterion_group!(benches, bench_min_span);
criterion_main!(benches);
