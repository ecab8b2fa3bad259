use bowyer_watson_rs::{Config, Particles, Point, Triangulator};
use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};

fn points(count: usize) -> Vec<Point> {
    let mut particles = Particles::new(1.3, 42);
    particles.generate(count, 0.02);
    particles.positions().collect()
}

fn triangulate(c: &mut Criterion) {
    let mut group = c.benchmark_group("triangulate");

    for count in [100, 500, 2000] {
        let points = points(count);
        let mut triangulator = Triangulator::new(&Config::default()).unwrap();
        group.throughput(Throughput::Elements(count as u64));

        group.bench_with_input(BenchmarkId::new("naive", count), &points, |b, points| {
            b.iter(|| triangulator.triangulate_naive(black_box(points)).unwrap())
        });
        group.bench_with_input(BenchmarkId::new("contiguous", count), &points, |b, points| {
            b.iter(|| triangulator.triangulate_contiguous(black_box(points)).unwrap())
        });
    }

    group.finish();
}

/// one frame of the moving point set
fn frame(c: &mut Criterion) {
    let mut particles = Particles::new(1.3, 7);
    particles.generate(1000, 0.02);
    let mut triangulator = Triangulator::new(&Config::default()).unwrap();
    let mut positions = vec![];

    c.bench_function("frame contiguous 1000", |b| {
        b.iter(|| {
            particles.advance(1. / 60.);
            particles.positions_into(&mut positions);
            triangulator.triangulate_contiguous(&positions).unwrap()
        })
    });
}

criterion_group!(benches, triangulate, frame);
criterion_main!(benches);
