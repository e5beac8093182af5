use criterion::{BenchmarkId, Criterion, black_box, criterion_group, criterion_main};
use windrose::{WindDataset, compute};

/// Deterministic pseudo-random wind records
fn synthetic_records(count: usize) -> WindDataset {
    WindDataset::from_records((0..count).map(|i| {
        let x = (i.wrapping_mul(1_103_515_245).wrapping_add(12_345)) & 0x7fff_ffff;
        let unit = x as f64 / 0x7fff_ffff as f64;
        (unit * 25.0, (i as f64 * 7.3) % 360.0)
    }))
}

fn bench_compute(c: &mut Criterion) {
    let mut group = c.benchmark_group("compute");
    for size in [1_000usize, 100_000] {
        let dataset = synthetic_records(size);
        group.bench_with_input(BenchmarkId::new("normalized", size), &dataset, |b, ds| {
            b.iter(|| compute(black_box(ds), 9, true, None).unwrap())
        });
        group.bench_with_input(BenchmarkId::new("counts", size), &dataset, |b, ds| {
            b.iter(|| compute(black_box(ds), 9, false, None).unwrap())
        });
    }
    group.finish();
}

criterion_group!(benches, bench_compute);
criterion_main!(benches);
