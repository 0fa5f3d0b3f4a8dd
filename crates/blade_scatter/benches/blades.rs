mod common;

use std::hint::black_box;

use blade_scatter::prelude::{BladeGenerator, PlacementEngine, StyleCatalog};
use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};
use rand::rngs::StdRng;
use rand::SeedableRng;

const COUNTS: [usize; 3] = [100, 1_000, 10_000];

fn blade_sampling_benches(c: &mut Criterion) {
    let catalog = StyleCatalog::new();
    let generator = BladeGenerator::new();

    for (name, style) in catalog.styles_by_name() {
        let mut group = c.benchmark_group(format!("blades/generate/{name}"));

        for &n in &COUNTS {
            group.throughput(common::elements_throughput(n));
            let mut rng = StdRng::seed_from_u64(0xB1ADE ^ n as u64);

            group.bench_with_input(BenchmarkId::from_parameter(n), &n, |b, &n| {
                b.iter(|| {
                    let blades = generator.generate_many(style, n, &mut rng);
                    black_box(blades.len());
                });
            });
        }

        group.finish();
    }
}

fn uv_sampling_benches(c: &mut Criterion) {
    let engine = PlacementEngine::new();
    let mut group = c.benchmark_group("placement/sample_uv");

    for &n in &COUNTS {
        group.throughput(common::elements_throughput(n));
        let mut rng = StdRng::seed_from_u64(0x5EED ^ n as u64);

        group.bench_with_input(BenchmarkId::from_parameter(n), &n, |b, &n| {
            b.iter(|| {
                for _ in 0..n {
                    black_box(engine.sample_uv(&mut rng));
                }
            });
        });
    }

    group.finish();
}

criterion_group! {
    name = benches;
    config = common::default_criterion();
    targets = blade_sampling_benches, uv_sampling_benches
}
criterion_main!(benches);
