mod common;

use std::hint::black_box;

use blade_scatter::prelude::{
    DensityMode, GenerationRequest, GrassGenerator, RecordingHost, StyleName, SurfaceId,
};
use criterion::{criterion_group, criterion_main, BatchSize, BenchmarkId, Criterion};
use rand::rngs::StdRng;
use rand::SeedableRng;

fn generation_benches(c: &mut Criterion) {
    let generator = GrassGenerator::new();
    let surface = SurfaceId::new("ground");
    let mut group = c.benchmark_group("generation/absolute_mix");

    for &n in &[10u32, 100, 1000] {
        let request = GenerationRequest::new(n)
            .with_density_mode(DensityMode::Absolute)
            .with_style(StyleName::Mowed, 25)
            .with_style(StyleName::Short, 25)
            .with_style(StyleName::Medium, 25)
            .with_style(StyleName::Long, 25);
        group.throughput(common::elements_throughput(n as usize));

        group.bench_with_input(BenchmarkId::from_parameter(n), &n, |b, _| {
            let mut rng = StdRng::seed_from_u64(0xC0FFEE ^ n as u64);
            b.iter_batched(
                || RecordingHost::new().with_surface("ground", 10.0, 10.0, 100),
                |mut host| {
                    let result = generator
                        .generate(&mut host, &surface, &request, &mut rng)
                        .expect("generation succeeds");
                    black_box(result.placements.len());
                },
                BatchSize::SmallInput,
            );
        });
    }

    group.finish();
}

criterion_group! {
    name = benches;
    config = common::default_criterion();
    targets = generation_benches
}
criterion_main!(benches);
