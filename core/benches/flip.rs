use criterion::{criterion_group, criterion_main, Criterion};
use shoutou_core::{FlipOutcome, GameConfig, Grid, GridGenerator, RandomGridGenerator};
use std::hint::black_box;

fn bench_flip(c: &mut Criterion) {
    let config = GameConfig::new((64, 64), 0.25).unwrap();
    let grid = RandomGridGenerator::new(0xC0FFEE).generate(config);

    c.bench_function("flip_around 64x64", |b| {
        b.iter_batched(
            || grid.clone(),
            |mut grid| black_box(grid.flip_around((32, 32))),
            criterion::BatchSize::SmallInput,
        )
    });

    c.bench_function("is_cleared 64x64", |b| {
        b.iter(|| black_box(&grid).is_cleared())
    });
}

fn bench_generate(c: &mut Criterion) {
    let config = GameConfig::new((64, 64), 0.25).unwrap();

    c.bench_function("generate 64x64", |b| {
        b.iter(|| {
            let mut grid = RandomGridGenerator::new(black_box(7)).generate(config);
            assert_ne!(grid.flip_around((0, 0)), FlipOutcome::NoChange);
            grid
        })
    });
}

criterion_group!(benches, bench_flip, bench_generate);
criterion_main!(benches);
