//! Benchmarks for TrueShade operations.
//!
//! Run with: `cargo bench`

use criterion::{BenchmarkId, Criterion, Throughput, criterion_group, criterion_main};
use std::hint::black_box;

use trueshade_color::{lab_to_rgb, rgb_to_lab, srgb};
use trueshade_core::{LabColor, PixelSample, Region, WeightedSample};
use trueshade_engine::config::ClusteringConfig;
use trueshade_engine::{CatalogStore, EngineConfig, ShadeEngine, extract, match_shades};

/// Deterministic skin-like pixels.
fn skin_pixels(n: usize) -> Vec<PixelSample> {
    (0..n)
        .map(|i| {
            let v = (i * 7919 % 97) as u8;
            let rgb = [140 + v / 2, 95 + v / 3, 70 + v / 4];
            PixelSample::new(rgb, Region::ALL[i % Region::ALL.len()])
        })
        .collect()
}

/// Benchmark sRGB <-> LAB conversion.
fn bench_conversion(c: &mut Criterion) {
    let mut group = c.benchmark_group("conversion");

    for size in [1000, 10000, 100000].iter() {
        let rgbs: Vec<[u8; 3]> = (0..*size)
            .map(|i| [(i % 256) as u8, (i / 256 % 256) as u8, (i * 31 % 256) as u8])
            .collect();
        let labs: Vec<LabColor> = rgbs.iter().map(|&x| rgb_to_lab(x)).collect();

        group.throughput(Throughput::Elements(*size as u64));

        group.bench_with_input(BenchmarkId::new("rgb_to_lab", size), &rgbs, |b, v| {
            b.iter(|| v.iter().map(|&x| rgb_to_lab(black_box(x))).collect::<Vec<_>>())
        });

        group.bench_with_input(BenchmarkId::new("lab_to_rgb", size), &labs, |b, v| {
            b.iter(|| v.iter().map(|&x| lab_to_rgb(black_box(x))).collect::<Vec<_>>())
        });
    }

    let values: Vec<f32> = (0..10000).map(|i| i as f32 / 10000.0).collect();
    group.throughput(Throughput::Elements(10000));
    group.bench_function("srgb_eotf", |b| {
        b.iter(|| values.iter().map(|&x| srgb::eotf(black_box(x))).collect::<Vec<_>>())
    });

    group.finish();
}

/// Benchmark k-means tone extraction.
fn bench_extraction(c: &mut Criterion) {
    let mut group = c.benchmark_group("extraction");
    let config = ClusteringConfig::default();

    for size in [500, 5000, 50000].iter() {
        let samples: Vec<WeightedSample> = skin_pixels(*size)
            .into_iter()
            .map(|s| WeightedSample::new(s, 1.0))
            .collect();

        group.throughput(Throughput::Elements(*size as u64));
        group.bench_with_input(BenchmarkId::new("extract_k3", size), &samples, |b, s| {
            b.iter(|| extract(black_box(s), &config, 42))
        });
    }

    group.finish();
}

/// Benchmark shade matching and the full pipeline.
fn bench_matching(c: &mut Criterion) {
    let mut group = c.benchmark_group("matching");

    let store = match CatalogStore::builtin() {
        Ok(store) => store,
        Err(e) => panic!("builtin catalog: {e}"),
    };
    let snapshot = store.current();
    let skin = rgb_to_lab([196, 148, 118]);

    group.bench_function("match_builtin_top3", |b| {
        b.iter(|| match_shades(black_box(skin), &snapshot, 3))
    });

    let engine = match ShadeEngine::from_config(EngineConfig::default()) {
        Ok(engine) => engine,
        Err(e) => panic!("engine: {e}"),
    };
    let pixels = skin_pixels(2000);
    group.bench_function("analyze_2000", |b| {
        b.iter(|| engine.analyze_with_seed(black_box(&pixels), 42))
    });

    group.finish();
}

criterion_group!(benches, bench_conversion, bench_extraction, bench_matching);
criterion_main!(benches);
