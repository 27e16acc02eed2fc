//! Throughput of the downscaler and the full encode pipeline.

// criterion_group! emits an undocumented `pub fn`.
#![allow(missing_docs)]

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use mipgen::downscale::downscale;
use mipgen::mipmap::{create_mipmap_from_raster, generate_levels};
use mipgen::options::MipmapOptions;
use mipgen::Raster;
use rand::Rng;

fn noise(width: u32, height: u32, opaque: bool) -> Raster {
    let mut rng = rand::rng();
    let mut data = vec![0u8; 4 * width as usize * height as usize];
    rng.fill(data.as_mut_slice());
    if opaque {
        for px in data.chunks_exact_mut(4) {
            px[3] = 255;
        }
    }
    Raster::new(width, height, data).unwrap()
}

fn downscale_benchmark(c: &mut Criterion) {
    let mut group = c.benchmark_group("downscale");
    for size in [64u32, 256, 1024] {
        let raster = noise(size, size, false);
        let _ = group.bench_function(format!("{size}x{size}"), |b| {
            b.iter(|| black_box(downscale(black_box(&raster))))
        });
    }
    group.finish();
}

fn pyramid_benchmark(c: &mut Criterion) {
    let raster = noise(512, 512, true);
    let _ = c.bench_function("generate_levels_512", |b| {
        b.iter(|| black_box(generate_levels(raster.clone(), -1)))
    });
}

fn encode_benchmark(c: &mut Criterion) {
    let mut group = c.benchmark_group("create_mipmap");
    let _ = group.sample_size(10);
    for (name, opaque) in [("opaque_256", true), ("alpha_256", false)] {
        let raster = noise(256, 256, opaque);
        let _ = group.bench_function(name, |b| {
            b.iter(|| {
                black_box(
                    create_mipmap_from_raster(
                        raster.clone(),
                        &MipmapOptions::default(),
                    )
                    .unwrap(),
                )
            })
        });
    }
    group.finish();
}

criterion_group!(benches, downscale_benchmark, pyramid_benchmark, encode_benchmark);
criterion_main!(benches);
