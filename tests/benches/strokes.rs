#[macro_use]
extern crate criterion;

use criterion::Criterion;
use vstroke::geom::{SamplingParameters, SamplingQuality, SplineBasis, StrokeSample};
use vstroke::tessellation::{FillOptions, FillTessellator, LineCap, StrokeOptions, StrokeTessellator};
use vstroke_tests::*;

const N: usize = 10;

fn sample_centerline(bench: &mut Criterion) {
    for basis in BASES {
        let spline = wavy_stroke(200, basis);
        let params = SamplingParameters::with_quality(SamplingQuality::High);
        let mut samples: Vec<StrokeSample> = Vec::with_capacity(10_000);

        bench.bench_function(&format!("sample centerline {:?}", basis), |b| {
            b.iter(|| {
                for _ in 0..N {
                    samples.clear();
                    spline.sample_centerline(&params, &mut samples);
                }
                std::hint::black_box(samples.len());
            })
        });
    }
}

fn stroke(bench: &mut Criterion) {
    let spline = wavy_stroke(200, SplineBasis::CentripetalCatmullRom);
    let mut tessellator = StrokeTessellator::new();
    let mut vertices: Vec<f32> = Vec::with_capacity(100_000);

    for quality in [SamplingQuality::Low, SamplingQuality::Medium, SamplingQuality::High] {
        let options = StrokeOptions::DEFAULT
            .with_line_cap(LineCap::Round)
            .with_sampling(SamplingParameters::with_quality(quality));

        bench.bench_function(&format!("stroke {:?}", quality), |b| {
            b.iter(|| {
                for _ in 0..N {
                    vertices.clear();
                    tessellator.tessellate(&spline, &options, &mut vertices).unwrap();
                }
                std::hint::black_box(vertices.len());
            })
        });
    }
}

fn stroke_ring(bench: &mut Criterion) {
    let ring = ring(64, 100.0, 5.0, SplineBasis::Yuksel);
    let mut tessellator = StrokeTessellator::new();
    let mut vertices: Vec<f32> = Vec::with_capacity(100_000);

    bench.bench_function("stroke ring", |b| {
        b.iter(|| {
            for _ in 0..N {
                vertices.clear();
                tessellator.tessellate(&ring, &StrokeOptions::DEFAULT, &mut vertices).unwrap();
            }
            std::hint::black_box(vertices.len());
        })
    });
}

fn fill_ring(bench: &mut Criterion) {
    let ring = ring(64, 100.0, 5.0, SplineBasis::Yuksel);
    let mut tessellator = FillTessellator::new();
    let mut vertices: Vec<f32> = Vec::with_capacity(100_000);

    bench.bench_function("fill ring", |b| {
        b.iter(|| {
            for _ in 0..N {
                vertices.clear();
                tessellator.tessellate(&ring, &FillOptions::DEFAULT, &mut vertices).unwrap();
            }
            std::hint::black_box(vertices.len());
        })
    });
}

criterion_group!(sampling, sample_centerline);
criterion_group!(tessellation, stroke, stroke_ring, fill_ring);
criterion_main!(sampling, tessellation);
