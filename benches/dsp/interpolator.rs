//! Benchmarks for parameter smoothing.

use std::hint::black_box;

use criterion::{BenchmarkId, Criterion};
use tr909::dsp::Interpolator;

use crate::BLOCK_SIZES;

pub fn bench_interpolator(c: &mut Criterion) {
    let mut group = c.benchmark_group("dsp/interpolator");

    for &size in BLOCK_SIZES {
        let mut buffer = vec![0.0f32; size];

        // Settled: the common case while a voice plays
        let mut settled = Interpolator::at(0.8, 44_100.0);
        group.bench_with_input(BenchmarkId::new("settled", size), &size, |b, _| {
            b.iter(|| {
                for sample in buffer.iter_mut() {
                    *sample = settled.tick();
                }
                black_box(&buffer);
            })
        });

        // Ramping toward a new level set every block
        let mut ramping = Interpolator::at(0.0, 44_100.0);
        let mut target = 1.0;
        group.bench_with_input(BenchmarkId::new("ramping", size), &size, |b, _| {
            b.iter(|| {
                target = 1.0 - target;
                ramping.set(target, true);
                for sample in buffer.iter_mut() {
                    *sample = ramping.tick();
                }
                black_box(&buffer);
            })
        });
    }

    group.finish();
}
