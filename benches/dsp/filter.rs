//! Benchmarks for the state variable filter.

use std::hint::black_box;

use criterion::{BenchmarkId, Criterion};
use tr909::dsp::filter::SVFilter;
use tr909::dsp::Noise;

use crate::BLOCK_SIZES;

pub fn bench_filter(c: &mut Criterion) {
    let mut group = c.benchmark_group("dsp/filter");

    for &size in BLOCK_SIZES {
        let mut noise = Noise::default();
        let input: Vec<f32> = (0..size).map(|_| noise.next_sample()).collect();
        let mut buffer = input.clone();

        // Snare noise path
        let mut lowpass = SVFilter::lowpass(6_000.0, 44_100.0);
        group.bench_with_input(BenchmarkId::new("lowpass", size), &size, |b, _| {
            b.iter(|| {
                buffer.copy_from_slice(&input);
                lowpass.render(black_box(&mut buffer));
            })
        });

        // Clap and hihat shaping
        let mut bandpass = SVFilter::bandpass(1_200.0, 44_100.0);
        group.bench_with_input(BenchmarkId::new("bandpass", size), &size, |b, _| {
            b.iter(|| {
                buffer.copy_from_slice(&input);
                bandpass.render(black_box(&mut buffer));
            })
        });

        // Cutoff moving every sample
        let mut swept = SVFilter::lowpass(2_000.0, 44_100.0);
        group.bench_with_input(BenchmarkId::new("swept", size), &size, |b, _| {
            b.iter(|| {
                for (index, sample) in buffer.iter_mut().enumerate() {
                    swept.set_cutoff(2_000.0 + index as f32 * 10.0, 44_100.0);
                    *sample = swept.next_sample(input[index]);
                }
                black_box(&buffer);
            })
        });
    }

    group.finish();
}
