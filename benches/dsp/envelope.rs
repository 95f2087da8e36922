//! Benchmarks for the one-pole sweep and decay envelopes.

use std::hint::black_box;

use criterion::{BenchmarkId, Criterion};
use tr909::dsp::{Decay, OnePole};

use crate::BLOCK_SIZES;

pub fn bench_envelope(c: &mut Criterion) {
    let mut group = c.benchmark_group("dsp/envelope");

    for &size in BLOCK_SIZES {
        let mut buffer = vec![0.0f32; size];

        // Pitch sweep, as the bassdrum runs it
        let mut sweep = OnePole::new(200.0, 52.0, 0.025, 44_100.0);
        group.bench_with_input(BenchmarkId::new("sweep", size), &size, |b, _| {
            b.iter(|| {
                for sample in buffer.iter_mut() {
                    *sample = sweep.next_sample();
                }
                black_box(&buffer);
            })
        });

        // Hold then decay
        let mut decay = Decay::with_hold(0.015, 0.5, 44_100.0);
        group.bench_with_input(BenchmarkId::new("decay", size), &size, |b, _| {
            b.iter(|| {
                for sample in buffer.iter_mut() {
                    *sample = decay.next_sample();
                }
                black_box(&buffer);
            })
        });
    }

    group.finish();
}
