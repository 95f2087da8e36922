//! Benchmarks for single drum voices.
//!
//! Each iteration renders one block from a freshly triggered voice, which is
//! the costliest part of a hit: sweeps, filters and noise all running.

use criterion::{BatchSize, BenchmarkId, Criterion};
use std::hint::black_box;
use tr909::engine::PlayEvent;
use tr909::params::Parameters;
use tr909::sequencing::Instrument;
use tr909::voices::{DrumKit, DrumVoice, VoiceFactory, Waveforms};

use crate::BLOCK_SIZES;

pub fn bench_voices(c: &mut Criterion) {
    let mut group = c.benchmark_group("scenarios/voices");
    let kit = DrumKit::new(Waveforms::synthetic(44_100.0), 44_100.0);
    let params = Parameters::default();

    for &size in BLOCK_SIZES {
        let mut buffer = vec![0.0f32; size];

        for instrument in Instrument::ALL {
            let event = PlayEvent::new(0, instrument, 0.0);
            group.bench_with_input(BenchmarkId::new(instrument.name(), size), &size, |b, _| {
                b.iter_batched_ref(
                    || kit.create_voice(&event, &params),
                    |voice| {
                        voice.process(black_box(&mut buffer), 0, size);
                    },
                    BatchSize::SmallInput,
                )
            });
        }

        // Open hihat runs the longest sample
        let open = PlayEvent::new(0, Instrument::Hihat, 0.0).open();
        group.bench_with_input(BenchmarkId::new("hihat_open", size), &size, |b, _| {
            b.iter_batched_ref(
                || kit.create_voice(&open, &params),
                |voice| {
                    voice.process(black_box(&mut buffer), 0, size);
                },
                BatchSize::SmallInput,
            )
        });
    }

    group.finish();
}
