//! Benchmarks for whole machine blocks.
//!
//! A four-on-the-floor pattern with every instrument busy, rendered block
//! after block the way an audio callback would drive it.

use std::hint::black_box;

use criterion::{BenchmarkId, Criterion};
use tr909::io::AudioOutput;
use tr909::sequencing::{ChannelId, Groove, Instrument, Pattern};
use tr909::{EngineConfig, Machine};

use crate::BLOCK_SIZES;

fn busy_pattern() -> Pattern {
    let rows = [
        (Instrument::BassDrum, "X... x... X... x..o"),
        (Instrument::SnareDrum, "..x. X.x. ..x. X.oX"),
        (Instrument::TomLow, ".... .... .... x..."),
        (Instrument::TomMid, ".... .... ..x. ...."),
        (Instrument::TomHi, ".... .... x... ...."),
        (Instrument::Rim, "x..x ..x. x..x ..x."),
        (Instrument::Clap, ".... X... .... X..."),
        (Instrument::Hihat, "xoxo xoxo xoxo xoxx"),
        (Instrument::Crash, "X... .... .... ...."),
        (Instrument::Ride, "x.x. x.x. x.x. x.x."),
    ];
    let mut pattern = Pattern::new().with_groove(Groove::swing(0.25));
    for (instrument, row) in rows {
        pattern = pattern.with_row(instrument, row).unwrap();
    }
    pattern
}

pub fn bench_machine(c: &mut Criterion) {
    let mut group = c.benchmark_group("scenarios/machine");

    for &size in BLOCK_SIZES {
        let config = EngineConfig::default().with_block_size(size).with_bpm(140.0);

        // Full kit playing
        {
            let mut machine = Machine::new(config, busy_pattern()).unwrap();
            let mut output = AudioOutput::new(size);
            machine.play();
            group.bench_with_input(BenchmarkId::new("busy", size), &size, |b, _| {
                b.iter(|| {
                    output.render(&mut machine, size);
                    black_box(output.channel(ChannelId::BassDrum));
                })
            });
        }

        // Idle transport: the scheduling and mixing floor
        {
            let mut machine = Machine::new(config, Pattern::new()).unwrap();
            let mut output = AudioOutput::new(size);
            machine.play();
            group.bench_with_input(BenchmarkId::new("empty", size), &size, |b, _| {
                b.iter(|| {
                    output.render(&mut machine, size);
                })
            });
        }

        // Stereo device callback
        {
            let mut machine = Machine::new(config, busy_pattern()).unwrap();
            let mut output = AudioOutput::new(size);
            let mut data = vec![0.0f32; size * 2];
            machine.play();
            group.bench_with_input(BenchmarkId::new("interleaved", size), &size, |b, _| {
                b.iter(|| {
                    output.render_interleaved(&mut machine, black_box(&mut data), 2);
                })
            });
        }
    }

    group.finish();
}
