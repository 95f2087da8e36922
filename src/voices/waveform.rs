/*
Waveforms
=========

Sampled sounds are immutable arrays of f32 shared between every voice that
plays them. Cloning a `Waveform` clones an `Arc`, so triggering a voice never
copies or allocates sample data.

Two ways of reading:

  one-shot   position in samples, advanced by a playback rate
             read(2.25) = s[2] + 0.25 · (s[3] − s[2])

  cyclic     phase in [0, 1) spanning the whole table, wrapping at the end,
             used as an oscillator (bassdrum, snaredrum and tom bodies)

Both interpolate linearly between the two neighbouring samples.

`Waveforms::synthetic` renders a complete set of stand-in sounds from noise,
filters and sine partials. The output is deterministic, so the engine can run
and be tested without any sample files.
*/

use std::f32::consts::TAU;
use std::sync::Arc;

use crate::dsp::filter::SVFilter;
use crate::dsp::Noise;

/// Length of the single-cycle oscillator tables.
pub const CYCLE_LENGTH: usize = 2048;

#[derive(Debug, Clone)]
pub struct Waveform {
    samples: Arc<[f32]>,
    sample_rate: f32,
}

impl Waveform {
    pub fn new(samples: impl Into<Arc<[f32]>>, sample_rate: f32) -> Self {
        Self {
            samples: samples.into(),
            sample_rate,
        }
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    /// Rate the samples were recorded at.
    pub fn sample_rate(&self) -> f32 {
        self.sample_rate
    }

    pub fn samples(&self) -> &[f32] {
        &self.samples
    }

    /// Interpolated one-shot read; silent outside the table.
    #[inline]
    pub fn read(&self, position: f64) -> f32 {
        if position < 0.0 {
            return 0.0;
        }
        let index = position as usize;
        let Some(&a) = self.samples.get(index) else {
            return 0.0;
        };
        let b = self.samples.get(index + 1).copied().unwrap_or(0.0);
        let frac = (position - index as f64) as f32;
        a + (b - a) * frac
    }

    /// Interpolated read with `phase` in [0, 1) covering the whole table.
    #[inline]
    pub fn read_cyclic(&self, phase: f32) -> f32 {
        let len = self.samples.len();
        if len == 0 {
            return 0.0;
        }
        let position = phase * len as f32;
        let index = position as usize % len;
        let frac = position - position.floor();
        let a = self.samples[index];
        let b = self.samples[(index + 1) % len];
        a + (b - a) * frac
    }
}

/// Every sampled sound the machine plays.
#[derive(Debug, Clone)]
pub struct Waveforms {
    pub bassdrum_cycle: Waveform,
    pub bassdrum_attack: Waveform,
    pub snaredrum_cycle: Waveform,
    pub tom_cycle: Waveform,
    pub rim: Waveform,
    pub clap: Waveform,
    pub hihat: Waveform,
    pub crash: Waveform,
    pub ride: Waveform,
}

impl Waveforms {
    /// Deterministic stand-in sounds rendered at `sample_rate`.
    pub fn synthetic(sample_rate: f32) -> Self {
        Self {
            bassdrum_cycle: cycle(sample_rate, |phase| {
                // soft saturation adds a little upper harmonic content
                (1.5 * (TAU * phase).sin()).tanh() / 1.5_f32.tanh()
            }),
            bassdrum_attack: bassdrum_attack(sample_rate),
            snaredrum_cycle: cycle(sample_rate, |phase| {
                0.8 * (TAU * phase).sin() + 0.2 * (2.0 * TAU * phase).sin()
            }),
            tom_cycle: cycle(sample_rate, |phase| (TAU * phase).sin()),
            rim: rim(sample_rate),
            clap: clap(sample_rate),
            hihat: metal(sample_rate, 2.0, 7_000.0, None, 0x0101),
            crash: metal(sample_rate, 1.5, 5_000.0, Some(0.5), 0x0202),
            ride: ride(sample_rate),
        }
    }
}

fn cycle(sample_rate: f32, shape: impl Fn(f32) -> f32) -> Waveform {
    let samples: Vec<f32> = (0..CYCLE_LENGTH)
        .map(|i| shape(i as f32 / CYCLE_LENGTH as f32))
        .collect();
    Waveform::new(samples, sample_rate)
}

fn frames(seconds: f32, sample_rate: f32) -> usize {
    (seconds * sample_rate).round().max(2.0) as usize
}

fn bassdrum_attack(sample_rate: f32) -> Waveform {
    let mut noise = Noise::new(0x0b0d);
    let mut filter = SVFilter::bandpass(3_000.0, sample_rate);
    let samples: Vec<f32> = (0..frames(0.012, sample_rate))
        .map(|i| {
            let t = i as f32 / sample_rate;
            let click = filter.next_sample(noise.next_sample()) + 0.5 * (TAU * 1_000.0 * t).sin();
            click * (-t / 0.002).exp()
        })
        .collect();
    Waveform::new(samples, sample_rate)
}

fn rim(sample_rate: f32) -> Waveform {
    let samples: Vec<f32> = (0..frames(0.04, sample_rate))
        .map(|i| {
            let t = i as f32 / sample_rate;
            let tone = 0.6 * (TAU * 1_667.0 * t).sin() + 0.4 * (TAU * 455.0 * t).sin();
            tone * (-t / 0.008).exp()
        })
        .collect();
    Waveform::new(samples, sample_rate)
}

fn clap(sample_rate: f32) -> Waveform {
    const BURSTS: [f32; 3] = [0.0, 0.011, 0.023];
    const TAIL_START: f32 = 0.03;

    let mut noise = Noise::new(0x0c1a);
    let mut filter = SVFilter::bandpass(1_200.0, sample_rate);
    let samples: Vec<f32> = (0..frames(0.3, sample_rate))
        .map(|i| {
            let t = i as f32 / sample_rate;
            let bursts: f32 = BURSTS
                .iter()
                .filter(|start| t >= **start)
                .map(|start| (-(t - start) / 0.003).exp())
                .fold(0.0, f32::max);
            let tail = if t >= TAIL_START {
                0.6 * (-(t - TAIL_START) / 0.06).exp()
            } else {
                0.0
            };
            2.0 * filter.next_sample(noise.next_sample()) * bursts.max(tail)
        })
        .collect();
    Waveform::new(samples, sample_rate)
}

/// High-passed noise, optionally with its own decay. The hihat table stays at
/// full level; its voice applies the closed or open decay on playback.
fn metal(sample_rate: f32, seconds: f32, cutoff_hz: f32, decay: Option<f32>, seed: u32) -> Waveform {
    let mut noise = Noise::new(seed);
    let mut filter = SVFilter::highpass(cutoff_hz, sample_rate);
    let samples: Vec<f32> = (0..frames(seconds, sample_rate))
        .map(|i| {
            let t = i as f32 / sample_rate;
            let envelope = decay.map(|tau| (-t / tau).exp()).unwrap_or(1.0);
            filter.next_sample(noise.next_sample()) * envelope
        })
        .collect();
    Waveform::new(samples, sample_rate)
}

fn ride(sample_rate: f32) -> Waveform {
    const PARTIALS: [f32; 4] = [3_120.0, 4_410.0, 5_230.0, 6_870.0];

    let mut noise = Noise::new(0x0303);
    let mut filter = SVFilter::bandpass(8_000.0, sample_rate);
    let samples: Vec<f32> = (0..frames(2.0, sample_rate))
        .map(|i| {
            let t = i as f32 / sample_rate;
            let bell: f32 = PARTIALS.iter().map(|f| (TAU * f * t).sin()).sum::<f32>() / PARTIALS.len() as f32;
            (0.4 * bell + filter.next_sample(noise.next_sample())) * (-t / 0.7).exp()
        })
        .collect();
    Waveform::new(samples, sample_rate)
}
