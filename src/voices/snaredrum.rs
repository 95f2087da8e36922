//! Snaredrum voice.
//!
//! Two layers: a short pitched body and a burst of filtered noise for the
//! snares.
//!
//! # How It Works
//!
//! 1. Body: single-cycle table, frequency falling from 1.5× to 1× the body
//!    frequency, amplitude decaying over ≈80 ms
//! 2. Snares: white noise through a low-pass whose cutoff follows `tone`,
//!    with its own decay (brighter tone, shorter snares)
//! 3. `snappy` sets the noise level in decibels
//!
//! The noise layer has an explicit decibel floor: the voice keeps running
//! while either the body envelope or `noise envelope · snappy gain` is above
//! −72 dB, so a fully closed snappy knob does not keep a silent voice alive.

use crate::dsp::filter::SVFilter;
use crate::dsp::gain::semitones_to_ratio;
use crate::dsp::{Decay, FadeOut, Interpolator, Noise, OnePole, SILENCE_GAIN};
use crate::sequencing::Instrument;

use super::waveform::Waveform;
use super::DrumVoice;

const BODY_FREQUENCY: f32 = 185.0;
const SWEEP_RATIO: f32 = 1.5;
const SWEEP_TIME: f32 = 0.01;
const BODY_DECAY: f32 = 0.08;
const DARK_CUTOFF: f32 = 2_000.0;
const BRIGHT_CUTOFF: f32 = 10_000.0;

#[derive(Debug, Clone)]
pub struct SnaredrumVoice {
    cycle: Waveform,
    phase: f32,
    frequency: OnePole,
    body: Decay,
    noise: Noise,
    filter: SVFilter,
    snares: Decay,
    snappy_gain: f32,
    velocity: f32,
    gain: Interpolator,
    fade: FadeOut,
    sample_rate: f32,
}

#[derive(Debug, Clone, Copy)]
pub struct SnaredrumSettings {
    pub tune_semitones: f32,
    /// 0 dark and long, 1 bright and short
    pub tone: f32,
    /// Linear gain of the noise layer
    pub snappy_gain: f32,
}

impl SnaredrumVoice {
    pub fn new(cycle: Waveform, settings: SnaredrumSettings, velocity: f32, level: f32, sample_rate: f32) -> Self {
        let tone = settings.tone.clamp(0.0, 1.0);
        let body_frequency = BODY_FREQUENCY * semitones_to_ratio(settings.tune_semitones);
        let cutoff = DARK_CUTOFF * (BRIGHT_CUTOFF / DARK_CUTOFF).powf(tone);
        Self {
            cycle,
            phase: 0.0,
            frequency: OnePole::new(body_frequency * SWEEP_RATIO, body_frequency, SWEEP_TIME, sample_rate),
            body: Decay::new(BODY_DECAY, sample_rate),
            noise: Noise::default(),
            filter: SVFilter::lowpass(cutoff, sample_rate),
            snares: Decay::new(0.25 - 0.15 * tone, sample_rate),
            snappy_gain: settings.snappy_gain,
            velocity,
            gain: Interpolator::at(level * velocity, sample_rate),
            fade: FadeOut::new(sample_rate),
            sample_rate,
        }
    }

    fn snares_audible(&self) -> bool {
        self.snares.level() * self.snappy_gain > SILENCE_GAIN
    }
}

impl DrumVoice for SnaredrumVoice {
    fn process(&mut self, out: &mut [f32], from: usize, to: usize) -> bool {
        for (index, sample) in out.iter_mut().enumerate().take(to).skip(from) {
            if !self.is_running() {
                break;
            }
            let body = self.cycle.read_cyclic(self.phase) * self.body.next_sample();
            let snares = self.filter.next_sample(self.noise.next_sample()) * self.snares.next_sample() * self.snappy_gain;
            let fade = self.fade.next_gain(index);
            *sample += (body + snares) * self.gain.tick() * fade;

            self.phase += self.frequency.next_sample() / self.sample_rate;
            self.phase -= self.phase.floor();
        }
        self.is_running()
    }

    fn stop(&mut self, offset: usize) {
        self.fade.stop(offset);
    }

    fn set_level(&mut self, level: f32) {
        self.gain.set(level * self.velocity, true);
    }

    fn instrument(&self) -> Instrument {
        Instrument::SnareDrum
    }

    fn is_running(&self) -> bool {
        (self.body.is_audible() || self.snares_audible()) && !self.gain.is_at(0.0) && !self.fade.is_done()
    }
}
