//! Tom voice.
//!
//! A swept single-cycle oscillator with an exponential decay. The three toms
//! share the table and differ only in their base frequency.
//!
//! # How It Works
//!
//! 1. Frequency starts at 1.6× the base and settles on the base
//!    (low 80 Hz, mid 120 Hz, high 165 Hz, all moved by tune)
//! 2. Amplitude decays from the hit with the decay parameter as its time
//!    constant

use crate::dsp::{Decay, FadeOut, Interpolator, OnePole};
use crate::sequencing::Instrument;

use super::waveform::Waveform;
use super::DrumVoice;

const SWEEP_RATIO: f32 = 1.6;
const SWEEP_TIME: f32 = 0.04;

/// Untuned body frequency of a tom, `None` for other instruments.
pub fn base_frequency(instrument: Instrument) -> Option<f32> {
    match instrument {
        Instrument::TomLow => Some(80.0),
        Instrument::TomMid => Some(120.0),
        Instrument::TomHi => Some(165.0),
        _ => None,
    }
}

#[derive(Debug, Clone)]
pub struct TomVoice {
    instrument: Instrument,
    cycle: Waveform,
    phase: f32,
    frequency: OnePole,
    amp: Decay,
    velocity: f32,
    gain: Interpolator,
    fade: FadeOut,
    sample_rate: f32,
}

impl TomVoice {
    /// `base_hz` is the settled frequency, already tuned.
    pub fn new(
        instrument: Instrument,
        cycle: Waveform,
        base_hz: f32,
        decay: f32,
        velocity: f32,
        level: f32,
        sample_rate: f32,
    ) -> Self {
        Self {
            instrument,
            cycle,
            phase: 0.0,
            frequency: OnePole::new(base_hz * SWEEP_RATIO, base_hz, SWEEP_TIME, sample_rate),
            amp: Decay::new(decay, sample_rate),
            velocity,
            gain: Interpolator::at(level * velocity, sample_rate),
            fade: FadeOut::new(sample_rate),
            sample_rate,
        }
    }

    pub fn frequency(&self) -> f32 {
        self.frequency.value()
    }
}

impl DrumVoice for TomVoice {
    fn process(&mut self, out: &mut [f32], from: usize, to: usize) -> bool {
        for (index, sample) in out.iter_mut().enumerate().take(to).skip(from) {
            if !self.is_running() {
                break;
            }
            let body = self.cycle.read_cyclic(self.phase) * self.amp.next_sample();
            let fade = self.fade.next_gain(index);
            *sample += body * self.gain.tick() * fade;

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
        self.instrument
    }

    fn is_running(&self) -> bool {
        self.amp.is_audible() && !self.gain.is_at(0.0) && !self.fade.is_done()
    }
}
