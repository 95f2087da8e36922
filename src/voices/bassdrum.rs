//! Bassdrum voice.
//!
//! A swept oscillator for the body plus a short sampled click for the attack.
//!
//! # How It Works
//!
//! 1. A single-cycle table is read with a phase accumulator. The frequency
//!    starts high and falls exponentially towards the body frequency:
//!    `freq ← end + k · (freq − end)`, `k = exp(−1 / (sr · τ))`
//! 2. The amplitude stays at unity for a fixed hold, then decays with the
//!    decay parameter as its time constant
//! 3. The attack table is played once at its native rate, scaled by the
//!    attack parameter, and summed on top while it lasts. Level and velocity
//!    only scale the body.
//!
//! `out = cycle · amp · gain + attack`
//!
//! A choke fade applies to both layers.
//!
//! Tune moves both ends of the sweep by the same ratio.

use crate::dsp::gain::semitones_to_ratio;
use crate::dsp::{Decay, FadeOut, Interpolator, OnePole};
use crate::sequencing::Instrument;

use super::waveform::Waveform;
use super::DrumVoice;

const START_FREQUENCY: f32 = 200.0;
const END_FREQUENCY: f32 = 52.0;
const SWEEP_TIME: f32 = 0.025;
const RELEASE_START: f32 = 0.015;

#[derive(Debug, Clone)]
pub struct BassdrumVoice {
    cycle: Waveform,
    attack: Waveform,
    attack_gain: f32,
    attack_position: f64,
    attack_rate: f64,
    phase: f32,
    frequency: OnePole,
    amp: Decay,
    velocity: f32,
    gain: Interpolator,
    fade: FadeOut,
    sample_rate: f32,
}

#[derive(Debug, Clone, Copy)]
pub struct BassdrumSettings {
    pub tune_semitones: f32,
    pub attack: f32,
    /// Amplitude time constant in seconds
    pub decay: f32,
}

impl BassdrumVoice {
    pub fn new(
        cycle: Waveform,
        attack: Waveform,
        settings: BassdrumSettings,
        velocity: f32,
        level: f32,
        sample_rate: f32,
    ) -> Self {
        let ratio = semitones_to_ratio(settings.tune_semitones);
        let attack_rate = attack.sample_rate() as f64 / sample_rate as f64;
        Self {
            cycle,
            attack,
            attack_gain: settings.attack,
            attack_position: 0.0,
            attack_rate,
            phase: 0.0,
            frequency: OnePole::new(START_FREQUENCY * ratio, END_FREQUENCY * ratio, SWEEP_TIME, sample_rate),
            amp: Decay::with_hold(RELEASE_START, settings.decay, sample_rate),
            velocity,
            gain: Interpolator::at(level * velocity, sample_rate),
            fade: FadeOut::new(sample_rate),
            sample_rate,
        }
    }

    /// Current oscillator frequency in Hz.
    pub fn frequency(&self) -> f32 {
        self.frequency.value()
    }

    pub fn amplitude(&self) -> f32 {
        self.amp.level()
    }

    #[inline]
    fn next_attack(&mut self) -> f32 {
        if self.attack_position >= self.attack.len().saturating_sub(1) as f64 {
            return 0.0;
        }
        let sample = self.attack.read(self.attack_position);
        self.attack_position += self.attack_rate;
        sample * self.attack_gain
    }
}

impl DrumVoice for BassdrumVoice {
    fn process(&mut self, out: &mut [f32], from: usize, to: usize) -> bool {
        for (index, sample) in out.iter_mut().enumerate().take(to).skip(from) {
            if !self.is_running() {
                break;
            }
            let body = self.cycle.read_cyclic(self.phase) * self.amp.next_sample();
            let attack = self.next_attack();
            let fade = self.fade.next_gain(index);
            *sample += (body * self.gain.tick() + attack) * fade;

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
        Instrument::BassDrum
    }

    fn is_running(&self) -> bool {
        self.amp.is_audible() && !self.gain.is_at(0.0) && !self.fade.is_done()
    }
}
