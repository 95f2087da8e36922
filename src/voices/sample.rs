//! Wavetable playback voice.
//!
//! Plays a `Waveform` once from start to end. Rim, clap, hihat, crash and
//! ride are all sampled sounds played through this voice.
//!
//! # How It Works
//!
//! 1. A fractional position advances by `rate` every sample, where
//!    `rate = source_rate / output_rate · 2^(tune / 12)`
//! 2. The two samples around the position are linearly interpolated
//! 3. The result is scaled by the smoothed gain, an optional decay envelope
//!    (hihat) and the stop fade, then added to the output
//!
//! The voice ends at the last table sample, when its decay falls below the
//! silence floor, or when a stop fade completes.

use crate::dsp::gain::semitones_to_ratio;
use crate::dsp::{Decay, FadeOut, Interpolator};
use crate::sequencing::Instrument;

use super::waveform::Waveform;
use super::DrumVoice;

#[derive(Debug, Clone)]
pub struct SampleVoice {
    instrument: Instrument,
    waveform: Waveform,
    position: f64,
    rate: f64,
    velocity: f32,
    gain: Interpolator,
    decay: Option<Decay>,
    fade: FadeOut,
}

impl SampleVoice {
    /// `velocity` is the per-hit gain; `level` the instrument/master gain
    /// that `set_level` later updates.
    pub fn new(
        instrument: Instrument,
        waveform: Waveform,
        tune_semitones: f32,
        velocity: f32,
        level: f32,
        sample_rate: f32,
    ) -> Self {
        let rate = waveform.sample_rate() as f64 / sample_rate as f64 * semitones_to_ratio(tune_semitones) as f64;
        Self {
            instrument,
            waveform,
            position: 0.0,
            rate,
            velocity,
            gain: Interpolator::at(level * velocity, sample_rate),
            decay: None,
            fade: FadeOut::new(sample_rate),
        }
    }

    /// Shape the playback with an exponential decay.
    pub fn with_decay(mut self, decay: Decay) -> Self {
        self.decay = Some(decay);
        self
    }

    pub fn position(&self) -> f64 {
        self.position
    }

    pub fn rate(&self) -> f64 {
        self.rate
    }

    fn end(&self) -> f64 {
        self.waveform.len().saturating_sub(1) as f64
    }
}

impl DrumVoice for SampleVoice {
    fn process(&mut self, out: &mut [f32], from: usize, to: usize) -> bool {
        for (index, sample) in out.iter_mut().enumerate().take(to).skip(from) {
            if !self.is_running() {
                break;
            }
            let fade = self.fade.next_gain(index);
            let envelope = self.decay.as_mut().map_or(1.0, Decay::next_sample);
            *sample += self.waveform.read(self.position) * self.gain.tick() * envelope * fade;
            self.position += self.rate;
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
        self.position < self.end()
            && !self.fade.is_done()
            && !self.gain.is_at(0.0)
            && self.decay.as_ref().map_or(true, Decay::is_audible)
    }
}
