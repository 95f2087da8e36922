//! Drum voices.
//!
//! A voice is one self-terminating sound started by one trigger. The machine
//! only ever holds `Voice` values: a closed set of variants behind the shared
//! `DrumVoice` capability, dispatched with a `match` rather than a vtable so
//! voices can live inline in fixed-capacity channel lists.
//!
//! # Example
//!
//! ```
//! use tr909::engine::PlayEvent;
//! use tr909::params::Parameters;
//! use tr909::sequencing::Instrument;
//! use tr909::voices::{DrumKit, DrumVoice, VoiceFactory, Waveforms};
//!
//! let kit = DrumKit::new(Waveforms::synthetic(44_100.0), 44_100.0);
//! let event = PlayEvent::new(0, Instrument::BassDrum, 0.0);
//! let mut voice = kit.create_voice(&event, &Parameters::default());
//!
//! let mut out = [0.0f32; 128];
//! assert!(voice.process(&mut out, 0, 128));
//! ```

pub mod bassdrum;
pub mod factory;
pub mod sample;
pub mod snaredrum;
pub mod tom;
pub mod waveform;

use crate::sequencing::Instrument;

pub use bassdrum::BassdrumVoice;
pub use factory::{DrumKit, VoiceFactory};
pub use sample::SampleVoice;
pub use snaredrum::SnaredrumVoice;
pub use tom::TomVoice;
pub use waveform::{Waveform, Waveforms};

pub trait DrumVoice {
    /// Add frames `from..to` of this block to `out`. Returns whether the
    /// voice is still running afterwards.
    fn process(&mut self, out: &mut [f32], from: usize, to: usize) -> bool;

    /// Fade out over 5 ms, starting at `offset` of the current block.
    fn stop(&mut self, offset: usize);

    /// Smoothly move to a new instrument/master gain.
    fn set_level(&mut self, level: f32);

    fn instrument(&self) -> Instrument;

    fn is_running(&self) -> bool;
}

#[derive(Debug, Clone)]
pub enum Voice {
    Sample(SampleVoice),
    BassDrum(BassdrumVoice),
    SnareDrum(SnaredrumVoice),
    Tom(TomVoice),
}

impl DrumVoice for Voice {
    #[inline]
    fn process(&mut self, out: &mut [f32], from: usize, to: usize) -> bool {
        match self {
            Voice::Sample(voice) => voice.process(out, from, to),
            Voice::BassDrum(voice) => voice.process(out, from, to),
            Voice::SnareDrum(voice) => voice.process(out, from, to),
            Voice::Tom(voice) => voice.process(out, from, to),
        }
    }

    fn stop(&mut self, offset: usize) {
        match self {
            Voice::Sample(voice) => voice.stop(offset),
            Voice::BassDrum(voice) => voice.stop(offset),
            Voice::SnareDrum(voice) => voice.stop(offset),
            Voice::Tom(voice) => voice.stop(offset),
        }
    }

    fn set_level(&mut self, level: f32) {
        match self {
            Voice::Sample(voice) => voice.set_level(level),
            Voice::BassDrum(voice) => voice.set_level(level),
            Voice::SnareDrum(voice) => voice.set_level(level),
            Voice::Tom(voice) => voice.set_level(level),
        }
    }

    fn instrument(&self) -> Instrument {
        match self {
            Voice::Sample(voice) => voice.instrument(),
            Voice::BassDrum(voice) => voice.instrument(),
            Voice::SnareDrum(voice) => voice.instrument(),
            Voice::Tom(voice) => voice.instrument(),
        }
    }

    fn is_running(&self) -> bool {
        match self {
            Voice::Sample(voice) => voice.is_running(),
            Voice::BassDrum(voice) => voice.is_running(),
            Voice::SnareDrum(voice) => voice.is_running(),
            Voice::Tom(voice) => voice.is_running(),
        }
    }
}
