use crate::dsp::gain::{db_to_gain, semitones_to_ratio};
use crate::dsp::Decay;
use crate::engine::PlayEvent;
use crate::params::{ParamId, Parameters};
use crate::sequencing::Instrument;

use super::bassdrum::{BassdrumSettings, BassdrumVoice};
use super::sample::SampleVoice;
use super::snaredrum::{SnaredrumSettings, SnaredrumVoice};
use super::tom::{self, TomVoice};
use super::waveform::Waveforms;
use super::Voice;

/// Builds the voice for a trigger from the current parameter values.
///
/// Called from the audio thread, so implementations must not allocate.
pub trait VoiceFactory: Send {
    fn create_voice(&self, event: &PlayEvent, params: &Parameters) -> Voice;
}

/// The stock kit: synthesized bassdrum, snaredrum and toms, sampled
/// everything else.
#[derive(Debug, Clone)]
pub struct DrumKit {
    waveforms: Waveforms,
    sample_rate: f32,
}

impl DrumKit {
    pub fn new(waveforms: Waveforms, sample_rate: f32) -> Self {
        Self {
            waveforms,
            sample_rate,
        }
    }

    pub fn waveforms(&self) -> &Waveforms {
        &self.waveforms
    }

    pub fn sample_rate(&self) -> f32 {
        self.sample_rate
    }
}

impl VoiceFactory for DrumKit {
    fn create_voice(&self, event: &PlayEvent, params: &Parameters) -> Voice {
        let instrument = event.instrument;
        let velocity = db_to_gain(event.level_db);
        let level = params.level_gain(instrument) * params.volume_gain();
        let tune = params.tune_semitones(instrument);
        let sr = self.sample_rate;
        let w = &self.waveforms;

        match instrument {
            Instrument::BassDrum => Voice::BassDrum(BassdrumVoice::new(
                w.bassdrum_cycle.clone(),
                w.bassdrum_attack.clone(),
                BassdrumSettings {
                    tune_semitones: tune,
                    attack: params.native(ParamId::BassDrumAttack),
                    decay: params.native(ParamId::BassDrumDecay),
                },
                velocity,
                level,
                sr,
            )),
            Instrument::SnareDrum => Voice::SnareDrum(SnaredrumVoice::new(
                w.snaredrum_cycle.clone(),
                SnaredrumSettings {
                    tune_semitones: tune,
                    tone: params.native(ParamId::SnareDrumTone),
                    snappy_gain: db_to_gain(params.native(ParamId::SnareDrumSnappy)),
                },
                velocity,
                level,
                sr,
            )),
            Instrument::TomLow | Instrument::TomMid | Instrument::TomHi => {
                let decay = match instrument {
                    Instrument::TomLow => ParamId::TomLowDecay,
                    Instrument::TomMid => ParamId::TomMidDecay,
                    _ => ParamId::TomHiDecay,
                };
                let base = tom::base_frequency(instrument).unwrap_or(120.0) * semitones_to_ratio(tune);
                Voice::Tom(TomVoice::new(
                    instrument,
                    w.tom_cycle.clone(),
                    base,
                    params.native(decay),
                    velocity,
                    level,
                    sr,
                ))
            }
            Instrument::Hihat => {
                let decay = if event.open_hihat {
                    ParamId::HihatOpenDecay
                } else {
                    ParamId::HihatClosedDecay
                };
                Voice::Sample(
                    SampleVoice::new(instrument, w.hihat.clone(), tune, velocity, level, sr)
                        .with_decay(Decay::new(params.native(decay), sr)),
                )
            }
            Instrument::Rim => Voice::Sample(SampleVoice::new(instrument, w.rim.clone(), tune, velocity, level, sr)),
            Instrument::Clap => Voice::Sample(SampleVoice::new(instrument, w.clap.clone(), tune, velocity, level, sr)),
            Instrument::Crash => {
                Voice::Sample(SampleVoice::new(instrument, w.crash.clone(), tune, velocity, level, sr))
            }
            Instrument::Ride => Voice::Sample(SampleVoice::new(instrument, w.ride.clone(), tune, velocity, level, sr)),
        }
    }
}
