//! Addressable voice and global parameters.
//!
//! Parameters are stored as unipolar knob positions and mapped to native units
//! on read. Hosts address them by path, e.g. `"bassdrum/decay"`, and deliver
//! changes as `ParameterMessage`s which the machine applies between blocks.

pub mod mapping;
pub mod message;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::sequencing::Instrument;

pub use mapping::Mapping;
pub use message::{MessageReceiver, ParameterMessage};

const LEVEL: Mapping = Mapping::Decibel {
    min_db: -72.0,
    max_db: 0.0,
};
const TUNE: Mapping = Mapping::Linear { min: -12.0, max: 12.0 };
const AMOUNT: Mapping = Mapping::Linear { min: 0.0, max: 1.0 };

#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ParamId {
    Volume,
    Accent,
    BassDrumTune,
    BassDrumLevel,
    BassDrumAttack,
    BassDrumDecay,
    SnareDrumTune,
    SnareDrumLevel,
    SnareDrumTone,
    SnareDrumSnappy,
    TomLowTune,
    TomLowLevel,
    TomLowDecay,
    TomMidTune,
    TomMidLevel,
    TomMidDecay,
    TomHiTune,
    TomHiLevel,
    TomHiDecay,
    RimLevel,
    ClapLevel,
    HihatLevel,
    HihatClosedDecay,
    HihatOpenDecay,
    CrashLevel,
    CrashTune,
    RideLevel,
    RideTune,
}

impl ParamId {
    pub const COUNT: usize = 28;

    pub const ALL: [ParamId; ParamId::COUNT] = [
        ParamId::Volume,
        ParamId::Accent,
        ParamId::BassDrumTune,
        ParamId::BassDrumLevel,
        ParamId::BassDrumAttack,
        ParamId::BassDrumDecay,
        ParamId::SnareDrumTune,
        ParamId::SnareDrumLevel,
        ParamId::SnareDrumTone,
        ParamId::SnareDrumSnappy,
        ParamId::TomLowTune,
        ParamId::TomLowLevel,
        ParamId::TomLowDecay,
        ParamId::TomMidTune,
        ParamId::TomMidLevel,
        ParamId::TomMidDecay,
        ParamId::TomHiTune,
        ParamId::TomHiLevel,
        ParamId::TomHiDecay,
        ParamId::RimLevel,
        ParamId::ClapLevel,
        ParamId::HihatLevel,
        ParamId::HihatClosedDecay,
        ParamId::HihatOpenDecay,
        ParamId::CrashLevel,
        ParamId::CrashTune,
        ParamId::RideLevel,
        ParamId::RideTune,
    ];

    pub fn index(self) -> usize {
        self as usize
    }

    pub fn path(self) -> &'static str {
        match self {
            ParamId::Volume => "global/volume",
            ParamId::Accent => "global/accent",
            ParamId::BassDrumTune => "bassdrum/tune",
            ParamId::BassDrumLevel => "bassdrum/level",
            ParamId::BassDrumAttack => "bassdrum/attack",
            ParamId::BassDrumDecay => "bassdrum/decay",
            ParamId::SnareDrumTune => "snaredrum/tune",
            ParamId::SnareDrumLevel => "snaredrum/level",
            ParamId::SnareDrumTone => "snaredrum/tone",
            ParamId::SnareDrumSnappy => "snaredrum/snappy",
            ParamId::TomLowTune => "tom-low/tune",
            ParamId::TomLowLevel => "tom-low/level",
            ParamId::TomLowDecay => "tom-low/decay",
            ParamId::TomMidTune => "tom-mid/tune",
            ParamId::TomMidLevel => "tom-mid/level",
            ParamId::TomMidDecay => "tom-mid/decay",
            ParamId::TomHiTune => "tom-hi/tune",
            ParamId::TomHiLevel => "tom-hi/level",
            ParamId::TomHiDecay => "tom-hi/decay",
            ParamId::RimLevel => "rim/level",
            ParamId::ClapLevel => "clap/level",
            ParamId::HihatLevel => "hihat/level",
            ParamId::HihatClosedDecay => "hihat/closed-decay",
            ParamId::HihatOpenDecay => "hihat/open-decay",
            ParamId::CrashLevel => "crash/level",
            ParamId::CrashTune => "crash/tune",
            ParamId::RideLevel => "ride/level",
            ParamId::RideTune => "ride/tune",
        }
    }

    pub fn from_path(path: &str) -> Result<ParamId, ParamError> {
        let path = path.trim().trim_matches('/');
        Self::ALL
            .iter()
            .copied()
            .find(|id| id.path() == path)
            .ok_or_else(|| ParamError::UnknownPath(path.to_string()))
    }

    pub fn mapping(self) -> Mapping {
        match self {
            ParamId::Accent => Mapping::Linear { min: 0.0, max: 6.0 },
            ParamId::BassDrumDecay => Mapping::Exponential { min: 0.05, max: 1.0 },
            ParamId::TomLowDecay | ParamId::TomMidDecay | ParamId::TomHiDecay => {
                Mapping::Exponential { min: 0.05, max: 1.5 }
            }
            ParamId::HihatClosedDecay => Mapping::Exponential { min: 0.02, max: 0.4 },
            ParamId::HihatOpenDecay => Mapping::Exponential { min: 0.1, max: 2.0 },
            ParamId::BassDrumAttack | ParamId::SnareDrumTone => AMOUNT,
            ParamId::BassDrumTune
            | ParamId::SnareDrumTune
            | ParamId::TomLowTune
            | ParamId::TomMidTune
            | ParamId::TomHiTune
            | ParamId::CrashTune
            | ParamId::RideTune => TUNE,
            ParamId::Volume
            | ParamId::BassDrumLevel
            | ParamId::SnareDrumLevel
            | ParamId::SnareDrumSnappy
            | ParamId::TomLowLevel
            | ParamId::TomMidLevel
            | ParamId::TomHiLevel
            | ParamId::RimLevel
            | ParamId::ClapLevel
            | ParamId::HihatLevel
            | ParamId::CrashLevel
            | ParamId::RideLevel => LEVEL,
        }
    }

    /// Knob position a fresh machine starts with.
    pub fn default_value(self) -> f32 {
        match self {
            ParamId::Volume => 1.0,
            ParamId::Accent => 0.5,
            ParamId::SnareDrumSnappy => 0.8,
            ParamId::HihatClosedDecay => 0.3,
            ParamId::BassDrumLevel
            | ParamId::SnareDrumLevel
            | ParamId::TomLowLevel
            | ParamId::TomMidLevel
            | ParamId::TomHiLevel
            | ParamId::RimLevel
            | ParamId::ClapLevel
            | ParamId::HihatLevel
            | ParamId::CrashLevel
            | ParamId::RideLevel => 0.9,
            _ => 0.5,
        }
    }

    /// Level parameter of an instrument.
    pub fn level(instrument: Instrument) -> ParamId {
        match instrument {
            Instrument::BassDrum => ParamId::BassDrumLevel,
            Instrument::SnareDrum => ParamId::SnareDrumLevel,
            Instrument::TomLow => ParamId::TomLowLevel,
            Instrument::TomMid => ParamId::TomMidLevel,
            Instrument::TomHi => ParamId::TomHiLevel,
            Instrument::Rim => ParamId::RimLevel,
            Instrument::Clap => ParamId::ClapLevel,
            Instrument::Hihat => ParamId::HihatLevel,
            Instrument::Crash => ParamId::CrashLevel,
            Instrument::Ride => ParamId::RideLevel,
        }
    }

    /// Tune parameter of an instrument, if it has one.
    pub fn tune(instrument: Instrument) -> Option<ParamId> {
        match instrument {
            Instrument::BassDrum => Some(ParamId::BassDrumTune),
            Instrument::SnareDrum => Some(ParamId::SnareDrumTune),
            Instrument::TomLow => Some(ParamId::TomLowTune),
            Instrument::TomMid => Some(ParamId::TomMidTune),
            Instrument::TomHi => Some(ParamId::TomHiTune),
            Instrument::Crash => Some(ParamId::CrashTune),
            Instrument::Ride => Some(ParamId::RideTune),
            Instrument::Rim | Instrument::Clap | Instrument::Hihat => None,
        }
    }

    /// Instrument whose sounding voices follow this level parameter.
    pub fn level_of(self) -> Option<Instrument> {
        Instrument::ALL
            .iter()
            .copied()
            .find(|instrument| ParamId::level(*instrument) == self)
    }
}

impl std::str::FromStr for ParamId {
    type Err = ParamError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ParamId::from_path(s)
    }
}

impl std::fmt::Display for ParamId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.path())
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum ParamError {
    UnknownPath(String),
}

impl std::fmt::Display for ParamError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ParamError::UnknownPath(path) => write!(f, "unknown parameter path '{}'", path),
        }
    }
}

impl std::error::Error for ParamError {}

/// Current knob positions for every parameter.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, PartialEq)]
pub struct Parameters {
    values: [f32; ParamId::COUNT],
}

impl Default for Parameters {
    fn default() -> Self {
        let mut values = [0.0; ParamId::COUNT];
        for id in ParamId::ALL {
            values[id.index()] = id.default_value();
        }
        Self { values }
    }
}

impl Parameters {
    /// Store a unipolar value. Values are clamped to [0, 1]; non-finite
    /// values are ignored. Returns whether the stored value changed.
    pub fn set(&mut self, id: ParamId, unipolar: f32) -> bool {
        if !unipolar.is_finite() {
            return false;
        }
        let value = unipolar.clamp(0.0, 1.0);
        let slot = &mut self.values[id.index()];
        let changed = *slot != value;
        *slot = value;
        changed
    }

    /// Unipolar knob position.
    pub fn get(&self, id: ParamId) -> f32 {
        self.values[id.index()]
    }

    /// Value in native units (semitones, seconds, dB, amounts).
    pub fn native(&self, id: ParamId) -> f32 {
        id.mapping().map(self.get(id))
    }

    pub fn volume_gain(&self) -> f32 {
        self.gain(ParamId::Volume)
    }

    /// Upward level boost for accented hits, in dB.
    pub fn accent_db(&self) -> f32 {
        self.native(ParamId::Accent)
    }

    pub fn level_gain(&self, instrument: Instrument) -> f32 {
        self.gain(ParamId::level(instrument))
    }

    /// Linear gain of a decibel parameter; a level at its floor is silent.
    fn gain(&self, id: ParamId) -> f32 {
        id.mapping().gain(self.get(id))
    }

    pub fn tune_semitones(&self, instrument: Instrument) -> f32 {
        ParamId::tune(instrument)
            .map(|id| self.native(id))
            .unwrap_or(0.0)
    }
}
