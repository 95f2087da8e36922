/*
Parameter Mappings
==================

Every control arrives as a unipolar value in [0, 1]: the position of a knob.
A mapping turns that position into the unit the DSP actually uses.

    Linear       min + u·(max − min)             tune in semitones, amounts
    Exponential  min · (max / min)^u             times in seconds
    Decibel      min_db + u·(max_db − min_db)    levels, converted to gain later

Times use an exponential curve so each part of the knob travel covers the same
ratio: at 0.05..1.0 s the middle of the knob is ≈0.22 s, not 0.525 s.
Levels are linear in decibels because that is how loudness is heard.
*/

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::dsp::gain::db_to_gain;

#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Mapping {
    Linear { min: f32, max: f32 },
    Exponential { min: f32, max: f32 },
    Decibel { min_db: f32, max_db: f32 },
}

impl Mapping {
    /// Unipolar position to native units. Input is clamped to [0, 1].
    pub fn map(&self, unipolar: f32) -> f32 {
        let u = unipolar.clamp(0.0, 1.0);
        match *self {
            Mapping::Linear { min, max } => min + u * (max - min),
            Mapping::Exponential { min, max } => min * (max / min).powf(u),
            Mapping::Decibel { min_db, max_db } => min_db + u * (max_db - min_db),
        }
    }

    /// Linear gain for a decibel mapping; other mappings pass the native value through.
    pub fn gain(&self, unipolar: f32) -> f32 {
        match self {
            Mapping::Decibel { .. } => db_to_gain(self.map(unipolar)),
            _ => self.map(unipolar),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn linear_endpoints() {
        let tune = Mapping::Linear { min: -12.0, max: 12.0 };
        assert_eq!(tune.map(0.0), -12.0);
        assert_eq!(tune.map(0.5), 0.0);
        assert_eq!(tune.map(1.0), 12.0);
        assert_eq!(tune.map(2.0), 12.0);
    }

    #[test]
    fn exponential_is_geometric() {
        let decay = Mapping::Exponential { min: 0.05, max: 1.0 };
        assert!((decay.map(0.0) - 0.05).abs() < 1e-6);
        assert!((decay.map(1.0) - 1.0).abs() < 1e-6);
        let mid = decay.map(0.5);
        assert!((mid - (0.05f32 * 1.0).sqrt()).abs() < 1e-5);
    }

    #[test]
    fn decibel_floor_is_silent() {
        let level = Mapping::Decibel { min_db: -72.0, max_db: 0.0 };
        assert_eq!(level.gain(0.0), 0.0);
        assert_eq!(level.gain(1.0), 1.0);
        assert!((level.map(0.5) + 36.0).abs() < 1e-6);
    }
}
