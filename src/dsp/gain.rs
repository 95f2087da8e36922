//! Decibel and gain conversions.

/*
Audio engineers measure level changes in decibels because hearing is
logarithmic - we perceive loudness ratios, not differences.

    dB   = 20 × log₁₀(gain)
    gain = 10^(dB / 20)

    ×1.0   =   0 dB  (unity)
    ×0.5   =  -6 dB
    ×0.1   = -20 dB
    ×2.0   =  +6 dB

Level parameters bottom out at the silence floor: anything at or below
-72 dB is treated as true silence (gain 0.0) so that a fully closed level
knob produces exact zeros rather than a faint residue.
*/

use super::envelope::SILENCE_DB;

#[inline]
pub fn db_to_gain(db: f32) -> f32 {
    if db <= SILENCE_DB {
        0.0
    } else {
        10.0_f32.powf(db / 20.0)
    }
}

#[inline]
pub fn gain_to_db(gain: f32) -> f32 {
    if gain <= 0.0 {
        SILENCE_DB
    } else {
        (20.0 * gain.log10()).max(SILENCE_DB)
    }
}

/// Playback-rate multiplier for a transposition in semitones.
#[inline]
pub fn semitones_to_ratio(semitones: f32) -> f32 {
    2.0_f32.powf(semitones / 12.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reference_points() {
        assert_eq!(db_to_gain(0.0), 1.0);
        assert!((db_to_gain(-6.0) - 0.501).abs() < 1e-3);
        assert!((db_to_gain(6.0) - 1.995).abs() < 1e-3);
        assert_eq!(db_to_gain(-72.0), 0.0);
        assert_eq!(db_to_gain(f32::NEG_INFINITY), 0.0);
    }

    #[test]
    fn gain_round_trips_through_db() {
        for gain in [0.01f32, 0.25, 0.5, 1.0, 1.5] {
            assert!((db_to_gain(gain_to_db(gain)) - gain).abs() < 1e-5);
        }
        assert_eq!(gain_to_db(0.0), SILENCE_DB);
    }

    #[test]
    fn octave_doubles_rate() {
        assert!((semitones_to_ratio(12.0) - 2.0).abs() < 1e-6);
        assert!((semitones_to_ratio(-12.0) - 0.5).abs() < 1e-6);
        assert_eq!(semitones_to_ratio(0.0), 1.0);
    }
}
