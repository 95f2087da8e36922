/*
Drum Pattern
============

A pattern is one cycle of the step sequencer: a grid of ten instruments by
sixteen steps, plus the settings that decide how the grid is played back.

            step  0 1 2 3 4 5 6 7 8 9 ...
    bassdrum      X . . . x . . . X . ...
    snaredrum     . . . . X . . o . . ...      o = Extra (flam)
    hihat         x x o x x x o x x x ...      o = Extra (open hihat)
    accent        * . . . . . . . * . ...

Every cell holds exactly one `Step`. `Active` is a weak hit, `Full` an accented
one, and `Extra` depends on the instrument (see `Instrument::extra_kind`). A
step in the accent row accents every instrument playing on it.

`scale` sets how long a step lasts, `last_step` truncates the cycle, and
`flam_delay` picks one of eight distances between the two strokes of a flam:

    flam_delay_bars = (flam_delay + 1) / 512

which is 1/128 of a beat at 0 up to 1/16 of a beat at 7.

The grid is fixed-size and lives inline, so a pattern can be cloned and read
from the audio thread without touching the heap.
*/

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use super::duration::Duration;
use super::groove::Groove;
use super::instrument::Instrument;

pub const STEPS: usize = 16;
pub const MAX_FLAM_DELAY: u8 = 7;

#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Step {
    #[default]
    None,
    /// Weak hit
    Active,
    /// Accented hit
    Full,
    /// Flam, or open hihat on the hihat row
    Extra,
}

impl Step {
    /// Parse the one-character grid notation used by `Pattern::with_row`.
    pub fn from_char(c: char) -> Option<Step> {
        match c {
            '.' | '-' => Some(Step::None),
            'x' => Some(Step::Active),
            'X' => Some(Step::Full),
            'o' => Some(Step::Extra),
            _ => None,
        }
    }
}

/// Length of one step
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Scale {
    ThirtySecond,
    SixteenthTriplet,
    #[default]
    Sixteenth,
    EighthTriplet,
}

impl Scale {
    pub fn step_duration(self) -> Duration {
        match self {
            Scale::ThirtySecond => Duration::THIRTY_SECOND,
            Scale::SixteenthTriplet => Duration::SIXTEENTH_TRIPLET,
            Scale::Sixteenth => Duration::SIXTEENTH,
            Scale::EighthTriplet => Duration::EIGHTH_TRIPLET,
        }
    }

    /// Step length in bars.
    pub fn step_bars(self) -> f64 {
        self.step_duration().to_bars()
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum PatternError {
    InstrumentOutOfRange(usize),
    StepOutOfRange(usize),
    LastStepOutOfRange(usize),
    FlamDelayOutOfRange(u8),
    InvalidRow(char),
}

impl std::fmt::Display for PatternError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PatternError::InstrumentOutOfRange(index) => {
                write!(f, "instrument index {} is out of range (0..{})", index, Instrument::COUNT)
            }
            PatternError::StepOutOfRange(index) => {
                write!(f, "step index {} is out of range (0..{})", index, STEPS)
            }
            PatternError::LastStepOutOfRange(last) => {
                write!(f, "last step {} is out of range (1..={})", last, STEPS)
            }
            PatternError::FlamDelayOutOfRange(delay) => {
                write!(f, "flam delay {} is out of range (0..={})", delay, MAX_FLAM_DELAY)
            }
            PatternError::InvalidRow(c) => write!(f, "unexpected '{}' in step row", c),
        }
    }
}

impl std::error::Error for PatternError {}

#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, PartialEq)]
pub struct Pattern {
    steps: [[Step; STEPS]; Instrument::COUNT],
    accents: [bool; STEPS],
    scale: Scale,
    flam_delay: u8,
    last_step: u8,
    groove: Groove,
}

impl Default for Pattern {
    fn default() -> Self {
        Self::new()
    }
}

impl Pattern {
    /// An empty sixteen-step pattern at 1/16 with no groove.
    pub fn new() -> Self {
        Self {
            steps: [[Step::None; STEPS]; Instrument::COUNT],
            accents: [false; STEPS],
            scale: Scale::Sixteenth,
            flam_delay: 0,
            last_step: STEPS as u8,
            groove: Groove::identity(),
        }
    }

    /// Fill one instrument row from grid notation: `.` or `-` rest, `x` weak,
    /// `X` accented, `o` extra. Whitespace and `|` are ignored.
    pub fn with_row(mut self, instrument: Instrument, row: &str) -> Result<Self, PatternError> {
        let mut index = 0;
        for c in row.chars().filter(|c| !c.is_whitespace() && *c != '|') {
            let step = Step::from_char(c).ok_or(PatternError::InvalidRow(c))?;
            self.set(instrument, index, step)?;
            index += 1;
        }
        Ok(self)
    }

    pub fn with_scale(mut self, scale: Scale) -> Self {
        self.scale = scale;
        self
    }

    pub fn with_groove(mut self, groove: Groove) -> Self {
        self.groove = groove;
        self
    }

    pub fn with_last_step(mut self, last_step: usize) -> Result<Self, PatternError> {
        self.set_last_step(last_step)?;
        Ok(self)
    }

    pub fn with_flam_delay(mut self, flam_delay: u8) -> Result<Self, PatternError> {
        self.set_flam_delay(flam_delay)?;
        Ok(self)
    }

    pub fn step(&self, instrument: Instrument, index: usize) -> Step {
        self.steps[instrument.index()]
            .get(index)
            .copied()
            .unwrap_or(Step::None)
    }

    pub fn set(&mut self, instrument: Instrument, index: usize, step: Step) -> Result<(), PatternError> {
        let cell = self.steps[instrument.index()]
            .get_mut(index)
            .ok_or(PatternError::StepOutOfRange(index))?;
        *cell = step;
        Ok(())
    }

    /// Index-addressed mutation for hosts that work with raw grid coordinates.
    pub fn set_step(&mut self, instrument_index: usize, step_index: usize, step: Step) -> Result<(), PatternError> {
        let instrument =
            Instrument::from_index(instrument_index).ok_or(PatternError::InstrumentOutOfRange(instrument_index))?;
        self.set(instrument, step_index, step)
    }

    pub fn accent(&self, index: usize) -> bool {
        self.accents.get(index).copied().unwrap_or(false)
    }

    pub fn set_accent(&mut self, index: usize, accent: bool) -> Result<(), PatternError> {
        let cell = self.accents.get_mut(index).ok_or(PatternError::StepOutOfRange(index))?;
        *cell = accent;
        Ok(())
    }

    pub fn scale(&self) -> Scale {
        self.scale
    }

    pub fn set_scale(&mut self, scale: Scale) {
        self.scale = scale;
    }

    pub fn flam_delay(&self) -> u8 {
        self.flam_delay.min(MAX_FLAM_DELAY)
    }

    pub fn set_flam_delay(&mut self, flam_delay: u8) -> Result<(), PatternError> {
        if flam_delay > MAX_FLAM_DELAY {
            return Err(PatternError::FlamDelayOutOfRange(flam_delay));
        }
        self.flam_delay = flam_delay;
        Ok(())
    }

    /// Distance between the two strokes of a flam, in bars.
    pub fn flam_delay_bars(&self) -> f64 {
        (self.flam_delay() as f64 + 1.0) / 512.0
    }

    // Deserialized patterns bypass the setters, so reads clamp.
    pub fn last_step(&self) -> usize {
        (self.last_step as usize).clamp(1, STEPS)
    }

    pub fn set_last_step(&mut self, last_step: usize) -> Result<(), PatternError> {
        if !(1..=STEPS).contains(&last_step) {
            return Err(PatternError::LastStepOutOfRange(last_step));
        }
        self.last_step = last_step as u8;
        Ok(())
    }

    pub fn groove(&self) -> &Groove {
        &self.groove
    }

    pub fn set_groove(&mut self, groove: Groove) {
        self.groove = groove;
    }

    /// Length of one full cycle in bars.
    pub fn cycle_bars(&self) -> f64 {
        self.last_step() as f64 * self.scale.step_bars()
    }

    pub fn is_empty(&self) -> bool {
        self.steps.iter().flatten().all(|step| *step == Step::None)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_pattern_is_empty() {
        let pattern = Pattern::new();
        assert!(pattern.is_empty());
        assert_eq!(pattern.last_step(), 16);
        assert_eq!(pattern.scale(), Scale::Sixteenth);
        assert_eq!(pattern.cycle_bars(), 1.0);
    }

    #[test]
    fn mutation_checks_bounds() {
        let mut pattern = Pattern::new();
        assert_eq!(pattern.set_step(10, 0, Step::Full), Err(PatternError::InstrumentOutOfRange(10)));
        assert_eq!(pattern.set_step(0, 16, Step::Full), Err(PatternError::StepOutOfRange(16)));
        assert_eq!(pattern.set_accent(16, true), Err(PatternError::StepOutOfRange(16)));
        assert_eq!(pattern.set_last_step(0), Err(PatternError::LastStepOutOfRange(0)));
        assert_eq!(pattern.set_last_step(17), Err(PatternError::LastStepOutOfRange(17)));
        assert_eq!(pattern.set_flam_delay(8), Err(PatternError::FlamDelayOutOfRange(8)));
        assert!(pattern.is_empty());

        pattern.set_step(9, 15, Step::Extra).unwrap();
        assert_eq!(pattern.step(Instrument::Ride, 15), Step::Extra);
    }

    #[test]
    fn each_cell_holds_one_step() {
        let mut pattern = Pattern::new();
        pattern.set(Instrument::Clap, 3, Step::Active).unwrap();
        pattern.set(Instrument::Clap, 3, Step::Full).unwrap();
        assert_eq!(pattern.step(Instrument::Clap, 3), Step::Full);
        assert_eq!(pattern.step(Instrument::Rim, 3), Step::None);
    }

    #[test]
    fn row_notation() {
        let pattern = Pattern::new()
            .with_row(Instrument::Hihat, "x.o. | X--x")
            .unwrap();
        assert_eq!(pattern.step(Instrument::Hihat, 0), Step::Active);
        assert_eq!(pattern.step(Instrument::Hihat, 2), Step::Extra);
        assert_eq!(pattern.step(Instrument::Hihat, 4), Step::Full);
        assert_eq!(pattern.step(Instrument::Hihat, 7), Step::Active);
        assert_eq!(pattern.step(Instrument::Hihat, 8), Step::None);

        assert_eq!(
            Pattern::new().with_row(Instrument::Hihat, "x?").unwrap_err(),
            PatternError::InvalidRow('?')
        );
        assert_eq!(
            Pattern::new().with_row(Instrument::Hihat, &"x".repeat(17)).unwrap_err(),
            PatternError::StepOutOfRange(16)
        );
    }

    #[test]
    fn flam_delay_in_bars() {
        let mut pattern = Pattern::new();
        assert_eq!(pattern.flam_delay_bars(), 1.0 / 512.0);
        pattern.set_flam_delay(7).unwrap();
        // a sixteenth of a beat
        assert_eq!(pattern.flam_delay_bars(), 1.0 / 64.0);
    }

    #[test]
    fn scale_step_lengths() {
        assert_eq!(Scale::ThirtySecond.step_bars(), 1.0 / 32.0);
        assert_eq!(Scale::Sixteenth.step_bars(), 1.0 / 16.0);
        assert!((Scale::SixteenthTriplet.step_bars() - 1.0 / 24.0).abs() < 1e-12);
        assert!((Scale::EighthTriplet.step_bars() - 1.0 / 12.0).abs() < 1e-12);

        let pattern = Pattern::new()
            .with_scale(Scale::ThirtySecond)
            .with_last_step(8)
            .unwrap();
        assert_eq!(pattern.cycle_bars(), 0.25);
    }
}
