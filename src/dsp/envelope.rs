use crate::MIN_TIME;

/*
One-Pole Exponential Envelopes
==============================

Struck drums do not decay linearly: every instant the skin loses a fixed
fraction of its remaining energy. That is an exponential decay, and the
cheapest way to produce one digitally is a one-pole recurrence.

Vocabulary
----------

  target        The value the envelope approaches (0.0 for an amplitude
                decay, the resting pitch for a frequency sweep).

  coefficient   The fraction of the remaining distance kept each sample.
                Close to 1.0 = slow, close to 0.0 = fast.

  time constant The time (seconds) after which the remaining distance has
                shrunk to 1/e (about 37%).


The Recurrence
--------------

    y ← target + k · (y − target)

    k = exp(−1 / (sample_rate · time_constant))

After n samples the distance to target is (y0 − target) · kⁿ. With n equal to
one time constant worth of samples that is (y0 − target) · e⁻¹.

  value
   y0 ┤╮
      │ ╲
      │  ╲_
      │    ╲__
      │       ╲____
  tgt ┤            ╲___________
      └───────────────────────→ samples


Hold Then Decay
---------------

Bass drums stay at full level for a few milliseconds before decaying. The
`Decay` envelope counts down a hold period at unity and only then starts the
recurrence. The hold is what keeps the low punch of a kick intact even at
short decay settings.
*/

/// Level under which a voice is considered inaudible (−72 dB).
pub const SILENCE_DB: f32 = -72.0;
pub const SILENCE_GAIN: f32 = 2.511_886_4e-4;

/// Per-sample coefficient of a one-pole approach with the given time constant.
#[inline]
pub fn coefficient(time_constant: f32, sample_rate: f32) -> f32 {
    (-1.0 / (sample_rate * time_constant.max(MIN_TIME))).exp()
}

/// Exponential approach from a start value towards a target.
#[derive(Debug, Clone)]
pub struct OnePole {
    value: f32,
    target: f32,
    coefficient: f32,
}

impl OnePole {
    pub fn new(start: f32, target: f32, time_constant: f32, sample_rate: f32) -> Self {
        Self {
            value: start,
            target,
            coefficient: coefficient(time_constant, sample_rate),
        }
    }

    /// Return the current value, then advance one sample.
    #[inline]
    pub fn next_sample(&mut self) -> f32 {
        let current = self.value;
        self.value = self.target + self.coefficient * (self.value - self.target);
        current
    }

    pub fn value(&self) -> f32 {
        self.value
    }
}

/// Amplitude envelope: unity for a hold period, then exponential decay to zero.
#[derive(Debug, Clone)]
pub struct Decay {
    level: f32,
    hold_samples: u32,
    coefficient: f32,
}

impl Decay {
    pub fn new(decay_time: f32, sample_rate: f32) -> Self {
        Self::with_hold(0.0, decay_time, sample_rate)
    }

    pub fn with_hold(hold_time: f32, decay_time: f32, sample_rate: f32) -> Self {
        Self {
            level: 1.0,
            hold_samples: (hold_time.max(0.0) * sample_rate).round() as u32,
            coefficient: coefficient(decay_time, sample_rate),
        }
    }

    /// Return the current level, then advance one sample.
    #[inline]
    pub fn next_sample(&mut self) -> f32 {
        let current = self.level;
        if self.hold_samples > 0 {
            self.hold_samples -= 1;
        } else {
            self.level *= self.coefficient;
        }
        current
    }

    pub fn level(&self) -> f32 {
        self.level
    }

    /// True while the envelope is above the silence floor.
    pub fn is_audible(&self) -> bool {
        self.level > SILENCE_GAIN
    }
}
