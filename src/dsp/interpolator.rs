/*
Parameter Smoothing
===================

Control values (levels, volumes) change in steps: a knob moves, a message
arrives between two blocks. Applying such a step to a playing voice produces a
discontinuity in the waveform, which we hear as a click. The interpolator
turns each step into a short straight ramp.

  value
    b ┤            ╭──────────
      │          ╱
      │        ╱
    a ┤──────╯
      └──────┬─────┬──────────→ samples
           set()  set() + ramp_length

The ramp always takes the same time (7 ms). The per-sample increment is
recomputed from the remaining distance whenever a new target arrives:

    delta = (target - value) / ramp_length

Floating point accumulation never lands exactly on the target, so the last
ramp sample assigns the target directly. This makes `is_at()` usable for
lifecycle decisions ("has this voice been faded to exactly zero?").
*/

const RAMP_TIME: f32 = 0.007;

#[derive(Debug, Clone)]
pub struct Interpolator {
    value: f32,
    target: f32,
    delta: f32,
    remaining: u32,
    ramp_length: u32,
    initialized: bool,
}

impl Interpolator {
    pub fn new(sample_rate: f32) -> Self {
        Self {
            value: 0.0,
            target: 0.0,
            delta: 0.0,
            remaining: 0,
            ramp_length: (RAMP_TIME * sample_rate).round().max(1.0) as u32,
            initialized: false,
        }
    }

    /// Create an interpolator that already sits at `value`.
    pub fn at(value: f32, sample_rate: f32) -> Self {
        let mut interpolator = Self::new(sample_rate);
        interpolator.set(value, false);
        interpolator
    }

    /// Move towards `target`, either immediately or over one ramp.
    ///
    /// The first value ever set always jumps: there is nothing to ramp from.
    pub fn set(&mut self, target: f32, smooth: bool) {
        if !smooth || !self.initialized {
            self.value = target;
            self.target = target;
            self.delta = 0.0;
            self.remaining = 0;
            self.initialized = true;
            return;
        }

        if target == self.target {
            return;
        }

        self.target = target;
        self.remaining = self.ramp_length;
        self.delta = (target - self.value) / self.ramp_length as f32;
    }

    /// Advance one sample and return the current value.
    #[inline]
    pub fn tick(&mut self) -> f32 {
        if self.remaining > 0 {
            self.remaining -= 1;
            if self.remaining == 0 {
                self.value = self.target;
            } else {
                self.value += self.delta;
            }
        }
        self.value
    }

    /// Exact comparison against a settled value.
    pub fn is_at(&self, value: f32) -> bool {
        self.remaining == 0 && self.value == value
    }

    pub fn is_ramping(&self) -> bool {
        self.remaining > 0
    }

    pub fn value(&self) -> f32 {
        self.value
    }

    pub fn target(&self) -> f32 {
        self.target
    }

    pub fn ramp_length(&self) -> u32 {
        self.ramp_length
    }
}
