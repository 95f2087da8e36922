/*
Groove
======

A groove bends time inside a short repeating window so that a perfectly even
step grid plays with a human (swung) feel.

Within each window the normalized position x ∈ [0, 1) is passed through a
monotonic bijection f with f(0) = 0 and f(1⁻) → 1⁻. Because f keeps the
window boundaries in place, the downbeats of every window stay on the grid and
only the positions in between move.

  warped
    1 ┤                 ╭
      │             ╭──╯
      │         ╭──╯
      │     ╭──╯           identity: straight diagonal
      │  ╭─╯               power curve (exponent < 1): bowed upward,
    0 ┤─╯                  the off-beat lands later
      └──────────────────→ nominal
      0                  1

With the default window of an eighth note and sixteenth steps, the second
sixteenth of every pair sits at x = 0.5. A power curve with exponent e moves
it to 0.5^e: e = 1 is straight, e ≈ 0.585 puts it on the triplet position
(2/3), the classic shuffle.

Both directions are needed: `transform` maps grid time to played time when
steps are emitted, `inverse` maps played time back to the grid.
*/

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use super::duration::Duration;

/// A monotonic, boundary-preserving bijection on the unit interval
pub trait GrooveFunction {
    fn transform(&self, x: f64) -> f64;
    fn inverse(&self, x: f64) -> f64;
}

#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct IdentityGroove;

impl GrooveFunction for IdentityGroove {
    fn transform(&self, x: f64) -> f64 {
        x
    }

    fn inverse(&self, x: f64) -> f64 {
        x
    }
}

#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PowerCurve {
    exponent: f64,
}

impl PowerCurve {
    pub const MIN_EXPONENT: f64 = 0.25;
    pub const MAX_EXPONENT: f64 = 4.0;

    pub fn new(exponent: f64) -> Self {
        let exponent = if exponent.is_finite() {
            exponent.clamp(Self::MIN_EXPONENT, Self::MAX_EXPONENT)
        } else {
            1.0
        };
        Self { exponent }
    }

    /// Map a unipolar amount to a swing curve: 0.0 is straight, 1.0 pushes
    /// the off-beat to 0.5^0.5 ≈ 0.71 of the window.
    pub fn from_amount(amount: f64) -> Self {
        Self::new(1.0 - 0.5 * amount.clamp(0.0, 1.0))
    }

    /// Deserialized curves bypass `new`, so the exponent is clamped on read.
    pub fn exponent(&self) -> f64 {
        if self.exponent.is_finite() {
            self.exponent.clamp(Self::MIN_EXPONENT, Self::MAX_EXPONENT)
        } else {
            1.0
        }
    }
}

impl GrooveFunction for PowerCurve {
    fn transform(&self, x: f64) -> f64 {
        x.clamp(0.0, 1.0).powf(self.exponent())
    }

    fn inverse(&self, x: f64) -> f64 {
        x.clamp(0.0, 1.0).powf(1.0 / self.exponent())
    }
}

#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub enum GrooveShape {
    #[default]
    Identity,
    Power(PowerCurve),
}

impl GrooveFunction for GrooveShape {
    fn transform(&self, x: f64) -> f64 {
        match self {
            GrooveShape::Identity => IdentityGroove.transform(x),
            GrooveShape::Power(curve) => curve.transform(x),
        }
    }

    fn inverse(&self, x: f64) -> f64 {
        match self {
            GrooveShape::Identity => IdentityGroove.inverse(x),
            GrooveShape::Power(curve) => curve.inverse(x),
        }
    }
}

/// A groove shape applied per repeating window of musical time
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Groove {
    pub shape: GrooveShape,
    pub window: Duration,
}

impl Default for Groove {
    fn default() -> Self {
        Self::identity()
    }
}

impl Groove {
    pub fn identity() -> Self {
        Self {
            shape: GrooveShape::Identity,
            window: Duration::EIGHTH,
        }
    }

    pub fn power(exponent: f64) -> Self {
        Self {
            shape: GrooveShape::Power(PowerCurve::new(exponent)),
            window: Duration::EIGHTH,
        }
    }

    pub fn swing(amount: f64) -> Self {
        Self {
            shape: GrooveShape::Power(PowerCurve::from_amount(amount)),
            window: Duration::EIGHTH,
        }
    }

    pub fn with_window(mut self, window: Duration) -> Self {
        self.window = window;
        self
    }

    /// Nominal position (bars) to played position (bars).
    pub fn warp(&self, bars: f64) -> f64 {
        self.apply(bars, f64::INFINITY, |x| self.shape.transform(x))
    }

    /// Played position (bars) back to nominal position (bars).
    pub fn unwarp(&self, bars: f64) -> f64 {
        self.apply(bars, f64::INFINITY, |x| self.shape.inverse(x))
    }

    /// Like `warp`, for a position inside a cycle of `cycle_bars`.
    ///
    /// A window cut short by the cycle end is squeezed to the part that
    /// remains, so the played position never reaches the next cycle.
    pub fn warp_in_cycle(&self, bars: f64, cycle_bars: f64) -> f64 {
        self.apply(bars, cycle_bars, |x| self.shape.transform(x))
    }

    /// Inverse of `warp_in_cycle`.
    pub fn unwarp_in_cycle(&self, bars: f64, cycle_bars: f64) -> f64 {
        self.apply(bars, cycle_bars, |x| self.shape.inverse(x))
    }

    fn apply(&self, bars: f64, end: f64, f: impl Fn(f64) -> f64) -> f64 {
        if self.shape == GrooveShape::Identity {
            return bars;
        }
        // a zero or unbounded window has no inside to bend
        let window = self.window.to_bars();
        if window <= 0.0 || !window.is_finite() {
            return bars;
        }
        let start = (bars / window).floor() * window;
        let span = window.min(end - start);
        if span <= 0.0 || span.is_nan() {
            return bars;
        }
        let x = (bars - start) / span;
        start + span * f(x)
    }
}
