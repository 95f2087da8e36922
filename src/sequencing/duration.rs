#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// A step length as an exact fraction of a bar. Triplet scales stay exact
/// until converted with `to_bars`.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Duration {
    pub numerator: u32,
    /// 4 = quarter, 8 = eighth, ...
    pub denominator: u32,
}

impl Duration {
    pub const WHOLE: Duration = Duration {
        numerator: 1,
        denominator: 1,
    };
    pub const QUARTER: Duration = Duration {
        numerator: 1,
        denominator: 4,
    };
    pub const EIGHTH: Duration = Duration {
        numerator: 1,
        denominator: 8,
    };
    pub const SIXTEENTH: Duration = Duration {
        numerator: 1,
        denominator: 16,
    };
    pub const THIRTY_SECOND: Duration = Duration {
        numerator: 1,
        denominator: 32,
    };

    pub const EIGHTH_TRIPLET: Duration = Duration::EIGHTH.triplet();
    pub const SIXTEENTH_TRIPLET: Duration = Duration::SIXTEENTH.triplet();

    pub const fn new(numerator: u32, denominator: u32) -> Self {
        Duration {
            numerator,
            denominator,
        }
    }

    /// Three in the time of two.
    pub const fn triplet(self) -> Self {
        self.tuplet(2, 3)
    }

    /// `played` steps in the time of `in_time_of`.
    pub const fn tuplet(self, in_time_of: u32, played: u32) -> Self {
        Duration {
            numerator: self.numerator * in_time_of,
            denominator: self.denominator * played,
        }
        .reduce()
    }

    pub const fn reduce(self) -> Self {
        let gcd = const_gcd(self.numerator, self.denominator);
        Duration {
            numerator: self.numerator / gcd,
            denominator: self.denominator / gcd,
        }
    }

    /// Multiply by a whole number of repetitions
    pub const fn times(self, count: u32) -> Self {
        Duration {
            numerator: self.numerator * count,
            denominator: self.denominator,
        }
        .reduce()
    }

    /// Length in bars.
    pub fn to_bars(self) -> f64 {
        self.numerator as f64 / self.denominator as f64
    }
}

const fn const_gcd(mut a: u32, mut b: u32) -> u32 {
    while b != 0 {
        let temp = b;
        b = a % b;
        a = temp;
    }
    a
}
