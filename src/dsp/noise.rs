//! Deterministic white noise.
//!
//! A linear congruential generator is plenty for percussion: the spectrum is
//! flat enough, it never allocates, and a fixed seed makes renders repeatable.

#[derive(Debug, Clone)]
pub struct Noise {
    state: u32,
}

impl Noise {
    pub fn new(seed: u32) -> Self {
        Self { state: seed }
    }

    /// Next sample in [-1.0, 1.0].
    #[inline]
    pub fn next_sample(&mut self) -> f32 {
        self.state = self.state.wrapping_mul(1_664_525).wrapping_add(1_013_904_223);
        (self.state as f32 / u32::MAX as f32) * 2.0 - 1.0
    }
}

impl Default for Noise {
    fn default() -> Self {
        Self::new(0x909)
    }
}
