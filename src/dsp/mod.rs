//! Low-level DSP primitives used by the drum voices.
//!
//! These components are allocation-free and realtime-safe, making them safe to
//! embed directly inside voice structs. They stay focused on the
//! signal-processing math; lifecycle and mixing live in `voices` and `engine`.

/// One-pole exponential envelopes and the silence floor.
pub mod envelope;
/// Linear stop fade.
pub mod fade;
/// State-variable filter for shaping noise.
pub mod filter;
/// Decibel conversions.
pub mod gain;
/// Click-free parameter smoothing.
pub mod interpolator;
/// White noise source.
pub mod noise;

pub use envelope::{Decay, OnePole, SILENCE_DB, SILENCE_GAIN};
pub use fade::FadeOut;
pub use interpolator::Interpolator;
pub use noise::Noise;
