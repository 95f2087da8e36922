//! Benchmarks for low-level DSP primitives.

mod envelope;
mod filter;
mod interpolator;
mod noise;

pub use envelope::bench_envelope;
pub use filter::bench_filter;
pub use interpolator::bench_interpolator;
pub use noise::bench_noise;
