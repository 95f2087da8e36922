//! Real-world scenario benchmarks.
//!
//! Single voices as a pattern triggers them, and whole machine blocks
//! with a busy pattern running.

mod machine;
mod voices;

pub use machine::bench_machine;
pub use voices::bench_voices;
