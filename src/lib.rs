pub mod config; // Engine-wide settings
pub mod dsp;
pub mod engine; // Block driver, channels and the pattern scheduler
pub mod io;
pub mod params; // Addressable voice parameters
pub mod sequencing; // Steps, patterns, groove and musical time
pub mod voices; // Drum voice synthesis

pub use config::{ConfigError, EngineConfig};
pub use engine::machine::Machine;

/// Render quantum the engine is tuned for.
pub const BLOCK_SIZE: usize = 128;
pub const MAX_BLOCK_SIZE: usize = 2048;
pub(crate) const MIN_TIME: f32 = 1.0 / 48_000.0;
