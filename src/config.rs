//! Engine configuration.
//!
//! Everything the engine needs to know before the first block is rendered:
//! output sample rate, the size of the render quantum and the initial tempo.
//! Tempo can change later through [`Machine::set_bpm`](crate::Machine::set_bpm);
//! the other two are fixed for the lifetime of a machine.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::{BLOCK_SIZE, MAX_BLOCK_SIZE};

pub const MIN_BPM: f64 = 20.0;
pub const MAX_BPM: f64 = 400.0;

#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EngineConfig {
    /// Output sample rate in Hz
    pub sample_rate: f32,
    /// Frames rendered per `process` call
    pub block_size: usize,
    /// Initial tempo in beats per minute
    pub bpm: f64,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            sample_rate: 44_100.0,
            block_size: BLOCK_SIZE,
            bpm: 120.0,
        }
    }
}

impl EngineConfig {
    pub fn with_sample_rate(mut self, sample_rate: f32) -> Self {
        self.sample_rate = sample_rate;
        self
    }

    pub fn with_block_size(mut self, block_size: usize) -> Self {
        self.block_size = block_size;
        self
    }

    pub fn with_bpm(mut self, bpm: f64) -> Self {
        self.bpm = bpm;
        self
    }

    /// Check every field against the ranges the engine can render without
    /// producing non-finite output.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.sample_rate.is_finite() || self.sample_rate <= 0.0 {
            return Err(ConfigError::InvalidSampleRate(self.sample_rate));
        }
        if self.block_size == 0 || self.block_size > MAX_BLOCK_SIZE {
            return Err(ConfigError::InvalidBlockSize(self.block_size));
        }
        validate_bpm(self.bpm)
    }
}

pub(crate) fn validate_bpm(bpm: f64) -> Result<(), ConfigError> {
    if !bpm.is_finite() || !(MIN_BPM..=MAX_BPM).contains(&bpm) {
        return Err(ConfigError::InvalidTempo(bpm));
    }
    Ok(())
}

/// Errors reported when an engine is configured with unusable settings
#[derive(Debug, Clone, PartialEq)]
pub enum ConfigError {
    InvalidSampleRate(f32),
    InvalidBlockSize(usize),
    InvalidTempo(f64),
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::InvalidSampleRate(rate) => {
                write!(f, "Invalid sample rate: {} Hz (must be finite and positive)", rate)
            }
            ConfigError::InvalidBlockSize(size) => {
                write!(
                    f,
                    "Invalid block size: {} frames (must be between 1 and {})",
                    size, MAX_BLOCK_SIZE
                )
            }
            ConfigError::InvalidTempo(bpm) => {
                write!(
                    f,
                    "Invalid tempo: {} bpm (must be between {} and {})",
                    bpm, MIN_BPM, MAX_BPM
                )
            }
        }
    }
}

impl std::error::Error for ConfigError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_is_valid() {
        let config = EngineConfig::default();
        assert_eq!(config.block_size, 128);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn rejects_zero_block_size() {
        let config = EngineConfig::default().with_block_size(0);
        assert_eq!(config.validate(), Err(ConfigError::InvalidBlockSize(0)));
    }

    #[test]
    fn rejects_oversized_block() {
        let config = EngineConfig::default().with_block_size(MAX_BLOCK_SIZE + 1);
        assert!(matches!(config.validate(), Err(ConfigError::InvalidBlockSize(_))));
    }

    #[test]
    fn rejects_non_finite_sample_rate() {
        let config = EngineConfig::default().with_sample_rate(f32::NAN);
        assert!(matches!(config.validate(), Err(ConfigError::InvalidSampleRate(_))));
    }

    #[test]
    fn rejects_tempo_out_of_range() {
        assert!(EngineConfig::default().with_bpm(5.0).validate().is_err());
        assert!(EngineConfig::default().with_bpm(1_000.0).validate().is_err());
        assert!(EngineConfig::default().with_bpm(174.0).validate().is_ok());
    }
}
