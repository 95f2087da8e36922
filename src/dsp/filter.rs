use std::f32::consts::TAU;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/*
| type              | constructed by       | passes          | rejects      |
| ----------------- | -------------------- | --------------- | ------------ |
| low-pass          | LPF                  | below cutoff    | above cutoff |
| high-pass         | HPF                  | above cutoff    | below cutoff |
| band-pass         | BPF (band output)    | around cutoff   | far from it  |

Topology-preserving state variable filter. The drum voices use it to shape
white noise: the snare's wires are band-limited noise, the synthetic hihat and
cymbal tables are high-passed noise.
*/

// Damping of 2 gives a flat, non-resonant response.
const DAMPING: f32 = 2.0;

#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum FilterType {
    LowPass,
    HighPass,
    BandPass,
}

pub struct FilterOutputs {
    pub lowpass: f32,
    pub bandpass: f32,
    pub highpass: f32,
}

#[derive(Debug, Clone)]
pub struct SVFilter {
    ic1eq: f32, // First integrator's memory
    ic2eq: f32, // Second integrator's memory

    g: f32,
    filter_type: FilterType,
}

impl SVFilter {
    pub fn new(filter_type: FilterType, cutoff_hz: f32, sample_rate: f32) -> Self {
        let mut filter = Self {
            ic1eq: 0.0,
            ic2eq: 0.0,
            g: 0.0,
            filter_type,
        };
        filter.set_cutoff(cutoff_hz, sample_rate);
        filter
    }

    pub fn lowpass(cutoff_hz: f32, sample_rate: f32) -> Self {
        Self::new(FilterType::LowPass, cutoff_hz, sample_rate)
    }

    pub fn highpass(cutoff_hz: f32, sample_rate: f32) -> Self {
        Self::new(FilterType::HighPass, cutoff_hz, sample_rate)
    }

    pub fn bandpass(cutoff_hz: f32, sample_rate: f32) -> Self {
        Self::new(FilterType::BandPass, cutoff_hz, sample_rate)
    }

    /// Cutoff is kept below Nyquist so the prewarp stays finite.
    pub fn set_cutoff(&mut self, cutoff_hz: f32, sample_rate: f32) {
        let cutoff = cutoff_hz.clamp(10.0, sample_rate * 0.49);
        let wd = TAU * cutoff;
        let wa = (2.0 * sample_rate) * (wd / (2.0 * sample_rate)).tan();
        self.g = wa / (2.0 * sample_rate);
    }

    #[inline]
    pub fn next_outputs(&mut self, sample: f32) -> FilterOutputs {
        let h = 1.0 / (1.0 + self.g * (self.g + DAMPING));
        let v3 = sample - self.ic2eq;
        let v1 = h * (self.ic1eq + self.g * v3);
        let v2 = self.ic2eq + self.g * v1;

        self.ic1eq = 2.0 * v1 - self.ic1eq;
        self.ic2eq = 2.0 * v2 - self.ic2eq;

        FilterOutputs {
            lowpass: v2,
            bandpass: v1,
            highpass: sample - DAMPING * v1 - v2,
        }
    }

    #[inline]
    pub fn next_sample(&mut self, sample: f32) -> f32 {
        let outputs = self.next_outputs(sample);
        match self.filter_type {
            FilterType::LowPass => outputs.lowpass,
            FilterType::HighPass => outputs.highpass,
            FilterType::BandPass => outputs.bandpass,
        }
    }

    pub fn render(&mut self, buffer: &mut [f32]) {
        for sample in buffer.iter_mut() {
            *sample = self.next_sample(*sample);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE_RATE: f32 = 48_000.0;

    fn sine(freq: f32, len: usize) -> Vec<f32> {
        (0..len)
            .map(|n| (TAU * freq * n as f32 / SAMPLE_RATE).sin())
            .collect()
    }

    fn peak_after_transient(buffer: &[f32]) -> f32 {
        let skip = buffer.len().min(256);
        buffer[skip..].iter().fold(0.0f32, |acc, &x| acc.max(x.abs()))
    }

    #[test]
    fn lowpass_passes_dc() {
        let mut filter = SVFilter::lowpass(500.0, SAMPLE_RATE);
        let mut buffer = vec![1.0; 512];
        filter.render(&mut buffer);
        assert!(buffer[511] > 0.99);
    }

    #[test]
    fn highpass_blocks_dc() {
        let mut filter = SVFilter::highpass(500.0, SAMPLE_RATE);
        let mut buffer = vec![1.0; 2048];
        filter.render(&mut buffer);
        assert!(buffer[2047].abs() < 0.01);
    }

    #[test]
    fn lowpass_attenuates_high_frequencies() {
        let mut filter = SVFilter::lowpass(200.0, SAMPLE_RATE);
        let mut buffer = sine(8_000.0, 2048);
        filter.render(&mut buffer);
        assert!(peak_after_transient(&buffer) < 0.05);
    }

    #[test]
    fn bandpass_emphasizes_cutoff() {
        let mut at_cutoff = sine(2_000.0, 4096);
        let mut far_below = sine(100.0, 4096);
        SVFilter::bandpass(2_000.0, SAMPLE_RATE).render(&mut at_cutoff);
        SVFilter::bandpass(2_000.0, SAMPLE_RATE).render(&mut far_below);
        assert!(peak_after_transient(&at_cutoff) > 3.0 * peak_after_transient(&far_below));
    }

    #[test]
    fn cutoff_above_nyquist_stays_finite() {
        let mut filter = SVFilter::lowpass(100_000.0, SAMPLE_RATE);
        let mut buffer = sine(1_000.0, 256);
        filter.render(&mut buffer);
        assert!(buffer.iter().all(|s| s.is_finite()));
    }
}
