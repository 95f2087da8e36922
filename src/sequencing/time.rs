//! Conversions between musical time (bars of 4/4) and audio frames.
//!
//!   frames per bar = 4 beats · 60 / bpm · sample_rate
//!
//! At 120 bpm and 44.1 kHz a bar lasts two seconds = 88 200 frames, so a
//! sixteenth step is 5 512.5 frames.

const BEATS_PER_BAR: f64 = 4.0;

pub fn num_frames_to_bars(frames: f64, bpm: f64, sample_rate: f64) -> f64 {
    frames * bpm / (BEATS_PER_BAR * 60.0 * sample_rate)
}

pub fn bars_to_num_frames(bars: f64, bpm: f64, sample_rate: f64) -> f64 {
    bars * BEATS_PER_BAR * 60.0 * sample_rate / bpm
}
