//! Short linear fade used when a voice is stopped.
//!
//! Cutting a voice mid-waveform leaves a step in the output. Instead the
//! voice is ramped to zero over 5 ms, starting at a given frame of the
//! current block.

const FADE_TIME: f32 = 0.005;

#[derive(Debug, Clone, Copy, PartialEq)]
enum FadeState {
    Playing,
    Pending { offset: usize },
    Fading { remaining: u32 },
    Done,
}

#[derive(Debug, Clone)]
pub struct FadeOut {
    state: FadeState,
    length: u32,
}

impl FadeOut {
    pub fn new(sample_rate: f32) -> Self {
        Self {
            state: FadeState::Playing,
            length: (FADE_TIME * sample_rate).round().max(1.0) as u32,
        }
    }

    /// Schedule the fade to begin at `offset` within the current block.
    ///
    /// A second stop while already fading keeps the running fade.
    pub fn stop(&mut self, offset: usize) {
        if self.state == FadeState::Playing {
            self.state = FadeState::Pending { offset };
        }
    }

    /// Gain for the frame at `index` of the current block; advances the fade.
    #[inline]
    pub fn next_gain(&mut self, index: usize) -> f32 {
        match self.state {
            FadeState::Playing => 1.0,
            FadeState::Pending { offset } if index < offset => 1.0,
            FadeState::Pending { .. } => {
                self.state = FadeState::Fading {
                    remaining: self.length,
                };
                self.next_gain(index)
            }
            FadeState::Fading { remaining } => {
                let gain = remaining as f32 / self.length as f32;
                self.state = if remaining > 1 {
                    FadeState::Fading {
                        remaining: remaining - 1,
                    }
                } else {
                    FadeState::Done
                };
                gain
            }
            FadeState::Done => 0.0,
        }
    }

    pub fn is_done(&self) -> bool {
        self.state == FadeState::Done
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unity_until_offset() {
        let mut fade = FadeOut::new(1_000.0); // 5 samples
        fade.stop(3);
        let gains: Vec<f32> = (0..10).map(|i| fade.next_gain(i)).collect();
        assert_eq!(&gains[..3], &[1.0, 1.0, 1.0]);
        assert_eq!(gains[3], 1.0);
        assert!(gains[4] < 1.0);
        assert_eq!(&gains[8..], &[0.0, 0.0]);
        assert!(fade.is_done());
    }

    #[test]
    fn fade_is_linear() {
        let mut fade = FadeOut::new(1_000.0);
        fade.stop(0);
        let gains: Vec<f32> = (0..6).map(|i| fade.next_gain(i)).collect();
        assert_eq!(gains, vec![1.0, 0.8, 0.6, 0.4, 0.2, 0.0]);
    }
}
