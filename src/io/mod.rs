//! Host-side buffers between the machine and an audio device.
//!
//! Devices hand out interleaved buffers of whatever length they like. The
//! machine wants nine separate channel buffers per block. `AudioOutput` owns
//! the channel buffers, renders the device buffer in blocks of at most the
//! configured size, and mixes the nine channels down onto every device
//! channel.

use arrayvec::ArrayVec;

use crate::engine::Machine;
use crate::sequencing::{ChannelId, PatternProvider};
use crate::voices::VoiceFactory;
use crate::MAX_BLOCK_SIZE;

#[derive(Debug)]
pub struct AudioOutput {
    buffers: Vec<Vec<f32>>,
    block_size: usize,
}

impl AudioOutput {
    /// Buffers for blocks of up to `block_size` frames.
    pub fn new(block_size: usize) -> Self {
        let block_size = block_size.clamp(1, MAX_BLOCK_SIZE);
        Self {
            buffers: vec![vec![0.0; block_size]; ChannelId::COUNT],
            block_size,
        }
    }

    pub fn block_size(&self) -> usize {
        self.block_size
    }

    /// Render one block of `frames` frames into the channel buffers.
    pub fn render<P: PatternProvider, F: VoiceFactory>(&mut self, machine: &mut Machine<P, F>, frames: usize) {
        let frames = frames.min(self.block_size);
        let mut outputs: ArrayVec<&mut [f32], { ChannelId::COUNT }> = self
            .buffers
            .iter_mut()
            .map(|buffer| {
                let block = &mut buffer[..frames];
                block.fill(0.0);
                block
            })
            .collect();
        machine.process(&mut outputs);
    }

    /// Frames of one channel from the last rendered block.
    pub fn channel(&self, id: ChannelId) -> &[f32] {
        &self.buffers[id.index()]
    }

    /// Fill an interleaved device buffer with `device_channels` channels,
    /// rendering as many blocks as it takes. Every drum channel is summed and
    /// the mono mix copied to all device channels.
    pub fn render_interleaved<P: PatternProvider, F: VoiceFactory>(
        &mut self,
        machine: &mut Machine<P, F>,
        data: &mut [f32],
        device_channels: usize,
    ) {
        let device_channels = device_channels.max(1);
        for chunk in data.chunks_mut(self.block_size * device_channels) {
            let frames = chunk.len() / device_channels;
            self.render(machine, frames);
            for (frame, out) in chunk.chunks_mut(device_channels).enumerate() {
                let sample: f32 = self.buffers.iter().map(|buffer| buffer[frame]).sum();
                out.fill(sample);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::EngineConfig;
    use crate::sequencing::{Instrument, Pattern};

    #[test]
    fn interleaves_the_mono_mix() {
        let mut machine = Machine::new(EngineConfig::default(), Pattern::new()).unwrap();
        machine.trigger(Instrument::Clap, false, false);
        let mut output = AudioOutput::new(64);

        let mut data = vec![0.0f32; 100 * 2];
        output.render_interleaved(&mut machine, &mut data, 2);

        assert!(data.chunks(2).all(|frame| frame[0] == frame[1]));
        assert!(data.iter().any(|s| *s != 0.0));
    }

    #[test]
    fn render_clears_previous_block() {
        let mut machine = Machine::new(EngineConfig::default(), Pattern::new()).unwrap();
        let mut output = AudioOutput::new(128);
        machine.trigger(Instrument::Rim, false, false);
        output.render(&mut machine, 128);
        assert!(output.channel(ChannelId::RimClap).iter().any(|s| *s != 0.0));

        for _ in 0..200 {
            output.render(&mut machine, 128);
        }
        assert!(output.channel(ChannelId::RimClap).iter().all(|s| *s == 0.0));
    }
}
