/*
Machine
=======

The machine is the block driver. Each `process` call renders one block into
nine channel buffers:

    parameter messages ──▶ apply_messages()            (between blocks)

    process():
      1. pad hits queued with trigger()      ─┐
      2. scheduler: pattern → PlayEvents     ─┴▶ BlockEvents (sorted by offset)
      3. per channel:
            render voices up to the next event offset
            trigger the event's voice there (stealing the channel)
            ...
            render the rest of the block

Rendering stops at every event so a trigger starts on its exact frame and the
voice it steals starts fading on that same frame.

Nothing in `process` allocates: voices live inline in fixed-capacity channel
lists, waveforms are shared, and the event lists have fixed capacity.
*/

use arrayvec::ArrayVec;
use tracing::{debug, info, warn};

use crate::config::{validate_bpm, ConfigError, EngineConfig};
use crate::params::{MessageReceiver, ParamId, Parameters};
use crate::sequencing::{ChannelId, Instrument, PatternProvider};
use crate::voices::{DrumKit, VoiceFactory, Waveforms};

use super::channel::Channel;
use super::events::{BlockEvents, PlayEvent};
use super::scheduler::Scheduler;

/// Pad hits that can wait for the next block.
pub const MAX_MANUAL_TRIGGERS: usize = 16;

pub struct Machine<P: PatternProvider, F: VoiceFactory = DrumKit> {
    config: EngineConfig,
    params: Parameters,
    factory: F,
    provider: P,
    scheduler: Scheduler,
    channels: [Channel; ChannelId::COUNT],
    events: BlockEvents,
    manual: ArrayVec<PlayEvent, MAX_MANUAL_TRIGGERS>,
    playing: bool,
}

impl<P: PatternProvider> Machine<P, DrumKit> {
    /// A machine playing the stock kit with synthetic waveforms.
    pub fn new(config: EngineConfig, provider: P) -> Result<Self, ConfigError> {
        config.validate()?;
        let kit = DrumKit::new(Waveforms::synthetic(config.sample_rate), config.sample_rate);
        Self::with_factory(config, provider, kit)
    }
}

impl<P: PatternProvider, F: VoiceFactory> Machine<P, F> {
    pub fn with_factory(config: EngineConfig, provider: P, factory: F) -> Result<Self, ConfigError> {
        config.validate()?;
        info!(
            sample_rate = config.sample_rate,
            block_size = config.block_size,
            bpm = config.bpm,
            "drum machine ready"
        );
        Ok(Self {
            config,
            params: Parameters::default(),
            factory,
            provider,
            scheduler: Scheduler::new(config.bpm, config.sample_rate as f64),
            channels: Default::default(),
            events: BlockEvents::new(config.block_size),
            manual: ArrayVec::new(),
            playing: false,
        })
    }

    /// Render one block, adding into `outputs`: one buffer per channel, in
    /// `ChannelId` order, all of the same length.
    ///
    /// # Panics
    ///
    /// If `outputs` does not hold exactly `ChannelId::COUNT` buffers of equal
    /// length.
    pub fn process(&mut self, outputs: &mut [&mut [f32]]) {
        assert_eq!(
            outputs.len(),
            ChannelId::COUNT,
            "expected one output buffer per channel"
        );
        let block_size = outputs[0].len();
        assert!(
            outputs.iter().all(|out| out.len() == block_size),
            "channel buffers differ in length"
        );
        if block_size == 0 {
            return;
        }

        self.events.clear(block_size);
        let mut dropped = 0;

        for event in self.manual.drain(..) {
            if !self.events.push(event) {
                dropped += 1;
            }
        }

        if self.playing {
            dropped += self.scheduler.schedule(
                &mut self.provider,
                self.params.accent_db(),
                block_size,
                &mut self.events,
            );
        }

        for (channel, (out, id)) in self
            .channels
            .iter_mut()
            .zip(outputs.iter_mut().zip(ChannelId::ALL))
        {
            let out: &mut [f32] = out;
            let mut cursor = 0;
            for event in self.events.for_channel(id) {
                channel.process(out, cursor, event.offset);
                cursor = event.offset;
                let voice = self.factory.create_voice(event, &self.params);
                if !channel.trigger(voice, event.offset) {
                    dropped += 1;
                }
            }
            channel.process(out, cursor, block_size);
        }

        if dropped > 0 {
            warn!(dropped, "trigger capacity exceeded, hits dropped");
        }
    }

    /// Store a unipolar parameter value. Level and volume changes reach
    /// sounding voices through their smoothers; everything else applies from
    /// the next hit.
    pub fn set_parameter(&mut self, id: ParamId, value: f32) {
        if !self.params.set(id, value) {
            return;
        }
        match id {
            ParamId::Volume => {
                for instrument in Instrument::ALL {
                    self.update_level(instrument);
                }
            }
            _ => {
                if let Some(instrument) = id.level_of() {
                    self.update_level(instrument);
                }
            }
        }
    }

    /// Drain queued parameter messages. Call between blocks.
    pub fn apply_messages<R: MessageReceiver + ?Sized>(&mut self, rx: &mut R) -> usize {
        let mut applied = 0;
        while let Some(message) = rx.pop() {
            self.set_parameter(message.id, message.value);
            debug!(param = %message.id, value = message.value, "parameter applied");
            applied += 1;
        }
        applied
    }

    fn update_level(&mut self, instrument: Instrument) {
        let level = self.params.level_gain(instrument) * self.params.volume_gain();
        self.channels[instrument.channel().index()].set_level(instrument, level);
    }

    /// Queue a pad hit for frame 0 of the next block. Returns false when the
    /// queue is full.
    pub fn trigger(&mut self, instrument: Instrument, accent: bool, open_hihat: bool) -> bool {
        let level_db = if accent { self.params.accent_db() } else { 0.0 };
        let mut event = PlayEvent::new(0, instrument, level_db);
        event.open_hihat = open_hihat && instrument == Instrument::Hihat;
        self.manual.try_push(event).is_ok()
    }

    pub fn play(&mut self) {
        if !self.playing {
            debug!(bar = self.scheduler.bar_position(), "transport started");
        }
        self.playing = true;
    }

    /// Halt the sequencer and fade out everything that is sounding.
    pub fn stop(&mut self) {
        if self.playing {
            debug!(bar = self.scheduler.bar_position(), "transport stopped");
        }
        self.playing = false;
        for channel in self.channels.iter_mut() {
            channel.stop_all(0);
        }
    }

    pub fn is_playing(&self) -> bool {
        self.playing
    }

    /// Rewind to the first step. Sounding voices fade out.
    pub fn reset(&mut self) {
        debug!("transport reset");
        self.scheduler.reset();
        for channel in self.channels.iter_mut() {
            channel.stop_all(0);
        }
    }

    pub fn set_bpm(&mut self, bpm: f64) -> Result<(), ConfigError> {
        validate_bpm(bpm)?;
        debug!(bpm, "tempo changed");
        self.config.bpm = bpm;
        self.scheduler.set_bpm(bpm);
        Ok(())
    }

    pub fn bpm(&self) -> f64 {
        self.scheduler.bpm()
    }

    /// Step most recently played, for display.
    pub fn step_index(&self) -> Option<usize> {
        self.scheduler.current_step()
    }

    pub fn bar_position(&self) -> f64 {
        self.scheduler.bar_position()
    }

    /// Voices currently sounding or fading, over all channels.
    pub fn voice_count(&self) -> usize {
        self.channels.iter().map(Channel::voice_count).sum()
    }

    pub fn channel(&self, id: ChannelId) -> &Channel {
        &self.channels[id.index()]
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn params(&self) -> &Parameters {
        &self.params
    }

    pub fn provider(&self) -> &P {
        &self.provider
    }

    pub fn provider_mut(&mut self) -> &mut P {
        &mut self.provider
    }
}
