/*
Channel
=======

One channel per physical output. A channel sounds at most one "active" voice;
a new trigger steals the channel from it:

    block ──────────────────────────────────────────────▶
             trigger A            trigger B
    A        ▇▇▇▇▇▇▇▇▇▇▇▇▇▇▇▇▇▇▇▇▇╲___                  stopped at B's offset,
    B                             ▇▇▇▇▇▇▇▇▇▇▇▇▇▇▇▇▇▇▇  fades for 5 ms

Stopped voices keep playing their fade, so the processing list holds the active
voice plus any voices still fading out. The list has a fixed capacity; when it
is full the oldest voice is dropped to make room.

The active voice is remembered by id, not by reference. Ids come from a
per-channel counter and are never reused while a voice can still be alive.
*/

use arrayvec::ArrayVec;

use crate::sequencing::Instrument;
use crate::voices::{DrumVoice, Voice};

pub const MAX_CHANNEL_VOICES: usize = 8;

pub type VoiceId = u32;

#[derive(Debug, Clone)]
struct Slot {
    id: VoiceId,
    voice: Voice,
}

#[derive(Debug, Clone, Default)]
pub struct Channel {
    voices: ArrayVec<Slot, MAX_CHANNEL_VOICES>,
    active: Option<VoiceId>,
    next_id: VoiceId,
}

impl Channel {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start `voice` at `offset`, stopping the current active voice there.
    ///
    /// Returns false if a fading voice had to be dropped to make room.
    pub fn trigger(&mut self, voice: Voice, offset: usize) -> bool {
        if let Some(active) = self.active_slot_mut() {
            active.voice.stop(offset);
        }

        let mut dropped = false;
        if self.voices.is_full() {
            self.voices.remove(0);
            dropped = true;
        }

        let id = self.next_id;
        self.next_id = self.next_id.wrapping_add(1);
        self.voices.push(Slot { id, voice });
        self.active = Some(id);
        !dropped
    }

    /// Add frames `from..to` of every voice to `out` and drop voices that
    /// have finished.
    pub fn process(&mut self, out: &mut [f32], from: usize, to: usize) {
        for index in (0..self.voices.len()).rev() {
            if !self.voices[index].voice.process(out, from, to) {
                let slot = self.voices.remove(index);
                if self.active == Some(slot.id) {
                    self.active = None;
                }
            }
        }
    }

    /// Follow a level change of `instrument` on every voice playing it.
    pub fn set_level(&mut self, instrument: Instrument, level: f32) {
        for slot in self.voices.iter_mut() {
            if slot.voice.instrument() == instrument {
                slot.voice.set_level(level);
            }
        }
    }

    pub fn stop_all(&mut self, offset: usize) {
        for slot in self.voices.iter_mut() {
            slot.voice.stop(offset);
        }
    }

    pub fn voice_count(&self) -> usize {
        self.voices.len()
    }

    pub fn active(&self) -> Option<VoiceId> {
        self.active
    }

    pub fn active_instrument(&self) -> Option<Instrument> {
        self.active_slot().map(|slot| slot.voice.instrument())
    }

    fn active_slot(&self) -> Option<&Slot> {
        let active = self.active?;
        self.voices.iter().find(|slot| slot.id == active)
    }

    fn active_slot_mut(&mut self) -> Option<&mut Slot> {
        let active = self.active?;
        self.voices.iter_mut().find(|slot| slot.id == active)
    }
}
