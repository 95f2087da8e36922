//! Trigger events of one block.
//!
//! The scheduler fills a `BlockEvents` list once per block and the machine
//! drains it channel by channel. The list is kept in ascending offset order;
//! an event pushed at an offset that is already taken lands after the
//! existing ones, so the later trigger wins on a shared channel.

use arrayvec::ArrayVec;

use crate::sequencing::{ChannelId, Instrument};

/// Upper bound on triggers per block: every instrument on every step of a
/// 2048-frame block at the fastest scale, plus flams, fits comfortably.
pub const MAX_EVENTS: usize = 256;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlayEvent {
    /// Frame within the block, `0 ≤ offset < block_size`
    pub offset: usize,
    pub instrument: Instrument,
    /// Level relative to the instrument level; 0 dB for a weak hit
    pub level_db: f32,
    /// Hihat only: play the open instead of the closed sound
    pub open_hihat: bool,
}

impl PlayEvent {
    pub fn new(offset: usize, instrument: Instrument, level_db: f32) -> Self {
        Self {
            offset,
            instrument,
            level_db,
            open_hihat: false,
        }
    }

    pub fn open(mut self) -> Self {
        self.open_hihat = true;
        self
    }

    pub fn channel(&self) -> ChannelId {
        self.instrument.channel()
    }
}

#[derive(Debug, Clone)]
pub struct BlockEvents {
    events: ArrayVec<PlayEvent, MAX_EVENTS>,
    block_size: usize,
}

impl BlockEvents {
    pub fn new(block_size: usize) -> Self {
        Self {
            events: ArrayVec::new(),
            block_size,
        }
    }

    /// Start a new block.
    pub fn clear(&mut self, block_size: usize) {
        self.events.clear();
        self.block_size = block_size;
    }

    pub fn block_size(&self) -> usize {
        self.block_size
    }

    /// Insert keeping offsets ascending. Returns false when the list is full.
    ///
    /// # Panics
    ///
    /// An offset outside the block is a scheduling defect and panics.
    pub fn push(&mut self, event: PlayEvent) -> bool {
        assert!(
            event.offset < self.block_size,
            "event offset {} outside block of {} frames",
            event.offset,
            self.block_size
        );
        if self.events.is_full() {
            return false;
        }
        let index = self.events.partition_point(|existing| existing.offset <= event.offset);
        self.events.insert(index, event);
        true
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    pub fn as_slice(&self) -> &[PlayEvent] {
        &self.events
    }

    pub fn iter(&self) -> impl Iterator<Item = &PlayEvent> {
        self.events.iter()
    }

    /// Events for one channel, in offset order.
    pub fn for_channel(&self, channel: ChannelId) -> impl Iterator<Item = &PlayEvent> {
        self.events.iter().filter(move |event| event.channel() == channel)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keeps_offsets_sorted_and_stable() {
        let mut events = BlockEvents::new(128);
        events.push(PlayEvent::new(64, Instrument::BassDrum, 0.0));
        events.push(PlayEvent::new(0, Instrument::Rim, 0.0));
        events.push(PlayEvent::new(64, Instrument::Clap, 0.0));
        events.push(PlayEvent::new(10, Instrument::Hihat, 0.0).open());

        let order: Vec<_> = events.iter().map(|e| (e.offset, e.instrument)).collect();
        assert_eq!(
            order,
            vec![
                (0, Instrument::Rim),
                (10, Instrument::Hihat),
                (64, Instrument::BassDrum),
                (64, Instrument::Clap),
            ]
        );
    }

    #[test]
    fn filters_by_channel() {
        let mut events = BlockEvents::new(128);
        events.push(PlayEvent::new(5, Instrument::Clap, 0.0));
        events.push(PlayEvent::new(1, Instrument::BassDrum, 0.0));
        events.push(PlayEvent::new(3, Instrument::Rim, 0.0));

        let rim_clap: Vec<_> = events.for_channel(ChannelId::RimClap).map(|e| e.instrument).collect();
        assert_eq!(rim_clap, vec![Instrument::Rim, Instrument::Clap]);
    }

    #[test]
    #[should_panic(expected = "outside block")]
    fn offset_past_block_panics() {
        let mut events = BlockEvents::new(128);
        events.push(PlayEvent::new(128, Instrument::BassDrum, 0.0));
    }

    #[test]
    fn full_list_rejects() {
        let mut events = BlockEvents::new(1);
        for _ in 0..MAX_EVENTS {
            assert!(events.push(PlayEvent::new(0, Instrument::Ride, 0.0)));
        }
        assert!(!events.push(PlayEvent::new(0, Instrument::Ride, 0.0)));
        events.clear(64);
        assert!(events.is_empty());
        assert_eq!(events.block_size(), 64);
    }
}
