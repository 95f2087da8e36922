/*
Pattern Scheduler
=================

The scheduler turns a pattern into trigger events, one block at a time.

Time is tracked in bars, not frames, so that tempo changes move every later
step along with them:

    bars ─┬──────────┬──────────┬──────────┬──────────┬──▶
          b0         b0 + 128 frames      ...
          │ block n  │ block n+1│
    steps ●     ●     ●     ●     ●     ●     ●     ●
          0     1     2     3     4     5     6     7

A step's position is the start of its cycle plus its nominal offset, bent by
the pattern's groove:

    position = cycle_start + groove.warp(step · step_length)

A groove window that runs past the end of a shortened cycle is squeezed into
what is left of the cycle, so a warped step always plays before the next
cycle's first step.

Its frame within the block is

    offset = round((position − b0) · frames_per_bar)

Every step whose offset falls inside `[0, block_size)` is emitted, then the
scheduler moves on to the next step. When the step index reaches the
pattern's last step the cycle ends: the next cycle starts `last_step` steps
later and the pattern provider is told to advance. Only the provider decides
what plays next; its new pattern is read from the first step of the new
cycle, never in the middle of one.

Flams
-----

An `Extra` step on any instrument but the hihat plays twice: once on the step
and once `flam_delay` later. The echo often lands in a later block, so it waits
in a small queue of pending hits until its block comes.

Position
--------

The bar position is derived from frames counted since the last tempo change
rather than summed block by block, so it does not drift over long runs.
*/

use arrayvec::ArrayVec;

use crate::sequencing::{
    bars_to_num_frames, num_frames_to_bars, ExtraKind, Instrument, Pattern, PatternProvider, Step,
};

use super::events::{BlockEvents, PlayEvent};

pub const MAX_PENDING: usize = 32;

#[derive(Debug, Clone, Copy)]
struct PendingHit {
    position: f64,
    instrument: Instrument,
    level_db: f32,
}

#[derive(Debug, Clone)]
pub struct Scheduler {
    /// Tempo in beats per minute
    bpm: f64,
    /// Audio sample rate
    sample_rate: f64,
    /// Bar position at the last tempo change
    anchor_bars: f64,
    /// Frames rendered since the last tempo change
    anchor_frames: u64,
    /// Bar position where the current cycle started
    cycle_start: f64,
    /// Next step index to emit within the cycle
    next_step: usize,
    /// Last emitted step, for display
    current_step: Option<usize>,
    /// Flam echoes waiting for their block
    pending: ArrayVec<PendingHit, MAX_PENDING>,
}

impl Scheduler {
    pub fn new(bpm: f64, sample_rate: f64) -> Self {
        Self {
            bpm,
            sample_rate,
            anchor_bars: 0.0,
            anchor_frames: 0,
            cycle_start: 0.0,
            next_step: 0,
            current_step: None,
            pending: ArrayVec::new(),
        }
    }

    pub fn bpm(&self) -> f64 {
        self.bpm
    }

    /// Change tempo from the next block on. Step positions are in bars, so
    /// the running cycle continues at the new speed.
    pub fn set_bpm(&mut self, bpm: f64) {
        self.anchor_bars = self.bar_position();
        self.anchor_frames = 0;
        self.bpm = bpm;
    }

    /// Bar position at the start of the next block.
    pub fn bar_position(&self) -> f64 {
        self.anchor_bars + num_frames_to_bars(self.anchor_frames as f64, self.bpm, self.sample_rate)
    }

    /// Step most recently emitted.
    pub fn current_step(&self) -> Option<usize> {
        self.current_step
    }

    /// Start again from the first step at bar 0.
    pub fn reset(&mut self) {
        self.anchor_bars = 0.0;
        self.anchor_frames = 0;
        self.cycle_start = 0.0;
        self.next_step = 0;
        self.current_step = None;
        self.pending.clear();
    }

    /// Emit the triggers of one block into `events` and advance by
    /// `block_size` frames. Returns how many triggers had to be dropped
    /// because a fixed-capacity list was full.
    pub fn schedule<P: PatternProvider + ?Sized>(
        &mut self,
        provider: &mut P,
        accent_db: f32,
        block_size: usize,
        events: &mut BlockEvents,
    ) -> usize {
        let b0 = self.bar_position();
        let frames_per_bar = bars_to_num_frames(1.0, self.bpm, self.sample_rate);
        let offset_of = |position: f64| ((position - b0) * frames_per_bar).round().max(0.0);
        let mut dropped = 0;

        loop {
            let pattern = provider.current();
            let step_bars = pattern.scale().step_bars();

            if self.next_step >= pattern.last_step() {
                self.cycle_start += pattern.cycle_bars();
                // A cycle shortened under a running step restarts at the block
                // instead of replaying steps that are already in the past.
                if self.cycle_start + step_bars <= b0 {
                    self.cycle_start = b0;
                }
                self.next_step = 0;
                provider.advance();
                continue;
            }

            let nominal = self.next_step as f64 * step_bars;
            let position = self.cycle_start + pattern.groove().warp_in_cycle(nominal, pattern.cycle_bars());
            let offset = offset_of(position);
            if offset >= block_size as f64 {
                break;
            }

            // Steps left behind by a scale change are skipped, not replayed late.
            if position + step_bars > b0 {
                dropped += self.emit_step(pattern, self.next_step, position, offset as usize, accent_db, events);
                self.current_step = Some(self.next_step);
            }
            self.next_step += 1;
        }

        let mut index = self.pending.len();
        while index > 0 {
            index -= 1;
            let hit = self.pending[index];
            let offset = offset_of(hit.position);
            if offset < block_size as f64 {
                if !events.push(PlayEvent::new(offset as usize, hit.instrument, hit.level_db)) {
                    dropped += 1;
                }
                self.pending.remove(index);
            }
        }

        self.anchor_frames += block_size as u64;
        dropped
    }

    fn emit_step(
        &mut self,
        pattern: &Pattern,
        step: usize,
        position: f64,
        offset: usize,
        accent_db: f32,
        events: &mut BlockEvents,
    ) -> usize {
        let total_accent = pattern.accent(step);
        let mut dropped = 0;

        for instrument in Instrument::ALL {
            let cell = pattern.step(instrument, step);
            let level_db = match cell {
                Step::None => continue,
                Step::Full => accent_db,
                Step::Active | Step::Extra if total_accent => accent_db,
                Step::Active | Step::Extra => 0.0,
            };

            let mut event = PlayEvent::new(offset, instrument, level_db);
            if cell == Step::Extra {
                match instrument.extra_kind() {
                    ExtraKind::OpenHihat => event = event.open(),
                    ExtraKind::Flam => {
                        let echo = PendingHit {
                            position: position + pattern.flam_delay_bars(),
                            instrument,
                            level_db,
                        };
                        if self.pending.try_push(echo).is_err() {
                            dropped += 1;
                        }
                    }
                }
            }
            if !events.push(event) {
                dropped += 1;
            }
        }
        dropped
    }
}
