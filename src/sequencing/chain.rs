//! Pattern authority consulted by the scheduler.
//!
//! The scheduler never owns pattern selection. It reads `current()` every
//! block and calls `advance()` once a cycle has played through its last step.
//! Edits to the current pattern are heard from the next block, but a switch
//! to another pattern only ever happens at a cycle boundary.

use tracing::debug;

use super::pattern::Pattern;

pub trait PatternProvider {
    /// Pattern for the cycle being played.
    fn current(&self) -> &Pattern;

    /// The current cycle has ended.
    fn advance(&mut self);
}

/// A lone pattern loops forever.
impl PatternProvider for Pattern {
    fn current(&self) -> &Pattern {
        self
    }

    fn advance(&mut self) {}
}

/// Ordered list of patterns played one cycle each, wrapping at the end
#[derive(Debug, Clone)]
pub struct PatternChain {
    patterns: Vec<Pattern>,
    index: usize,
    queued: Option<usize>,
}

impl PatternChain {
    pub fn new(first: Pattern) -> Self {
        Self {
            patterns: vec![first],
            index: 0,
            queued: None,
        }
    }

    /// Append a pattern to the chain
    pub fn then(mut self, pattern: Pattern) -> Self {
        self.patterns.push(pattern);
        self
    }

    /// Append a pattern `n` times
    pub fn repeat(mut self, pattern: Pattern, n: usize) -> Self {
        for _ in 0..n {
            self.patterns.push(pattern.clone());
        }
        self
    }

    pub fn push(&mut self, pattern: Pattern) {
        self.patterns.push(pattern);
    }

    pub fn len(&self) -> usize {
        self.patterns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.patterns.is_empty()
    }

    /// Position of the pattern currently playing.
    pub fn index(&self) -> usize {
        self.index
    }

    /// Queue a jump to a chain position. The running cycle finishes on the
    /// current pattern and the next cycle starts from `index`.
    pub fn select(&mut self, index: usize) -> bool {
        if index < self.patterns.len() {
            self.queued = Some(index);
            true
        } else {
            false
        }
    }

    /// Position queued by `select`, if the cycle has not ended yet.
    pub fn queued(&self) -> Option<usize> {
        self.queued
    }

    pub fn get(&self, index: usize) -> Option<&Pattern> {
        self.patterns.get(index)
    }

    pub fn get_mut(&mut self, index: usize) -> Option<&mut Pattern> {
        self.patterns.get_mut(index)
    }
}

impl PatternProvider for PatternChain {
    fn current(&self) -> &Pattern {
        &self.patterns[self.index]
    }

    fn advance(&mut self) {
        let next = match self.queued.take() {
            Some(index) => index,
            None => (self.index + 1) % self.patterns.len(),
        };
        if next != self.index {
            debug!(from = self.index, to = next, "pattern chain advanced");
        }
        self.index = next;
    }
}
