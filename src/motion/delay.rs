//! Bounded FIFO history of recent frames.
//!
//! The buffer retains the last `capacity` frames pushed into it, with
//! the oldest retained frame serving as the comparison reference. The
//! capacity tracks a live user control and can change between any two
//! ticks, so eviction is a separate explicit step rather than a side
//! effect of `push`.

use crate::source::Frame;
use std::collections::VecDeque;

/// Frame-delay buffer with a live-resizable retention window.
///
/// Invariant: after [`trim`](Self::trim), `len() <= capacity()`. A
/// capacity of zero retains nothing, so there is never a reference
/// frame and the difference degenerates to pass-through.
#[derive(Debug)]
pub struct DelayBuffer {
    frames: VecDeque<Frame>,
    capacity: usize,
}

impl DelayBuffer {
    /// Creates an empty buffer retaining up to `capacity` frames.
    pub fn new(capacity: usize) -> Self {
        Self {
            frames: VecDeque::with_capacity(capacity.saturating_add(1)),
            capacity,
        }
    }

    /// Appends a frame at the back. Never evicts.
    pub fn push(&mut self, frame: Frame) {
        self.frames.push_back(frame);
    }

    /// Returns the oldest retained frame, if any.
    pub fn oldest(&self) -> Option<&Frame> {
        self.frames.front()
    }

    /// Updates the retention capacity without evicting anything.
    ///
    /// Call [`trim`](Self::trim) afterwards to restore the invariant.
    pub fn set_capacity(&mut self, capacity: usize) {
        self.capacity = capacity;
    }

    /// Evicts from the front until `len() <= capacity()`.
    ///
    /// A capacity reduction takes full effect in the one trim that
    /// follows it, not gradually over later ticks.
    pub fn trim(&mut self) {
        while self.frames.len() > self.capacity {
            self.frames.pop_front();
        }
    }

    /// Number of frames currently retained.
    pub fn len(&self) -> usize {
        self.frames.len()
    }

    /// Returns true if no frames are retained.
    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }

    /// Current retention capacity.
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Drops all retained frames, keeping the capacity.
    pub fn clear(&mut self) {
        self.frames.clear();
    }
}
