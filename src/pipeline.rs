//! The per-tick processing loop.
//!
//! Ties the collaborators together: read parameters, read a frame,
//! difference it against the oldest retained frame, render, then
//! update the delay buffer. The loop is single-threaded and owns all
//! of its state; the frame read is the only blocking point.

use crate::control::ParameterController;
use crate::motion::{difference, DelayBuffer};
use crate::render::Renderer;
use crate::source::{FrameSource, SourceError};
use std::sync::atomic::{AtomicBool, Ordering};
use tracing::{info, warn};

/// Why the loop left its running state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StopReason {
    /// The source reported that no more frames exist.
    EndOfStream,
    /// A frame read failed; treated like end-of-stream.
    ReadFailed,
    /// The external stop signal was observed.
    Interrupted,
}

/// Motion extraction pipeline.
///
/// Generic over its three collaborators so tests can substitute
/// scripted sources and recording renderers for the real ones.
pub struct Pipeline<S, C, R> {
    source: S,
    controller: C,
    renderer: R,
    buffer: DelayBuffer,
    ticks: u64,
}

impl<S, C, R> Pipeline<S, C, R>
where
    S: FrameSource,
    C: ParameterController,
    R: Renderer,
{
    /// Creates a pipeline around an already-open source.
    pub fn new(source: S, controller: C, renderer: R) -> Self {
        let delay = controller.current().delay;
        Self {
            source,
            controller,
            renderer,
            buffer: DelayBuffer::new(delay),
            ticks: 0,
        }
    }

    /// Runs until the stream ends, a read fails, or `stop` is set.
    ///
    /// The source is closed on every exit path. Parameters are read
    /// once per tick and held fixed; the difference is computed
    /// against the frame that was oldest *before* the current frame
    /// is pushed, so the comparison baseline is one step older than a
    /// naive "capacity frames back" reading. That matches the
    /// original trackbar-driven behavior and is deliberate.
    pub fn run(&mut self, stop: &AtomicBool) -> StopReason {
        let reason = loop {
            if stop.load(Ordering::Relaxed) {
                break StopReason::Interrupted;
            }

            let parameters = self.controller.current();

            let frame = match self.source.read_next() {
                Ok(frame) => frame,
                Err(SourceError::EndOfStream) => break StopReason::EndOfStream,
                Err(e) => {
                    warn!("frame read failed: {e}");
                    break StopReason::ReadFailed;
                }
            };

            let output = difference(&frame, self.buffer.oldest(), parameters.gain);
            self.renderer.display(&output);

            self.buffer.push(frame);
            self.buffer.set_capacity(parameters.delay);
            self.buffer.trim();
            self.ticks += 1;
        };

        self.source.close();
        info!("pipeline stopped after {} ticks: {:?}", self.ticks, reason);
        reason
    }

    /// Number of frames processed so far.
    pub fn ticks(&self) -> u64 {
        self.ticks
    }

    /// The delay buffer, exposed for inspection.
    pub fn buffer(&self) -> &DelayBuffer {
        &self.buffer
    }
}
