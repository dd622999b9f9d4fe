//! Frame source abstraction.
//!
//! This module provides a trait-based abstraction over video input,
//! allowing cameras, image sequences, and synthetic test streams to be
//! swapped without touching the processing loop.

use super::{Frame, SourceDescriptor};
use thiserror::Error;

/// Errors that can occur while acquiring frames.
#[derive(Debug, Error)]
pub enum SourceError {
    /// The source could not be opened. Fatal; the loop never starts.
    #[error("could not open video source '{0}'")]
    OpenFailed(String),
    /// The stream has no more frames. Terminates the loop gracefully.
    #[error("end of stream")]
    EndOfStream,
    /// A single frame read failed. Treated like end-of-stream.
    #[error("failed to read frame: {0}")]
    ReadFailed(String),
    /// The descriptor kind is not available in this build.
    #[error("unsupported source: {0}")]
    UnsupportedDescriptor(String),
    /// The source was used before `open` succeeded.
    #[error("source not initialized")]
    NotInitialized,
}

/// Trait for video frame sources.
///
/// A source produces a strictly sequential stream of frames with fixed
/// dimensions. Reading blocks until a frame is available, the stream
/// ends, or a read error occurs.
pub trait FrameSource {
    /// Opens the source described by `descriptor`.
    fn open(&mut self, descriptor: &SourceDescriptor) -> Result<(), SourceError>;

    /// Reads the next frame in sequence.
    fn read_next(&mut self) -> Result<Frame, SourceError>;

    /// Checks if the source is currently open.
    fn is_open(&self) -> bool;

    /// Closes the source and releases resources.
    fn close(&mut self);
}

impl<S: FrameSource + ?Sized> FrameSource for Box<S> {
    fn open(&mut self, descriptor: &SourceDescriptor) -> Result<(), SourceError> {
        (**self).open(descriptor)
    }

    fn read_next(&mut self) -> Result<Frame, SourceError> {
        (**self).read_next()
    }

    fn is_open(&self) -> bool {
        (**self).is_open()
    }

    fn close(&mut self) {
        (**self).close()
    }
}

/// Synthetic source that generates a deterministic moving pattern.
///
/// Used for tests and demonstration runs without capture hardware. The
/// pattern is a diagonal gradient that drifts by a few pixels per
/// frame, so consecutive frames differ everywhere by a small amount.
#[derive(Debug)]
pub struct SyntheticSource {
    width: u32,
    height: u32,
    channels: u8,
    /// Stop after this many frames; `None` streams until interrupted.
    frame_limit: Option<u64>,
    sequence: u64,
    open: bool,
}

impl SyntheticSource {
    /// Creates a source producing `frame_limit` QVGA RGB frames.
    pub fn new(frame_limit: Option<u64>) -> Self {
        Self {
            width: 320,
            height: 240,
            channels: 3,
            frame_limit,
            sequence: 0,
            open: false,
        }
    }

    /// Overrides the generated frame dimensions.
    pub fn with_dimensions(mut self, width: u32, height: u32) -> Self {
        self.width = width;
        self.height = height;
        self
    }
}

impl FrameSource for SyntheticSource {
    fn open(&mut self, descriptor: &SourceDescriptor) -> Result<(), SourceError> {
        // The descriptor is irrelevant for generated frames.
        self.sequence = 0;
        self.open = true;
        tracing::info!("synthetic source opened (requested {descriptor})");
        Ok(())
    }

    fn read_next(&mut self) -> Result<Frame, SourceError> {
        if !self.open {
            return Err(SourceError::NotInitialized);
        }
        if let Some(limit) = self.frame_limit {
            if self.sequence >= limit {
                return Err(SourceError::EndOfStream);
            }
        }

        let drift = self.sequence * 3;
        let mut samples = Vec::with_capacity(
            self.width as usize * self.height as usize * self.channels as usize,
        );
        for y in 0..self.height as u64 {
            for x in 0..self.width as u64 {
                for c in 0..self.channels as u64 {
                    samples.push(((x + y + drift + 40 * c) % 256) as u8);
                }
            }
        }

        self.sequence += 1;
        Ok(Frame::new(
            samples,
            self.width,
            self.height,
            self.channels,
            self.sequence,
        ))
    }

    fn is_open(&self) -> bool {
        self.open
    }

    fn close(&mut self) {
        self.open = false;
        tracing::info!("synthetic source closed");
    }
}
