//! Frame type representing a captured image with metadata.

use std::time::Instant;

/// A single frame from a video source.
///
/// Contains raw interleaved pixel samples along with the metadata
/// needed to interpret them. Frames are never mutated after creation;
/// the delay buffer owns each frame until it is evicted.
#[derive(Clone)]
pub struct Frame {
    /// Raw sample data, `channels` interleaved bytes per pixel.
    samples: Vec<u8>,
    /// Frame width in pixels.
    width: u32,
    /// Frame height in pixels.
    height: u32,
    /// Number of channels per pixel (1 for grayscale, 3 for RGB).
    channels: u8,
    /// Capture timestamp.
    timestamp: Instant,
    /// Monotonic sequence number assigned by the source.
    sequence: u64,
}

impl Frame {
    /// Creates a new frame with the given parameters.
    pub fn new(samples: Vec<u8>, width: u32, height: u32, channels: u8, sequence: u64) -> Self {
        Self {
            samples,
            width,
            height,
            channels,
            timestamp: Instant::now(),
            sequence,
        }
    }

    /// Returns a reference to the raw sample data.
    #[inline]
    pub fn samples(&self) -> &[u8] {
        &self.samples
    }

    /// Returns the frame width.
    #[inline]
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Returns the frame height.
    #[inline]
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Returns the number of channels per pixel.
    #[inline]
    pub fn channels(&self) -> u8 {
        self.channels
    }

    /// Returns the capture timestamp.
    #[inline]
    pub fn timestamp(&self) -> Instant {
        self.timestamp
    }

    /// Returns the sequence number.
    #[inline]
    pub fn sequence(&self) -> u64 {
        self.sequence
    }

    /// Returns the total number of pixels (width * height).
    #[inline]
    pub fn pixel_count(&self) -> usize {
        (self.width as usize) * (self.height as usize)
    }

    /// Returns the expected sample buffer length for these dimensions.
    #[inline]
    pub fn sample_count(&self) -> usize {
        self.pixel_count() * self.channels as usize
    }

    /// Returns true if `other` has the same width, height, and channels.
    #[inline]
    pub fn same_dimensions(&self, other: &Frame) -> bool {
        self.width == other.width && self.height == other.height && self.channels == other.channels
    }

    /// Validates that the sample buffer size matches the dimensions.
    pub fn is_valid(&self) -> bool {
        self.samples.len() == self.sample_count()
    }
}

impl std::fmt::Debug for Frame {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Frame")
            .field("width", &self.width)
            .field("height", &self.height)
            .field("channels", &self.channels)
            .field("sequence", &self.sequence)
            .field("sample_bytes", &self.samples.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_frame_creation() {
        let samples = vec![0u8; 640 * 480 * 3];
        let frame = Frame::new(samples, 640, 480, 3, 1);

        assert_eq!(frame.width(), 640);
        assert_eq!(frame.height(), 480);
        assert_eq!(frame.channels(), 3);
        assert_eq!(frame.sequence(), 1);
        assert!(frame.is_valid());
    }

    #[test]
    fn test_frame_invalid_size() {
        let samples = vec![0u8; 100]; // Wrong size
        let frame = Frame::new(samples, 640, 480, 3, 1);

        assert!(!frame.is_valid());
    }

    #[test]
    fn test_dimension_comparison() {
        let a = Frame::new(vec![0u8; 64 * 3], 8, 8, 3, 1);
        let b = Frame::new(vec![255u8; 64 * 3], 8, 8, 3, 2);
        let c = Frame::new(vec![0u8; 64], 8, 8, 1, 3);

        assert!(a.same_dimensions(&b));
        assert!(!a.same_dimensions(&c));
    }
}
