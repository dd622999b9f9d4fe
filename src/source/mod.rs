//! Video input and frame handling.
//!
//! This module provides the frame type, the source descriptor parsed
//! once at startup, and the [`FrameSource`] abstraction with its
//! concrete implementations. Sources are thin acquisition glue; all
//! interesting state lives in the processing pipeline.

#[cfg(feature = "camera")]
mod camera;
mod descriptor;
mod frame;
mod sequence;
mod stream;

#[cfg(feature = "camera")]
pub use camera::CameraSource;
pub use descriptor::SourceDescriptor;
pub use frame::Frame;
pub use sequence::ImageSequenceSource;
pub use stream::{FrameSource, SourceError, SyntheticSource};

/// Opens the appropriate source implementation for a descriptor.
///
/// The descriptor is resolved exactly once here; afterwards the caller
/// holds an already-open source and never inspects the descriptor
/// again. Camera descriptors require the `camera` feature; network
/// stream demuxing is not provided.
pub fn open_source(descriptor: &SourceDescriptor) -> Result<Box<dyn FrameSource>, SourceError> {
    match descriptor {
        SourceDescriptor::CameraIndex(_) => open_camera(descriptor),
        SourceDescriptor::FilePath(_) => {
            let mut source = ImageSequenceSource::new();
            source.open(descriptor)?;
            Ok(Box::new(source))
        }
        SourceDescriptor::NetworkUrl(url) => Err(SourceError::UnsupportedDescriptor(format!(
            "network streams are not supported: {url}"
        ))),
    }
}

#[cfg(feature = "camera")]
fn open_camera(descriptor: &SourceDescriptor) -> Result<Box<dyn FrameSource>, SourceError> {
    let mut source = CameraSource::new();
    source.open(descriptor)?;
    Ok(Box::new(source))
}

#[cfg(not(feature = "camera"))]
fn open_camera(descriptor: &SourceDescriptor) -> Result<Box<dyn FrameSource>, SourceError> {
    Err(SourceError::UnsupportedDescriptor(format!(
        "{descriptor}: camera input requires building with the `camera` feature"
    )))
}
