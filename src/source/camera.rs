//! Live camera source backed by `nokhwa`.
//!
//! Only compiled with the `camera` feature; CI and headless builds use
//! the synthetic or image sequence sources instead.

use super::{Frame, FrameSource, SourceDescriptor, SourceError};
use nokhwa::{
    pixel_format::RgbFormat,
    utils::{CameraIndex, RequestedFormat, RequestedFormatType},
    Camera,
};

/// Frame source reading from a local capture device.
pub struct CameraSource {
    camera: Option<Camera>,
    sequence: u64,
}

impl CameraSource {
    pub fn new() -> Self {
        Self {
            camera: None,
            sequence: 0,
        }
    }
}

impl Default for CameraSource {
    fn default() -> Self {
        Self::new()
    }
}

impl FrameSource for CameraSource {
    fn open(&mut self, descriptor: &SourceDescriptor) -> Result<(), SourceError> {
        let index = match descriptor {
            SourceDescriptor::CameraIndex(index) => *index,
            other => {
                return Err(SourceError::UnsupportedDescriptor(format!(
                    "camera source cannot open {other}"
                )))
            }
        };

        let requested =
            RequestedFormat::new::<RgbFormat>(RequestedFormatType::AbsoluteHighestFrameRate);
        let mut camera = Camera::new(CameraIndex::Index(index), requested)
            .map_err(|e| SourceError::OpenFailed(format!("camera {index}: {e}")))?;
        camera
            .open_stream()
            .map_err(|e| SourceError::OpenFailed(format!("camera {index}: {e}")))?;

        let format = camera.camera_format();
        tracing::info!("camera {index} opened at {format}");
        self.camera = Some(camera);
        self.sequence = 0;
        Ok(())
    }

    fn read_next(&mut self) -> Result<Frame, SourceError> {
        let camera = self.camera.as_mut().ok_or(SourceError::NotInitialized)?;

        let buffer = camera
            .frame()
            .map_err(|e| SourceError::ReadFailed(e.to_string()))?;
        let decoded = buffer
            .decode_image::<RgbFormat>()
            .map_err(|e| SourceError::ReadFailed(e.to_string()))?;

        self.sequence += 1;
        let (width, height) = decoded.dimensions();
        Ok(Frame::new(
            decoded.into_raw(),
            width,
            height,
            3,
            self.sequence,
        ))
    }

    fn is_open(&self) -> bool {
        self.camera.is_some()
    }

    fn close(&mut self) {
        if let Some(mut camera) = self.camera.take() {
            if let Err(e) = camera.stop_stream() {
                tracing::warn!("failed to stop camera stream: {e}");
            }
        }
    }
}
