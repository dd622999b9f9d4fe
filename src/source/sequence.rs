//! File-backed frame source reading an image sequence.
//!
//! A file-path descriptor names either a directory of image files
//! (played back in sorted order) or a single image. Decoding is
//! delegated to the `image` crate; container demuxing is out of scope.

use super::{Frame, FrameSource, SourceDescriptor, SourceError};
use std::path::{Path, PathBuf};

/// Extensions accepted as sequence frames.
const FRAME_EXTENSIONS: &[&str] = &["png", "jpg", "jpeg", "bmp"];

/// Frame source backed by a directory of still images.
#[derive(Debug, Default)]
pub struct ImageSequenceSource {
    files: Vec<PathBuf>,
    next: usize,
    sequence: u64,
    open: bool,
}

impl ImageSequenceSource {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of frames remaining in the sequence.
    pub fn remaining(&self) -> usize {
        self.files.len().saturating_sub(self.next)
    }

    fn collect_files(path: &Path) -> Result<Vec<PathBuf>, SourceError> {
        if path.is_file() {
            return Ok(vec![path.to_path_buf()]);
        }

        let entries = std::fs::read_dir(path)
            .map_err(|e| SourceError::OpenFailed(format!("{}: {e}", path.display())))?;

        let mut files: Vec<PathBuf> = entries
            .filter_map(|entry| entry.ok().map(|e| e.path()))
            .filter(|p| {
                p.extension()
                    .and_then(|ext| ext.to_str())
                    .map(|ext| FRAME_EXTENSIONS.contains(&ext.to_ascii_lowercase().as_str()))
                    .unwrap_or(false)
            })
            .collect();
        files.sort();

        if files.is_empty() {
            return Err(SourceError::OpenFailed(format!(
                "{}: no image files found",
                path.display()
            )));
        }
        Ok(files)
    }
}

impl FrameSource for ImageSequenceSource {
    fn open(&mut self, descriptor: &SourceDescriptor) -> Result<(), SourceError> {
        let path = match descriptor {
            SourceDescriptor::FilePath(path) => path,
            other => {
                return Err(SourceError::UnsupportedDescriptor(format!(
                    "image sequence source cannot open {other}"
                )))
            }
        };

        self.files = Self::collect_files(path)?;
        self.next = 0;
        self.sequence = 0;
        self.open = true;
        tracing::info!(
            "image sequence opened: {} ({} frames)",
            path.display(),
            self.files.len()
        );
        Ok(())
    }

    fn read_next(&mut self) -> Result<Frame, SourceError> {
        if !self.open {
            return Err(SourceError::NotInitialized);
        }
        let path = match self.files.get(self.next) {
            Some(path) => path,
            None => return Err(SourceError::EndOfStream),
        };

        let decoded = image::open(path)
            .map_err(|e| SourceError::ReadFailed(format!("{}: {e}", path.display())))?
            .into_rgb8();

        self.next += 1;
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
        self.open
    }

    fn close(&mut self) {
        self.files.clear();
        self.next = 0;
        self.open = false;
    }
}
