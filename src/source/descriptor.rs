//! Source descriptors identifying where frames come from.
//!
//! The CLI accepts one free-form string for the video source. It is
//! resolved into a tagged descriptor exactly once at startup, so the
//! rest of the system never has to guess what kind of source it holds.

use std::path::PathBuf;

/// A resolved video source location.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SourceDescriptor {
    /// A local capture device, addressed by index.
    CameraIndex(u32),
    /// A file or directory on the local filesystem.
    FilePath(PathBuf),
    /// A network stream URL.
    NetworkUrl(String),
}

impl SourceDescriptor {
    /// Resolves a raw source string into a descriptor.
    ///
    /// An all-digit string is a camera index, a string containing a
    /// URL scheme separator is a network stream, and anything else is
    /// treated as a filesystem path.
    pub fn parse(raw: &str) -> Self {
        if !raw.is_empty() && raw.chars().all(|c| c.is_ascii_digit()) {
            // Indices too large for u32 fall through to the path arm.
            if let Ok(index) = raw.parse::<u32>() {
                return Self::CameraIndex(index);
            }
        }
        if raw.contains("://") {
            return Self::NetworkUrl(raw.to_string());
        }
        Self::FilePath(PathBuf::from(raw))
    }
}

impl std::str::FromStr for SourceDescriptor {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self::parse(s))
    }
}

impl std::fmt::Display for SourceDescriptor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::CameraIndex(index) => write!(f, "camera {index}"),
            Self::FilePath(path) => write!(f, "{}", path.display()),
            Self::NetworkUrl(url) => write!(f, "{url}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_digits_resolve_to_camera_index() {
        assert_eq!(SourceDescriptor::parse("0"), SourceDescriptor::CameraIndex(0));
        assert_eq!(SourceDescriptor::parse("12"), SourceDescriptor::CameraIndex(12));
    }

    #[test]
    fn test_url_resolves_to_network_stream() {
        assert_eq!(
            SourceDescriptor::parse("http://192.168.1.101:8080/video"),
            SourceDescriptor::NetworkUrl("http://192.168.1.101:8080/video".to_string())
        );
        assert_eq!(
            SourceDescriptor::parse("rtsp://camera.local/stream"),
            SourceDescriptor::NetworkUrl("rtsp://camera.local/stream".to_string())
        );
    }

    #[test]
    fn test_everything_else_is_a_path() {
        assert_eq!(
            SourceDescriptor::parse("clips/mountains"),
            SourceDescriptor::FilePath(PathBuf::from("clips/mountains"))
        );
        // A numeric-looking name with an extension is still a path.
        assert_eq!(
            SourceDescriptor::parse("0.png"),
            SourceDescriptor::FilePath(PathBuf::from("0.png"))
        );
    }

    #[test]
    fn test_oversized_index_falls_back_to_path() {
        let raw = "99999999999999999999";
        assert_eq!(
            SourceDescriptor::parse(raw),
            SourceDescriptor::FilePath(PathBuf::from(raw))
        );
    }
}
