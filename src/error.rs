//! Crate-level error types.

use std::fmt;
use std::path::PathBuf;

/// Errors produced by the mipgen crate.
#[derive(Debug)]
pub enum MipmapError {
    /// Input file name does not end in `.png` or `.jpg`.
    UnsupportedFormat(PathBuf),
    /// Pixel buffer length does not match `4 * width * height`, or a
    /// dimension is zero.
    InvalidRaster {
        /// Declared width in pixels.
        width: u32,
        /// Declared height in pixels.
        height: u32,
        /// Actual buffer length in bytes.
        len: usize,
    },
    /// Failed to decode the source image.
    Decode(image::ImageError),
    /// Failed to encode a mip level.
    Encode(image::ImageError),
    /// Generic I/O failure.
    Io(std::io::Error),
    /// TOML options parsing/serialization failure.
    OptionsParse(String),
    /// Manifest serialization failure.
    Manifest(serde_json::Error),
    /// A level's size differs from the GPU mip chain size (`max(1, base >> level)`),
    /// which happens for odd-sized sources.
    IncompatibleChain {
        /// Level index.
        level: usize,
        /// Size the GPU expects.
        expected: (u32, u32),
        /// Size the pyramid holds.
        actual: (u32, u32),
    },
}

impl fmt::Display for MipmapError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnsupportedFormat(path) => write!(
                f,
                "unsupported image format for {}: expected a .png or .jpg \
                 file",
                path.display()
            ),
            Self::InvalidRaster { width, height, len } => write!(
                f,
                "invalid raster: {width}x{height} needs {} bytes, got {len}",
                4 * (*width as usize) * (*height as usize)
            ),
            Self::Decode(e) => write!(f, "decode error: {e}"),
            Self::Encode(e) => write!(f, "encode error: {e}"),
            Self::Io(e) => write!(f, "I/O error: {e}"),
            Self::OptionsParse(msg) => {
                write!(f, "options parse error: {msg}")
            }
            Self::Manifest(e) => write!(f, "manifest error: {e}"),
            Self::IncompatibleChain {
                level,
                expected,
                actual,
            } => write!(
                f,
                "level {level} is {}x{} but the GPU mip chain expects {}x{}",
                actual.0, actual.1, expected.0, expected.1
            ),
        }
    }
}

impl std::error::Error for MipmapError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Decode(e) | Self::Encode(e) => Some(e),
            Self::Io(e) => Some(e),
            Self::Manifest(e) => Some(e),
            _ => None,
        }
    }
}

impl From<std::io::Error> for MipmapError {
    fn from(e: std::io::Error) -> Self {
        Self::Io(e)
    }
}

impl From<serde_json::Error> for MipmapError {
    fn from(e: serde_json::Error) -> Self {
        Self::Manifest(e)
    }
}

/// Convenience alias used throughout the crate.
pub type Result<T> = std::result::Result<T, MipmapError>;
