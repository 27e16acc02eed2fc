//! Owned RGBA8 pixel buffers.

use crate::error::{MipmapError, Result};

/// Index of the alpha channel within an RGBA pixel.
pub const ALPHA: usize = 3;

/// A row-major RGBA8 image, 4 bytes per pixel.
///
/// The buffer length is always exactly `4 * width * height`; both
/// dimensions are non-zero.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Raster {
    width: u32,
    height: u32,
    data: Vec<u8>,
}

impl Raster {
    /// Wrap an existing RGBA8 buffer.
    ///
    /// # Errors
    ///
    /// Returns [`MipmapError::InvalidRaster`] if a dimension is zero or the
    /// buffer length does not match the dimensions.
    pub fn new(width: u32, height: u32, data: Vec<u8>) -> Result<Self> {
        let expected = 4 * width as usize * height as usize;
        if width == 0 || height == 0 || data.len() != expected {
            return Err(MipmapError::InvalidRaster {
                width,
                height,
                len: data.len(),
            });
        }
        Ok(Self {
            width,
            height,
            data,
        })
    }

    /// Build from parts the caller has already sized correctly.
    pub(crate) fn from_parts(width: u32, height: u32, data: Vec<u8>) -> Self {
        debug_assert!(width > 0 && height > 0);
        debug_assert_eq!(data.len(), 4 * width as usize * height as usize);
        Self {
            width,
            height,
            data,
        }
    }

    /// Uniform image of a single color.
    ///
    /// # Errors
    ///
    /// Returns [`MipmapError::InvalidRaster`] if a dimension is zero.
    pub fn filled(width: u32, height: u32, rgba: [u8; 4]) -> Result<Self> {
        let count = width as usize * height as usize;
        Self::new(width, height, rgba.repeat(count))
    }

    /// Decode PNG or JPEG bytes into RGBA8. The format is sniffed from the
    /// content, not a file name.
    ///
    /// # Errors
    ///
    /// Returns [`MipmapError::Decode`] when the codec rejects the input.
    pub fn decode(bytes: &[u8]) -> Result<Self> {
        let decoded =
            image::load_from_memory(bytes).map_err(MipmapError::Decode)?;
        let rgba = decoded.to_rgba8();
        let (width, height) = rgba.dimensions();
        Self::new(width, height, rgba.into_raw())
    }

    /// Width in pixels.
    #[must_use]
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Height in pixels.
    #[must_use]
    pub fn height(&self) -> u32 {
        self.height
    }

    /// `(width, height)` in pixels.
    #[must_use]
    pub fn dimensions(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    /// Raw RGBA8 bytes, row-major.
    #[must_use]
    pub fn as_bytes(&self) -> &[u8] {
        &self.data
    }

    /// Consume the raster, returning the raw buffer.
    #[must_use]
    pub fn into_bytes(self) -> Vec<u8> {
        self.data
    }

    /// The buffer viewed as whole pixels.
    #[must_use]
    pub fn pixels(&self) -> &[[u8; 4]] {
        bytemuck::cast_slice(&self.data)
    }

    /// Pixel at `(col, row)`, or `None` outside the image.
    #[must_use]
    pub fn pixel(&self, col: u32, row: u32) -> Option<[u8; 4]> {
        if col >= self.width || row >= self.height {
            return None;
        }
        let index = row as usize * self.width as usize + col as usize;
        self.pixels().get(index).copied()
    }

    /// True if any pixel is not fully opaque.
    #[must_use]
    pub fn has_alpha(&self) -> bool {
        self.pixels().iter().any(|p| p[ALPHA] < u8::MAX)
    }

    /// Drop the alpha channel, producing tightly packed RGB8.
    #[must_use]
    pub fn to_rgb_bytes(&self) -> Vec<u8> {
        self.pixels()
            .iter()
            .flat_map(|&[r, g, b, _]| [r, g, b])
            .collect()
    }
}
