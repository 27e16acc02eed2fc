//! PNG / JPEG encoding of mip levels and data-URL construction.

use image::codecs::jpeg::JpegEncoder;
use image::codecs::png::PngEncoder;
use image::{ExtendedColorType, ImageEncoder};
use serde::{Deserialize, Serialize};

use crate::error::{MipmapError, Result};
use crate::raster::Raster;
use crate::util::base64;

/// Default JPEG quality used when none is configured.
pub const DEFAULT_JPEG_QUALITY: u8 = 98;

/// Container format of an encoded level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Encoding {
    /// Lossless, carries alpha.
    Png,
    /// Lossy, opaque only.
    Jpeg,
}

impl Encoding {
    /// MIME type used in data URLs.
    #[must_use]
    pub const fn mime_type(self) -> &'static str {
        match self {
            Self::Png => "image/png",
            Self::Jpeg => "image/jpeg",
        }
    }

    /// File extension (without the dot).
    #[must_use]
    pub const fn extension(self) -> &'static str {
        match self {
            Self::Png => "png",
            Self::Jpeg => "jpg",
        }
    }
}

/// Encode a raster as an RGBA8 PNG.
///
/// # Errors
///
/// Returns [`MipmapError::Encode`] if the PNG encoder fails.
pub fn encode_png(raster: &Raster) -> Result<Vec<u8>> {
    let mut buf = Vec::new();
    PngEncoder::new(&mut buf)
        .write_image(
            raster.as_bytes(),
            raster.width(),
            raster.height(),
            ExtendedColorType::Rgba8,
        )
        .map_err(MipmapError::Encode)?;
    Ok(buf)
}

/// Encode a raster as a baseline JPEG. Alpha is discarded.
///
/// # Errors
///
/// Returns [`MipmapError::Encode`] if the JPEG encoder fails.
pub fn encode_jpeg(raster: &Raster, quality: u8) -> Result<Vec<u8>> {
    let rgb = raster.to_rgb_bytes();
    let mut buf = Vec::new();
    JpegEncoder::new_with_quality(&mut buf, quality.clamp(1, 100))
        .write_image(
            &rgb,
            raster.width(),
            raster.height(),
            ExtendedColorType::Rgb8,
        )
        .map_err(MipmapError::Encode)?;
    Ok(buf)
}

/// `data:<mime>;base64,<payload>` URL for encoded bytes.
#[must_use]
pub fn data_url(encoding: Encoding, bytes: &[u8]) -> String {
    format!("data:{};base64,{}", encoding.mime_type(), base64::encode(bytes))
}

/// Length of [`data_url`] without building the string.
#[must_use]
pub fn data_url_len(encoding: Encoding, bytes: &[u8]) -> usize {
    "data:;base64,".len()
        + encoding.mime_type().len()
        + base64::encoded_len(bytes.len())
}
