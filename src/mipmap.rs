//! Pyramid construction and per-level encoding.
//!
//! Levels are derived one after another from the previous level, then every
//! level is encoded on the rayon pool. PNG is always produced; JPEG only for
//! fully opaque sources since it cannot carry alpha. The shorter data URL
//! wins, except that translucent sources always prefer PNG.

use std::path::Path;

use rayon::prelude::*;
use web_time::Instant;

use crate::downscale::downscale;
use crate::encode::{data_url, data_url_len, encode_jpeg, encode_png, Encoding};
use crate::error::{MipmapError, Result};
use crate::options::MipmapOptions;
use crate::raster::Raster;

/// File name suffixes accepted by [`create_mipmap`].
pub const SUPPORTED_SUFFIXES: [&str; 2] = [".png", ".jpg"];

/// One encoded level of a pyramid.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MipmapLevel {
    /// Decoded pixels of this level.
    pub raster: Raster,
    /// PNG encoding, always present.
    pub png: Vec<u8>,
    /// JPEG encoding, present only for fully opaque sources.
    pub jpeg: Option<Vec<u8>>,
    /// Encoding chosen for general use.
    pub preferred: Encoding,
    /// Data URL of the preferred encoding.
    pub url: String,
}

impl MipmapLevel {
    /// Width in pixels.
    #[must_use]
    pub fn width(&self) -> u32 {
        self.raster.width()
    }

    /// Height in pixels.
    #[must_use]
    pub fn height(&self) -> u32 {
        self.raster.height()
    }

    /// Bytes of the preferred encoding.
    #[must_use]
    pub fn buffer(&self) -> &[u8] {
        match (self.preferred, &self.jpeg) {
            (Encoding::Jpeg, Some(jpeg)) => jpeg,
            _ => &self.png,
        }
    }
}

/// A complete encoded pyramid, finest level first.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Mipmap {
    /// Levels ordered from the original down to the coarsest.
    pub levels: Vec<MipmapLevel>,
    /// Whether the source had any pixel with alpha below 255.
    pub has_alpha: bool,
}

impl Mipmap {
    /// Number of levels.
    #[must_use]
    pub fn len(&self) -> usize {
        self.levels.len()
    }

    /// True when no levels are held.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.levels.is_empty()
    }

    /// The original-resolution level.
    #[must_use]
    pub fn base(&self) -> Option<&MipmapLevel> {
        self.levels.first()
    }

    /// Iterate levels finest first.
    pub fn iter(&self) -> std::slice::Iter<'_, MipmapLevel> {
        self.levels.iter()
    }
}

impl<'a> IntoIterator for &'a Mipmap {
    type Item = &'a MipmapLevel;
    type IntoIter = std::slice::Iter<'a, MipmapLevel>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Whether a pyramid holding `levels` levels may grow under `max_level`.
/// Negative caps never stop growth.
#[must_use]
pub fn within_max_level(max_level: i32, levels: usize) -> bool {
    match usize::try_from(max_level) {
        Ok(max) => levels <= max,
        Err(_) => true,
    }
}

/// Whether `path` names a file [`create_mipmap`] will accept.
#[must_use]
pub fn is_supported_path(path: &Path) -> bool {
    path.file_name()
        .and_then(|name| name.to_str())
        .is_some_and(|name| {
            SUPPORTED_SUFFIXES.iter().any(|suffix| name.ends_with(suffix))
        })
}

/// Build the raw pyramid without encoding.
///
/// Stops when the last level is 1x1, or once `max_level + 1` levels exist
/// for a non-negative `max_level`.
#[must_use]
pub fn generate_levels(base: Raster, max_level: i32) -> Vec<Raster> {
    let mut levels = vec![base];
    while let Some(last) = levels.last() {
        if last.dimensions() == (1, 1)
            || !within_max_level(max_level, levels.len())
        {
            break;
        }
        let next = downscale(last);
        log::debug!(
            "level {}: {}x{}",
            levels.len(),
            next.width(),
            next.height()
        );
        levels.push(next);
    }
    levels
}

/// Decode an image file and build its encoded pyramid.
///
/// # Errors
///
/// Returns [`MipmapError::UnsupportedFormat`] for names not ending in
/// `.png` / `.jpg`, [`MipmapError::Io`] if the file cannot be read, and
/// decode / encode errors from the codecs. The first failure wins.
pub fn create_mipmap(path: &Path, options: &MipmapOptions) -> Result<Mipmap> {
    if !is_supported_path(path) {
        return Err(MipmapError::UnsupportedFormat(path.to_path_buf()));
    }
    let bytes = std::fs::read(path)?;
    log::info!("creating mipmap for {}", path.display());
    create_mipmap_from_bytes(&bytes, options)
}

/// Build an encoded pyramid from PNG or JPEG bytes.
///
/// # Errors
///
/// Returns decode / encode errors from the codecs.
pub fn create_mipmap_from_bytes(
    bytes: &[u8],
    options: &MipmapOptions,
) -> Result<Mipmap> {
    create_mipmap_from_raster(Raster::decode(bytes)?, options)
}

/// Build an encoded pyramid from an already-decoded base level.
///
/// # Errors
///
/// Returns encode errors from the codecs.
pub fn create_mipmap_from_raster(
    base: Raster,
    options: &MipmapOptions,
) -> Result<Mipmap> {
    let start = Instant::now();
    let has_alpha = base.has_alpha();
    let (width, height) = base.dimensions();

    let rasters = generate_levels(base, options.max_level);
    let levels = rasters
        .into_par_iter()
        .map(|raster| encode_level(raster, has_alpha, options.jpeg_quality))
        .collect::<Result<Vec<_>>>()?;

    log::info!(
        "{width}x{height} -> {} levels (alpha: {has_alpha}) in {:.1}ms",
        levels.len(),
        start.elapsed().as_secs_f64() * 1000.0
    );
    Ok(Mipmap { levels, has_alpha })
}

fn encode_level(
    raster: Raster,
    has_alpha: bool,
    jpeg_quality: u8,
) -> Result<MipmapLevel> {
    let (png, jpeg) = rayon::join(
        || encode_png(&raster),
        || {
            (!has_alpha)
                .then(|| encode_jpeg(&raster, jpeg_quality))
                .transpose()
        },
    );
    let (png, jpeg) = (png?, jpeg?);

    let preferred = select_encoding(&png, jpeg.as_deref());
    let url = match (preferred, &jpeg) {
        (Encoding::Jpeg, Some(bytes)) => data_url(Encoding::Jpeg, bytes),
        _ => data_url(Encoding::Png, &png),
    };
    log::debug!(
        "encoded {}x{}: png {}B, jpeg {}, using {:?}",
        raster.width(),
        raster.height(),
        png.len(),
        jpeg.as_ref()
            .map_or_else(|| "skipped".to_owned(), |j| format!("{}B", j.len())),
        preferred
    );

    Ok(MipmapLevel {
        raster,
        png,
        jpeg,
        preferred,
        url,
    })
}

/// PNG unless a JPEG exists and its data URL is no longer than the PNG's.
fn select_encoding(png: &[u8], jpeg: Option<&[u8]>) -> Encoding {
    match jpeg {
        Some(jpeg)
            if data_url_len(Encoding::Png, png)
                >= data_url_len(Encoding::Jpeg, jpeg) =>
        {
            Encoding::Jpeg
        }
        _ => Encoding::Png,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn gradient(width: u32, height: u32, alpha: u8) -> Raster {
        let mut data = Vec::new();
        for row in 0..height {
            for col in 0..width {
                data.extend_from_slice(&[
                    (col * 255 / width.max(1)) as u8,
                    (row * 255 / height.max(1)) as u8,
                    ((col + row) % 256) as u8,
                    alpha,
                ]);
            }
        }
        Raster::new(width, height, data).unwrap()
    }

    #[test]
    fn level_cap() {
        assert!(within_max_level(-1, 1000));
        assert!(!within_max_level(0, 1));
        assert!(within_max_level(2, 2));
        assert!(!within_max_level(2, 3));
    }

    #[test]
    fn uncapped_pyramid_ends_at_one_by_one() {
        let levels = generate_levels(gradient(13, 5, 255), -1);
        let dims: Vec<_> = levels.iter().map(Raster::dimensions).collect();
        assert_eq!(dims, vec![(13, 5), (7, 3), (4, 2), (2, 1), (1, 1)]);
    }

    #[test]
    fn max_level_zero_keeps_only_base() {
        let levels = generate_levels(gradient(8, 8, 255), 0);
        assert_eq!(levels.len(), 1);
        assert_eq!(levels[0].dimensions(), (8, 8));
    }

    #[test]
    fn max_level_caps_depth() {
        let levels = generate_levels(gradient(64, 64, 255), 2);
        assert_eq!(levels.len(), 3);
        assert_eq!(levels[2].dimensions(), (16, 16));
    }

    #[test]
    fn one_by_one_source_is_a_single_level() {
        let levels = generate_levels(gradient(1, 1, 255), -1);
        assert_eq!(levels.len(), 1);
    }

    #[test]
    fn suffix_check() {
        assert!(is_supported_path(Path::new("images/atom.png")));
        assert!(is_supported_path(Path::new("photo.jpg")));
        assert!(!is_supported_path(Path::new("photo.jpeg")));
        assert!(!is_supported_path(Path::new("icon.PNG")));
        assert!(!is_supported_path(Path::new("notes.txt")));
        assert!(!is_supported_path(Path::new("png")));
    }

    #[test]
    fn unsupported_suffix_is_rejected_before_reading() {
        let err = create_mipmap(
            Path::new("/definitely/missing/file.gif"),
            &MipmapOptions::default(),
        )
        .unwrap_err();
        assert!(matches!(err, MipmapError::UnsupportedFormat(_)));
    }

    #[test]
    fn translucent_source_never_gets_jpeg() {
        let mipmap = create_mipmap_from_raster(
            gradient(16, 8, 128),
            &MipmapOptions::default(),
        )
        .unwrap();
        assert!(mipmap.has_alpha);
        assert_eq!(mipmap.len(), 5);
        for level in &mipmap {
            assert!(level.jpeg.is_none());
            assert_eq!(level.preferred, Encoding::Png);
            assert!(level.url.starts_with("data:image/png;base64,"));
            assert_eq!(level.buffer(), level.png.as_slice());
        }
    }

    #[test]
    fn opaque_source_encodes_both_and_picks_shorter() {
        let mipmap = create_mipmap_from_raster(
            gradient(32, 32, 255),
            &MipmapOptions::default(),
        )
        .unwrap();
        assert!(!mipmap.has_alpha);
        for level in &mipmap {
            let jpeg = level.jpeg.as_deref().unwrap();
            let png_len = data_url_len(Encoding::Png, &level.png);
            let jpeg_len = data_url_len(Encoding::Jpeg, jpeg);
            let expected = if png_len < jpeg_len {
                Encoding::Png
            } else {
                Encoding::Jpeg
            };
            assert_eq!(level.preferred, expected);
            assert_eq!(level.url, data_url(expected, level.buffer()));
        }
    }

    #[test]
    fn levels_stay_in_order() {
        let mipmap = create_mipmap_from_raster(
            gradient(40, 20, 255),
            &MipmapOptions::default(),
        )
        .unwrap();
        let widths: Vec<_> = mipmap.iter().map(MipmapLevel::width).collect();
        assert_eq!(widths, vec![40, 20, 10, 5, 3, 2, 1]);
        assert_eq!(mipmap.base().unwrap().height(), 20);
    }

    #[test]
    fn selection_compares_full_url_length() {
        // Same payload length: the JPEG MIME type is one byte longer.
        assert_eq!(select_encoding(b"abc", Some(&b"abc"[..])), Encoding::Png);
        assert_eq!(select_encoding(b"abcdef", Some(&b"abc"[..])), Encoding::Jpeg);
        assert_eq!(select_encoding(b"abc", None), Encoding::Png);
    }
}
