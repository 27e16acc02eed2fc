//! Single-level, gamma-correct 2x2 reduction.
//!
//! Each output pixel averages a 2x2 block of the source in linear light.
//! Color is weighted by alpha so fully transparent texels contribute no
//! color; alpha itself is a straight average. Blocks that hang off the
//! right or bottom edge of an odd-sized source treat the missing texels as
//! transparent black.

use glam::{DVec3, DVec4};

use crate::raster::Raster;
use crate::util::gamma::{to_encoded, to_linear};

/// Counters collected while downscaling one level.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DownscaleStats {
    /// Output pixels whose whole 2x2 source block had zero alpha. These
    /// have no defined color and are stored as transparent black.
    pub transparent_blocks: usize,
}

/// Dimensions of the level below a `width` x `height` image.
#[must_use]
pub const fn half_dimensions(width: u32, height: u32) -> (u32, u32) {
    (width.div_ceil(2), height.div_ceil(2))
}

/// Produce the next mip level of `source`.
#[must_use]
pub fn downscale(source: &Raster) -> Raster {
    downscale_with_stats(source).0
}

/// [`downscale`], also reporting edge-case counters.
#[must_use]
pub fn downscale_with_stats(source: &Raster) -> (Raster, DownscaleStats) {
    let (width, height) = half_dimensions(source.width(), source.height());
    let mut data = Vec::with_capacity(4 * width as usize * height as usize);
    let mut stats = DownscaleStats::default();

    for row in 0..height {
        for col in 0..width {
            let block = [
                linear_texel(source, 2 * col, 2 * row),
                linear_texel(source, 2 * col + 1, 2 * row),
                linear_texel(source, 2 * col, 2 * row + 1),
                linear_texel(source, 2 * col + 1, 2 * row + 1),
            ];
            let pixel = blend_block(&block).unwrap_or_else(|| {
                stats.transparent_blocks += 1;
                [0; 4]
            });
            data.extend_from_slice(&pixel);
        }
    }

    if stats.transparent_blocks > 0 {
        log::trace!(
            "downscale {}x{} -> {width}x{height}: {} fully transparent blocks",
            source.width(),
            source.height(),
            stats.transparent_blocks
        );
    }

    (Raster::from_parts(width, height, data), stats)
}

/// Source texel converted to linear light, transparent black outside.
fn linear_texel(source: &Raster, col: u32, row: u32) -> DVec4 {
    source.pixel(col, row).map_or(DVec4::ZERO, |[r, g, b, a]| {
        DVec4::new(to_linear(r), to_linear(g), to_linear(b), to_linear(a))
    })
}

/// Alpha-weighted blend of a 2x2 block, re-encoded to bytes.
///
/// Returns `None` when the block carries no alpha at all.
fn blend_block(block: &[DVec4; 4]) -> Option<[u8; 4]> {
    let alpha_sum: f64 = block.iter().map(|p| p.w).sum();
    if alpha_sum == 0.0 {
        return None;
    }
    let weighted: DVec3 = block.iter().map(|p| p.truncate() * p.w).sum();
    let color = weighted / alpha_sum;
    let alpha = alpha_sum / 4.0;
    Some([
        to_encoded(color.x),
        to_encoded(color.y),
        to_encoded(color.z),
        to_encoded(alpha),
    ])
}
