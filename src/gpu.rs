//! Upload of a generated pyramid into a mipmapped wgpu texture.
//!
//! wgpu derives level sizes as `max(1, base >> level)`, rounding down,
//! while the downscaler rounds up. Chains built from power-of-two sources
//! agree; others are rejected with [`MipmapError::IncompatibleChain`]
//! rather than silently resampled.
//!
//! The upload tests need a real adapter and return early on machines
//! without one (headless CI), so there only the size checks run.

use crate::error::{MipmapError, Result};
use crate::mipmap::Mipmap;
use crate::raster::Raster;

/// Size wgpu expects for `level` of a `base` sized texture.
#[must_use]
pub const fn gpu_level_size(base: (u32, u32), level: u32) -> (u32, u32) {
    if level >= u32::BITS {
        return (1, 1);
    }
    let (w, h) = (base.0 >> level, base.1 >> level);
    (if w == 0 { 1 } else { w }, if h == 0 { 1 } else { h })
}

/// Check every level against the sizes wgpu will allocate.
///
/// # Errors
///
/// Returns [`MipmapError::IncompatibleChain`] for the first mismatching
/// level.
pub fn check_chain(levels: &[&Raster]) -> Result<()> {
    let Some(base) = levels.first() else {
        return Ok(());
    };
    for (level, raster) in levels.iter().enumerate() {
        let expected = gpu_level_size(base.dimensions(), level as u32);
        if raster.dimensions() != expected {
            return Err(MipmapError::IncompatibleChain {
                level,
                expected,
                actual: raster.dimensions(),
            });
        }
    }
    Ok(())
}

/// A sampled texture holding a full mip chain, plus its default view.
pub struct MipmapTexture {
    /// The underlying GPU texture.
    pub texture: wgpu::Texture,
    /// A view covering every mip level.
    pub view: wgpu::TextureView,
}

impl MipmapTexture {
    /// Create an `Rgba8UnormSrgb` texture and write every level of
    /// `mipmap` into it.
    ///
    /// # Errors
    ///
    /// Returns [`MipmapError::IncompatibleChain`] if the pyramid sizes do
    /// not match the wgpu mip chain.
    pub fn upload(
        device: &wgpu::Device,
        queue: &wgpu::Queue,
        mipmap: &Mipmap,
    ) -> Result<Self> {
        let rasters: Vec<&Raster> =
            mipmap.iter().map(|level| &level.raster).collect();
        Self::upload_rasters(device, queue, &rasters)
    }

    /// [`MipmapTexture::upload`] for a raw, unencoded pyramid.
    ///
    /// # Errors
    ///
    /// Returns [`MipmapError::IncompatibleChain`] if the pyramid sizes do
    /// not match the wgpu mip chain.
    pub fn upload_rasters(
        device: &wgpu::Device,
        queue: &wgpu::Queue,
        levels: &[&Raster],
    ) -> Result<Self> {
        check_chain(levels)?;
        let (width, height) =
            levels.first().map_or((1, 1), |base| base.dimensions());

        let texture = device.create_texture(&wgpu::TextureDescriptor {
            label: Some("Mipmap"),
            size: wgpu::Extent3d {
                width,
                height,
                depth_or_array_layers: 1,
            },
            mip_level_count: levels.len().max(1) as u32,
            sample_count: 1,
            dimension: wgpu::TextureDimension::D2,
            format: wgpu::TextureFormat::Rgba8UnormSrgb,
            usage: wgpu::TextureUsages::TEXTURE_BINDING
                | wgpu::TextureUsages::COPY_DST,
            view_formats: &[],
        });

        for (mip_level, raster) in levels.iter().enumerate() {
            let (w, h) = raster.dimensions();
            queue.write_texture(
                wgpu::TexelCopyTextureInfo {
                    texture: &texture,
                    mip_level: mip_level as u32,
                    origin: wgpu::Origin3d::ZERO,
                    aspect: wgpu::TextureAspect::All,
                },
                raster.as_bytes(),
                wgpu::TexelCopyBufferLayout {
                    offset: 0,
                    bytes_per_row: Some(4 * w),
                    rows_per_image: Some(h),
                },
                wgpu::Extent3d {
                    width: w,
                    height: h,
                    depth_or_array_layers: 1,
                },
            );
        }
        log::debug!(
            "uploaded {width}x{height} texture with {} mip levels",
            levels.len()
        );

        let view = texture.create_view(&wgpu::TextureViewDescriptor::default());
        Ok(Self { texture, view })
    }
}
