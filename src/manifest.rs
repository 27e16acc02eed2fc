//! Serializable pyramid descriptions and on-disk level files.
//!
//! A manifest lists every level as `{ width, height, url }`, finest first,
//! which is all a runtime needs to construct its texture or image chain.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

pub use crate::options::ManifestFormat;
use crate::error::Result;
use crate::mipmap::Mipmap;

/// One level entry in a manifest.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ManifestLevel {
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
    /// Data URL of the preferred encoding.
    pub url: String,
}

/// Ordered level list, serialized as a bare array.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Manifest {
    /// Levels, finest first.
    pub levels: Vec<ManifestLevel>,
}

impl From<&Mipmap> for Manifest {
    fn from(mipmap: &Mipmap) -> Self {
        Self {
            levels: mipmap
                .iter()
                .map(|level| ManifestLevel {
                    width: level.width(),
                    height: level.height(),
                    url: level.url.clone(),
                })
                .collect(),
        }
    }
}

impl Manifest {
    /// Pretty-printed JSON array.
    ///
    /// # Errors
    ///
    /// Returns [`crate::MipmapError::Manifest`] if serialization fails.
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// ES module with the level array as its default export.
    ///
    /// # Errors
    ///
    /// Returns [`crate::MipmapError::Manifest`] if serialization fails.
    pub fn to_js_module(&self) -> Result<String> {
        Ok(format!("export default {};\n", self.to_json()?))
    }

    /// Render in the requested format.
    ///
    /// # Errors
    ///
    /// Returns [`crate::MipmapError::Manifest`] if serialization fails.
    pub fn render(&self, format: ManifestFormat) -> Result<String> {
        match format {
            ManifestFormat::Json => self.to_json(),
            ManifestFormat::Js => self.to_js_module(),
        }
    }

    /// Parse a JSON manifest.
    ///
    /// # Errors
    ///
    /// Returns [`crate::MipmapError::Manifest`] on malformed input.
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }
}

/// Write each level's preferred encoding to `dir` as
/// `<stem>-<index>.<png|jpg>`, returning the written paths in level order.
///
/// # Errors
///
/// Returns [`crate::MipmapError::Io`] if the directory or a file cannot be
/// written.
pub fn write_level_files(
    mipmap: &Mipmap,
    dir: &Path,
    stem: &str,
) -> Result<Vec<PathBuf>> {
    std::fs::create_dir_all(dir)?;
    let mut written = Vec::with_capacity(mipmap.len());
    for (index, level) in mipmap.iter().enumerate() {
        let path = dir.join(format!(
            "{stem}-{index}.{}",
            level.preferred.extension()
        ));
        std::fs::write(&path, level.buffer())?;
        log::debug!("wrote {}", path.display());
        written.push(path);
    }
    Ok(written)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mipmap::create_mipmap_from_raster;
    use crate::options::MipmapOptions;
    use crate::raster::Raster;

    fn sample() -> Mipmap {
        let raster = Raster::filled(4, 2, [255, 255, 255, 200]).unwrap();
        create_mipmap_from_raster(raster, &MipmapOptions::default()).unwrap()
    }

    #[test]
    fn json_is_a_bare_array() {
        let manifest = Manifest::from(&sample());
        let json = manifest.to_json().unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        let levels = value.as_array().unwrap();
        assert_eq!(levels.len(), 3);
        assert_eq!(levels[0]["width"], 4);
        assert_eq!(levels[0]["height"], 2);
        assert_eq!(levels[2]["width"], 1);
        assert!(levels[1]["url"]
            .as_str()
            .unwrap()
            .starts_with("data:image/png;base64,"));

        assert_eq!(Manifest::from_json(&json).unwrap(), manifest);
    }

    #[test]
    fn js_module_wraps_json() {
        let manifest = Manifest::from(&sample());
        let js = manifest.render(ManifestFormat::Js).unwrap();
        assert!(js.starts_with("export default ["));
        assert!(js.ends_with("];\n"));
    }

    #[test]
    fn level_files_use_preferred_extension() {
        let dir = tempfile::tempdir().unwrap();
        let mipmap = sample();
        let paths = write_level_files(&mipmap, dir.path(), "atom").unwrap();
        let names: Vec<_> = paths
            .iter()
            .map(|p| p.file_name().unwrap().to_str().unwrap().to_owned())
            .collect();
        assert_eq!(names, vec!["atom-0.png", "atom-1.png", "atom-2.png"]);
        assert_eq!(std::fs::read(&paths[1]).unwrap(), mipmap.levels[1].png);
    }
}
