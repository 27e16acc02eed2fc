//! Generator options with TOML preset support.
//!
//! Options serialize to/from TOML so a build can keep per-asset presets
//! (for example capping the pyramid depth for UI sprites) next to the
//! source images.

mod output;
mod pyramid;

use std::path::Path;

pub use output::{ManifestFormat, OutputOptions};
pub use pyramid::MipmapOptions;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::error::MipmapError;

/// Top-level options container. All sub-structs use `#[serde(default)]` so
/// partial TOML files (e.g. only overriding `[mipmap]`) work correctly.
#[derive(
    Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default, JsonSchema,
)]
#[serde(default)]
pub struct Options {
    /// Pyramid generation parameters.
    pub mipmap: MipmapOptions,
    /// Output parameters.
    pub output: OutputOptions,
}

impl Options {
    /// Generate JSON Schema describing the options.
    #[must_use]
    pub fn json_schema() -> schemars::Schema {
        schemars::schema_for!(Options)
    }

    /// Load options from a TOML file. Missing fields use defaults.
    ///
    /// # Errors
    ///
    /// Returns [`MipmapError::Io`] if the file cannot be read and
    /// [`MipmapError::OptionsParse`] if it is not valid options TOML.
    pub fn load(path: &Path) -> Result<Self, MipmapError> {
        let content = std::fs::read_to_string(path).map_err(MipmapError::Io)?;
        Self::from_toml(&content)
    }

    /// Parse options from a TOML string.
    ///
    /// # Errors
    ///
    /// Returns [`MipmapError::OptionsParse`] on malformed input.
    pub fn from_toml(content: &str) -> Result<Self, MipmapError> {
        toml::from_str(content)
            .map_err(|e| MipmapError::OptionsParse(e.to_string()))
    }

    /// Save options to a TOML file (pretty-printed).
    ///
    /// # Errors
    ///
    /// Returns [`MipmapError::OptionsParse`] if serialization fails and
    /// [`MipmapError::Io`] if the file cannot be written.
    pub fn save(&self, path: &Path) -> Result<(), MipmapError> {
        let content = toml::to_string_pretty(self)
            .map_err(|e| MipmapError::OptionsParse(e.to_string()))?;
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(MipmapError::Io)?;
        }
        std::fs::write(path, content).map_err(MipmapError::Io)
    }
}
