use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Serialization used for a pyramid manifest.
#[derive(
    Debug,
    Clone,
    Copy,
    Serialize,
    Deserialize,
    PartialEq,
    Eq,
    Default,
    JsonSchema,
)]
#[serde(rename_all = "snake_case")]
pub enum ManifestFormat {
    /// Pretty-printed JSON array.
    #[default]
    Json,
    /// ES module whose default export is the level array.
    Js,
}

/// Where and how results are written.
#[derive(
    Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default, JsonSchema,
)]
#[schemars(title = "Output", inline)]
#[serde(default)]
pub struct OutputOptions {
    /// Manifest serialization.
    pub format: ManifestFormat,
    /// Also write each level as its own image file.
    pub write_levels: bool,
}
