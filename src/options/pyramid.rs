use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::encode::DEFAULT_JPEG_QUALITY;

/// Pyramid generation and encoding parameters.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, JsonSchema)]
#[schemars(title = "Mipmap", inline)]
#[serde(default)]
pub struct MipmapOptions {
    /// Index of the coarsest level to generate. Negative means "down to
    /// 1x1"; `0` keeps only the original.
    #[schemars(title = "Max Level", range(min = -1, max = 31))]
    pub max_level: i32,
    /// JPEG quality (1-100) for opaque sources.
    #[schemars(title = "JPEG Quality", range(min = 1, max = 100))]
    pub jpeg_quality: u8,
}

impl Default for MipmapOptions {
    fn default() -> Self {
        Self {
            max_level: -1,
            jpeg_quality: DEFAULT_JPEG_QUALITY,
        }
    }
}
