//! Binary artifact metadata.
//!
//! The only representation of an image that survives past the bridge
//! boundary. The decoded bytes themselves stay with the wrapper that
//! produced them.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Image encoding requested by the caller.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ImageFormat {
    #[default]
    Png,
    Jpeg,
}

impl ImageFormat {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Png => "png",
            Self::Jpeg => "jpeg",
        }
    }
}

impl std::fmt::Display for ImageFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for ImageFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "png" => Ok(Self::Png),
            "jpeg" | "jpg" => Ok(Self::Jpeg),
            other => Err(format!("unsupported image format: {other}")),
        }
    }
}

/// Size and dimension metadata for a captured image.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ArtifactMetadata {
    /// Destination path, when the caller asked for one.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub path: Option<PathBuf>,
    pub width: u32,
    pub height: u32,
    /// Estimated from the base64 length, not measured on disk.
    #[serde(rename = "sizeKB")]
    pub size_kb: u64,
    pub format: ImageFormat,
}
