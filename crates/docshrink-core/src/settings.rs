//! Settings value objects for the image and document pipelines.
//!
//! Settings are immutable per processing invocation: the host builds one of
//! these, hands it to a pipeline function, and receives a result. The core
//! never holds mutable cross-invocation state.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors produced while validating settings.
#[derive(Debug, Error)]
pub enum SettingsError {
    /// Width or height is zero.
    #[error("Invalid dimensions: width ({width}) and height ({height}) must be non-zero")]
    InvalidDimensions { width: u32, height: u32 },

    /// Quality outside the valid (0, 1] range.
    #[error("Invalid quality: {quality} (must be greater than 0 and at most 1)")]
    InvalidQuality { quality: f32 },

    /// Size ceiling is zero or negative.
    #[error("Invalid size ceiling: {max_size_kb} KB (must be positive)")]
    InvalidSizeCeiling { max_size_kb: f64 },
}

/// Output formats supported by the raster encoder.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// JPEG, lossy with a quality parameter.
    #[default]
    Jpeg,
    /// PNG, lossless (quality has no effect).
    Png,
    /// WebP, lossless in this encoder (quality has no effect).
    WebP,
}

impl OutputFormat {
    /// MIME type for the encoded bytes.
    pub fn mime(self) -> &'static str {
        match self {
            OutputFormat::Jpeg => "image/jpeg",
            OutputFormat::Png => "image/png",
            OutputFormat::WebP => "image/webp",
        }
    }

    /// Whether this format has a quality dimension.
    ///
    /// Lossy formats participate in the size-constrained quality search;
    /// lossless formats always encode once at maximum fidelity.
    pub fn is_lossy(self) -> bool {
        matches!(self, OutputFormat::Jpeg)
    }

    /// Pick a format from a file extension (without the dot).
    ///
    /// Useful for hosts that default the output format to the source file's
    /// own format. Matching is case-insensitive; unknown extensions return
    /// `None`.
    pub fn from_extension(ext: &str) -> Option<OutputFormat> {
        match ext.to_ascii_lowercase().as_str() {
            "jpg" | "jpeg" => Some(OutputFormat::Jpeg),
            "png" => Some(OutputFormat::Png),
            "webp" => Some(OutputFormat::WebP),
            _ => None,
        }
    }
}

/// Settings for a single image re-encoding invocation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ImageSettings {
    /// Target raster width in pixels.
    pub width: u32,
    /// Target raster height in pixels.
    pub height: u32,
    /// Whether dimension edits derive the other axis from the source aspect
    /// ratio. Consumed by the dimension resolver, not by the pipeline.
    pub keep_aspect_ratio: bool,
    /// Output format.
    pub format: OutputFormat,
    /// Size ceiling in kilobytes.
    pub max_size_kb: f64,
    /// Starting quality for the search, in (0, 1].
    pub quality: f32,
}

impl Default for ImageSettings {
    fn default() -> Self {
        Self {
            width: 1024,
            height: 1024,
            keep_aspect_ratio: true,
            format: OutputFormat::Jpeg,
            max_size_kb: 50.0,
            quality: 0.9,
        }
    }
}

impl ImageSettings {
    /// Create settings with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Check that the settings describe a valid invocation.
    pub fn validate(&self) -> Result<(), SettingsError> {
        validate_common(self.width, self.height, self.quality, self.max_size_kb)
    }
}

/// Settings for a document re-encoding invocation.
///
/// Width and height are the target page box in PDF points, not pixel raster
/// dimensions; each page is scaled uniformly to fit inside the box.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DocumentSettings {
    /// Target page box width in points.
    pub width: u32,
    /// Target page box height in points.
    pub height: u32,
    /// Whether box edits derive the other axis from the first page's aspect
    /// ratio. Consumed by the dimension resolver, not by the pipeline.
    pub keep_aspect_ratio: bool,
    /// Size ceiling for the whole serialized document, in kilobytes.
    pub max_size_kb: f64,
    /// Starting quality for the per-page JPEG encode, in (0, 1].
    pub quality: f32,
}

impl Default for DocumentSettings {
    fn default() -> Self {
        // A4 portrait in points
        Self {
            width: 595,
            height: 842,
            keep_aspect_ratio: true,
            max_size_kb: 100.0,
            quality: 0.8,
        }
    }
}

impl DocumentSettings {
    /// Create settings with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Check that the settings describe a valid invocation.
    pub fn validate(&self) -> Result<(), SettingsError> {
        validate_common(self.width, self.height, self.quality, self.max_size_kb)
    }
}

fn validate_common(
    width: u32,
    height: u32,
    quality: f32,
    max_size_kb: f64,
) -> Result<(), SettingsError> {
    if width == 0 || height == 0 {
        return Err(SettingsError::InvalidDimensions { width, height });
    }
    if !(quality > 0.0 && quality <= 1.0) {
        return Err(SettingsError::InvalidQuality { quality });
    }
    if !(max_size_kb > 0.0) {
        return Err(SettingsError::InvalidSizeCeiling { max_size_kb });
    }
    Ok(())
}
