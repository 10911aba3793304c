//! In-memory raster surfaces.
//!
//! A `RasterSurface` is the intermediate between decode/render and encode: a
//! fixed-size RGB pixel buffer. Surfaces are cheap value objects created
//! fresh for each encode attempt and never shared between attempts.

use thiserror::Error;

/// Errors from raster surface operations.
#[derive(Debug, Error)]
pub enum RasterError {
    /// Width or height is zero.
    #[error("Invalid dimensions: width ({width}) and height ({height}) must be non-zero")]
    InvalidDimensions { width: u32, height: u32 },

    /// The pixel buffer does not describe a valid image.
    #[error("Corrupted raster data: {0}")]
    Corrupted(String),
}

/// A pixel buffer with fixed dimensions and RGB8 data.
#[derive(Debug, Clone)]
pub struct RasterSurface {
    /// Surface width in pixels.
    pub width: u32,
    /// Surface height in pixels.
    pub height: u32,
    /// RGB pixel data in row-major order (3 bytes per pixel).
    /// Length should be width * height * 3.
    pub pixels: Vec<u8>,
}

impl RasterSurface {
    /// Create a new surface from dimensions and pixel data.
    pub fn new(width: u32, height: u32, pixels: Vec<u8>) -> Self {
        debug_assert_eq!(
            pixels.len(),
            (width as usize) * (height as usize) * 3,
            "Pixel buffer size mismatch"
        );
        Self {
            width,
            height,
            pixels,
        }
    }

    /// Create a surface from an image::RgbImage.
    pub fn from_rgb_image(img: image::RgbImage) -> Self {
        let (width, height) = img.dimensions();
        let pixels = img.into_raw();
        Self {
            width,
            height,
            pixels,
        }
    }

    /// Convert to an image::RgbImage for further processing.
    pub fn to_rgb_image(&self) -> Option<image::RgbImage> {
        image::RgbImage::from_raw(self.width, self.height, self.pixels.clone())
    }

    /// Size of the pixel buffer in bytes.
    pub fn byte_size(&self) -> usize {
        self.pixels.len()
    }

    /// Check if this is an empty/invalid surface.
    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0 || self.pixels.is_empty()
    }

    /// Draw this surface onto a fresh surface of exactly the given size.
    ///
    /// The source is stretched to the target dimensions without preserving
    /// aspect ratio, using Lanczos3 resampling for quality. Matching
    /// dimensions still produce a new surface because each encode attempt
    /// owns its own buffer.
    ///
    /// # Errors
    ///
    /// Returns `RasterError::InvalidDimensions` for a zero target axis and
    /// `RasterError::Corrupted` if the pixel buffer cannot back an image.
    pub fn stretch_to(&self, width: u32, height: u32) -> Result<RasterSurface, RasterError> {
        if width == 0 || height == 0 {
            return Err(RasterError::InvalidDimensions { width, height });
        }

        if self.width == width && self.height == height {
            return Ok(self.clone());
        }

        let rgb_image = self
            .to_rgb_image()
            .ok_or_else(|| RasterError::Corrupted("Failed to create RgbImage".to_string()))?;

        let resized = image::imageops::resize(
            &rgb_image,
            width,
            height,
            image::imageops::FilterType::Lanczos3,
        );

        Ok(RasterSurface::from_rgb_image(resized))
    }
}
