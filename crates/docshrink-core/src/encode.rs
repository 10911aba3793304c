//! Raster encoding for the supported output formats.
//!
//! JPEG is the only lossy format and the only one whose output size responds
//! to the quality parameter. PNG and WebP encode losslessly; they accept the
//! quality argument for a uniform call shape but ignore it.

use std::io::Cursor;

use image::codecs::jpeg::JpegEncoder;
use image::codecs::png::PngEncoder;
use image::codecs::webp::WebPEncoder;
use image::ExtendedColorType;
use image::ImageEncoder;
use thiserror::Error;

use crate::raster::RasterSurface;
use crate::settings::OutputFormat;

/// Errors that can occur during encoding.
#[derive(Debug, Error)]
pub enum EncodeError {
    /// Width or height is zero, or the pixel buffer is empty.
    #[error("Invalid surface: width ({width}) and height ({height}) must be non-zero")]
    InvalidSurface { width: u32, height: u32 },

    /// Pixel data length doesn't match the surface dimensions.
    #[error("Invalid pixel data: expected {expected} bytes (width * height * 3), got {actual}")]
    InvalidPixelData { expected: usize, actual: usize },

    /// Quality outside the valid (0, 1] range.
    #[error("Invalid quality: {quality} (must be greater than 0 and at most 1)")]
    InvalidQuality { quality: f32 },

    /// The underlying encoder produced no buffer.
    #[error("Encoding failed: {0}")]
    EncodingFailed(String),
}

/// Encode a surface to the requested format.
///
/// # Arguments
///
/// * `surface` - The pixel buffer to encode
/// * `format` - Target output format
/// * `quality` - Encoder fidelity in (0, 1]; mapped to the JPEG encoder's
///   1-100 scale, ignored by lossless formats
///
/// # Errors
///
/// Returns an error if the surface is empty, the pixel buffer does not match
/// the dimensions, the quality is out of range, or the encoder fails.
pub fn encode_raster(
    surface: &RasterSurface,
    format: OutputFormat,
    quality: f32,
) -> Result<Vec<u8>, EncodeError> {
    if surface.width == 0 || surface.height == 0 {
        return Err(EncodeError::InvalidSurface {
            width: surface.width,
            height: surface.height,
        });
    }

    let expected_len = (surface.width as usize) * (surface.height as usize) * 3;
    if surface.pixels.len() != expected_len {
        return Err(EncodeError::InvalidPixelData {
            expected: expected_len,
            actual: surface.pixels.len(),
        });
    }

    if !(quality > 0.0 && quality <= 1.0) {
        return Err(EncodeError::InvalidQuality { quality });
    }

    let mut buffer = Cursor::new(Vec::new());

    match format {
        OutputFormat::Jpeg => {
            let encoder = JpegEncoder::new_with_quality(&mut buffer, jpeg_quality(quality));
            encoder
                .write_image(
                    &surface.pixels,
                    surface.width,
                    surface.height,
                    ExtendedColorType::Rgb8,
                )
                .map_err(|e| EncodeError::EncodingFailed(e.to_string()))?;
        }
        OutputFormat::Png => {
            let encoder = PngEncoder::new(&mut buffer);
            encoder
                .write_image(
                    &surface.pixels,
                    surface.width,
                    surface.height,
                    ExtendedColorType::Rgb8,
                )
                .map_err(|e| EncodeError::EncodingFailed(e.to_string()))?;
        }
        OutputFormat::WebP => {
            let encoder = WebPEncoder::new_lossless(&mut buffer);
            encoder
                .write_image(
                    &surface.pixels,
                    surface.width,
                    surface.height,
                    ExtendedColorType::Rgb8,
                )
                .map_err(|e| EncodeError::EncodingFailed(e.to_string()))?;
        }
    }

    Ok(buffer.into_inner())
}

/// Map a (0, 1] quality to the JPEG encoder's 1-100 scale.
///
/// The search floor of 0.01 lands on 1, the encoder's own minimum.
fn jpeg_quality(quality: f32) -> u8 {
    ((quality * 100.0).round() as u8).clamp(1, 100)
}
