//! The image re-encoding pipeline.
//!
//! Decode the source once, then drive the size-constrained quality search:
//! each attempt draws the decoded image onto a fresh surface of the target
//! dimensions and encodes it at the attempt's quality. Lossless formats skip
//! the search and encode a single time at maximum fidelity.

use crate::decode::decode_image;
use crate::encode::encode_raster;
use crate::error::ProcessError;
use crate::search::{encode_once, search_quality, ProcessedOutput};
use crate::settings::ImageSettings;

/// Re-encode an image to fit the settings' size ceiling.
///
/// # Arguments
///
/// * `source` - The original file bytes, left untouched
/// * `settings` - Target dimensions, format, ceiling, and starting quality
///
/// # Returns
///
/// The best output the search produced. `met_requirement` is false when the
/// full retry budget still could not get under the ceiling; that output is
/// still usable and the caller decides how to surface the warning.
///
/// # Errors
///
/// Invalid settings and undecodable sources abort immediately; an encoder
/// failure aborts the search mid-way. No partial output survives an error.
pub fn process_image(
    source: &[u8],
    settings: &ImageSettings,
) -> Result<ProcessedOutput, ProcessError> {
    settings.validate()?;
    let decoded = decode_image(source)?;

    let attempt = |quality: f32| -> Result<Vec<u8>, ProcessError> {
        let surface = decoded.stretch_to(settings.width, settings.height)?;
        Ok(encode_raster(&surface, settings.format, quality)?)
    };

    if settings.format.is_lossy() {
        search_quality(settings.quality, settings.max_size_kb, attempt)
    } else {
        // No quality dimension: one encode at maximum fidelity, exempt from
        // the ceiling
        encode_once(1.0, attempt)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::raster::RasterSurface;
    use crate::settings::OutputFormat;

    /// A noisy source compresses badly, which makes the search work for it.
    fn noisy_png(width: u32, height: u32) -> Vec<u8> {
        let mut pixels = Vec::with_capacity((width * height * 3) as usize);
        for y in 0..height {
            for x in 0..width {
                pixels.push(((x * 37 + y * 17) % 256) as u8);
                pixels.push(((x * 11 + y * 53) % 256) as u8);
                pixels.push(((x * 7 + y * 3) % 256) as u8);
            }
        }
        let surface = RasterSurface::new(width, height, pixels);
        encode_raster(&surface, OutputFormat::Png, 1.0).unwrap()
    }

    #[test]
    fn test_jpeg_search_reports_consistent_size() {
        let source = noisy_png(200, 100);
        let mut settings = ImageSettings::new();
        settings.width = 2000;
        settings.height = 1000;
        settings.format = OutputFormat::Jpeg;
        settings.max_size_kb = 50.0;
        settings.quality = 0.9;

        let output = process_image(&source, &settings).unwrap();

        assert!(!output.bytes.is_empty());
        // JPEG output regardless of the search outcome
        assert_eq!(&output.bytes[0..2], &[0xFF, 0xD8]);
        // The reported size is exactly the buffer length in KB
        assert_eq!(output.size_kb, output.bytes.len() as f64 / 1024.0);
        // The annotation agrees with the measured size
        assert_eq!(output.met_requirement, output.size_kb <= 50.0);
    }

    #[test]
    fn test_generous_ceiling_met_on_first_attempt() {
        let source = noisy_png(64, 64);
        let mut settings = ImageSettings::new();
        settings.width = 64;
        settings.height = 64;
        settings.max_size_kb = 10_000.0;

        let output = process_image(&source, &settings).unwrap();
        assert!(output.met_requirement);
        assert!(output.size_kb <= 10_000.0);
    }

    #[test]
    fn test_png_single_attempt_no_warning() {
        let source = noisy_png(128, 128);
        let mut settings = ImageSettings::new();
        settings.width = 128;
        settings.height = 128;
        settings.format = OutputFormat::Png;
        // Impossible ceiling; lossless output is exempt anyway
        settings.max_size_kb = 0.5;

        let output = process_image(&source, &settings).unwrap();
        assert!(output.met_requirement);
        assert!(output.size_kb > 0.5);
        assert_eq!(&output.bytes[0..4], &[0x89, 0x50, 0x4E, 0x47]);
    }

    #[test]
    fn test_webp_single_attempt_no_warning() {
        let source = noisy_png(64, 64);
        let mut settings = ImageSettings::new();
        settings.width = 64;
        settings.height = 64;
        settings.format = OutputFormat::WebP;
        settings.max_size_kb = 0.1;

        let output = process_image(&source, &settings).unwrap();
        assert!(output.met_requirement);
        assert_eq!(&output.bytes[0..4], b"RIFF");
    }

    #[test]
    fn test_output_resized_to_settings() {
        let source = noisy_png(100, 50);
        let mut settings = ImageSettings::new();
        settings.width = 40;
        settings.height = 30;
        settings.format = OutputFormat::Png;

        let output = process_image(&source, &settings).unwrap();
        let decoded = crate::decode::decode_image(&output.bytes).unwrap();
        assert_eq!((decoded.width, decoded.height), (40, 30));
    }

    #[test]
    fn test_invalid_settings_rejected_before_decode() {
        let mut settings = ImageSettings::new();
        settings.width = 0;

        // Source is garbage; settings validation must fire first
        let result = process_image(b"not an image", &settings);
        assert!(matches!(result, Err(ProcessError::Settings(_))));
    }

    #[test]
    fn test_undecodable_source_aborts() {
        let settings = ImageSettings::new();
        let result = process_image(b"not an image", &settings);
        assert!(matches!(result, Err(ProcessError::Decode(_))));
    }
}
